use crate::core::SurfaceSize;

use super::{CanvasLayerKind, DrawCommand, LayerStack, RenderFrame};

#[derive(Debug, Clone, PartialEq)]
pub struct LayerCommands {
    pub kind: CanvasLayerKind,
    pub commands: Vec<DrawCommand>,
}

/// Render frame under construction, bucketed by layer.
///
/// Builders may emit into layers in any order; `flatten` restores the
/// stack order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredRenderFrame {
    pub surface: SurfaceSize,
    pub layers: Vec<LayerCommands>,
}

impl LayeredRenderFrame {
    #[must_use]
    pub fn from_stack(surface: SurfaceSize, stack: LayerStack) -> Self {
        let layers = stack
            .layers
            .into_iter()
            .map(|kind| LayerCommands {
                kind,
                commands: Vec::new(),
            })
            .collect();
        Self { surface, layers }
    }

    #[must_use]
    pub fn canonical(surface: SurfaceSize) -> Self {
        Self::from_stack(surface, LayerStack::canonical())
    }

    /// Appends a command to `kind`; commands for layers missing from the stack are dropped.
    pub fn push(&mut self, kind: CanvasLayerKind, command: impl Into<DrawCommand>) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.commands.push(command.into());
        }
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&LayerCommands> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    #[must_use]
    pub fn flatten(self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.surface);
        for layer in self.layers {
            frame.commands.extend(layer.commands);
        }
        frame
    }

    #[must_use]
    pub fn flatten_layers(&self, include_layers: &[CanvasLayerKind]) -> RenderFrame {
        let mut frame = RenderFrame::new(self.surface);
        for layer in &self.layers {
            if !include_layers.contains(&layer.kind) {
                continue;
            }
            frame.commands.extend(layer.commands.iter().cloned());
        }
        frame
    }

    fn layer_mut(&mut self, kind: CanvasLayerKind) -> Option<&mut LayerCommands> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::LayeredRenderFrame;
    use crate::core::SurfaceSize;
    use crate::render::{
        CanvasLayerKind, Color, DrawCommand, LinePrimitive, TextHAlign, TextPrimitive,
    };

    #[test]
    fn layered_render_frame_flattens_in_stack_order() {
        let mut layered = LayeredRenderFrame::canonical(SurfaceSize::new(100, 50));

        layered.push(
            CanvasLayerKind::Crosshair,
            TextPrimitive::new(
                "x",
                2.0,
                4.0,
                10.0,
                Color::rgb(1.0, 1.0, 1.0),
                TextHAlign::Right,
            ),
        );
        layered.push(
            CanvasLayerKind::Series,
            LinePrimitive::new(0.0, 2.0, 5.0, 3.0, 1.0, Color::rgb(0.8, 0.2, 0.2)),
        );
        layered.push(
            CanvasLayerKind::Grid,
            LinePrimitive::new(0.0, 1.0, 5.0, 1.0, 1.0, Color::rgb(0.2, 0.2, 0.2)),
        );

        let only_grid = layered.flatten_layers(&[CanvasLayerKind::Grid]);
        assert_eq!(only_grid.len(), 1);
        let crosshair = layered.layer(CanvasLayerKind::Crosshair).expect("layer");
        assert_eq!(crosshair.commands.len(), 1);

        let flattened = layered.flatten();
        assert_eq!(flattened.len(), 3);
        let line_ys: Vec<f64> = flattened.lines().map(|line| line.y1).collect();
        assert_eq!(line_ys, vec![1.0, 2.0]);
        assert!(matches!(flattened.commands[2], DrawCommand::Text(_)));
    }
}
