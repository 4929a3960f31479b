use crate::core::SurfaceSize;
use crate::error::{ChartError, ChartResult};
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive};

/// One primitive draw operation in surface pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect(RectPrimitive),
    Line(LinePrimitive),
    Text(TextPrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Rect(rect) => rect.validate(),
            Self::Line(line) => line.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

impl From<RectPrimitive> for DrawCommand {
    fn from(rect: RectPrimitive) -> Self {
        Self::Rect(rect)
    }
}

impl From<LinePrimitive> for DrawCommand {
    fn from(line: LinePrimitive) -> Self {
        Self::Line(line)
    }
}

impl From<TextPrimitive> for DrawCommand {
    fn from(text: TextPrimitive) -> Self {
        Self::Text(text)
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Commands are painted in list order; later commands draw over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub surface: SurfaceSize,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            surface,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: impl Into<DrawCommand>) {
        self.commands.push(command.into());
    }

    #[must_use]
    pub fn with_command(mut self, command: impl Into<DrawCommand>) -> Self {
        self.push(command);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.surface.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.surface.width,
                height: self.surface.height,
            });
        }
        for command in &self.commands {
            command.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    /// Finds the first text command with exactly this content.
    #[must_use]
    pub fn find_text(&self, content: &str) -> Option<&TextPrimitive> {
        self.texts().find(|text| text.text == content)
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawCommand, RenderFrame};
    use crate::core::SurfaceSize;
    use crate::render::{Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};

    #[test]
    fn commands_keep_insertion_order_across_kinds() {
        let color = Color::rgb(0.5, 0.5, 0.5);
        let frame = RenderFrame::new(SurfaceSize::new(100, 50))
            .with_command(RectPrimitive::new(0.0, 0.0, 100.0, 50.0, color))
            .with_command(LinePrimitive::new(0.0, 1.0, 5.0, 1.0, 1.0, color))
            .with_command(TextPrimitive::new("a", 1.0, 1.0, 10.0, color, TextHAlign::Left));

        assert_eq!(frame.len(), 3);
        assert!(matches!(frame.commands[0], DrawCommand::Rect(_)));
        assert!(matches!(frame.commands[1], DrawCommand::Line(_)));
        assert!(matches!(frame.commands[2], DrawCommand::Text(_)));
        assert_eq!(frame.lines().count(), 1);
        assert!(frame.find_text("a").is_some());
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn zero_surface_is_rejected() {
        let frame = RenderFrame::new(SurfaceSize::new(0, 10));
        assert!(frame.validate().is_err());
    }
}
