use serde::{Deserialize, Serialize};

/// Drawing layers of one chart surface, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Grid,
    Series,
    Volume,
    Profile,
    PinnedProfiles,
    Selection,
    Axis,
    Crosshair,
}

impl CanvasLayerKind {
    pub const CANONICAL_ORDER: [Self; 9] = [
        Self::Background,
        Self::Grid,
        Self::Series,
        Self::Volume,
        Self::Profile,
        Self::PinnedProfiles,
        Self::Selection,
        Self::Axis,
        Self::Crosshair,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStack {
    pub layers: Vec<CanvasLayerKind>,
}

impl LayerStack {
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            layers: CanvasLayerKind::CANONICAL_ORDER.to_vec(),
        }
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::canonical()
    }
}
