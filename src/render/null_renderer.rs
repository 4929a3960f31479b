use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// without a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_command_count: usize,
    pub last_text_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_command_count = frame.len();
        self.last_text_count = frame.texts().count();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
