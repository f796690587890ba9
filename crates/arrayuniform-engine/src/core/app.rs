use anyhow::Result;
use winit::event::WindowEvent;

use super::ctx::FrameCtx;
use crate::render::RenderCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the demo binary.
pub trait App {
    /// Called once after the window and device exist, before the first frame.
    ///
    /// An error aborts the runtime; nothing is retried.
    fn init(&mut self, ctx: &RenderCtx<'_>) -> Result<()>;

    /// Called for window events that reach a live window.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl>;
}
