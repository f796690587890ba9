use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;

/// What the runtime should do in response to a window event.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum LoopAction {
    Render,
    Resize(PhysicalSize<u32>),
    /// Scale factor changed; the new drawable size must be re-read from the window.
    Rescale,
    Close,
    Ignore,
}

/// Tracks whether the window still exists.
///
/// Once a close is observed every later event is ignored, so nothing is drawn
/// after the user closes the window.
#[derive(Debug)]
pub(crate) struct WindowLifecycle {
    exists: bool,
}

impl WindowLifecycle {
    pub(crate) fn new() -> Self {
        Self { exists: true }
    }

    pub(crate) fn exists(&self) -> bool {
        self.exists
    }

    pub(crate) fn on_event(&mut self, event: &WindowEvent) -> LoopAction {
        if !self.exists {
            return LoopAction::Ignore;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.exists = false;
                LoopAction::Close
            }
            WindowEvent::RedrawRequested => LoopAction::Render,
            WindowEvent::Resized(size) => LoopAction::Resize(*size),
            WindowEvent::ScaleFactorChanged { .. } => LoopAction::Rescale,
            _ => LoopAction::Ignore,
        }
    }
}
