use winit::window::Window;

use crate::device::Gpu;

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub frame_index: u64,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Presents a submitted surface texture.
    pub fn present(&self, surface_texture: wgpu::SurfaceTexture) {
        self.window.pre_present_notify();
        surface_texture.present();
    }
}
