use super::GraphicsBackend;
use crate::error::EngineResult;

/// Initialization parameters for the GPU layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Explicit backend request.
    ///
    /// `None` selects the platform default among Direct3D 12, Vulkan and OpenGL.
    /// Any other backend fails before the instance is created.
    pub backend: Option<wgpu::Backend>,

    /// Prefer an sRGB surface format when available.
    ///
    /// The demo clears to exact byte values, so it asks for a linear (non-sRGB) format.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Format of the depth attachment paired with the surface.
    pub depth_format: wgpu::TextureFormat,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    /// Validates the explicit backend request, if any.
    pub fn requested_backend(&self) -> EngineResult<Option<GraphicsBackend>> {
        self.backend.map(GraphicsBackend::from_wgpu).transpose()
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backend: None,
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            depth_format: wgpu::TextureFormat::Depth32Float,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn default_requests_nothing() {
        assert_eq!(GpuInit::default().requested_backend().unwrap(), None);
    }

    #[test]
    fn vulkan_request_is_accepted() {
        let init = GpuInit {
            backend: Some(wgpu::Backend::Vulkan),
            ..GpuInit::default()
        };
        assert_eq!(init.requested_backend().unwrap(), Some(GraphicsBackend::Vulkan));
    }

    #[test]
    fn metal_request_fails() {
        let init = GpuInit {
            backend: Some(wgpu::Backend::Metal),
            ..GpuInit::default()
        };
        assert!(matches!(
            init.requested_backend(),
            Err(EngineError::UnsupportedBackend(wgpu::Backend::Metal))
        ));
    }
}
