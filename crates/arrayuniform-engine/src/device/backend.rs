use crate::error::{EngineError, EngineResult};

/// Graphics backends the demo ships shaders for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GraphicsBackend {
    Direct3D,
    Vulkan,
    OpenGl,
}

impl GraphicsBackend {
    pub const ALL: [GraphicsBackend; 3] = [Self::Direct3D, Self::Vulkan, Self::OpenGl];

    /// Maps a wgpu backend onto a supported one.
    ///
    /// Metal, browser WebGPU and the noop backend have no shader artifacts and are rejected.
    pub fn from_wgpu(backend: wgpu::Backend) -> EngineResult<Self> {
        match backend {
            wgpu::Backend::Dx12 => Ok(Self::Direct3D),
            wgpu::Backend::Vulkan => Ok(Self::Vulkan),
            wgpu::Backend::Gl => Ok(Self::OpenGl),
            other => Err(EngineError::UnsupportedBackend(other)),
        }
    }

    pub fn to_wgpu(self) -> wgpu::Backend {
        match self {
            Self::Direct3D => wgpu::Backend::Dx12,
            Self::Vulkan => wgpu::Backend::Vulkan,
            Self::OpenGl => wgpu::Backend::Gl,
        }
    }

    /// Instance backend mask for an optional explicit request.
    ///
    /// `None` lets wgpu pick the platform default among the supported backends.
    pub fn instance_mask(requested: Option<Self>) -> wgpu::Backends {
        match requested {
            Some(b) => wgpu::Backends::from(b.to_wgpu()),
            None => wgpu::Backends::DX12 | wgpu::Backends::VULKAN | wgpu::Backends::GL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_backends_round_trip() {
        for b in GraphicsBackend::ALL {
            assert_eq!(GraphicsBackend::from_wgpu(b.to_wgpu()).unwrap(), b);
        }
    }

    #[test]
    fn metal_is_rejected() {
        let err = GraphicsBackend::from_wgpu(wgpu::Backend::Metal).unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedBackend(wgpu::Backend::Metal)));
    }

    #[test]
    fn browser_webgpu_is_rejected() {
        assert!(GraphicsBackend::from_wgpu(wgpu::Backend::BrowserWebGpu).is_err());
    }

    #[test]
    fn default_mask_excludes_metal() {
        let mask = GraphicsBackend::instance_mask(None);
        assert!(mask.contains(wgpu::Backends::VULKAN));
        assert!(mask.contains(wgpu::Backends::GL));
        assert!(mask.contains(wgpu::Backends::DX12));
        assert!(!mask.contains(wgpu::Backends::METAL));
    }

    #[test]
    fn explicit_request_narrows_mask() {
        let mask = GraphicsBackend::instance_mask(Some(GraphicsBackend::OpenGl));
        assert_eq!(mask, wgpu::Backends::GL);
    }
}
