use anyhow::{Result, bail};

use arrayuniform_engine::core::{App, AppControl, FrameCtx};
use arrayuniform_engine::render::{RenderCtx, UniformArrayRenderer};
use arrayuniform_engine::shader::ShaderLoader;
use arrayuniform_engine::uniforms::UniformBlock;

/// The demo: one quad whose fragment shader reads a four-element uniform array.
pub struct UniformArrayDemo {
    shaders: ShaderLoader,
    data: UniformBlock,
    renderer: Option<UniformArrayRenderer>,
}

impl UniformArrayDemo {
    pub fn new(shaders: ShaderLoader) -> Self {
        Self {
            shaders,
            data: UniformBlock::sample(),
            renderer: None,
        }
    }
}

impl App for UniformArrayDemo {
    fn init(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        log::info!("loading shaders from {}", self.shaders.root().display());
        self.renderer = Some(UniformArrayRenderer::new(ctx, &self.shaders)?);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        let Some(renderer) = self.renderer.as_mut() else {
            bail!("frame requested before the renderer was initialized");
        };
        renderer.render(ctx, &self.data)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrayuniform_engine::device::GraphicsBackend;
    use arrayuniform_engine::render::{FramePhase, FramePlan, ResourceKind};
    use arrayuniform_engine::uniforms::UniformElement;

    use super::*;

    const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
    const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Device on wgpu's no-op backend; any validation error panics the test.
    fn noop_device() -> (wgpu::Device, wgpu::Queue) {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::NOOP,
            backend_options: wgpu::BackendOptions {
                noop: wgpu::NoopBackendOptions { enable: true },
                ..Default::default()
            },
            ..Default::default()
        });
        let adapter =
            pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))
                .unwrap();
        let (device, queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default())).unwrap();
        device.on_uncaptured_error(Arc::new(|err: wgpu::Error| {
            panic!("GPU validation error: {err}")
        }));
        (device, queue)
    }

    fn built_shaders() -> ShaderLoader {
        ShaderLoader::new(env!("ARRAYUNIFORM_SHADER_DIR"))
    }

    #[test]
    fn starts_with_sample_block() {
        let demo = UniformArrayDemo::new(ShaderLoader::new("Shaders"));
        assert_eq!(demo.data, UniformBlock::sample());
        assert!(demo.renderer.is_none());
    }

    #[test]
    fn renderer_builds_for_every_backend() {
        let (device, queue) = noop_device();
        let shaders = built_shaders();

        for backend in GraphicsBackend::ALL {
            let ctx = RenderCtx::new(&device, &queue, backend, COLOR_FORMAT, DEPTH_FORMAT);
            let renderer = UniformArrayRenderer::new(&ctx, &shaders)
                .unwrap_or_else(|err| panic!("{backend:?}: {err}"));

            let resources = renderer.resources();
            let kinds: Vec<ResourceKind> = resources.ledger.iter().map(|r| r.kind).collect();
            assert_eq!(
                kinds,
                [
                    ResourceKind::Buffer,
                    ResourceKind::Shader,
                    ResourceKind::Shader,
                    ResourceKind::ResourceLayout,
                    ResourceKind::Buffer,
                    ResourceKind::ResourceSet,
                    ResourceKind::PipelineLayout,
                    ResourceKind::Pipeline,
                ],
                "{backend:?}"
            );

            let size_of = |label: &str| {
                resources
                    .ledger
                    .iter()
                    .find(|r| r.label == label)
                    .and_then(|r| r.size)
            };
            assert_eq!(size_of("arrayuniform quad vertices"), Some(96));
            assert_eq!(size_of("arrayuniform uniform block"), Some(64));
            assert_eq!(resources.vertex_buffer.size(), 96);
            assert_eq!(resources.uniform_buffer.size(), 64);

            assert_eq!(renderer.plan(), &FramePlan::default());
            assert_eq!(renderer.phase(), FramePhase::Idle);

            let block = UniformBlock::new([UniformElement::ONE; 4]);
            renderer.upload(ctx.queue, &block);
            renderer.upload(ctx.queue, &UniformBlock::sample());
        }
    }

    #[test]
    fn init_creates_the_renderer() {
        let (device, queue) = noop_device();
        let ctx = RenderCtx::new(
            &device,
            &queue,
            GraphicsBackend::Vulkan,
            COLOR_FORMAT,
            DEPTH_FORMAT,
        );

        let mut demo = UniformArrayDemo::new(built_shaders());
        demo.init(&ctx).unwrap();
        assert!(demo.renderer.is_some());
    }

    #[test]
    fn init_fails_without_shader_files() {
        let (device, queue) = noop_device();
        let ctx = RenderCtx::new(
            &device,
            &queue,
            GraphicsBackend::OpenGl,
            COLOR_FORMAT,
            DEPTH_FORMAT,
        );

        let dir = tempfile::tempdir().unwrap();
        let mut demo = UniformArrayDemo::new(ShaderLoader::new(dir.path()));
        assert!(demo.init(&ctx).is_err());
        assert!(demo.renderer.is_none());
    }
}
