use anyhow::{Result, anyhow};

use crate::core::{AppControl, FrameCtx};
use crate::device::SurfaceErrorAction;
use crate::error::{EngineError, EngineResult};
use crate::geometry::{QUAD_VERTICES, QUAD_VERTEX_COUNT, Vertex};
use crate::shader::{ShaderLoader, ShaderStage};
use crate::uniforms::UniformBlock;

use super::{
    DemoResources, FramePhase, FramePlan, FrameStep, PipelineSettings, RenderCtx,
    ResourceFactory, uniform_layout_entries,
};

/// Draws the full-screen quad with the uniform block bound to the fragment stage.
///
/// All GPU objects are created in [`UniformArrayRenderer::new`]; a frame only
/// rewrites the uniform buffer and replays the [`FramePlan`].
pub struct UniformArrayRenderer {
    resources: DemoResources,
    plan: FramePlan,
    phase: FramePhase,
}

impl UniformArrayRenderer {
    pub fn new(ctx: &RenderCtx<'_>, shaders: &ShaderLoader) -> EngineResult<Self> {
        Self::with_settings(ctx, shaders, PipelineSettings::default(), FramePlan::default())
    }

    pub fn with_settings(
        ctx: &RenderCtx<'_>,
        shaders: &ShaderLoader,
        settings: PipelineSettings,
        plan: FramePlan,
    ) -> EngineResult<Self> {
        let mut factory = ResourceFactory::new(ctx.device);

        let vertices: &[u8] = bytemuck::cast_slice(&QUAD_VERTICES);
        let expected = QUAD_VERTEX_COUNT as u64 * Vertex::SIZE;
        if vertices.len() as u64 != expected {
            return Err(EngineError::SizeMismatch {
                what: "vertex buffer",
                expected,
                actual: vertices.len() as u64,
            });
        }
        let vertex_buffer = factory.create_vertex_buffer("quad vertices", vertices);

        let vertex = shaders.load(&mut factory, "Vertex", ShaderStage::Vertex, ctx.backend)?;
        let fragment = shaders.load(&mut factory, "Fragment", ShaderStage::Fragment, ctx.backend)?;

        let resource_layout =
            factory.create_resource_layout("uniform block layout", &uniform_layout_entries());

        let uniform_buffer =
            factory.create_uniform_buffer("uniform block", UniformBlock::SIZE as u64);
        UniformBlock::check_buffer_size(uniform_buffer.size())?;

        let resource_set = factory.create_resource_set(
            "uniform block set",
            &resource_layout,
            &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        );

        let pipeline_layout = factory.create_pipeline_layout("pipeline layout", &[&resource_layout]);
        let pipeline = settings.build(
            &mut factory,
            &pipeline_layout,
            &vertex,
            &fragment,
            ctx.surface_format,
            ctx.depth_format,
        );

        let ledger = factory.into_ledger();
        log::info!(
            "pipeline ready on {:?}: {} GPU resources, output {:?}",
            ctx.backend,
            ledger.len(),
            ctx.surface_format
        );

        Ok(Self {
            resources: DemoResources {
                vertex_buffer,
                uniform_buffer,
                vertex_shader: vertex.module,
                fragment_shader: fragment.module,
                resource_layout,
                resource_set,
                pipeline_layout,
                pipeline,
                ledger,
            },
            plan,
            phase: FramePhase::Idle,
        })
    }

    pub fn resources(&self) -> &DemoResources {
        &self.resources
    }

    pub fn plan(&self) -> &FramePlan {
        &self.plan
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Overwrites the whole uniform buffer with `block`.
    pub fn upload(&self, queue: &wgpu::Queue, block: &UniformBlock) {
        queue.write_buffer(&self.resources.uniform_buffer, 0, &block.to_bytes());
    }

    /// Uploads `block`, records the frame plan, submits and presents.
    ///
    /// Surface errors that allow recovery skip the frame; fatal ones are returned as errors.
    pub fn render(&mut self, ctx: &mut FrameCtx<'_, '_>, block: &UniformBlock) -> Result<AppControl> {
        self.upload(ctx.gpu.queue(), block);

        let mut frame = match ctx.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::warn!("surface unavailable: {err}");
                return surface_error_control(ctx.gpu.handle_surface_error(err));
            }
        };

        self.phase = self.phase.advance(FrameStep::Begin)?;

        // Pass is dropped before the encoder is moved into submit().
        {
            let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("arrayuniform pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.plan.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: ctx.gpu.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.plan.clear_depth),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            self.plan.encode(
                &mut pass,
                &self.resources.vertex_buffer,
                &self.resources.pipeline,
                &self.resources.resource_set,
            );
        }

        let surface_texture = ctx.gpu.submit(frame);
        self.phase = self.phase.advance(FrameStep::Submit)?;

        ctx.present(surface_texture);
        self.phase = self.phase.advance(FrameStep::Present)?;

        log::trace!("frame {} presented", ctx.frame_index);
        Ok(AppControl::Continue)
    }
}

/// Recoverable surface errors keep the loop running; a fatal one ends it with an error.
fn surface_error_control(action: SurfaceErrorAction) -> Result<AppControl> {
    match action {
        SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => Ok(AppControl::Continue),
        SurfaceErrorAction::Fatal => Err(anyhow!("surface lost: GPU is out of memory")),
    }
}
