use std::ops::Range;

use crate::error::{EngineError, EngineResult};
use crate::geometry::QUAD_VERTEX_COUNT;

/// Cornflower blue, RGBA 100/149/237/255.
pub const CORNFLOWER_BLUE: wgpu::Color = wgpu::Color {
    r: 100.0 / 255.0,
    g: 149.0 / 255.0,
    b: 237.0 / 255.0,
    a: 1.0,
};

/// Where a frame is in its record/submit/present cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum FramePhase {
    #[default]
    Idle,
    Recording,
    Submitted,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStep {
    Begin,
    Submit,
    Present,
}

impl FramePhase {
    /// `Idle -Begin-> Recording -Submit-> Submitted -Present-> Idle`; anything else is an error.
    pub fn advance(self, step: FrameStep) -> EngineResult<Self> {
        match (self, step) {
            (Self::Idle, FrameStep::Begin) => Ok(Self::Recording),
            (Self::Recording, FrameStep::Submit) => Ok(Self::Submitted),
            (Self::Submitted, FrameStep::Present) => Ok(Self::Idle),
            (phase, step) => Err(EngineError::FrameOrder { phase, step }),
        }
    }
}

/// Arguments of a non-indexed draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawArgs {
    pub vertex_count: u32,
    pub instance_count: u32,
    pub first_vertex: u32,
    pub first_instance: u32,
}

impl DrawArgs {
    pub fn vertices(&self) -> Range<u32> {
        self.first_vertex..self.first_vertex + self.vertex_count
    }

    pub fn instances(&self) -> Range<u32> {
        self.first_instance..self.first_instance + self.instance_count
    }
}

/// Commands recorded for every frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FramePlan {
    pub clear_color: wgpu::Color,
    pub clear_depth: f32,
    pub vertex_buffer_slot: u32,
    pub resource_set_slot: u32,
    pub draw: DrawArgs,
}

impl Default for FramePlan {
    fn default() -> Self {
        Self {
            clear_color: CORNFLOWER_BLUE,
            clear_depth: 1.0,
            vertex_buffer_slot: 0,
            resource_set_slot: 0,
            draw: DrawArgs {
                vertex_count: QUAD_VERTEX_COUNT,
                instance_count: 1,
                first_vertex: 0,
                first_instance: 0,
            },
        }
    }
}

impl FramePlan {
    /// Binds and draws into an open pass whose attachments were cleared per the plan.
    pub fn encode(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        vertex_buffer: &wgpu::Buffer,
        pipeline: &wgpu::RenderPipeline,
        resource_set: &wgpu::BindGroup,
    ) {
        pass.set_vertex_buffer(self.vertex_buffer_slot, vertex_buffer.slice(..));
        pass.set_pipeline(pipeline);
        pass.set_bind_group(self.resource_set_slot, resource_set, &[]);
        pass.draw(self.draw.vertices(), self.draw.instances());
    }
}
