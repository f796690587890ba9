//! GPU rendering subsystem.
//!
//! Everything the demo draws with is created once through [`ResourceFactory`],
//! owned by [`DemoResources`], and replayed every frame from a [`FramePlan`].

mod ctx;
mod factory;
mod frame;
mod pipeline;
mod renderer;

pub use ctx::RenderCtx;
pub use factory::{DemoResources, ResourceFactory, ResourceKind, ResourceRecord};
pub use frame::{CORNFLOWER_BLUE, DrawArgs, FramePhase, FramePlan, FrameStep};
pub use pipeline::{PipelineSettings, uniform_layout_entries};
pub use renderer::UniformArrayRenderer;
