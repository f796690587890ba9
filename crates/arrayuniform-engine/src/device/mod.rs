//! GPU device + surface management.
//!
//! This module is responsible for:
//! - validating the requested graphics backend
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) and its depth target
//! - acquiring frames and providing encoders/views for rendering

mod backend;
mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use backend::GraphicsBackend;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
