//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and the
//! application. The runtime owns the window and device; the application owns its
//! GPU resources and receives an explicit context every frame.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
