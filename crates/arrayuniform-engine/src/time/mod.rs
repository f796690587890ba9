//! Time subsystem.
//!
//! Provides testable frame statistics without coupling to the runtime.
//! Intended usage:
//! - one `FrameStats` per window
//! - call `record()` once per presented frame; log the report when one is returned

mod frame_stats;

pub use frame_stats::{FpsReport, FrameStats};
