//! arrayuniform engine crate.
//!
//! Window runtime, GPU bootstrap and the pieces of the uniform-array demo:
//! shader loading, quad geometry, the uniform block, pipeline construction and
//! per-frame recording.

pub mod core;
pub mod device;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod render;
pub mod shader;
pub mod time;
pub mod uniforms;
pub mod window;

pub use error::{EngineError, EngineResult};
