//! Host-side mirror of the fragment stage's uniform block.
//!
//! Packing is explicit (little-endian `f32`s at fixed offsets) so the byte image
//! never depends on Rust struct layout.

mod block;

pub use block::{UNIFORM_ARRAY_LEN, UniformBlock, UniformElement};
