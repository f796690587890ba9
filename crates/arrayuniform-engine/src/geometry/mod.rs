//! Static full-screen quad geometry.

mod vertex;

pub use vertex::{QUAD_VERTEX_COUNT, QUAD_VERTICES, Vertex};
