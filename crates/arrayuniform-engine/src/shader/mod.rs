//! Shader artifacts on disk and their conversion into wgpu modules.
//!
//! Layout: `<root>/<Name>.<ext>` where `<ext>` depends on the active backend.

mod loader;

pub use loader::{Shader, ShaderDescription, ShaderFormat, ShaderLoader, ShaderStage};
