use std::path::PathBuf;

use crate::render::{FramePhase, FrameStep};

/// Fatal conditions raised while bootstrapping or driving the demo.
///
/// None of these are recovered from; they propagate to `main` and end the process.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unsupported graphics backend: {0:?}")]
    UnsupportedBackend(wgpu::Backend),

    #[error("failed to read shader {}", path.display())]
    ShaderIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid shader {}: {reason}", path.display())]
    InvalidShader { path: PathBuf, reason: &'static str },

    #[error("{what} is {actual} bytes, expected {expected}")]
    SizeMismatch {
        what: &'static str,
        expected: u64,
        actual: u64,
    },

    #[error("cannot {step:?} a frame while {phase:?}")]
    FrameOrder { phase: FramePhase, step: FrameStep },
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
