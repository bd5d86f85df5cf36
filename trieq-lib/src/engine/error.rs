//! Engine error types.

use thiserror::Error;

/// Errors reported while preparing the engine or validating buffers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f64),

    #[error("maximum block size must be at least one sample")]
    InvalidBlockSize,

    #[error("unsupported layout: {input} input and {output} output channel(s)")]
    UnsupportedLayout { input: usize, output: usize },

    #[error("configuration mismatch: expected {expected} channel buffer(s), got {actual}")]
    ConfigurationMismatch { expected: usize, actual: usize },

    #[error("block of {len} samples exceeds the prepared maximum of {max}")]
    BlockTooLarge { len: usize, max: usize },
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
