use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("invalid stride: {stride} is shorter than a row of {row_len} elements")]
    InvalidStride { stride: usize, row_len: usize },
    #[error("unsupported channel count {0}, expected at least 1")]
    UnsupportedChannels(usize),
    #[error("image has zero width or height")]
    Empty,
    #[error("unknown {kind} `{name}`")]
    UnknownName { kind: &'static str, name: String },
}
