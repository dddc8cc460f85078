use thiserror::Error;

/// Errors produced by the editing engine.
///
/// Every fallible core operation validates its arguments before mutating
/// anything, so an `Err` always means the buffer and cursor are untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("index {index} is out of range for a buffer of {size} bytes")]
    OutOfRange { index: usize, size: usize },
    #[error("range {first}..={last} is invalid for a buffer of {size} bytes")]
    InvalidRange {
        first: usize,
        last: usize,
        size: usize,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type EditorResult<T> = Result<T, EditorError>;
