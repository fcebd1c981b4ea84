//! Errors raised by the pain record model.

/// Failure modes of the pain record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PainError {
    /// A caller passed a value outside the accepted domain (e.g. severity 7).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A persisted payload does not have the expected shape.
    #[error("corrupt pain data: {0}")]
    CorruptData(String),

    /// The record could not be written out as JSON.
    #[error("cannot serialize pain data: {0}")]
    Serialize(String),
}

pub type Result<T> = std::result::Result<T, PainError>;
