//! Error taxonomy shared by every tofu crate.

use crate::Kind;

/// Result alias used throughout the tofu crates.
pub type TofuResult<T> = Result<T, TofuError>;

/// Why a tofu operation was rejected.
///
/// Not-found and duplicate outcomes are ordinary, recoverable results;
/// no variant implies that the receiver was left partially modified.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TofuError {
    /// An argument was outside the accepted domain.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },

    /// A type identifier is not in the registry.
    #[error("unknown type identifier `{type_id}`")]
    InvalidType { type_id: String },

    /// A cell of one kind was used where another kind was required.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// The key is not present.
    #[error("key not found")]
    NotFound,

    /// The value is already present.
    #[error("value already present")]
    Duplicate,

    /// A payload does not fit in the requested width.
    #[error("value `{value}` does not fit in {kind}")]
    Overflow { kind: Kind, value: String },

    /// The cell is not mutable.
    #[error("value is immutable")]
    Immutable,

    /// The cell is locked; its mutability can no longer change.
    #[error("value is locked")]
    Locked,

    /// Text could not be parsed.
    #[error("parse error at byte {offset}: {message}")]
    Parse { offset: usize, message: String },
}

impl TofuError {
    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        TofuError::Parse {
            offset,
            message: message.into(),
        }
    }
}
