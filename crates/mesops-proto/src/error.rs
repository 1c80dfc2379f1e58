//! Union validation errors.

use thiserror::Error;

/// Result type for union conversions.
pub type UnionResult<T> = Result<T, UnionError>;

/// A wire message whose `type` tag and populated payload disagree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnionError {
    /// The tag is zero or not a value this client knows.
    #[error("{union}: unknown type {value}")]
    UnknownType { union: &'static str, value: i32 },

    /// The tag names a variant with a payload, but the payload field is empty.
    #[error("{union}: type {kind} is missing its payload")]
    MissingPayload {
        union: &'static str,
        kind: &'static str,
    },

    /// A payload field other than the one named by the tag is populated.
    #[error("{union}: type {kind} carries a payload that does not belong to it")]
    UnexpectedPayload {
        union: &'static str,
        kind: &'static str,
    },
}

impl UnionError {
    /// Name of the union the error was raised for.
    pub fn union(&self) -> &'static str {
        match self {
            Self::UnknownType { union, .. }
            | Self::MissingPayload { union, .. }
            | Self::UnexpectedPayload { union, .. } => union,
        }
    }
}
