//! Protocol error types.
//!
//! Every failure carries the rendered receiver so the interpreter layer can
//! report it without holding on to the object itself.

use thiserror::Error;

use crate::object::Object;

/// Result type for protocol operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by the generic sequence/collection protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The receiver is neither Seqable nor Sequenceable.
    #[error("{operation}: not seqable: {value}")]
    NotSeqable {
        operation: &'static str,
        value: String,
    },
    /// The receiver does not support `assoc`.
    #[error("{operation}: not associatively writable: {value}")]
    NotAssociativelyWritable {
        operation: &'static str,
        value: String,
    },
    /// A `with_meta` argument that is neither `nil` nor a map.
    #[error("invalid metadata: {value}")]
    InvalidMetadata { value: String },
    /// The receiver cannot carry metadata.
    #[error("{operation}: not metadatable: {value}")]
    NotMetadatable {
        operation: &'static str,
        value: String,
    },
}

impl Error {
    pub fn not_seqable(operation: &'static str, value: &Object) -> Self {
        tracing::debug!(operation, kind = %value.object_type(), "not seqable");
        Error::NotSeqable {
            operation,
            value: value.to_string(),
        }
    }

    pub fn not_associatively_writable(operation: &'static str, value: &Object) -> Self {
        tracing::debug!(operation, kind = %value.object_type(), "not associatively writable");
        Error::NotAssociativelyWritable {
            operation,
            value: value.to_string(),
        }
    }

    pub fn invalid_metadata(value: &Object) -> Self {
        tracing::debug!(kind = %value.object_type(), "invalid metadata");
        Error::InvalidMetadata {
            value: value.to_string(),
        }
    }

    pub fn not_metadatable(operation: &'static str, value: &Object) -> Self {
        tracing::debug!(operation, kind = %value.object_type(), "not metadatable");
        Error::NotMetadatable {
            operation,
            value: value.to_string(),
        }
    }

    /// Name of the protocol operation that failed, when there is one.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Error::NotSeqable { operation, .. }
            | Error::NotAssociativelyWritable { operation, .. }
            | Error::NotMetadatable { operation, .. } => Some(*operation),
            Error::InvalidMetadata { .. } => None,
        }
    }
}

impl From<Error> for String {
    fn from(err: Error) -> String {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::{integer, keyword};

    #[test]
    fn test_not_seqable_display() {
        let err = Error::not_seqable("first", &integer(42));
        assert_eq!(err.to_string(), "first: not seqable: 42");
        assert_eq!(err.operation(), Some("first"));
    }

    #[test]
    fn test_not_associatively_writable_display() {
        let err = Error::not_associatively_writable("assoc", &keyword("a"));
        assert_eq!(err.to_string(), "assoc: not associatively writable: :a");
    }

    #[test]
    fn test_invalid_metadata_has_no_operation() {
        let err = Error::invalid_metadata(&integer(1));
        assert_eq!(err.to_string(), "invalid metadata: 1");
        assert_eq!(err.operation(), None);
    }

    #[test]
    fn test_error_into_string() {
        let s: String = Error::not_metadatable("with_meta", &integer(7)).into();
        assert!(s.contains("not metadatable"));
    }
}
