//! Error types for the dlk crate.

use thiserror::Error;

use crate::ffi::handles::{HandleKind, RawId};

/// Result type alias for dlk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for dlk operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Handle carries the invalid sentinel, or the engine refused an
    /// identifier as malformed. Sentinels are never forwarded to the engine.
    #[error("invalid {}handle", kind_prefix(.kind))]
    InvalidHandle {
        /// Kind the operation required, if it could be told.
        kind: Option<HandleKind>,
    },

    /// Handle of one kind was supplied where another is required.
    #[error("kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        /// Kind the operation required.
        expected: HandleKind,
        /// Kind actually supplied.
        found: HandleKind,
    },

    /// Identifier no longer names a live engine object.
    #[error("dangling {}reference {}", kind_prefix(.kind), .id.to_bits())]
    DanglingReference {
        /// Kind the reference was presented as, if the engine or the call
        /// arguments tell it.
        kind: Option<HandleKind>,
        /// The stale identifier, or the sentinel when it cannot be told.
        id: RawId,
    },

    /// Engine rejected an argument (arity, empty name, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Any other engine rejection, passed through unchanged.
    #[error("engine failure ({code}): {message}")]
    Engine {
        /// Engine status code.
        code: i32,
        /// Engine-provided message.
        message: String,
    },
}

fn kind_prefix(kind: &Option<HandleKind>) -> String {
    kind.map(|k| format!("{} ", k)).unwrap_or_default()
}

impl Error {
    /// Check if this is an invalid handle error.
    pub fn is_invalid_handle(&self) -> bool {
        matches!(self, Error::InvalidHandle { .. })
    }

    /// Check if this is a kind mismatch error.
    pub fn is_kind_mismatch(&self) -> bool {
        matches!(self, Error::KindMismatch { .. })
    }

    /// Check if this is a dangling reference error.
    pub fn is_dangling(&self) -> bool {
        matches!(self, Error::DanglingReference { .. })
    }

    /// Check if this is an opaque engine failure.
    pub fn is_engine_failure(&self) -> bool {
        matches!(self, Error::Engine { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::DanglingReference {
            kind: Some(HandleKind::Axiom),
            id: RawId::from_bits(12),
        };
        assert_eq!(err.to_string(), "dangling Axiom reference 12");

        let err = Error::DanglingReference {
            kind: None,
            id: RawId::from_bits(12),
        };
        assert_eq!(err.to_string(), "dangling reference 12");

        let err = Error::InvalidHandle {
            kind: Some(HandleKind::Role),
        };
        assert_eq!(err.to_string(), "invalid Role handle");
        assert_eq!(
            Error::InvalidHandle { kind: None }.to_string(),
            "invalid handle"
        );

        let err = Error::KindMismatch {
            expected: HandleKind::Concept,
            found: HandleKind::Role,
        };
        assert_eq!(err.to_string(), "kind mismatch: expected Concept, found Role");
        assert!(err.is_kind_mismatch());
        assert!(!err.is_dangling());
    }
}
