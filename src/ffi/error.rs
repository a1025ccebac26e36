//! Error conversion utilities for the engine boundary.

use super::handles::{HandleKind, RawId};
use super::raw::{
    RawArg, RawError, ENGINE_OK, ERR_CAPACITY, ERR_DANGLING, ERR_INVALID_ARGUMENT,
    ERR_INVALID_HANDLE, ERR_KIND_MISMATCH, ERR_UNKNOWN,
};
use crate::error::Error;

/// Convert an engine error report to a Rust Error.
///
/// `args` are the arguments of the rejected call. When the report does not
/// say which reference is to blame, they are used to tell it: a single
/// reference is blamed outright, and references that all share one kind
/// give that kind.
pub fn error_from_engine(err: RawError, args: &[RawArg]) -> Error {
    let message = err
        .message
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());

    match err.code {
        ERR_INVALID_HANDLE => {
            let (kind, _) = blame(&err, args);
            Error::InvalidHandle { kind }
        }
        ERR_KIND_MISMATCH => match (err.kind, err.found) {
            (Some(expected), Some(found)) => Error::KindMismatch { expected, found },
            _ => Error::Engine {
                code: err.code,
                message,
            },
        },
        ERR_DANGLING => {
            let (kind, id) = blame(&err, args);
            Error::DanglingReference { kind, id }
        }
        ERR_INVALID_ARGUMENT => Error::InvalidArgument(message),
        ENGINE_OK => Error::Engine {
            code: ERR_UNKNOWN,
            message: "engine reported failure with success status".to_string(),
        },
        code => Error::Engine { code, message },
    }
}

/// Kind and identifier of the reference an error report blames.
fn blame(err: &RawError, args: &[RawArg]) -> (Option<HandleKind>, RawId) {
    let sent: Vec<(HandleKind, RawId)> = args
        .iter()
        .flat_map(|arg| match arg {
            RawArg::Ref(kind, id) => vec![(*kind, *id)],
            RawArg::Refs(kind, ids) => ids.iter().map(|id| (*kind, *id)).collect(),
            _ => Vec::new(),
        })
        .collect();

    let id = match sent.as_slice() {
        _ if err.id.is_valid() => err.id,
        [(_, only)] => *only,
        _ => RawId::INVALID,
    };
    let kind = err.kind.or_else(|| {
        let candidates = sent
            .iter()
            .filter(|(_, sent_id)| !id.is_valid() || *sent_id == id)
            .map(|(kind, _)| *kind);
        single_kind(candidates)
    });
    (kind, id)
}

fn single_kind(mut kinds: impl Iterator<Item = HandleKind>) -> Option<HandleKind> {
    let first = kinds.next()?;
    kinds.all(|k| k == first).then_some(first)
}

/// Check whether a status code denotes capacity exhaustion.
pub fn is_capacity_error(err: &Error) -> bool {
    matches!(err, Error::Engine { code, .. } if *code == ERR_CAPACITY)
}
