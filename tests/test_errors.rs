//! Error taxonomy tests using scripted engines.
//!
//! The engines here record every call so the tests can check what was and
//! was not forwarded across the boundary.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dlk::ffi::{
    Engine, Op, RawArg, RawError, RawValue, ERR_DANGLING, ERR_INVALID_HANDLE, ERR_KIND_MISMATCH,
};
use dlk::{
    AnyHandle, AxiomHandle, ConceptHandle, Error, Handle, HandleKind, IndividualHandle, RawId,
    Reasoner, RoleHandle,
};

/// Engine that counts calls and answers every one the same way.
struct Scripted {
    calls: Arc<AtomicUsize>,
    reply: Result<RawValue, RawError>,
}

impl Scripted {
    fn new(reply: Result<RawValue, RawError>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
                reply,
            },
            calls,
        )
    }
}

impl Engine for Scripted {
    fn invoke(&mut self, _op: Op, _args: &[RawArg]) -> Result<RawValue, RawError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

fn raw(bits: u64) -> RawId {
    RawId::from_bits(bits)
}

#[test]
fn test_invalid_handle_never_forwarded() {
    let (engine, calls) = Scripted::new(Ok(RawValue::Id(raw(1))));
    let reasoner = Reasoner::new(engine);

    let good = ConceptHandle::from_raw(raw(5));
    let role = RoleHandle::from_raw(raw(6));

    let failures = [
        reasoner.not(ConceptHandle::invalid()).unwrap_err(),
        reasoner.and(&[good, ConceptHandle::invalid()]).unwrap_err(),
        reasoner.exists(RoleHandle::invalid(), good).unwrap_err(),
        reasoner.exists(role, ConceptHandle::default()).unwrap_err(),
        reasoner.name(ConceptHandle::invalid()).unwrap_err(),
        reasoner.retract(AxiomHandle::invalid()).unwrap_err(),
    ];

    for err in &failures {
        assert!(err.is_invalid_handle(), "got {:?}", err);
    }
    assert_eq!(
        failures[2],
        Error::InvalidHandle {
            kind: Some(HandleKind::Role)
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0, "engine must not be called");

    // A valid call does go through
    reasoner.not(good).expect("not should succeed");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_empty_list_never_forwarded() {
    let (engine, calls) = Scripted::new(Ok(RawValue::Id(raw(1))));
    let reasoner = Reasoner::new(engine);

    let err = reasoner.and(&[]).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "got {:?}", err);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_sentinel_reply_is_invalid_handle() {
    let (engine, calls) = Scripted::new(Ok(RawValue::Id(RawId::INVALID)));
    let reasoner = Reasoner::new(engine);

    let err = reasoner.concept("Ghost").unwrap_err();
    assert_eq!(
        err,
        Error::InvalidHandle {
            kind: Some(HandleKind::Concept)
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_engine_failure_propagates_unchanged() {
    let (engine, _) = Scripted::new(Err(RawError::new(77, "clash in tableau")));
    let reasoner = Reasoner::new(engine);

    let err = reasoner.concept("A").unwrap_err();
    assert_eq!(
        err,
        Error::Engine {
            code: 77,
            message: "clash in tableau".to_string()
        }
    );
    assert!(err.is_engine_failure());
}

#[test]
fn test_dangling_reported_by_engine() {
    let stale = ConceptHandle::from_raw(raw(9));
    let (engine, _) = Scripted::new(Err(RawError::with_ref(
        ERR_DANGLING,
        HandleKind::Concept,
        stale.raw_id(),
    )));
    let reasoner = Reasoner::new(engine);

    let err = reasoner.not(stale).unwrap_err();
    assert_eq!(
        err,
        Error::DanglingReference {
            kind: Some(HandleKind::Concept),
            id: raw(9)
        }
    );
}

#[test]
fn test_untagged_dangling_blames_sent_reference() {
    let (engine, _) = Scripted::new(Err(RawError::new(ERR_DANGLING, "stale")));
    let reasoner = Reasoner::new(engine);

    let axiom = AxiomHandle::from_raw(raw(11));
    let err = reasoner.retract(axiom).unwrap_err();
    assert_eq!(
        err,
        Error::DanglingReference {
            kind: Some(HandleKind::Axiom),
            id: raw(11)
        }
    );

    let role = RoleHandle::from_raw(raw(12));
    let err = reasoner.name(role).unwrap_err();
    assert_eq!(
        err,
        Error::DanglingReference {
            kind: Some(HandleKind::Role),
            id: raw(12)
        }
    );

    // Individual and concept both sent: the report stays dangling, but
    // never blames the axiom being built
    let john = IndividualHandle::from_raw(raw(13));
    let person = ConceptHandle::from_raw(raw(14));
    let err = reasoner.instance_of(john, person).unwrap_err();
    assert_eq!(
        err,
        Error::DanglingReference {
            kind: None,
            id: RawId::INVALID
        }
    );

    let err = reasoner.clear().unwrap_err();
    assert!(err.is_dangling(), "got {:?}", err);
}

#[test]
fn test_untagged_invalid_handle_stays_invalid_handle() {
    let (engine, _) = Scripted::new(Err(RawError::new(ERR_INVALID_HANDLE, "stale")));
    let reasoner = Reasoner::new(engine);

    let err = reasoner.retract(AxiomHandle::from_raw(raw(11))).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidHandle {
            kind: Some(HandleKind::Axiom)
        }
    );
    assert!(reasoner.clear().unwrap_err().is_invalid_handle());
}

#[test]
fn test_kind_mismatch_reported_by_engine() {
    let mut report = RawError::with_ref(ERR_KIND_MISMATCH, HandleKind::Concept, raw(3));
    report.found = Some(HandleKind::Role);
    let (engine, _) = Scripted::new(Err(report));
    let reasoner = Reasoner::new(engine);

    let err = reasoner.not(ConceptHandle::from_raw(raw(3))).unwrap_err();
    assert_eq!(
        err,
        Error::KindMismatch {
            expected: HandleKind::Concept,
            found: HandleKind::Role
        }
    );
}

#[test]
fn test_unexpected_reply_is_engine_failure() {
    let (engine, _) = Scripted::new(Ok(RawValue::Text("not an id".to_string())));
    let reasoner = Reasoner::new(engine);

    let err = reasoner.top().unwrap_err();
    assert!(err.is_engine_failure(), "got {:?}", err);
}

#[test]
fn test_late_bound_kind_mismatch() {
    let reasoner = Reasoner::local();
    let role = reasoner.role("likes").unwrap();

    // A reflective caller only has the runtime-tagged form
    let any = AnyHandle::from(role);
    let err = any.downcast::<ConceptHandle>().unwrap_err();
    assert_eq!(
        err,
        Error::KindMismatch {
            expected: HandleKind::Concept,
            found: HandleKind::Role
        }
    );

    // Forging a concept handle from a role's identifier is caught by the engine
    let forged = ConceptHandle::from_raw(role.raw_id());
    let err = reasoner.not(forged).unwrap_err();
    assert_eq!(
        err,
        Error::KindMismatch {
            expected: HandleKind::Concept,
            found: HandleKind::Role
        }
    );
}

#[test]
fn test_reasoner_over_boxed_engine() {
    let engine: Box<dyn Engine> = Box::new(dlk::LocalEngine::new());
    let reasoner = Reasoner::new(engine);
    let a = reasoner.concept("A").unwrap();
    assert_eq!(reasoner.name(a).unwrap(), "A");
}
