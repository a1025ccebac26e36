//! Binding layer between typed handles and an engine.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, trace, warn};

use crate::engine::LocalEngine;
use crate::error::{Error, Result};
use crate::ffi::{
    error_from_engine, AxiomHandle, Engine, Handle, Named, Op, RawArg, RawValue, ERR_UNKNOWN,
};
use crate::types::EngineOptions;

/// Typed front end of a reasoning engine.
///
/// Every handle argument is checked locally before the call is forwarded;
/// an invalid handle never reaches the engine. Identifiers coming back are
/// wrapped in the handle type implied by the operation.
///
/// Calls into the engine are serialized, so a `Reasoner` can be shared
/// between threads behind an `Arc`.
///
/// # Example
///
/// ```
/// use dlk::{Handle, Reasoner};
///
/// let reasoner = Reasoner::local();
/// let animal = reasoner.concept("Animal")?;
/// let dog = reasoner.concept("Dog")?;
/// let axiom = reasoner.implies_concepts(dog, animal)?;
///
/// assert_eq!(reasoner.name(dog)?, "Dog");
/// assert!(axiom.debug_description().starts_with("Axiom["));
/// # Ok::<(), dlk::Error>(())
/// ```
pub struct Reasoner<E: Engine = LocalEngine> {
    engine: Mutex<E>,
}

impl Reasoner<LocalEngine> {
    /// Create a reasoner over a fresh in-process engine.
    pub fn local() -> Self {
        Self::new(LocalEngine::new())
    }

    /// Create a reasoner over an in-process engine with custom options.
    pub fn with_options(options: EngineOptions) -> Self {
        Self::new(LocalEngine::with_options(options))
    }
}

impl<E: Engine> Reasoner<E> {
    /// Wrap an engine.
    pub fn new(engine: E) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    /// Run a closure against the engine, e.g. to read diagnostics.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut E) -> R) -> Result<R> {
        let mut engine = self.lock()?;
        Ok(f(&mut *engine))
    }

    /// Give the engine back.
    pub fn into_engine(self) -> Result<E> {
        self.engine.into_inner().map_err(|_| poisoned())
    }

    fn lock(&self) -> Result<MutexGuard<'_, E>> {
        self.engine.lock().map_err(|_| poisoned())
    }

    /// Forward one call and translate the engine's error report.
    pub(crate) fn invoke(&self, op: Op, args: &[RawArg]) -> Result<RawValue> {
        trace!(?op, argc = args.len(), "forwarding call");
        let reply = self.lock()?.invoke(op, args);
        reply.map_err(|raw| {
            warn!(?op, code = raw.code, "engine rejected call");
            error_from_engine(raw, args)
        })
    }

    /// Forward a producing call and wrap the identifier it returns.
    pub(crate) fn produce<H: Handle>(&self, op: Op, args: &[RawArg]) -> Result<H> {
        debug_assert_eq!(op.result_kind(), Some(H::KIND));
        match self.invoke(op, args)? {
            RawValue::Id(id) if id.is_valid() => {
                let handle = H::from_raw(id);
                debug!(?op, handle = %handle.debug_description(), "produced");
                Ok(handle)
            }
            RawValue::Id(_) => {
                warn!(?op, "engine produced no handle");
                Err(Error::InvalidHandle {
                    kind: Some(H::KIND),
                })
            }
            other => Err(unexpected(op, &other)),
        }
    }

    /// Name of a named entity.
    pub fn name<H: Named>(&self, entity: H) -> Result<String> {
        match self.invoke(Op::EntityName, &[arg(entity)?])? {
            RawValue::Text(name) => Ok(name),
            other => Err(unexpected(Op::EntityName, &other)),
        }
    }

    /// Withdraw an axiom. Its handle dangles afterwards.
    pub fn retract(&self, axiom: AxiomHandle) -> Result<()> {
        self.invoke(Op::Retract, &[arg(axiom)?])?;
        debug!(axiom = %axiom.debug_description(), "retracted");
        Ok(())
    }

    /// Drop every expression, entity and axiom the engine does not keep
    /// across ontologies. Handles to them dangle afterwards.
    pub fn clear(&self) -> Result<()> {
        self.invoke(Op::Clear, &[])?;
        debug!("ontology cleared");
        Ok(())
    }
}

fn poisoned() -> Error {
    Error::Engine {
        code: ERR_UNKNOWN,
        message: "engine lock poisoned".to_string(),
    }
}

fn unexpected(op: Op, reply: &RawValue) -> Error {
    Error::Engine {
        code: ERR_UNKNOWN,
        message: format!("unexpected reply to {:?}: {:?}", op, reply),
    }
}

/// Encode a handle argument, refusing the sentinel.
pub(crate) fn arg<H: Handle>(handle: H) -> Result<RawArg> {
    if !handle.is_valid() {
        warn!(kind = H::KIND.name(), "invalid handle rejected before call");
        return Err(Error::InvalidHandle {
            kind: Some(H::KIND),
        });
    }
    Ok(RawArg::Ref(H::KIND, handle.raw_id()))
}

/// Encode a non-empty list of handle arguments.
pub(crate) fn args<H: Handle>(handles: &[H]) -> Result<RawArg> {
    if handles.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "empty {} list",
            H::KIND.name()
        )));
    }
    let ids = handles
        .iter()
        .map(|h| arg(*h).map(|_| h.raw_id()))
        .collect::<Result<Vec<_>>>()?;
    Ok(RawArg::Refs(H::KIND, ids))
}

/// Encode an entity name.
pub(crate) fn text(s: &str) -> RawArg {
    RawArg::Text(s.to_string())
}
