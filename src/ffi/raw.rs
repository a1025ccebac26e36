//! Raw call surface of the native engine.
//!
//! This module contains the boundary contract with the engine: operation
//! codes, argument and reply shapes, status codes and the [`Engine`] trait.
//! Users should prefer the typed wrappers on [`Reasoner`](crate::Reasoner).

use super::handles::{HandleKind, RawId};

/// Status code reported by the engine.
pub type EngineStatus = i32;

// Status codes
pub const ENGINE_OK: EngineStatus = 0;
pub const ERR_INVALID_HANDLE: EngineStatus = 1;
pub const ERR_KIND_MISMATCH: EngineStatus = 2;
pub const ERR_DANGLING: EngineStatus = 3;
pub const ERR_INVALID_ARGUMENT: EngineStatus = 4;
pub const ERR_CAPACITY: EngineStatus = 5;
pub const ERR_UNKNOWN: EngineStatus = 99;

// Facet codes
pub const FACET_MIN_INCLUSIVE: i32 = 0;
pub const FACET_MIN_EXCLUSIVE: i32 = 1;
pub const FACET_MAX_INCLUSIVE: i32 = 2;
pub const FACET_MAX_EXCLUSIVE: i32 = 3;

/// Engine operation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    // Concepts
    ConceptTop,
    ConceptBottom,
    ConceptName,
    ConceptNot,
    ConceptAnd,
    ConceptOr,
    ConceptOneOf,
    ObjectExists,
    ObjectForall,
    ObjectValue,
    ObjectSelf,
    ObjectMinCardinality,
    ObjectMaxCardinality,
    ObjectExactCardinality,
    DataExists,
    DataForall,
    DataValueRestriction,

    // Individuals
    IndividualName,

    // Object roles
    RoleTop,
    RoleBottom,
    RoleName,
    RoleInverse,
    RoleChain,

    // Data roles
    DataRoleTop,
    DataRoleBottom,
    DataRoleName,

    // Data
    DataTop,
    DataBottom,
    DataTypeName,
    DataTypeRestriction,
    DataValue,
    Facet,
    DataNot,
    DataAnd,
    DataOr,
    DataOneOf,

    // Axioms
    ImpliesConcepts,
    EquivalentConcepts,
    DisjointConcepts,
    ImpliesRoles,
    InstanceOf,
    RelatedTo,
    ValueOf,
    Retract,

    // Queries and lifecycle
    EntityName,
    Clear,
}

impl Op {
    /// Kind of the identifier a successful call returns, if any.
    pub const fn result_kind(self) -> Option<HandleKind> {
        use Op::*;
        match self {
            ConceptTop | ConceptBottom | ConceptName | ConceptNot | ConceptAnd | ConceptOr
            | ConceptOneOf | ObjectExists | ObjectForall | ObjectValue | ObjectSelf
            | ObjectMinCardinality | ObjectMaxCardinality | ObjectExactCardinality
            | DataExists | DataForall | DataValueRestriction => Some(HandleKind::Concept),
            IndividualName => Some(HandleKind::Individual),
            RoleTop | RoleBottom | RoleName | RoleInverse | RoleChain => Some(HandleKind::Role),
            DataRoleTop | DataRoleBottom | DataRoleName => Some(HandleKind::DataRole),
            DataTypeName => Some(HandleKind::DataType),
            DataTop | DataBottom | DataTypeRestriction | DataNot | DataAnd | DataOr
            | DataOneOf => Some(HandleKind::DataTypeExpression),
            DataValue => Some(HandleKind::DataValue),
            Facet => Some(HandleKind::Facet),
            ImpliesConcepts | EquivalentConcepts | DisjointConcepts | ImpliesRoles
            | InstanceOf | RelatedTo | ValueOf => Some(HandleKind::Axiom),
            Retract | EntityName | Clear => None,
        }
    }
}

/// One marshalled argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawArg {
    /// Reference tagged with the kind the caller holds it as.
    Ref(HandleKind, RawId),
    /// Homogeneous list of references.
    Refs(HandleKind, Vec<RawId>),
    /// Entity name or literal text.
    Text(String),
    /// Cardinality.
    Count(u32),
    /// Enumerated code (see `FACET_*`).
    Code(i32),
}

/// Successful engine reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Identifier of a produced object.
    Id(RawId),
    /// Text reply (e.g. entity name).
    Text(String),
    /// Nothing to return.
    Unit,
}

/// Engine-side error report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawError {
    pub code: EngineStatus,
    pub message: Option<String>,
    /// Kind of the offending reference, when one is to blame.
    pub kind: Option<HandleKind>,
    /// Kind found on the engine side for a mismatched reference.
    pub found: Option<HandleKind>,
    /// The offending identifier.
    pub id: RawId,
}

impl RawError {
    /// Report with just a code and message.
    pub fn new(code: EngineStatus, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            kind: None,
            found: None,
            id: RawId::INVALID,
        }
    }

    /// Report blaming a specific reference.
    pub fn with_ref(code: EngineStatus, kind: HandleKind, id: RawId) -> Self {
        Self {
            code,
            message: None,
            kind: Some(kind),
            found: None,
            id,
        }
    }
}

impl Default for RawError {
    fn default() -> Self {
        Self {
            code: ENGINE_OK,
            message: None,
            kind: None,
            found: None,
            id: RawId::INVALID,
        }
    }
}

/// A native engine reachable through the marshalling layer.
///
/// Implementations own every object they hand out identifiers for. They
/// must never return [`RawId::INVALID`] for a produced object, must reject
/// references whose declared kind differs from the kind they were created
/// as, and must report stale identifiers as [`ERR_DANGLING`].
pub trait Engine: Send {
    /// Perform one call.
    fn invoke(&mut self, op: Op, args: &[RawArg]) -> std::result::Result<RawValue, RawError>;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn invoke(&mut self, op: Op, args: &[RawArg]) -> std::result::Result<RawValue, RawError> {
        (**self).invoke(op, args)
    }
}
