//! Handle types for opaque references to engine-owned objects.
//!
//! Each handle type is a newtype wrapper around a [`RawId`] to provide type
//! safety. The kind of object a handle refers to is fixed by its type, so a
//! role can never be passed where a concept is expected.

use std::fmt;
use std::hash::Hash;

use crate::error::{Error, Result};

/// Opaque identifier assigned by the engine to one of its objects.
///
/// The value carries no meaning on this side of the boundary. It is never
/// dereferenced and offers no arithmetic; only the marshalling layer and
/// engine implementations look at its bits.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RawId(u64);

impl RawId {
    /// The reserved "no object" identifier.
    pub const INVALID: RawId = RawId(0);

    /// Wrap bits produced by the engine.
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Bits to hand back to the engine.
    #[inline]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Check if this is a real identifier (not the sentinel).
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// Category of engine object a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HandleKind {
    /// Concept (class) expression.
    Concept,
    /// Object role (object property) expression.
    Role,
    /// Data role (data property) expression.
    DataRole,
    /// Individual.
    Individual,
    /// Named data type.
    DataType,
    /// Data-type expression (restriction, data combinators, top/bottom).
    DataTypeExpression,
    /// Data value of some data type.
    DataValue,
    /// Data-type facet (e.g. minInclusive).
    Facet,
    /// Axiom asserted into the ontology.
    Axiom,
}

impl HandleKind {
    /// Every kind, in declaration order.
    pub const ALL: [HandleKind; 9] = [
        HandleKind::Concept,
        HandleKind::Role,
        HandleKind::DataRole,
        HandleKind::Individual,
        HandleKind::DataType,
        HandleKind::DataTypeExpression,
        HandleKind::DataValue,
        HandleKind::Facet,
        HandleKind::Axiom,
    ];

    /// Human-readable kind name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            HandleKind::Concept => "Concept",
            HandleKind::Role => "Role",
            HandleKind::DataRole => "DataRole",
            HandleKind::Individual => "Individual",
            HandleKind::DataType => "DataType",
            HandleKind::DataTypeExpression => "DataTypeExpression",
            HandleKind::DataValue => "DataValue",
            HandleKind::Facet => "Facet",
            HandleKind::Axiom => "Axiom",
        }
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render the diagnostic form shared by all handles.
fn describe(kind: HandleKind, id: RawId) -> String {
    if id.is_valid() {
        format!("{}[{}]", kind.name(), id.to_bits())
    } else {
        format!("{}[invalid]", kind.name())
    }
}

/// Operations shared by every typed handle.
pub trait Handle: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Kind fixed by this handle type.
    const KIND: HandleKind;

    /// Wrap an identifier returned by the engine. Never fails.
    fn from_raw(id: RawId) -> Self;

    /// The identifier, for encoding a later engine call.
    fn raw_id(&self) -> RawId;

    /// Check if this handle is valid (not the sentinel).
    #[inline]
    fn is_valid(&self) -> bool {
        self.raw_id().is_valid()
    }

    /// Kind name and identifier, for logs only.
    ///
    /// This is not a serialization format and cannot be parsed back.
    fn debug_description(&self) -> String {
        describe(Self::KIND, self.raw_id())
    }
}

/// Handles for entities the engine knows by name.
pub trait Named: Handle {}

/// Handles usable as the range of a data role.
pub trait DataRange: Handle {}

/// Macro to define a handle type.
macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            _h: RawId,
        }

        impl $name {
            /// Create an invalid (null) handle.
            #[inline]
            pub const fn invalid() -> Self {
                Self { _h: RawId::INVALID }
            }
        }

        impl Handle for $name {
            const KIND: HandleKind = HandleKind::$kind;

            #[inline]
            fn from_raw(id: RawId) -> Self {
                Self { _h: id }
            }

            #[inline]
            fn raw_id(&self) -> RawId {
                self._h
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl TryFrom<AnyHandle> for $name {
            type Error = Error;

            fn try_from(any: AnyHandle) -> Result<Self> {
                any.downcast()
            }
        }
    };
}

define_handle!(
    /// Opaque handle to a concept expression.
    ConceptHandle => Concept
);
define_handle!(
    /// Opaque handle to an object role expression.
    RoleHandle => Role
);
define_handle!(
    /// Opaque handle to a data role expression.
    DataRoleHandle => DataRole
);
define_handle!(
    /// Opaque handle to an individual.
    IndividualHandle => Individual
);
define_handle!(
    /// Opaque handle to a named data type.
    DataTypeHandle => DataType
);
define_handle!(
    /// Opaque handle to a data-type expression.
    DataTypeExpressionHandle => DataTypeExpression
);
define_handle!(
    /// Opaque handle to a data value.
    DataValueHandle => DataValue
);
define_handle!(
    /// Opaque handle to a data-type facet.
    FacetHandle => Facet
);
define_handle!(
    /// Opaque handle to an asserted axiom.
    AxiomHandle => Axiom
);

impl Named for ConceptHandle {}
impl Named for RoleHandle {}
impl Named for DataRoleHandle {}
impl Named for IndividualHandle {}
impl Named for DataTypeHandle {}

impl DataRange for DataTypeHandle {}
impl DataRange for DataTypeExpressionHandle {}

/// A handle whose kind is only known at runtime.
///
/// Used at late-bound call sites. The kind takes part in equality and
/// hashing, so identifiers of different kinds never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnyHandle {
    kind: HandleKind,
    id: RawId,
}

impl AnyHandle {
    /// Pair an identifier with the kind it was produced as.
    #[inline]
    pub const fn new(kind: HandleKind, id: RawId) -> Self {
        Self { kind, id }
    }

    /// The runtime kind tag.
    #[inline]
    pub const fn kind(&self) -> HandleKind {
        self.kind
    }

    /// The identifier, for encoding a later engine call.
    #[inline]
    pub const fn raw_id(&self) -> RawId {
        self.id
    }

    /// Check if this handle is valid (not the sentinel).
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.id.is_valid()
    }

    /// Recover the typed handle, or report the kinds that disagree.
    pub fn downcast<H: Handle>(self) -> Result<H> {
        if self.kind != H::KIND {
            return Err(Error::KindMismatch {
                expected: H::KIND,
                found: self.kind,
            });
        }
        Ok(H::from_raw(self.id))
    }

    /// Kind name and identifier, for logs only.
    pub fn debug_description(&self) -> String {
        describe(self.kind, self.id)
    }
}

impl<H: Handle> From<H> for AnyHandle {
    fn from(handle: H) -> Self {
        Self::new(H::KIND, handle.raw_id())
    }
}
