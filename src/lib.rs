//! Typed opaque handles for objects owned by a description-logic reasoning
//! engine.
//!
//! The engine owns every concept, role, individual, data range and axiom.
//! This crate only ever holds identifiers for them, wrapped in one handle
//! type per object kind, so that passing a role where a concept is expected
//! fails to compile. Handles are plain `Copy` values: comparing, hashing or
//! printing them never calls into the engine.
//!
//! # Example
//!
//! ```
//! use dlk::{AnyHandle, Handle, Reasoner};
//!
//! fn main() -> dlk::Result<()> {
//!     let reasoner = Reasoner::local();
//!
//!     // Build a few expressions
//!     let person = reasoner.concept("Person")?;
//!     let parent = reasoner.concept("Parent")?;
//!     let has_child = reasoner.role("hasChild")?;
//!     let some_person = reasoner.exists(has_child, person)?;
//!
//!     // Assert an axiom
//!     let axiom = reasoner.equivalent_concepts(&[parent, some_person])?;
//!
//!     // Names are interned: the same name gives an equal handle
//!     assert_eq!(reasoner.concept("Person")?, person);
//!
//!     // Handles of different kinds never compare equal
//!     assert_ne!(AnyHandle::from(person), AnyHandle::from(has_child));
//!
//!     println!("asserted {}", axiom.debug_description());
//!     reasoner.retract(axiom)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Engines
//!
//! [`Reasoner`] talks to anything implementing [`ffi::Engine`]. The bundled
//! [`LocalEngine`] keeps objects in an in-process generational arena and
//! performs no reasoning; a native engine plugs in through the same trait.

mod axiom;
mod concept;
mod data;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod reasoner;
mod role;
pub mod types;

// Re-export main types at the crate root
pub use engine::LocalEngine;
pub use error::{Error, Result};
pub use ffi::handles::{
    AnyHandle, AxiomHandle, ConceptHandle, DataRange, DataRoleHandle, DataTypeExpressionHandle,
    DataTypeHandle, DataValueHandle, FacetHandle, Handle, HandleKind, IndividualHandle, Named,
    RawId, RoleHandle,
};
pub use reasoner::Reasoner;
pub use types::{builtin, EngineOptions, FacetKind};
