//! Boundary with the native engine.
//!
//! This module contains the handle types and the raw call surface used by
//! the marshalling layer. Users should prefer the typed wrappers on
//! [`Reasoner`](crate::Reasoner).

pub mod error;
pub mod handles;
pub mod raw;

pub use error::{error_from_engine, is_capacity_error};
pub use handles::*;
pub use raw::*;
