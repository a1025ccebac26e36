//! Type definitions and enums.

use serde::{Deserialize, Serialize};

use crate::ffi::raw::{
    FACET_MAX_EXCLUSIVE, FACET_MAX_INCLUSIVE, FACET_MIN_EXCLUSIVE, FACET_MIN_INCLUSIVE,
};

/// Data-type facet used to restrict a data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacetKind {
    /// Value must be greater than or equal to the bound.
    MinInclusive,
    /// Value must be greater than the bound.
    MinExclusive,
    /// Value must be less than or equal to the bound.
    MaxInclusive,
    /// Value must be less than the bound.
    MaxExclusive,
}

impl From<FacetKind> for i32 {
    fn from(kind: FacetKind) -> i32 {
        match kind {
            FacetKind::MinInclusive => FACET_MIN_INCLUSIVE,
            FacetKind::MinExclusive => FACET_MIN_EXCLUSIVE,
            FacetKind::MaxInclusive => FACET_MAX_INCLUSIVE,
            FacetKind::MaxExclusive => FACET_MAX_EXCLUSIVE,
        }
    }
}

impl TryFrom<i32> for FacetKind {
    type Error = i32;

    fn try_from(code: i32) -> std::result::Result<Self, i32> {
        match code {
            FACET_MIN_INCLUSIVE => Ok(FacetKind::MinInclusive),
            FACET_MIN_EXCLUSIVE => Ok(FacetKind::MinExclusive),
            FACET_MAX_INCLUSIVE => Ok(FacetKind::MaxInclusive),
            FACET_MAX_EXCLUSIVE => Ok(FacetKind::MaxExclusive),
            other => Err(other),
        }
    }
}

/// Names of the built-in data types.
pub mod builtin {
    /// String data type.
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    /// Integer data type.
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    /// Floating point data type.
    pub const REAL: &str = "http://www.w3.org/2001/XMLSchema#float";
    /// Boolean data type.
    pub const BOOL: &str = "http://www.w3.org/2001/XMLSchema#boolean";
}

/// Options for the in-process engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Slots reserved up front (default: 256).
    pub initial_capacity: usize,
    /// Upper bound on live objects (None for no limit).
    pub max_objects: Option<usize>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            initial_capacity: 256,
            max_objects: None,
        }
    }
}
