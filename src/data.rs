//! Data types, values, facets and data-range expressions.

use crate::error::Result;
use crate::ffi::{
    DataRange, DataTypeExpressionHandle, DataTypeHandle, DataValueHandle, Engine, FacetHandle, Op,
    RawArg,
};
use crate::reasoner::{arg, args, text, Reasoner};
use crate::types::{builtin, FacetKind};

impl<E: Engine> Reasoner<E> {
    /// The data range containing every value.
    pub fn data_top(&self) -> Result<DataTypeExpressionHandle> {
        self.produce(Op::DataTop, &[])
    }

    /// The empty data range.
    pub fn data_bottom(&self) -> Result<DataTypeExpressionHandle> {
        self.produce(Op::DataBottom, &[])
    }

    /// Named data type.
    pub fn data_type(&self, name: &str) -> Result<DataTypeHandle> {
        self.produce(Op::DataTypeName, &[text(name)])
    }

    /// Built-in string type.
    pub fn string_type(&self) -> Result<DataTypeHandle> {
        self.data_type(builtin::STRING)
    }

    /// Built-in integer type.
    pub fn integer_type(&self) -> Result<DataTypeHandle> {
        self.data_type(builtin::INTEGER)
    }

    /// Built-in floating point type.
    pub fn real_type(&self) -> Result<DataTypeHandle> {
        self.data_type(builtin::REAL)
    }

    /// Built-in boolean type.
    pub fn bool_type(&self) -> Result<DataTypeHandle> {
        self.data_type(builtin::BOOL)
    }

    /// Literal `value` of the basic type behind `range`.
    ///
    /// A facet restriction stands for the type it restricts, so the same
    /// literal made through a restriction of a type and through the type
    /// itself is one object. Other data-range expressions are rejected.
    pub fn data_value<D: DataRange>(&self, value: &str, range: D) -> Result<DataValueHandle> {
        self.produce(Op::DataValue, &[text(value), arg(range)?])
    }

    /// Facet bounding values by `bound`.
    pub fn facet(&self, kind: FacetKind, bound: DataValueHandle) -> Result<FacetHandle> {
        self.produce(Op::Facet, &[RawArg::Code(kind.into()), arg(bound)?])
    }

    /// `ty` restricted by all `facets`.
    pub fn restricted_type(
        &self,
        ty: DataTypeHandle,
        facets: &[FacetHandle],
    ) -> Result<DataTypeExpressionHandle> {
        self.produce(Op::DataTypeRestriction, &[arg(ty)?, args(facets)?])
    }

    /// Complement of a data range.
    pub fn data_not<D: DataRange>(&self, range: D) -> Result<DataTypeExpressionHandle> {
        self.produce(Op::DataNot, &[arg(range)?])
    }

    /// Intersection of data ranges.
    pub fn data_and<D: DataRange>(&self, ranges: &[D]) -> Result<DataTypeExpressionHandle> {
        self.produce(Op::DataAnd, &[args(ranges)?])
    }

    /// Union of data ranges.
    pub fn data_or<D: DataRange>(&self, ranges: &[D]) -> Result<DataTypeExpressionHandle> {
        self.produce(Op::DataOr, &[args(ranges)?])
    }

    /// Enumeration of data values.
    pub fn data_one_of(&self, values: &[DataValueHandle]) -> Result<DataTypeExpressionHandle> {
        self.produce(Op::DataOneOf, &[args(values)?])
    }
}
