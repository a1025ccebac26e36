//! Concept and individual constructors.

use crate::error::Result;
use crate::ffi::{
    ConceptHandle, DataRange, DataRoleHandle, DataValueHandle, Engine, IndividualHandle, Op,
    RawArg, RoleHandle,
};
use crate::reasoner::{arg, args, text, Reasoner};

impl<E: Engine> Reasoner<E> {
    /// The top concept (everything).
    pub fn top(&self) -> Result<ConceptHandle> {
        self.produce(Op::ConceptTop, &[])
    }

    /// The bottom concept (nothing).
    pub fn bottom(&self) -> Result<ConceptHandle> {
        self.produce(Op::ConceptBottom, &[])
    }

    /// Named concept. Asking twice for the same name yields equal handles.
    pub fn concept(&self, name: &str) -> Result<ConceptHandle> {
        self.produce(Op::ConceptName, &[text(name)])
    }

    /// Complement of `c`.
    pub fn not(&self, c: ConceptHandle) -> Result<ConceptHandle> {
        self.produce(Op::ConceptNot, &[arg(c)?])
    }

    /// Conjunction of all `cs`.
    pub fn and(&self, cs: &[ConceptHandle]) -> Result<ConceptHandle> {
        self.produce(Op::ConceptAnd, &[args(cs)?])
    }

    /// Disjunction of all `cs`.
    pub fn or(&self, cs: &[ConceptHandle]) -> Result<ConceptHandle> {
        self.produce(Op::ConceptOr, &[args(cs)?])
    }

    /// Enumeration of individuals.
    pub fn one_of(&self, individuals: &[IndividualHandle]) -> Result<ConceptHandle> {
        self.produce(Op::ConceptOneOf, &[args(individuals)?])
    }

    /// Existential restriction `some r.c`.
    pub fn exists(&self, r: RoleHandle, c: ConceptHandle) -> Result<ConceptHandle> {
        self.produce(Op::ObjectExists, &[arg(r)?, arg(c)?])
    }

    /// Universal restriction `all r.c`.
    pub fn forall(&self, r: RoleHandle, c: ConceptHandle) -> Result<ConceptHandle> {
        self.produce(Op::ObjectForall, &[arg(r)?, arg(c)?])
    }

    /// Value restriction `r value i`.
    pub fn has_value(&self, r: RoleHandle, i: IndividualHandle) -> Result<ConceptHandle> {
        self.produce(Op::ObjectValue, &[arg(r)?, arg(i)?])
    }

    /// Self restriction `r self`.
    pub fn self_reference(&self, r: RoleHandle) -> Result<ConceptHandle> {
        self.produce(Op::ObjectSelf, &[arg(r)?])
    }

    /// At least `n` `r`-successors in `c`.
    pub fn min_cardinality(&self, n: u32, r: RoleHandle, c: ConceptHandle) -> Result<ConceptHandle> {
        self.produce(Op::ObjectMinCardinality, &[RawArg::Count(n), arg(r)?, arg(c)?])
    }

    /// At most `n` `r`-successors in `c`.
    pub fn max_cardinality(&self, n: u32, r: RoleHandle, c: ConceptHandle) -> Result<ConceptHandle> {
        self.produce(Op::ObjectMaxCardinality, &[RawArg::Count(n), arg(r)?, arg(c)?])
    }

    /// Exactly `n` `r`-successors in `c`.
    pub fn exact_cardinality(
        &self,
        n: u32,
        r: RoleHandle,
        c: ConceptHandle,
    ) -> Result<ConceptHandle> {
        self.produce(Op::ObjectExactCardinality, &[RawArg::Count(n), arg(r)?, arg(c)?])
    }

    /// Some `dr`-value in `range`.
    pub fn data_exists<D: DataRange>(&self, dr: DataRoleHandle, range: D) -> Result<ConceptHandle> {
        self.produce(Op::DataExists, &[arg(dr)?, arg(range)?])
    }

    /// All `dr`-values in `range`.
    pub fn data_forall<D: DataRange>(&self, dr: DataRoleHandle, range: D) -> Result<ConceptHandle> {
        self.produce(Op::DataForall, &[arg(dr)?, arg(range)?])
    }

    /// Some `dr`-value equal to `v`.
    pub fn data_has_value(&self, dr: DataRoleHandle, v: DataValueHandle) -> Result<ConceptHandle> {
        self.produce(Op::DataValueRestriction, &[arg(dr)?, arg(v)?])
    }

    /// Named individual.
    pub fn individual(&self, name: &str) -> Result<IndividualHandle> {
        self.produce(Op::IndividualName, &[text(name)])
    }
}
