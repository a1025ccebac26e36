//! Axiom assertions.
//!
//! Each assertion returns an [`AxiomHandle`] that can later be passed to
//! [`Reasoner::retract`](crate::Reasoner::retract).

use crate::error::Result;
use crate::ffi::{
    AxiomHandle, ConceptHandle, DataRoleHandle, DataValueHandle, Engine, IndividualHandle, Op,
    RoleHandle,
};
use crate::reasoner::{arg, args, Reasoner};

impl<E: Engine> Reasoner<E> {
    /// `sub` is subsumed by `sup`.
    pub fn implies_concepts(&self, sub: ConceptHandle, sup: ConceptHandle) -> Result<AxiomHandle> {
        self.produce(Op::ImpliesConcepts, &[arg(sub)?, arg(sup)?])
    }

    /// All `cs` denote the same set. Needs at least two concepts.
    pub fn equivalent_concepts(&self, cs: &[ConceptHandle]) -> Result<AxiomHandle> {
        self.produce(Op::EquivalentConcepts, &[args(cs)?])
    }

    /// The `cs` are pairwise disjoint. Needs at least two concepts.
    pub fn disjoint_concepts(&self, cs: &[ConceptHandle]) -> Result<AxiomHandle> {
        self.produce(Op::DisjointConcepts, &[args(cs)?])
    }

    /// `sub` is a sub-role of `sup`.
    pub fn implies_roles(&self, sub: RoleHandle, sup: RoleHandle) -> Result<AxiomHandle> {
        self.produce(Op::ImpliesRoles, &[arg(sub)?, arg(sup)?])
    }

    /// `i` is an instance of `c`.
    pub fn instance_of(&self, i: IndividualHandle, c: ConceptHandle) -> Result<AxiomHandle> {
        self.produce(Op::InstanceOf, &[arg(i)?, arg(c)?])
    }

    /// `subject` is `r`-related to `object`.
    pub fn related_to(
        &self,
        subject: IndividualHandle,
        r: RoleHandle,
        object: IndividualHandle,
    ) -> Result<AxiomHandle> {
        self.produce(Op::RelatedTo, &[arg(subject)?, arg(r)?, arg(object)?])
    }

    /// `subject` has `dr`-value `v`.
    pub fn value_of(
        &self,
        subject: IndividualHandle,
        dr: DataRoleHandle,
        v: DataValueHandle,
    ) -> Result<AxiomHandle> {
        self.produce(Op::ValueOf, &[arg(subject)?, arg(dr)?, arg(v)?])
    }
}
