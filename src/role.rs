//! Object and data role constructors.

use crate::error::Result;
use crate::ffi::{DataRoleHandle, Engine, Op, RoleHandle};
use crate::reasoner::{arg, args, text, Reasoner};

impl<E: Engine> Reasoner<E> {
    /// The universal object role.
    pub fn role_top(&self) -> Result<RoleHandle> {
        self.produce(Op::RoleTop, &[])
    }

    /// The empty object role.
    pub fn role_bottom(&self) -> Result<RoleHandle> {
        self.produce(Op::RoleBottom, &[])
    }

    /// Named object role.
    pub fn role(&self, name: &str) -> Result<RoleHandle> {
        self.produce(Op::RoleName, &[text(name)])
    }

    /// Inverse of `r`.
    pub fn inverse(&self, r: RoleHandle) -> Result<RoleHandle> {
        self.produce(Op::RoleInverse, &[arg(r)?])
    }

    /// Role chain `r1 o ... o rn`.
    pub fn compose(&self, chain: &[RoleHandle]) -> Result<RoleHandle> {
        self.produce(Op::RoleChain, &[args(chain)?])
    }

    /// The universal data role.
    pub fn data_role_top(&self) -> Result<DataRoleHandle> {
        self.produce(Op::DataRoleTop, &[])
    }

    /// The empty data role.
    pub fn data_role_bottom(&self) -> Result<DataRoleHandle> {
        self.produce(Op::DataRoleBottom, &[])
    }

    /// Named data role.
    pub fn data_role(&self, name: &str) -> Result<DataRoleHandle> {
        self.produce(Op::DataRoleName, &[text(name)])
    }
}
