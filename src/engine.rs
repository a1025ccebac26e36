//! In-process reference engine.
//!
//! [`LocalEngine`] stores every object in a generational arena and hands out
//! identifiers of the form `(generation << 32) | (slot + 1)`. The `+ 1`
//! keeps zero free for the invalid sentinel; the generation lets a recycled
//! slot tell stale identifiers apart from fresh ones.
//!
//! It does no reasoning. It records expressions and axioms faithfully, so
//! the binding layer can be exercised end to end without a native library.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::ffi::handles::{HandleKind, RawId};
use crate::ffi::raw::{
    Engine, Op, RawArg, RawError, RawValue, ERR_CAPACITY, ERR_DANGLING, ERR_INVALID_ARGUMENT,
    ERR_INVALID_HANDLE, ERR_KIND_MISMATCH, ERR_UNKNOWN,
};
use crate::types::{EngineOptions, FacetKind};

type EngineResult<T> = std::result::Result<T, RawError>;

const DATA_RANGES: &[HandleKind] = &[HandleKind::DataType, HandleKind::DataTypeExpression];

const BUILTINS: [Op; 8] = [
    Op::ConceptTop,
    Op::ConceptBottom,
    Op::RoleTop,
    Op::RoleBottom,
    Op::DataRoleTop,
    Op::DataRoleBottom,
    Op::DataTop,
    Op::DataBottom,
];

/// What an arena slot remembers about the object it holds.
#[derive(Debug, Clone)]
struct Record {
    op: Op,
    refs: Vec<RawId>,
    text: Option<String>,
}

impl Record {
    fn new(op: Op) -> Self {
        Self {
            op,
            refs: Vec::new(),
            text: None,
        }
    }

    fn refs(op: Op, refs: Vec<RawId>) -> Self {
        Self {
            refs,
            ..Self::new(op)
        }
    }
}

#[derive(Debug)]
struct Entry {
    kind: HandleKind,
    record: Record,
    persistent: bool,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

fn encode(index: u32, generation: u32) -> RawId {
    RawId::from_bits((u64::from(generation) << 32) | (u64::from(index) + 1))
}

fn decode(id: RawId) -> Option<(usize, u32)> {
    let bits = id.to_bits();
    let low = bits & 0xffff_ffff;
    if low == 0 {
        return None;
    }
    Some(((low - 1) as usize, (bits >> 32) as u32))
}

fn bad_argument(message: impl Into<String>) -> RawError {
    RawError::new(ERR_INVALID_ARGUMENT, message)
}

/// Arena-backed engine living in this process.
#[derive(Debug)]
pub struct LocalEngine {
    slots: Vec<Slot>,
    free: Vec<u32>,
    created: usize,
    names: HashMap<(HandleKind, String), RawId>,
    values: HashMap<(RawId, String), RawId>,
    builtins: HashMap<Op, RawId>,
    options: EngineOptions,
}

impl LocalEngine {
    /// Create an engine with default options.
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    /// Create an engine with the given options.
    pub fn with_options(options: EngineOptions) -> Self {
        let mut engine = Self {
            slots: Vec::with_capacity(options.initial_capacity),
            free: Vec::new(),
            created: 0,
            names: HashMap::new(),
            values: HashMap::new(),
            builtins: HashMap::new(),
            options,
        };
        for op in BUILTINS {
            if let Some(kind) = op.result_kind() {
                let id = engine.place(kind, Record::new(op), true);
                engine.builtins.insert(op, id);
            }
        }
        engine
    }

    /// Options this engine was created with.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Number of live objects, built-ins excluded.
    pub fn live_objects(&self) -> usize {
        self.created
    }

    fn place(&mut self, kind: HandleKind, record: Record, persistent: bool) -> RawId {
        let entry = Entry {
            kind,
            record,
            persistent,
        };
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.entry = Some(entry);
        encode(index, slot.generation)
    }

    fn alloc(&mut self, kind: HandleKind, record: Record, persistent: bool) -> EngineResult<RawId> {
        if let Some(max) = self.options.max_objects {
            if self.created >= max {
                return Err(RawError::new(
                    ERR_CAPACITY,
                    format!("object limit of {} reached", max),
                ));
            }
        }
        if self.slots.len() >= u32::MAX as usize && self.free.is_empty() {
            return Err(RawError::new(ERR_CAPACITY, "arena exhausted"));
        }
        self.created += 1;
        let id = self.place(kind, record, persistent);
        trace!(kind = kind.name(), id = id.to_bits(), "allocated");
        Ok(id)
    }

    fn release(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        if slot.entry.take().is_some() {
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index as u32);
            self.created -= 1;
        }
    }

    fn entry(&self, kind: HandleKind, id: RawId) -> EngineResult<&Entry> {
        if !id.is_valid() {
            return Err(RawError::with_ref(ERR_INVALID_HANDLE, kind, id));
        }
        let entry = decode(id).and_then(|(index, generation)| {
            self.slots
                .get(index)
                .filter(|slot| slot.generation == generation)
                .and_then(|slot| slot.entry.as_ref())
        });
        let Some(entry) = entry else {
            return Err(RawError::with_ref(ERR_DANGLING, kind, id));
        };
        if entry.kind != kind {
            let mut err = RawError::with_ref(ERR_KIND_MISMATCH, kind, id);
            err.found = Some(entry.kind);
            return Err(err);
        }
        Ok(entry)
    }

    fn check_declared(declared: HandleKind, accepted: &[HandleKind], id: RawId) -> EngineResult<()> {
        if accepted.contains(&declared) {
            return Ok(());
        }
        let mut err = RawError::with_ref(ERR_KIND_MISMATCH, accepted[0], id);
        err.found = Some(declared);
        Err(err)
    }

    fn arity(op: Op, args: &[RawArg], n: usize) -> EngineResult<()> {
        if args.len() != n {
            return Err(bad_argument(format!(
                "{:?} takes {} arguments, got {}",
                op,
                n,
                args.len()
            )));
        }
        Ok(())
    }

    fn take_ref(&self, args: &[RawArg], i: usize, accepted: &[HandleKind]) -> EngineResult<RawId> {
        self.take_entry(args, i, accepted).map(|(id, _)| id)
    }

    fn take_entry(
        &self,
        args: &[RawArg],
        i: usize,
        accepted: &[HandleKind],
    ) -> EngineResult<(RawId, &Entry)> {
        match args.get(i) {
            Some(RawArg::Ref(kind, id)) => {
                Self::check_declared(*kind, accepted, *id)?;
                Ok((*id, self.entry(*kind, *id)?))
            }
            other => Err(bad_argument(format!(
                "argument {} must be a reference, got {:?}",
                i, other
            ))),
        }
    }

    fn take_refs(
        &self,
        args: &[RawArg],
        i: usize,
        accepted: &[HandleKind],
        min: usize,
    ) -> EngineResult<Vec<RawId>> {
        match args.get(i) {
            Some(RawArg::Refs(kind, ids)) => {
                if ids.len() < min {
                    return Err(bad_argument(format!(
                        "argument {} needs at least {} references, got {}",
                        i,
                        min,
                        ids.len()
                    )));
                }
                for id in ids {
                    Self::check_declared(*kind, accepted, *id)?;
                    self.entry(*kind, *id)?;
                }
                Ok(ids.clone())
            }
            other => Err(bad_argument(format!(
                "argument {} must be a reference list, got {:?}",
                i, other
            ))),
        }
    }

    fn take_text<'a>(args: &'a [RawArg], i: usize) -> EngineResult<&'a str> {
        match args.get(i) {
            Some(RawArg::Text(s)) if !s.is_empty() => Ok(s.as_str()),
            Some(RawArg::Text(_)) => Err(bad_argument(format!("argument {} is empty", i))),
            other => Err(bad_argument(format!(
                "argument {} must be text, got {:?}",
                i, other
            ))),
        }
    }

    fn take_count(args: &[RawArg], i: usize) -> EngineResult<u32> {
        match args.get(i) {
            Some(RawArg::Count(n)) => Ok(*n),
            other => Err(bad_argument(format!(
                "argument {} must be a count, got {:?}",
                i, other
            ))),
        }
    }

    fn take_code(args: &[RawArg], i: usize) -> EngineResult<i32> {
        match args.get(i) {
            Some(RawArg::Code(c)) => Ok(*c),
            other => Err(bad_argument(format!(
                "argument {} must be a code, got {:?}",
                i, other
            ))),
        }
    }

    /// Basic data type behind a data range: a data type stands for itself,
    /// a facet restriction for the type it restricts.
    fn take_base_type(&self, args: &[RawArg], i: usize) -> EngineResult<RawId> {
        let (id, entry) = self.take_entry(args, i, DATA_RANGES)?;
        match entry.record.op {
            Op::DataTypeName => Ok(id),
            Op::DataTypeRestriction => entry
                .record
                .refs
                .first()
                .copied()
                .ok_or_else(|| RawError::new(ERR_UNKNOWN, "restriction lost its base type")),
            other => Err(bad_argument(format!(
                "{:?} expression {} has no basic data type",
                other,
                id.to_bits()
            ))),
        }
    }

    fn intern(&mut self, kind: HandleKind, op: Op, name: &str) -> EngineResult<RawId> {
        let key = (kind, name.to_string());
        if let Some(id) = self.names.get(&key) {
            return Ok(*id);
        }
        let record = Record {
            text: Some(name.to_string()),
            ..Record::new(op)
        };
        let id = self.alloc(kind, record, kind == HandleKind::DataType)?;
        self.names.insert(key, id);
        Ok(id)
    }

    fn data_value(&mut self, text: &str, ty: RawId) -> EngineResult<RawId> {
        let key = (ty, text.to_string());
        if let Some(id) = self.values.get(&key) {
            return Ok(*id);
        }
        let record = Record {
            refs: vec![ty],
            text: Some(text.to_string()),
            ..Record::new(Op::DataValue)
        };
        let id = self.alloc(HandleKind::DataValue, record, true)?;
        self.values.insert(key, id);
        Ok(id)
    }

    fn entity_name(&self, args: &[RawArg]) -> EngineResult<String> {
        let (kind, id) = match args.first() {
            Some(RawArg::Ref(kind, id)) => (*kind, *id),
            other => {
                return Err(bad_argument(format!(
                    "argument 0 must be a reference, got {:?}",
                    other
                )))
            }
        };
        let entry = self.entry(kind, id)?;
        match (&entry.record.op, &entry.record.text) {
            (
                Op::ConceptName | Op::RoleName | Op::DataRoleName | Op::IndividualName
                | Op::DataTypeName,
                Some(name),
            ) => Ok(name.clone()),
            _ => Err(bad_argument(format!(
                "{} {} is not a named entity",
                kind.name(),
                id.to_bits()
            ))),
        }
    }

    fn retract(&mut self, args: &[RawArg]) -> EngineResult<()> {
        let id = self.take_ref(args, 0, &[HandleKind::Axiom])?;
        if let Some((index, _)) = decode(id) {
            self.release(index);
        }
        Ok(())
    }

    fn clear(&mut self) {
        let mut dropped = 0usize;
        for index in 0..self.slots.len() {
            let transient = self.slots[index]
                .entry
                .as_ref()
                .map(|e| !e.persistent)
                .unwrap_or(false);
            if transient {
                self.release(index);
                dropped += 1;
            }
        }
        self.names.retain(|(kind, _), _| *kind == HandleKind::DataType);
        debug!(dropped, kept = self.created, "engine cleared");
    }

    fn produce(&mut self, op: Op, args: &[RawArg]) -> EngineResult<RawId> {
        use HandleKind as K;

        let kind = op
            .result_kind()
            .ok_or_else(|| bad_argument(format!("{:?} produces no object", op)))?;

        let record = match op {
            Op::ConceptTop
            | Op::ConceptBottom
            | Op::RoleTop
            | Op::RoleBottom
            | Op::DataRoleTop
            | Op::DataRoleBottom
            | Op::DataTop
            | Op::DataBottom => {
                Self::arity(op, args, 0)?;
                return self.builtins.get(&op).copied().ok_or_else(|| {
                    RawError::new(ERR_UNKNOWN, format!("built-in {:?} missing", op))
                });
            }
            Op::ConceptName
            | Op::IndividualName
            | Op::RoleName
            | Op::DataRoleName
            | Op::DataTypeName => {
                Self::arity(op, args, 1)?;
                let name = Self::take_text(args, 0)?;
                return self.intern(kind, op, name);
            }
            Op::DataValue => {
                Self::arity(op, args, 2)?;
                let text = Self::take_text(args, 0)?;
                let ty = self.take_base_type(args, 1)?;
                return self.data_value(text, ty);
            }
            Op::ConceptNot => {
                Self::arity(op, args, 1)?;
                Record::refs(op, vec![self.take_ref(args, 0, &[K::Concept])?])
            }
            Op::ConceptAnd | Op::ConceptOr => {
                Self::arity(op, args, 1)?;
                Record::refs(op, self.take_refs(args, 0, &[K::Concept], 1)?)
            }
            Op::ConceptOneOf => {
                Self::arity(op, args, 1)?;
                Record::refs(op, self.take_refs(args, 0, &[K::Individual], 1)?)
            }
            Op::ObjectExists | Op::ObjectForall => {
                Self::arity(op, args, 2)?;
                let role = self.take_ref(args, 0, &[K::Role])?;
                let filler = self.take_ref(args, 1, &[K::Concept])?;
                Record::refs(op, vec![role, filler])
            }
            Op::ObjectValue => {
                Self::arity(op, args, 2)?;
                let role = self.take_ref(args, 0, &[K::Role])?;
                let individual = self.take_ref(args, 1, &[K::Individual])?;
                Record::refs(op, vec![role, individual])
            }
            Op::ObjectSelf | Op::RoleInverse => {
                Self::arity(op, args, 1)?;
                Record::refs(op, vec![self.take_ref(args, 0, &[K::Role])?])
            }
            Op::ObjectMinCardinality | Op::ObjectMaxCardinality | Op::ObjectExactCardinality => {
                Self::arity(op, args, 3)?;
                Self::take_count(args, 0)?;
                let role = self.take_ref(args, 1, &[K::Role])?;
                let filler = self.take_ref(args, 2, &[K::Concept])?;
                Record::refs(op, vec![role, filler])
            }
            Op::DataExists | Op::DataForall => {
                Self::arity(op, args, 2)?;
                let role = self.take_ref(args, 0, &[K::DataRole])?;
                let range = self.take_ref(args, 1, DATA_RANGES)?;
                Record::refs(op, vec![role, range])
            }
            Op::DataValueRestriction => {
                Self::arity(op, args, 2)?;
                let role = self.take_ref(args, 0, &[K::DataRole])?;
                let value = self.take_ref(args, 1, &[K::DataValue])?;
                Record::refs(op, vec![role, value])
            }
            Op::RoleChain => {
                Self::arity(op, args, 1)?;
                Record::refs(op, self.take_refs(args, 0, &[K::Role], 1)?)
            }
            Op::DataTypeRestriction => {
                Self::arity(op, args, 2)?;
                let base = self.take_ref(args, 0, &[K::DataType])?;
                let mut refs = vec![base];
                refs.extend(self.take_refs(args, 1, &[K::Facet], 1)?);
                Record::refs(op, refs)
            }
            Op::Facet => {
                Self::arity(op, args, 2)?;
                let code = Self::take_code(args, 0)?;
                FacetKind::try_from(code)
                    .map_err(|c| bad_argument(format!("unknown facet code {}", c)))?;
                Record::refs(op, vec![self.take_ref(args, 1, &[K::DataValue])?])
            }
            Op::DataNot => {
                Self::arity(op, args, 1)?;
                Record::refs(op, vec![self.take_ref(args, 0, DATA_RANGES)?])
            }
            Op::DataAnd | Op::DataOr => {
                Self::arity(op, args, 1)?;
                Record::refs(op, self.take_refs(args, 0, DATA_RANGES, 1)?)
            }
            Op::DataOneOf => {
                Self::arity(op, args, 1)?;
                Record::refs(op, self.take_refs(args, 0, &[K::DataValue], 1)?)
            }
            Op::ImpliesConcepts => {
                Self::arity(op, args, 2)?;
                let sub = self.take_ref(args, 0, &[K::Concept])?;
                let sup = self.take_ref(args, 1, &[K::Concept])?;
                Record::refs(op, vec![sub, sup])
            }
            Op::EquivalentConcepts | Op::DisjointConcepts => {
                Self::arity(op, args, 1)?;
                Record::refs(op, self.take_refs(args, 0, &[K::Concept], 2)?)
            }
            Op::ImpliesRoles => {
                Self::arity(op, args, 2)?;
                let sub = self.take_ref(args, 0, &[K::Role])?;
                let sup = self.take_ref(args, 1, &[K::Role])?;
                Record::refs(op, vec![sub, sup])
            }
            Op::InstanceOf => {
                Self::arity(op, args, 2)?;
                let individual = self.take_ref(args, 0, &[K::Individual])?;
                let concept = self.take_ref(args, 1, &[K::Concept])?;
                Record::refs(op, vec![individual, concept])
            }
            Op::RelatedTo => {
                Self::arity(op, args, 3)?;
                let subject = self.take_ref(args, 0, &[K::Individual])?;
                let role = self.take_ref(args, 1, &[K::Role])?;
                let object = self.take_ref(args, 2, &[K::Individual])?;
                Record::refs(op, vec![subject, role, object])
            }
            Op::ValueOf => {
                Self::arity(op, args, 3)?;
                let subject = self.take_ref(args, 0, &[K::Individual])?;
                let role = self.take_ref(args, 1, &[K::DataRole])?;
                let value = self.take_ref(args, 2, &[K::DataValue])?;
                Record::refs(op, vec![subject, role, value])
            }
            Op::Retract | Op::EntityName | Op::Clear => {
                return Err(bad_argument(format!("{:?} produces no object", op)))
            }
        };

        self.alloc(kind, record, false)
    }
}

impl Default for LocalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for LocalEngine {
    fn invoke(&mut self, op: Op, args: &[RawArg]) -> EngineResult<RawValue> {
        match op {
            Op::Retract => {
                Self::arity(op, args, 1)?;
                self.retract(args)?;
                Ok(RawValue::Unit)
            }
            Op::EntityName => {
                Self::arity(op, args, 1)?;
                self.entity_name(args).map(RawValue::Text)
            }
            Op::Clear => {
                Self::arity(op, args, 0)?;
                self.clear();
                Ok(RawValue::Unit)
            }
            _ => self.produce(op, args).map(RawValue::Id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: RawValue) -> RawId {
        match value {
            RawValue::Id(id) => id,
            other => panic!("expected id, got {:?}", other),
        }
    }

    #[test]
    fn test_ids_are_never_zero() {
        assert_ne!(encode(0, 0), RawId::INVALID);
        assert_eq!(decode(encode(5, 3)), Some((5, 3)));
        assert_eq!(decode(RawId::INVALID), None);
    }

    #[test]
    fn test_names_are_interned() {
        let mut engine = LocalEngine::new();
        let args = [RawArg::Text("Animal".into())];
        let a = id(engine.invoke(Op::ConceptName, &args).unwrap());
        let b = id(engine.invoke(Op::ConceptName, &args).unwrap());
        assert_eq!(a, b);
        assert_eq!(engine.live_objects(), 1);

        let role = id(engine.invoke(Op::RoleName, &args).unwrap());
        assert_ne!(a, role);
    }

    #[test]
    fn test_recycled_slot_rejects_stale_id() {
        let mut engine = LocalEngine::new();
        let c = id(engine
            .invoke(Op::ConceptName, &[RawArg::Text("C".into())])
            .unwrap());
        let ax = id(engine
            .invoke(
                Op::ImpliesConcepts,
                &[
                    RawArg::Ref(HandleKind::Concept, c),
                    RawArg::Ref(HandleKind::Concept, c),
                ],
            )
            .unwrap());
        engine
            .invoke(Op::Retract, &[RawArg::Ref(HandleKind::Axiom, ax)])
            .unwrap();

        // Reuses the freed slot under a new generation.
        let again = id(engine
            .invoke(
                Op::ImpliesConcepts,
                &[
                    RawArg::Ref(HandleKind::Concept, c),
                    RawArg::Ref(HandleKind::Concept, c),
                ],
            )
            .unwrap());
        assert_ne!(ax, again);

        let err = engine
            .invoke(Op::Retract, &[RawArg::Ref(HandleKind::Axiom, ax)])
            .unwrap_err();
        assert_eq!(err.code, ERR_DANGLING);
    }

    #[test]
    fn test_mistagged_reference() {
        let mut engine = LocalEngine::new();
        let r = id(engine
            .invoke(Op::RoleName, &[RawArg::Text("likes".into())])
            .unwrap());
        let err = engine
            .invoke(Op::ConceptNot, &[RawArg::Ref(HandleKind::Concept, r)])
            .unwrap_err();
        assert_eq!(err.code, ERR_KIND_MISMATCH);
        assert_eq!(err.kind, Some(HandleKind::Concept));
        assert_eq!(err.found, Some(HandleKind::Role));
    }

    #[test]
    fn test_capacity_limit() {
        let mut engine = LocalEngine::with_options(EngineOptions {
            max_objects: Some(1),
            ..Default::default()
        });
        engine
            .invoke(Op::ConceptName, &[RawArg::Text("A".into())])
            .unwrap();
        let err = engine
            .invoke(Op::ConceptName, &[RawArg::Text("B".into())])
            .unwrap_err();
        assert_eq!(err.code, ERR_CAPACITY);
    }

    #[test]
    fn test_data_value_resolves_base_type() {
        let mut engine = LocalEngine::new();
        let int = id(engine
            .invoke(Op::DataTypeName, &[RawArg::Text("xsd:int".into())])
            .unwrap());
        let zero = id(engine
            .invoke(
                Op::DataValue,
                &[
                    RawArg::Text("0".into()),
                    RawArg::Ref(HandleKind::DataType, int),
                ],
            )
            .unwrap());
        let low = id(engine
            .invoke(
                Op::Facet,
                &[
                    RawArg::Code(FacetKind::MinInclusive.into()),
                    RawArg::Ref(HandleKind::DataValue, zero),
                ],
            )
            .unwrap());
        let natural = id(engine
            .invoke(
                Op::DataTypeRestriction,
                &[
                    RawArg::Ref(HandleKind::DataType, int),
                    RawArg::Refs(HandleKind::Facet, vec![low]),
                ],
            )
            .unwrap());

        let again = id(engine
            .invoke(
                Op::DataValue,
                &[
                    RawArg::Text("0".into()),
                    RawArg::Ref(HandleKind::DataTypeExpression, natural),
                ],
            )
            .unwrap());
        assert_eq!(zero, again);

        // Other expressions have no basic type
        let top = id(engine.invoke(Op::DataTop, &[]).unwrap());
        let err = engine
            .invoke(
                Op::DataValue,
                &[
                    RawArg::Text("0".into()),
                    RawArg::Ref(HandleKind::DataTypeExpression, top),
                ],
            )
            .unwrap_err();
        assert_eq!(err.code, ERR_INVALID_ARGUMENT);
    }

    #[test]
    fn test_clear_keeps_data_types() {
        let mut engine = LocalEngine::new();
        let ty = id(engine
            .invoke(Op::DataTypeName, &[RawArg::Text("xsd:int".into())])
            .unwrap());
        engine
            .invoke(Op::ConceptName, &[RawArg::Text("A".into())])
            .unwrap();
        engine.invoke(Op::Clear, &[]).unwrap();
        assert_eq!(engine.live_objects(), 1);

        let again = id(engine
            .invoke(Op::DataTypeName, &[RawArg::Text("xsd:int".into())])
            .unwrap());
        assert_eq!(ty, again);
    }
}
