//! Incremental construction of table types.

use luna_ir::ast::Access;
use luna_ir::{Name, StringInterner};

use crate::data::{Indexer, Prop, TableData};
use crate::{is_subtype, Idx, TypeBuildError, TypeFlags, TypeInterner};

struct Slot {
    name: Name,
    prop: Prop,
    /// Declared as `name: T` rather than through `read`/`write`.
    plain: bool,
}

/// A table type still being assembled.
///
/// Properties are checked as they arrive: a name may be declared once
/// plainly, or once per `read`/`write` modifier. The finished type is
/// interned by [`build`](Self::build), which leaves it unsealed so that
/// wider tables remain subtypes, or by [`seal`](Self::seal).
pub struct TableBuilder<'a> {
    names: &'a StringInterner,
    slots: Vec<Slot>,
    indexer: Option<Indexer>,
    metatable: Option<Idx>,
}

impl<'a> TableBuilder<'a> {
    pub fn new(names: &'a StringInterner) -> Self {
        TableBuilder {
            names,
            slots: Vec::new(),
            indexer: None,
            metatable: None,
        }
    }

    /// Add `name: ty`, `read name: ty` or `write name: ty`.
    pub fn prop(
        &mut self,
        name: Name,
        access: Option<Access>,
        ty: Idx,
    ) -> Result<&mut Self, TypeBuildError> {
        let Some(slot) = self.slots.iter_mut().find(|slot| slot.name == name) else {
            self.slots.push(Slot {
                name,
                prop: access_prop(access, ty),
                plain: access.is_none(),
            });
            return Ok(self);
        };
        let field = || self.names.lookup(name).to_owned();
        let Some(access) = access.filter(|_| !slot.plain) else {
            return Err(TypeBuildError::DuplicateField { field: field() });
        };
        let side = match access {
            Access::Read => &mut slot.prop.read,
            Access::Write => &mut slot.prop.write,
        };
        if side.is_some() {
            return Err(TypeBuildError::DuplicateModifier {
                field: field(),
                modifier: access.keyword(),
            });
        }
        *side = Some(ty);
        Ok(self)
    }

    pub fn indexer(
        &mut self,
        key: Idx,
        access: Option<Access>,
        value: Idx,
    ) -> Result<&mut Self, TypeBuildError> {
        if self.indexer.is_some() {
            return Err(TypeBuildError::DuplicateIndexer);
        }
        self.indexer = Some(Indexer {
            key,
            value: access_prop(access, value),
        });
        Ok(self)
    }

    pub fn metatable(&mut self, metatable: Idx) -> &mut Self {
        self.metatable = Some(metatable);
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.indexer.is_none()
    }

    /// Intern as an unsealed table.
    pub fn build(self, types: &TypeInterner) -> Result<Idx, TypeBuildError> {
        self.finish(types, false)
    }

    /// Intern as a sealed table.
    pub fn seal(self, types: &TypeInterner) -> Result<Idx, TypeBuildError> {
        self.finish(types, true)
    }

    fn finish(self, types: &TypeInterner, sealed: bool) -> Result<Idx, TypeBuildError> {
        for slot in &self.slots {
            if let (false, Some(read), Some(write)) = (slot.plain, slot.prop.read, slot.prop.write)
            {
                let read_is_error = types.flags(read).contains(TypeFlags::HAS_ERROR);
                if !read_is_error && !is_subtype(types, write, read) {
                    return Err(TypeBuildError::IncompatibleReadWrite {
                        field: self.names.lookup(slot.name).to_owned(),
                        read: types.display(read, self.names).to_string(),
                        write: types.display(write, self.names).to_string(),
                    });
                }
            }
        }
        Ok(types.table(TableData {
            props: self.slots.iter().map(|slot| (slot.name, slot.prop)).collect(),
            indexer: self.indexer,
            metatable: self.metatable,
            sealed,
        }))
    }
}

fn access_prop(access: Option<Access>, ty: Idx) -> Prop {
    match access {
        None => Prop::read_write(ty),
        Some(Access::Read) => Prop::read_only(ty),
        Some(Access::Write) => Prop::write_only(ty),
    }
}
