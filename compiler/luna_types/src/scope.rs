//! Lexical scopes.
//!
//! Scopes live in an arena and point at their parent by id, so a child
//! never owns or mutates what it can see. Declaring a name that an outer
//! scope already has adds a new binding in the inner scope; the outer
//! binding is left as it was.

use luna_diagnostic::{Diagnostic, ErrorCode};
use luna_ir::{Name, Span, StringInterner};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::Idx;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BindingId(u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Chunk,
    Function,
    Block,
    Loop,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Local,
    Const,
    Param,
    /// `declare` or an undeclared assignment target.
    Global,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub name: Name,
    pub kind: BindingKind,
    pub ty: Idx,
    /// Written by the user rather than inferred.
    pub annotated: bool,
    /// Position among the bindings of its scope.
    pub order: u32,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("cannot assign to `{name}` because it is a constant")]
    AssignToConst { name: String, declared_at: Span },
}

impl ScopeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ScopeError::AssignToConst { .. } => ErrorCode::E3001,
        }
    }

    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        match self {
            ScopeError::AssignToConst { name, declared_at } => Diagnostic::error(self.code())
                .with_message(self.to_string())
                .with_label(span, "assignment to a constant")
                .with_secondary_label(*declared_at, format!("`{name}` declared as a constant here"))
                .with_note("declare it with `local` if it needs to change"),
        }
    }
}

struct Scope {
    parent: Option<ScopeId>,
    kind: ScopeKind,
    values: FxHashMap<Name, BindingId>,
    /// Generic parameters, aliases and extern types visible by name.
    types: FxHashMap<Name, Idx>,
    /// Every binding made here, shadowed ones included.
    declared: Vec<BindingId>,
}

/// Arena of every scope created while checking a chunk.
pub struct ScopeTree {
    scopes: Vec<Scope>,
    bindings: Vec<Binding>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    /// A tree holding only the chunk scope, [`ScopeId::ROOT`].
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![Scope {
                parent: None,
                kind: ScopeKind::Chunk,
                values: FxHashMap::default(),
                types: FxHashMap::default(),
                declared: Vec::new(),
            }],
            bindings: Vec::new(),
        }
    }

    pub fn push(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(arena_id(self.scopes.len()));
        self.scopes.push(Scope {
            parent: Some(parent),
            kind,
            values: FxHashMap::default(),
            types: FxHashMap::default(),
            declared: Vec::new(),
        });
        id
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes.get(scope.index()).and_then(|s| s.parent)
    }

    pub fn kind(&self, scope: ScopeId) -> Option<ScopeKind> {
        self.scopes.get(scope.index()).map(|s| s.kind)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Bind `name` in `scope`, hiding any outer binding of the same name
    /// for the rest of this scope.
    pub fn declare(
        &mut self,
        scope: ScopeId,
        name: Name,
        kind: BindingKind,
        ty: Idx,
        annotated: bool,
        span: Span,
    ) -> BindingId {
        let id = BindingId(arena_id(self.bindings.len()));
        let order = match self.scopes.get_mut(scope.index()) {
            Some(s) => {
                s.values.insert(name, id);
                s.declared.push(id);
                arena_id(s.declared.len() - 1)
            }
            None => 0,
        };
        self.bindings.push(Binding {
            name,
            kind,
            ty,
            annotated,
            order,
            span,
        });
        id
    }

    pub fn declare_type(&mut self, scope: ScopeId, name: Name, ty: Idx) -> Option<Idx> {
        self.scopes
            .get_mut(scope.index())
            .and_then(|s| s.types.insert(name, ty))
    }

    pub fn binding(&self, id: BindingId) -> Option<&Binding> {
        self.bindings.get(id.0 as usize)
    }

    pub fn set_type(&mut self, id: BindingId, ty: Idx) {
        if let Some(binding) = self.bindings.get_mut(id.0 as usize) {
            binding.ty = ty;
        }
    }

    /// Nearest binding of `name` visible from `scope`.
    pub fn lookup(&self, scope: ScopeId, name: Name) -> Option<BindingId> {
        self.ancestors(scope)
            .find_map(|s| self.scopes[s.index()].values.get(&name).copied())
    }

    pub fn lookup_type(&self, scope: ScopeId, name: Name) -> Option<Idx> {
        self.ancestors(scope)
            .find_map(|s| self.scopes[s.index()].types.get(&name).copied())
    }

    /// Resolve `name` as the target of an assignment. A constant rejects
    /// it; an unbound name is a global and yields `None`.
    pub fn lookup_for_assignment(
        &self,
        scope: ScopeId,
        name: Name,
        names: &StringInterner,
    ) -> Result<Option<BindingId>, ScopeError> {
        let Some(id) = self.lookup(scope, name) else {
            return Ok(None);
        };
        match self.binding(id) {
            Some(binding) if binding.kind == BindingKind::Const => Err(ScopeError::AssignToConst {
                name: names.lookup(name).to_owned(),
                declared_at: binding.span,
            }),
            _ => Ok(Some(id)),
        }
    }

    /// Bindings declared directly in `scope`, in declaration order.
    pub fn bindings_in(&self, scope: ScopeId) -> Vec<&Binding> {
        self.scopes
            .get(scope.index())
            .map(|s| s.declared.iter().filter_map(|&id| self.binding(id)).collect())
            .unwrap_or_default()
    }

    /// `scope` and each enclosing scope, innermost first.
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(
            (scope.index() < self.scopes.len()).then_some(scope),
            move |&s| self.parent(s),
        )
    }
}

fn arena_id(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("scope arena overflow"))
}
