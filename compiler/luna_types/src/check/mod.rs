//! Semantic checks over a parsed chunk.
//!
//! The [`Checker`] walks statements in order, keeping a [`ScopeTree`] of
//! the bindings it has seen and lowering every annotation into the
//! [`TypeInterner`]. It reports constant misuse, type-construction errors
//! and annotated locals whose value does not fit the annotation. Values of
//! unknown type are never reported against.

mod infer;
mod lower;

use luna_diagnostic::{Diagnostic, ErrorCode};
use luna_ir::ast::{
    Block, Chunk, ClassDecl, ClassMemberKind, Condition, Expr, ExprKind, FunctionBody, LocalKind,
    LocalStmt, Stmt, StmtKind, TypeAlias,
};
use luna_ir::{Name, Span, StringInterner};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::data::{AliasId, TypeData};
use crate::scope::{BindingKind, ScopeError, ScopeId, ScopeKind, ScopeTree};
use crate::{
    BudgetExceeded, Idx, SubtypeChecker, TableBuilder, TypeBuildError, TypeFlags, TypeInterner,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckConfig {
    /// Step limit for each subtype query; `None` for no limit.
    pub subtype_budget: Option<u32>,
}

impl CheckConfig {
    pub const DEFAULT_SUBTYPE_BUDGET: u32 = 10_000;

    pub fn unlimited() -> Self {
        CheckConfig {
            subtype_budget: None,
        }
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            subtype_budget: Some(Self::DEFAULT_SUBTYPE_BUDGET),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CheckErrorKind {
    #[error(transparent)]
    Build(#[from] TypeBuildError),
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error(transparent)]
    Budget(#[from] BudgetExceeded),
    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    Mismatch { expected: String, found: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckError {
    pub kind: CheckErrorKind,
    pub span: Span,
}

impl CheckError {
    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            CheckErrorKind::Build(e) => e.code(),
            CheckErrorKind::Scope(e) => e.code(),
            CheckErrorKind::Budget(e) => e.code(),
            CheckErrorKind::Mismatch { .. } => ErrorCode::E2010,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match &self.kind {
            CheckErrorKind::Build(e) => e.to_diagnostic(self.span),
            CheckErrorKind::Scope(e) => e.to_diagnostic(self.span),
            CheckErrorKind::Budget(e) => e.to_diagnostic(self.span),
            CheckErrorKind::Mismatch { expected, .. } => Diagnostic::error(ErrorCode::E2010)
                .with_message(self.kind.to_string())
                .with_label(self.span, format!("expected `{expected}`")),
        }
    }
}

/// Everything the checker learned about a chunk.
pub struct CheckResult {
    pub errors: Vec<CheckError>,
    pub scopes: ScopeTree,
}

impl CheckResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(CheckError::to_diagnostic).collect()
    }
}

pub struct Checker<'a> {
    types: &'a TypeInterner,
    names: &'a StringInterner,
    subtypes: SubtypeChecker<'a>,
    scopes: ScopeTree,
    errors: Vec<CheckError>,
    builtins: FxHashMap<Name, Idx>,
    /// Scope holding each hoisted alias's generic parameters.
    alias_scopes: FxHashMap<AliasId, ScopeId>,
    self_name: Name,
}

impl<'a> Checker<'a> {
    pub fn new(types: &'a TypeInterner, names: &'a StringInterner, config: CheckConfig) -> Self {
        let subtypes = match config.subtype_budget {
            Some(limit) => SubtypeChecker::with_budget(types, limit),
            None => SubtypeChecker::new(types),
        };
        let builtins = [
            Idx::NIL,
            Idx::BOOLEAN,
            Idx::NUMBER,
            Idx::INTEGER,
            Idx::STRING,
            Idx::THREAD,
            Idx::BUFFER,
            Idx::ANY,
            Idx::UNKNOWN,
            Idx::NEVER,
        ]
        .into_iter()
        .filter_map(|idx| Some((names.intern(idx.builtin_name()?), idx)))
        .collect();
        Checker {
            types,
            names,
            subtypes,
            scopes: ScopeTree::new(),
            errors: Vec::new(),
            builtins,
            alias_scopes: FxHashMap::default(),
            self_name: names.intern("self"),
        }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn check_chunk(mut self, chunk: &Chunk) -> CheckResult {
        self.block_in(&chunk.block, ScopeId::ROOT);
        tracing::debug!(
            errors = self.errors.len(),
            scopes = self.scopes.len(),
            types = self.types.len(),
            "checked chunk"
        );
        CheckResult {
            errors: self.errors,
            scopes: self.scopes,
        }
    }

    fn error(&mut self, kind: impl Into<CheckErrorKind>, span: Span) {
        self.errors.push(CheckError {
            kind: kind.into(),
            span,
        });
    }

    /// Subtype query that reports an exhausted budget and then gives the
    /// benefit of the doubt.
    /// `sub <: sup`, or `true` when `sup` mentions the error type: the
    /// mistake behind it was already reported.
    fn subtype(&mut self, sub: Idx, sup: Idx, span: Span) -> bool {
        if self.types.flags(sup).contains(TypeFlags::HAS_ERROR) {
            return true;
        }
        match self.subtypes.check(sub, sup) {
            Ok(result) => result,
            Err(exceeded) => {
                self.error(exceeded, span);
                true
            }
        }
    }

    /// Report `value` not fitting `annotation`, unless `value` is too
    /// imprecise to say.
    fn check_assignable(&mut self, value: Idx, annotation: Idx, span: Span) {
        if self.types.flags(value).is_imprecise() || self.subtype(value, annotation, span) {
            return;
        }
        let kind = CheckErrorKind::Mismatch {
            expected: self.types.display(annotation, self.names).to_string(),
            found: self.types.display(value, self.names).to_string(),
        };
        self.error(kind, span);
    }

    // ─── Blocks and statements ───

    fn block(&mut self, block: &Block, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        let scope = self.scopes.push(parent, kind);
        self.block_in(block, scope);
        scope
    }

    fn block_in(&mut self, block: &Block, scope: ScopeId) {
        self.hoist_types(&block.stmts, scope);
        for stmt in &block.stmts {
            self.stmt(stmt, scope);
        }
    }

    /// Make every alias and extern type of a block nameable before any
    /// statement of the block is checked, so declarations may refer to
    /// each other in any order. Alias parameters are lowered here too so
    /// that argument counts can be checked at early uses; bodies wait for
    /// the statement itself.
    fn hoist_types(&mut self, stmts: &[Stmt], scope: ScopeId) {
        let mut aliases = Vec::new();
        for stmt in stmts {
            match &stmt.kind {
                StmtKind::TypeAlias(alias) => {
                    let id = self.types.reserve_alias(alias.name.name);
                    let reference = self.types.alias(id, Vec::new());
                    self.scopes.declare_type(scope, alias.name.name, reference);
                    aliases.push((id, alias));
                }
                StmtKind::DeclareClass(class) => {
                    let supertype = class.superclass.and_then(|sup| {
                        let found = self.scopes.lookup_type(scope, sup.name);
                        if found.is_none() {
                            let name = self.names.lookup(sup.name).to_owned();
                            self.error(TypeBuildError::UnknownType { name }, sup.span);
                        }
                        found
                    });
                    let ty = self.types.declare_extern(class.name.name, supertype);
                    self.scopes.declare_type(scope, class.name.name, ty);
                }
                _ => {}
            }
        }
        for (id, alias) in aliases {
            let alias_scope = self.scopes.push(scope, ScopeKind::Block);
            let (params, defaults) = self.lower_generics(&alias.generics, alias_scope, true);
            self.types.set_alias_params(id, params, defaults);
            self.alias_scopes.insert(id, alias_scope);
        }
    }

    fn stmt(&mut self, stmt: &Stmt, scope: ScopeId) {
        match &stmt.kind {
            StmtKind::Local(local) => self.local(local, scope),
            StmtKind::Assign(assign) => self.assign(&assign.targets, &assign.values, scope),
            StmtKind::CompoundAssign(compound) => {
                self.assignment_target(&compound.target, scope);
                self.infer(&compound.value, scope, None);
            }
            StmtKind::Expr(expr) => {
                self.infer(expr, scope, None);
            }
            StmtKind::Do(block) => {
                self.block(block, scope, ScopeKind::Block);
            }
            StmtKind::While(w) => {
                let body = self.scopes.push(scope, ScopeKind::Loop);
                self.condition(&w.cond, body);
                self.block_in(&w.body, body);
            }
            StmtKind::Repeat(r) => {
                // `until` sees the body's locals.
                let body = self.scopes.push(scope, ScopeKind::Loop);
                self.block_in(&r.body, body);
                self.infer(&r.cond, body, None);
            }
            StmtKind::If(i) => {
                for clause in &i.clauses {
                    let body = self.scopes.push(scope, ScopeKind::Block);
                    self.condition(&clause.cond, body);
                    self.block_in(&clause.body, body);
                }
                if let Some(else_block) = &i.else_block {
                    self.block(else_block, scope, ScopeKind::Block);
                }
            }
            StmtKind::NumericFor(f) => {
                for expr in [Some(&f.start), Some(&f.limit), f.step.as_ref()]
                    .into_iter()
                    .flatten()
                {
                    self.infer(expr, scope, None);
                }
                let body = self.scopes.push(scope, ScopeKind::Loop);
                let ty = match &f.var.annotation {
                    Some(annotation) => self.lower_type(annotation, scope),
                    None => Idx::NUMBER,
                };
                self.scopes.declare(
                    body,
                    f.var.name.name,
                    BindingKind::Local,
                    ty,
                    f.var.annotation.is_some(),
                    f.var.span,
                );
                self.block_in(&f.body, body);
            }
            StmtKind::GenericFor(f) => {
                for value in &f.values {
                    self.infer(value, scope, None);
                }
                let body = self.scopes.push(scope, ScopeKind::Loop);
                for var in &f.vars {
                    let ty = match &var.annotation {
                        Some(annotation) => self.lower_type(annotation, scope),
                        None => Idx::UNKNOWN,
                    };
                    self.scopes.declare(
                        body,
                        var.name.name,
                        BindingKind::Local,
                        ty,
                        var.annotation.is_some(),
                        var.span,
                    );
                }
                self.block_in(&f.body, body);
            }
            StmtKind::Function(f) => {
                let self_ty = match (f.name.path.as_slice(), f.name.method) {
                    ([ident], None) => {
                        if let Err(e) =
                            self.scopes.lookup_for_assignment(scope, ident.name, self.names)
                        {
                            self.error(e, ident.span);
                        }
                        None
                    }
                    (_, Some(_)) => Some(Idx::UNKNOWN),
                    _ => None,
                };
                self.function_body(&f.func, scope, self_ty);
            }
            StmtKind::LocalFunction(f) => {
                // Declared first so the body can recurse.
                let id = self.scopes.declare(
                    scope,
                    f.name.name,
                    BindingKind::Local,
                    Idx::UNKNOWN,
                    false,
                    f.name.span,
                );
                let ty = self.function_body(&f.func, scope, None);
                self.scopes.set_type(id, ty);
            }
            StmtKind::Return(values) => {
                for value in values {
                    self.infer(value, scope, None);
                }
            }
            StmtKind::TypeAlias(alias) => self.type_alias(alias, scope),
            StmtKind::DeclareGlobal(global) => {
                let ty = self.lower_type(&global.ty, scope);
                self.scopes.declare(
                    ScopeId::ROOT,
                    global.name.name,
                    BindingKind::Global,
                    ty,
                    true,
                    global.name.span,
                );
            }
            StmtKind::DeclareFunction(decl) => {
                let fn_scope = self.scopes.push(scope, ScopeKind::Function);
                let generics = self.lower_generics(&decl.signature.generics, fn_scope, false).0;
                let (ty, _) = self.signature_type(&decl.signature, fn_scope, generics, None);
                self.scopes.declare(
                    ScopeId::ROOT,
                    decl.name.name,
                    BindingKind::Global,
                    ty,
                    true,
                    decl.name.span,
                );
            }
            StmtKind::DeclareClass(class) => self.class(class, scope),
            StmtKind::Break | StmtKind::Continue | StmtKind::Error => {}
        }
    }

    fn local(&mut self, local: &LocalStmt, scope: ScopeId) {
        let annotations: Vec<Option<Idx>> = local
            .bindings
            .iter()
            .map(|b| b.annotation.as_ref().map(|ty| self.lower_type(ty, scope)))
            .collect();
        let values: Vec<(Idx, Span)> = local
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let expected = annotations.get(i).copied().flatten();
                (self.infer(value, scope, expected), value.span)
            })
            .collect();

        let kind = match local.kind {
            LocalKind::Local => BindingKind::Local,
            LocalKind::Const => BindingKind::Const,
        };
        // A trailing call or `...` may supply any number of values.
        let open_ended = local
            .values
            .last()
            .is_some_and(|v| v.is_call() || matches!(v.kind, ExprKind::Varargs));
        for (i, binding) in local.bindings.iter().enumerate() {
            if kind == BindingKind::Const && i >= local.values.len() && !open_ended {
                let name = self.names.lookup(binding.name.name).to_owned();
                self.error(TypeBuildError::UninitializedConst { name }, binding.span);
            }
            let annotation = annotations.get(i).copied().flatten();
            let ty = match (annotation, values.get(i).copied()) {
                (Some(annotation), Some((value, span))) => {
                    self.check_assignable(value, annotation, span);
                    annotation
                }
                (Some(annotation), None) => annotation,
                (None, Some((value, _))) if kind == BindingKind::Const => value,
                (None, Some((value, _))) => self.widen(value),
                (None, None) => Idx::UNKNOWN,
            };
            self.scopes.declare(
                scope,
                binding.name.name,
                kind,
                ty,
                annotation.is_some(),
                binding.span,
            );
        }
    }

    fn assign(&mut self, targets: &[Expr], values: &[Expr], scope: ScopeId) {
        let declared: Vec<Option<Idx>> = targets
            .iter()
            .map(|target| self.assignment_target(target, scope))
            .collect();
        for (i, value) in values.iter().enumerate() {
            let expected = declared.get(i).copied().flatten();
            let ty = self.infer(value, scope, expected);
            if let Some(expected) = expected {
                self.check_assignable(ty, expected, value.span);
            }
        }
    }

    /// Check that `target` may be assigned to. Returns the annotated type
    /// of the variable it names, if any.
    fn assignment_target(&mut self, target: &Expr, scope: ScopeId) -> Option<Idx> {
        let ExprKind::Name(ident) = &target.kind else {
            self.infer(target, scope, None);
            return None;
        };
        match self.scopes.lookup_for_assignment(scope, ident.name, self.names) {
            Ok(Some(id)) => self
                .scopes
                .binding(id)
                .filter(|binding| binding.annotated)
                .map(|binding| binding.ty),
            Ok(None) => None,
            Err(e) => {
                self.error(e, target.span);
                None
            }
        }
    }

    /// Bind a condition's locals in `scope`, the scope of the body it
    /// guards.
    fn condition(&mut self, cond: &Condition, scope: ScopeId) {
        match cond {
            Condition::Expr(expr) => {
                self.infer(expr, scope, None);
            }
            Condition::Local(local) => {
                let values: Vec<Idx> = local
                    .values
                    .iter()
                    .map(|value| self.infer(value, scope, None))
                    .collect();
                for (i, binding) in local.bindings.iter().enumerate() {
                    let ty = match &binding.annotation {
                        Some(annotation) => self.lower_type(annotation, scope),
                        None => values.get(i).map_or(Idx::UNKNOWN, |&v| self.widen(v)),
                    };
                    self.scopes.declare(
                        scope,
                        binding.name.name,
                        BindingKind::Local,
                        ty,
                        binding.annotation.is_some(),
                        binding.span,
                    );
                }
                if let Some(refinement) = &local.refinement {
                    self.infer(refinement, scope, None);
                }
            }
        }
    }

    /// Check a function body in a new function scope and return the
    /// function's type.
    fn function_body(&mut self, body: &FunctionBody, scope: ScopeId, self_ty: Option<Idx>) -> Idx {
        let fn_scope = self.scopes.push(scope, ScopeKind::Function);
        let generics = self.lower_generics(&body.signature.generics, fn_scope, false).0;
        let (ty, params) = self.signature_type(&body.signature, fn_scope, generics, self_ty);
        if let Some(self_ty) = self_ty {
            self.scopes.declare(
                fn_scope,
                self.self_name,
                BindingKind::Param,
                self_ty,
                false,
                body.span,
            );
        }
        for (param, ty) in body.signature.params.iter().zip(params) {
            self.scopes.declare(
                fn_scope,
                param.name.name,
                BindingKind::Param,
                ty,
                param.annotation.is_some(),
                param.span,
            );
        }
        self.block_in(&body.block, fn_scope);
        ty
    }

    fn type_alias(&mut self, alias: &TypeAlias, scope: ScopeId) {
        let hoisted = match self
            .scopes
            .lookup_type(scope, alias.name.name)
            .map(|idx| self.types.lookup(idx))
        {
            Some(TypeData::Alias { id, .. }) => self
                .alias_scopes
                .get(&id)
                .map(|&alias_scope| (id, alias_scope)),
            _ => None,
        };
        let Some((id, alias_scope)) = hoisted else {
            return;
        };
        let body = self.lower_type(&alias.ty, alias_scope);
        self.types.define_alias(id, body);
    }

    fn class(&mut self, class: &ClassDecl, scope: ScopeId) {
        let Some(extern_ty) = self.scopes.lookup_type(scope, class.name.name) else {
            return;
        };
        let mut builder = TableBuilder::new(self.names);
        for member in &class.members {
            let result = match &member.kind {
                ClassMemberKind::Property {
                    access, name, ty, ..
                } => {
                    let ty = self.lower_type(ty, scope);
                    builder.prop(name.name, *access, ty).map(drop)
                }
                ClassMemberKind::Method {
                    name, signature, ..
                } => {
                    let method_scope = self.scopes.push(scope, ScopeKind::Function);
                    let generics = self.lower_generics(&signature.generics, method_scope, false).0;
                    let (ty, _) =
                        self.signature_type(signature, method_scope, generics, Some(extern_ty));
                    builder.prop(name.name, None, ty).map(drop)
                }
                ClassMemberKind::Indexer(indexer) => {
                    let key = self.lower_type(&indexer.key, scope);
                    let value = self.lower_type(&indexer.value, scope);
                    builder.indexer(key, indexer.access, value).map(drop)
                }
            };
            if let Err(e) = result {
                self.error(e, member.span);
            }
        }
        match builder.build(self.types) {
            Ok(members) => self.types.set_extern_members(extern_ty, members),
            Err(e) => self.error(e, class.name.span),
        }
    }
}
