//! Lowering type annotations into interned types.

use luna_ir::ast::{
    FunctionSignature, GenericDefault, GenericParam, PackTail, SingletonType, TableType, TypeArg,
    TypeExpr, TypeExprKind, TypePack, TypeReference,
};
use luna_ir::Span;

use super::Checker;
use crate::data::{
    FunctionData, Indexer, Pack, Prop, Singleton, TableData, Tail, TypeArgData, TypeData,
};
use crate::instantiate::{instantiate, instantiate_pack, Substitution};
use crate::scope::{ScopeId, ScopeKind};
use crate::{Idx, TableBuilder, TypeBuildError};

impl Checker<'_> {
    pub(super) fn lower_type(&mut self, ty: &TypeExpr, scope: ScopeId) -> Idx {
        match &ty.kind {
            TypeExprKind::Reference(reference) => self.lower_reference(reference, ty.span, scope),
            TypeExprKind::Nil => Idx::NIL,
            TypeExprKind::Singleton(singleton) => self.types.singleton(match *singleton {
                SingletonType::Bool(b) => Singleton::Bool(b),
                SingletonType::String(s) => Singleton::String(s),
            }),
            TypeExprKind::Typeof(expr) => {
                let inferred = self.infer(expr, scope, None);
                self.widen(inferred)
            }
            TypeExprKind::Table(table) => self.lower_table(table, ty.span, scope),
            TypeExprKind::Array(element) => {
                let element = self.lower_type(element, scope);
                self.types.table(TableData {
                    indexer: Some(Indexer {
                        key: Idx::NUMBER,
                        value: Prop::read_write(element),
                    }),
                    ..TableData::default()
                })
            }
            TypeExprKind::Function(func) => {
                let fn_scope = self.scopes.push(scope, ScopeKind::Function);
                let generics = self.lower_generics(&func.generics, fn_scope, false).0;
                let params = self.lower_pack(&func.params, fn_scope);
                let returns = self.lower_pack(&func.returns, fn_scope);
                self.types.function(FunctionData {
                    generics: generics.into_boxed_slice(),
                    params,
                    returns,
                })
            }
            TypeExprKind::Union(members) => {
                let members: Vec<Idx> = members.iter().map(|m| self.lower_type(m, scope)).collect();
                self.types.union(members)
            }
            TypeExprKind::Intersection(members) => {
                let members: Vec<Idx> = members.iter().map(|m| self.lower_type(m, scope)).collect();
                self.types.intersection(members)
            }
            TypeExprKind::Optional(inner) => {
                let inner = self.lower_type(inner, scope);
                self.types.optional(inner)
            }
            TypeExprKind::Paren(inner) => self.lower_type(inner, scope),
            TypeExprKind::Error => Idx::ERROR,
        }
    }

    fn lower_reference(&mut self, reference: &TypeReference, span: Span, scope: ScopeId) -> Idx {
        let args: Vec<TypeArgData> = reference
            .args
            .iter()
            .map(|arg| self.lower_type_arg(arg, scope))
            .collect();
        // Types from other modules cannot be seen from a single chunk.
        if reference.prefix.is_some() {
            return Idx::ERROR;
        }

        let name = reference.name.name;
        let Some(found) = self
            .scopes
            .lookup_type(scope, name)
            .or_else(|| self.builtins.get(&name).copied())
        else {
            let name = self.names.lookup(name).to_owned();
            self.error(TypeBuildError::UnknownType { name }, reference.name.span);
            return Idx::ERROR;
        };

        let alias = match self.types.lookup(found) {
            TypeData::Alias { id, args } if args.is_empty() => {
                self.types.alias_info(id).map(|info| (id, info))
            }
            _ => None,
        };
        let Some((id, info)) = alias else {
            if !args.is_empty() {
                self.wrong_arg_count(reference, 0, args.len(), span);
                return Idx::ERROR;
            }
            return found;
        };

        if args.len() > info.params.len() || args.len() < info.required_args() {
            self.wrong_arg_count(reference, info.params.len(), args.len(), span);
            return Idx::ERROR;
        }
        let mut args = args;
        for i in args.len()..info.params.len() {
            let subst = Substitution::bind(self.types, &info.params[..i], &args);
            let filled = match &info.defaults[i] {
                Some(TypeArgData::Type(ty)) => TypeArgData::Type(instantiate(self.types, *ty, &subst)),
                Some(TypeArgData::Pack(pack)) => {
                    TypeArgData::Pack(instantiate_pack(self.types, pack, &subst))
                }
                None => TypeArgData::Type(Idx::ERROR),
            };
            args.push(filled);
        }
        self.types.alias(id, args)
    }

    fn wrong_arg_count(&mut self, reference: &TypeReference, expected: usize, found: usize, span: Span) {
        let name = self.names.lookup(reference.name.name).to_owned();
        self.error(
            TypeBuildError::WrongTypeArgCount {
                name,
                expected,
                found,
            },
            span,
        );
    }

    pub(super) fn lower_type_arg(&mut self, arg: &TypeArg, scope: ScopeId) -> TypeArgData {
        match arg {
            TypeArg::Type(ty) => TypeArgData::Type(self.lower_type(ty, scope)),
            TypeArg::Pack(pack) => TypeArgData::Pack(self.lower_pack(pack, scope)),
        }
    }

    fn lower_table(&mut self, table: &TableType, span: Span, scope: ScopeId) -> Idx {
        let mut builder = TableBuilder::new(self.names);
        for prop in &table.props {
            let ty = self.lower_type(&prop.ty, scope);
            if let Err(e) = builder.prop(prop.key.name(), prop.access, ty) {
                self.error(e, prop.span);
            }
        }
        if let Some(indexer) = &table.indexer {
            let key = self.lower_type(&indexer.key, scope);
            let value = self.lower_type(&indexer.value, scope);
            if let Err(e) = builder.indexer(key, indexer.access, value) {
                self.error(e, indexer.span);
            }
        }
        match builder.build(self.types) {
            Ok(idx) => idx,
            Err(e) => {
                self.error(e, span);
                Idx::ERROR
            }
        }
    }

    pub(super) fn lower_pack(&mut self, pack: &TypePack, scope: ScopeId) -> Pack {
        let head: Vec<Idx> = pack
            .entries
            .iter()
            .map(|entry| self.lower_type(&entry.ty, scope))
            .collect();
        let tail = match &pack.tail {
            None => Tail::None,
            Some(tail) => self.lower_tail(tail, scope),
        };
        Pack::new(head, tail)
    }

    fn lower_tail(&mut self, tail: &PackTail, scope: ScopeId) -> Tail {
        match tail {
            PackTail::Variadic(ty) => Tail::Variadic(self.lower_type(ty, scope)),
            PackTail::Generic(ident) => {
                let found = self.scopes.lookup_type(scope, ident.name).filter(|&g| {
                    self.types.generic_info(g).is_some_and(|info| info.pack)
                });
                match found {
                    Some(generic) => Tail::Generic(generic),
                    None => {
                        let name = format!("{}...", self.names.lookup(ident.name));
                        self.error(TypeBuildError::UnknownType { name }, ident.span);
                        Tail::Variadic(Idx::ERROR)
                    }
                }
            }
        }
    }

    /// Declare `params` as generics in `scope` and lower their bounds and,
    /// when `with_defaults`, their defaults.
    pub(super) fn lower_generics(
        &mut self,
        params: &[GenericParam],
        scope: ScopeId,
        with_defaults: bool,
    ) -> (Vec<Idx>, Vec<Option<TypeArgData>>) {
        let generics: Vec<Idx> = params
            .iter()
            .map(|param| {
                let generic = self.types.fresh_generic(param.name.name, param.pack);
                self.scopes.declare_type(scope, param.name.name, generic);
                generic
            })
            .collect();

        let mut defaults = Vec::with_capacity(params.len());
        for (param, &generic) in params.iter().zip(&generics) {
            let bound = match (&param.bound, param.pack) {
                (Some(bound), false) => {
                    let ty = self.lower_type(&bound.ty, scope);
                    self.types.set_generic_bound(generic, ty);
                    Some(ty)
                }
                (Some(bound), true) => {
                    self.invalid_generic("a generic pack cannot have a bound", bound.ty.span);
                    None
                }
                (None, _) => None,
            };
            let default = match (&param.default, with_defaults) {
                (Some(default), true) => self.lower_default(param, default, bound, scope),
                _ => None,
            };
            defaults.push(default);
        }
        (generics, defaults)
    }

    fn lower_default(
        &mut self,
        param: &GenericParam,
        default: &GenericDefault,
        bound: Option<Idx>,
        scope: ScopeId,
    ) -> Option<TypeArgData> {
        match (default, param.pack) {
            (GenericDefault::Type(ty), false) => {
                let idx = self.lower_type(ty, scope);
                if let Some(bound) = bound {
                    if !self.subtype(idx, bound, ty.span) {
                        let reason = format!(
                            "default `{}` does not satisfy the bound `{}` of `{}`",
                            self.types.display(idx, self.names),
                            self.types.display(bound, self.names),
                            self.names.lookup(param.name.name),
                        );
                        self.invalid_generic(reason, ty.span);
                    }
                }
                Some(TypeArgData::Type(idx))
            }
            (GenericDefault::Type(ty), true) => {
                Some(TypeArgData::Pack(Pack::single(self.lower_type(ty, scope))))
            }
            (GenericDefault::Pack(pack), true) => Some(TypeArgData::Pack(self.lower_pack(pack, scope))),
            (GenericDefault::Pack(pack), false) => {
                self.invalid_generic("a type parameter cannot default to a type pack", pack.span);
                None
            }
        }
    }

    fn invalid_generic(&mut self, reason: impl Into<String>, span: Span) {
        self.error(
            TypeBuildError::InvalidGeneric {
                reason: reason.into(),
            },
            span,
        );
    }

    /// Function type of a signature whose generics are already declared in
    /// `scope`, plus the type of each named parameter. Missing annotations
    /// read as `unknown`; a method gets `self_ty` as its first parameter.
    pub(super) fn signature_type(
        &mut self,
        signature: &FunctionSignature,
        scope: ScopeId,
        generics: Vec<Idx>,
        self_ty: Option<Idx>,
    ) -> (Idx, Vec<Idx>) {
        let params: Vec<Idx> = signature
            .params
            .iter()
            .map(|param| match &param.annotation {
                Some(annotation) => self.lower_type(annotation, scope),
                None => Idx::UNKNOWN,
            })
            .collect();
        let tail = match &signature.vararg {
            None => Tail::None,
            Some(vararg) => match &vararg.annotation {
                Some(tail) => self.lower_tail(tail, scope),
                None => Tail::Variadic(Idx::ANY),
            },
        };
        let returns = match &signature.returns {
            Some(returns) => self.lower_pack(returns, scope),
            None => Pack::new(Vec::new(), Tail::Variadic(Idx::UNKNOWN)),
        };
        let head: Vec<Idx> = self_ty.into_iter().chain(params.iter().copied()).collect();
        let ty = self.types.function(FunctionData {
            generics: generics.into_boxed_slice(),
            params: Pack::new(head, tail),
            returns,
        });
        (ty, params)
    }
}
