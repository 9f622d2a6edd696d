//! Luau types: interning, construction, subtyping and a small checker.
//!
//! Types are stored once in a [`TypeInterner`] and handled as [`Idx`]
//! values. Tables are assembled through a [`TableBuilder`], which rejects
//! malformed property lists with a [`TypeBuildError`]. [`is_subtype`] and
//! the budgeted [`SubtypeChecker`] decide the structural subtype relation;
//! [`instantiate`] substitutes generics. The [`Checker`] lowers the
//! annotations of a parsed chunk, tracks bindings in a [`ScopeTree`] and
//! reports constant misuse and annotation mismatches.

mod check;
mod data;
mod display;
mod error;
mod flags;
mod idx;
mod instantiate;
mod interner;
pub mod scope;
mod subtype;
mod table;

pub use check::{CheckConfig, CheckError, CheckErrorKind, CheckResult, Checker};
pub use data::{
    AliasId, ExternId, FunctionData, GenericId, Indexer, NumberBits, Pack, Primitive, Prop,
    Singleton, TableData, Tail, TypeArgData, TypeData,
};
pub use display::TypeDisplay;
pub use error::{BudgetExceeded, TypeBuildError};
pub use flags::TypeFlags;
pub use idx::Idx;
pub use instantiate::{instantiate, instantiate_function, instantiate_pack, Substitution};
pub use interner::{AliasInfo, ExternInfo, GenericInfo, TypeInternError, TypeInterner};
pub use scope::{Binding, BindingId, BindingKind, ScopeError, ScopeId, ScopeKind, ScopeTree};
pub use subtype::{is_subtype, SubtypeChecker};
pub use table::TableBuilder;
