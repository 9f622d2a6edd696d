//! Rendering types in Luau syntax.

use std::fmt::{self, Write};

use luna_ir::{is_identifier, StringInterner};

use crate::data::{FunctionData, Pack, Prop, Singleton, TableData, Tail, TypeArgData, TypeData};
use crate::{Idx, TypeInterner};

/// `Display` adapter returned by [`TypeInterner::display`].
pub struct TypeDisplay<'a> {
    types: &'a TypeInterner,
    names: &'a StringInterner,
    idx: Idx,
}

impl TypeInterner {
    pub fn display<'a>(&'a self, idx: Idx, names: &'a StringInterner) -> TypeDisplay<'a> {
        TypeDisplay {
            types: self,
            names,
            idx,
        }
    }
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.ty(f, self.idx, Position::Top)
    }
}

/// Where a type sits, deciding whether it needs parentheses.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Position {
    Top,
    UnionMember,
    IntersectionMember,
    /// Operand of a postfix `?`.
    Optional,
}

impl TypeDisplay<'_> {
    fn ty(&self, f: &mut fmt::Formatter<'_>, idx: Idx, pos: Position) -> fmt::Result {
        if let Some(name) = idx.builtin_name() {
            return f.write_str(name);
        }
        match self.types.lookup(idx) {
            TypeData::Singleton(s) => self.singleton(f, s),
            TypeData::Table(table) => self.table(f, &table),
            TypeData::Function(func) => {
                if pos == Position::Top {
                    self.function(f, &func)
                } else {
                    f.write_char('(')?;
                    self.function(f, &func)?;
                    f.write_char(')')
                }
            }
            TypeData::Union(members) => self.union(f, &members, pos),
            TypeData::Intersection(members) => {
                let paren = matches!(pos, Position::UnionMember | Position::Optional);
                if paren {
                    f.write_char('(')?;
                }
                self.joined(f, &members, " & ", Position::IntersectionMember)?;
                if paren {
                    f.write_char(')')?;
                }
                Ok(())
            }
            TypeData::Generic(_) => match self.types.generic_info(idx) {
                Some(info) => f.write_str(self.names.lookup(info.name)),
                None => f.write_str("*error-type*"),
            },
            TypeData::Extern(_) => match self.types.extern_info(idx) {
                Some(info) => f.write_str(self.names.lookup(info.name)),
                None => f.write_str("*error-type*"),
            },
            TypeData::Alias { id, args } => {
                let Some(info) = self.types.alias_info(id) else {
                    return f.write_str("*error-type*");
                };
                f.write_str(self.names.lookup(info.name))?;
                if args.is_empty() {
                    return Ok(());
                }
                f.write_char('<')?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match arg {
                        TypeArgData::Type(ty) => self.ty(f, *ty, Position::Top)?,
                        TypeArgData::Pack(pack) => self.pack_arg(f, pack)?,
                    }
                }
                f.write_char('>')
            }
            TypeData::Primitive(_)
            | TypeData::Any
            | TypeData::Unknown
            | TypeData::Never
            | TypeData::Error => f.write_str("*error-type*"),
        }
    }

    fn singleton(&self, f: &mut fmt::Formatter<'_>, singleton: Singleton) -> fmt::Result {
        match singleton {
            Singleton::Bool(b) => write!(f, "{b}"),
            Singleton::String(name) => {
                f.write_char('"')?;
                for c in self.names.lookup(name).chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        '\r' => f.write_str("\\r")?,
                        c if c.is_control() => write!(f, "\\u{{{:x}}}", u32::from(c))?,
                        c => f.write_char(c)?,
                    }
                }
                f.write_char('"')
            }
            Singleton::Number(bits) => {
                let value = bits.value();
                if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
                    #[expect(
                        clippy::cast_possible_truncation,
                        reason = "integral and below 2^53"
                    )]
                    let int = value as i64;
                    write!(f, "{int}")
                } else {
                    write!(f, "{value}")
                }
            }
            Singleton::Integer(n) => write!(f, "{n}i"),
        }
    }

    fn union(&self, f: &mut fmt::Formatter<'_>, members: &[Idx], pos: Position) -> fmt::Result {
        if members.contains(&Idx::NIL) {
            let rest: Vec<Idx> = members.iter().copied().filter(|&m| m != Idx::NIL).collect();
            if let [only] = rest.as_slice() {
                self.ty(f, *only, Position::Optional)?;
            } else {
                f.write_char('(')?;
                self.joined(f, &rest, " | ", Position::UnionMember)?;
                f.write_char(')')?;
            }
            return f.write_char('?');
        }
        let paren = matches!(pos, Position::IntersectionMember | Position::Optional);
        if paren {
            f.write_char('(')?;
        }
        self.joined(f, members, " | ", Position::UnionMember)?;
        if paren {
            f.write_char(')')?;
        }
        Ok(())
    }

    fn joined(
        &self,
        f: &mut fmt::Formatter<'_>,
        members: &[Idx],
        sep: &str,
        pos: Position,
    ) -> fmt::Result {
        for (i, &member) in members.iter().enumerate() {
            if i > 0 {
                f.write_str(sep)?;
            }
            self.ty(f, member, pos)?;
        }
        Ok(())
    }

    fn table(&self, f: &mut fmt::Formatter<'_>, table: &TableData) -> fmt::Result {
        if let Some(element) = table.array_element() {
            f.write_str("{ ")?;
            self.ty(f, element, Position::Top)?;
            return f.write_str(" }");
        }
        if table.props.is_empty() && table.indexer.is_none() && table.metatable.is_none() {
            return f.write_str("{}");
        }
        let mut props: Vec<(&str, Prop)> = table
            .props
            .iter()
            .map(|&(name, prop)| (self.names.lookup(name), prop))
            .collect();
        props.sort_unstable_by_key(|&(text, _)| text);

        let mut sep = Separator::default();
        if let Some(metatable) = table.metatable {
            sep.next(f)?;
            f.write_str("@metatable ")?;
            self.ty(f, metatable, Position::Top)?;
        }
        if let Some(indexer) = table.indexer {
            self.entry(f, &mut sep, indexer.value, |this, f| {
                f.write_char('[')?;
                this.ty(f, indexer.key, Position::Top)?;
                f.write_char(']')
            })?;
        }
        for (text, prop) in props {
            self.entry(f, &mut sep, prop, |_, f| write_prop_name(f, text))?;
        }
        f.write_str(" }")
    }

    /// One property or indexer: a plain entry, or a `read` entry followed
    /// by a `write` entry.
    fn entry(
        &self,
        f: &mut fmt::Formatter<'_>,
        sep: &mut Separator,
        prop: Prop,
        key: impl Fn(&Self, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        if prop.is_plain() {
            if let Some(ty) = prop.read {
                sep.next(f)?;
                key(self, f)?;
                f.write_str(": ")?;
                self.ty(f, ty, Position::Top)?;
            }
            return Ok(());
        }
        for (modifier, side) in [("read ", prop.read), ("write ", prop.write)] {
            if let Some(ty) = side {
                sep.next(f)?;
                f.write_str(modifier)?;
                key(self, f)?;
                f.write_str(": ")?;
                self.ty(f, ty, Position::Top)?;
            }
        }
        Ok(())
    }

    fn function(&self, f: &mut fmt::Formatter<'_>, func: &FunctionData) -> fmt::Result {
        if !func.generics.is_empty() {
            f.write_char('<')?;
            for (i, &generic) in func.generics.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                self.ty(f, generic, Position::Top)?;
                if self.types.generic_info(generic).is_some_and(|g| g.pack) {
                    f.write_str("...")?;
                }
            }
            f.write_char('>')?;
        }
        f.write_char('(')?;
        self.pack(f, &func.params)?;
        f.write_str(") -> ")?;
        match (&*func.returns.head, func.returns.tail) {
            ([only], Tail::None) => self.ty(f, *only, Position::Top),
            _ => {
                f.write_char('(')?;
                self.pack(f, &func.returns)?;
                f.write_char(')')
            }
        }
    }

    fn pack(&self, f: &mut fmt::Formatter<'_>, pack: &Pack) -> fmt::Result {
        self.joined(f, &pack.head, ", ", Position::Top)?;
        if pack.tail != Tail::None && !pack.head.is_empty() {
            f.write_str(", ")?;
        }
        match pack.tail {
            Tail::None => Ok(()),
            Tail::Variadic(ty) => {
                f.write_str("...")?;
                self.ty(f, ty, Position::Optional)
            }
            Tail::Generic(generic) => {
                self.ty(f, generic, Position::Top)?;
                f.write_str("...")
            }
        }
    }

    /// A pack in argument position: `T...` on its own, otherwise
    /// parenthesised.
    fn pack_arg(&self, f: &mut fmt::Formatter<'_>, pack: &Pack) -> fmt::Result {
        if pack.head.is_empty() && matches!(pack.tail, Tail::Generic(_)) {
            return self.pack(f, pack);
        }
        f.write_char('(')?;
        self.pack(f, pack)?;
        f.write_char(')')
    }
}

/// Opens a table with `{ ` and separates later entries with `, `.
#[derive(Default)]
struct Separator {
    started: bool,
}

impl Separator {
    fn next(&mut self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if self.started { ", " } else { "{ " };
        self.started = true;
        f.write_str(text)
    }
}

fn write_prop_name(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if is_identifier(text) {
        f.write_str(text)
    } else {
        write!(f, "[{text:?}]")
    }
}
