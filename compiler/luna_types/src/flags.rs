//! Type metadata computed once at interning time.
//!
//! Each interned type stores a [`TypeFlags`] word built from its own kind
//! and the presence flags of its children, so questions such as "does this
//! mention a generic" never walk the type.

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u32 {
        // === Presence flags ===
        // Inherited from children.

        /// Mentions a generic type parameter.
        const HAS_GENERIC = 1 << 0;
        /// Mentions a generic pack parameter.
        const HAS_GENERIC_PACK = 1 << 1;
        /// Contains the error type.
        const HAS_ERROR = 1 << 2;
        /// Contains `any` or `unknown` somewhere.
        const HAS_UNKNOWN = 1 << 3;
        /// Contains an unresolved alias application.
        const HAS_ALIAS = 1 << 4;

        // === Category flags ===
        // Describe the outermost constructor only.

        const IS_PRIMITIVE = 1 << 8;
        const IS_SINGLETON = 1 << 9;
        const IS_TABLE = 1 << 10;
        const IS_FUNCTION = 1 << 11;
        const IS_UNION = 1 << 12;
        const IS_INTERSECTION = 1 << 13;
        /// Extern type or generic parameter: compared by identity.
        const IS_NOMINAL = 1 << 14;
        /// `any` or `unknown`.
        const IS_TOP = 1 << 15;
        /// A table that rejects properties it does not list.
        const IS_SEALED = 1 << 16;
    }
}

impl TypeFlags {
    /// Flags a compound type inherits from its children.
    pub const PROPAGATE_MASK: Self = Self::from_bits_truncate(
        Self::HAS_GENERIC.bits()
            | Self::HAS_GENERIC_PACK.bits()
            | Self::HAS_ERROR.bits()
            | Self::HAS_UNKNOWN.bits()
            | Self::HAS_ALIAS.bits(),
    );

    #[inline]
    pub const fn propagate_from(child: Self) -> Self {
        Self::from_bits_truncate(child.bits() & Self::PROPAGATE_MASK.bits())
    }

    #[inline]
    pub fn propagate_all(children: impl IntoIterator<Item = Self>) -> Self {
        children
            .into_iter()
            .fold(Self::empty(), |acc, child| acc.union(Self::propagate_from(child)))
    }

    /// Substitution can change this type.
    #[inline]
    pub const fn needs_subst(self) -> bool {
        self.intersects(Self::HAS_GENERIC.union(Self::HAS_GENERIC_PACK))
    }

    /// Too imprecise for a mismatch to be worth reporting.
    #[inline]
    pub const fn is_imprecise(self) -> bool {
        self.intersects(Self::HAS_ERROR.union(Self::HAS_UNKNOWN))
    }
}
