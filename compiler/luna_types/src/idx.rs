//! Compact handle for interned types.

use std::fmt;

/// Index of a type in the [`TypeInterner`](crate::TypeInterner).
///
/// Packs a shard number (top 4 bits) and a shard-local index (low 28 bits),
/// the same layout [`luna_ir::Name`] uses. Two handles from the same
/// interner are equal exactly when the types are structurally identical.
///
/// The builtin types live in shard 0 at fixed positions, so `Idx::NUMBER`
/// can be compared against without touching the interner.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    pub const NIL: Idx = Idx(0);
    pub const BOOLEAN: Idx = Idx(1);
    pub const NUMBER: Idx = Idx(2);
    pub const INTEGER: Idx = Idx(3);
    pub const STRING: Idx = Idx(4);
    pub const THREAD: Idx = Idx(5);
    pub const BUFFER: Idx = Idx(6);
    pub const ANY: Idx = Idx(7);
    pub const UNKNOWN: Idx = Idx(8);
    pub const NEVER: Idx = Idx(9);
    /// Stands in for a type that failed to build. Related both ways to
    /// everything so one mistake is reported once.
    pub const ERROR: Idx = Idx(10);

    /// Number of pre-interned builtins.
    pub const BUILTIN_COUNT: u32 = 11;

    pub const MAX_LOCAL: u32 = 0x0FFF_FFFF;
    pub const NUM_SHARDS: usize = 16;

    pub(crate) const fn from_shard_local(shard: usize, local: u32) -> Self {
        debug_assert!(local <= Self::MAX_LOCAL);
        #[expect(clippy::cast_possible_truncation, reason = "shard < NUM_SHARDS")]
        let shard = shard as u32;
        Idx((shard << 28) | local)
    }

    #[inline]
    pub const fn shard(self) -> usize {
        (self.0 >> 28) as usize
    }

    #[inline]
    pub const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::BUILTIN_COUNT
    }

    /// `any` or `unknown`.
    #[inline]
    pub const fn is_top(self) -> bool {
        self.0 == Self::ANY.0 || self.0 == Self::UNKNOWN.0
    }

    /// Surface name of a builtin, `None` for everything else.
    pub const fn builtin_name(self) -> Option<&'static str> {
        Some(match self {
            Idx::NIL => "nil",
            Idx::BOOLEAN => "boolean",
            Idx::NUMBER => "number",
            Idx::INTEGER => "integer",
            Idx::STRING => "string",
            Idx::THREAD => "thread",
            Idx::BUFFER => "buffer",
            Idx::ANY => "any",
            Idx::UNKNOWN => "unknown",
            Idx::NEVER => "never",
            Idx::ERROR => "*error-type*",
            _ => return None,
        })
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.builtin_name() {
            Some(name) => write!(f, "Idx::{name}"),
            None => write!(f, "Idx({}:{})", self.shard(), self.local()),
        }
    }
}

const _: () = assert!(std::mem::size_of::<Idx>() == 4);
