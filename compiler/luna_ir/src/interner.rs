//! Sharded string interner.
//!
//! Identifiers, string literal contents and doc text all go through here so
//! the syntax tree can store a 4-byte [`Name`] instead of an owned string.
//! Each shard sits behind its own `RwLock`; lookups only take read locks,
//! so one interner can be shared by parsers running on several threads.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

use crate::Name;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternError {
    #[error("interner shard {shard} is full ({count} strings)")]
    ShardOverflow { shard: usize, count: usize },
}

#[derive(Default)]
struct Shard {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// Thread-safe string interner.
///
/// Interned strings are leaked and live for the rest of the process, which
/// is what lets [`StringInterner::lookup`] hand out plain `&str`.
pub struct StringInterner {
    shards: [RwLock<Shard>; Name::NUM_SHARDS],
    count: AtomicUsize,
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl StringInterner {
    /// Create an interner holding the empty string and the Luau keywords.
    pub fn new() -> Self {
        let shards: [RwLock<Shard>; Name::NUM_SHARDS] =
            std::array::from_fn(|_| RwLock::new(Shard::default()));
        {
            let mut zero = shards[0].write();
            zero.map.insert("", 0);
            zero.strings.push("");
        }
        let interner = StringInterner {
            shards,
            count: AtomicUsize::new(1),
        };
        for word in PRE_INTERNED {
            interner.intern(word);
        }
        interner
    }

    #[inline]
    fn shard_for(s: &str) -> usize {
        if s.is_empty() {
            return 0;
        }
        let mut hash = 0u32;
        for byte in s.bytes().take(8) {
            hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
        }
        (hash as usize) % Name::NUM_SHARDS
    }

    /// Intern `s`, failing only if its shard is full.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        let shard_idx = Self::shard_for(s);
        let shard = &self.shards[shard_idx];
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard index is below NUM_SHARDS"
        )]
        let shard_u32 = shard_idx as u32;

        if let Some(&local) = shard.read().map.get(s) {
            return Ok(Name::new(shard_u32, local));
        }

        let mut guard = shard.write();
        if let Some(&local) = guard.map.get(s) {
            return Ok(Name::new(shard_u32, local));
        }
        let count = guard.strings.len();
        let local = u32::try_from(count)
            .ok()
            .filter(|&l| l <= Name::MAX_LOCAL)
            .ok_or(InternError::ShardOverflow {
                shard: shard_idx,
                count,
            })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, local);
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(Name::new(shard_u32, local))
    }

    /// Intern `s`.
    ///
    /// # Panics
    /// Panics if a shard overflows (more than 2^28 distinct strings).
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Return the string behind `name`.
    pub fn lookup(&self, name: Name) -> &'static str {
        let guard = self.shards[name.shard()].read();
        guard.strings.get(name.local()).copied().unwrap_or("")
    }

    /// Find the handle for `s` without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        let shard_idx = Self::shard_for(s);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard index is below NUM_SHARDS"
        )]
        let shard_u32 = shard_idx as u32;
        let guard = self.shards[shard_idx].read();
        guard.map.get(s).map(|&local| Name::new(shard_u32, local))
    }

    pub fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

/// Words the lexer and parser look up constantly.
const PRE_INTERNED: &[&str] = &[
    // Contextual keywords
    "type", "export", "continue", "const", "declare", "read", "write", "typeof", "class",
    "extern", "extends", "with", "self",
    // Builtin type names
    "nil", "boolean", "number", "string", "thread", "buffer", "any", "unknown", "never",
];
