//! Parser configuration: edition, feature flags and limits.
//!
//! A [`ParseConfig`] is passed explicitly to every parse. There is no
//! process-wide switch, so files with different settings can be parsed
//! side by side.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use luna_lexer::{LongBracketMode, ScanOptions};

/// Language edition. Each edition fixes the grammar-breaking changes that
/// are on by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edition {
    /// The 2024 baseline.
    #[default]
    Baseline,
    E2026,
}

impl Edition {
    pub fn year(self) -> u16 {
        match self {
            Edition::Baseline => 2024,
            Edition::E2026 => 2026,
        }
    }

    pub fn from_year(year: u16) -> Option<Self> {
        match year {
            2024 => Some(Edition::Baseline),
            2026 => Some(Edition::E2026),
            _ => None,
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown edition `{0}` (expected 2024 or 2026)")]
pub struct UnknownEdition(pub String);

impl FromStr for Edition {
    type Err = UnknownEdition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u16>()
            .ok()
            .and_then(Edition::from_year)
            .ok_or_else(|| UnknownEdition(s.to_owned()))
    }
}

bitflags! {
    /// Experimental grammar extensions. Each flag is consulted at the point
    /// where its syntax would start.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FeatureFlags: u32 {
        /// `const x = ...` bindings.
        const CONST_BINDINGS = 1 << 0;
        /// `if local` / `while local` conditions.
        const IF_LOCAL = 1 << 1;
        /// Explicit instantiation `f<<T>>(...)`.
        const GENERIC_INSTANTIATION = 1 << 2;
        /// Generic bounds written `<T: Bound>`.
        const GENERIC_BOUNDS_COLON = 1 << 3;
        /// Generic bounds written `<T extends Bound>`.
        const GENERIC_BOUNDS_EXTENDS = 1 << 4;
        /// Names in function-type return lists, `-> (ok: boolean)`.
        const NAMED_RETURNS = 1 << 5;
        /// Integer literals with the `i` suffix.
        const INTEGER_SUFFIX = 1 << 6;
        /// `` `[[ ... ]]` `` interpolated strings spanning lines.
        const MULTILINE_INTERPOLATION = 1 << 7;
        /// Arguments in bracketed attributes, `@[deprecated "use g"]`.
        const ATTRIBUTE_ARGUMENTS = 1 << 8;
    }
}

impl FeatureFlags {
    /// Flags on by default: none.
    pub const STABLE: Self = Self::empty();

    /// Look up a flag by its kebab-case name, as used on the command line.
    pub fn from_cli_name(name: &str) -> Option<Self> {
        FEATURE_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, flag)| flag)
    }

    /// Kebab-case name of a single flag.
    pub fn name(self) -> &'static str {
        FEATURE_NAMES
            .iter()
            .find(|(_, flag)| *flag == self)
            .map_or("unknown", |&(n, _)| n)
    }
}

pub const FEATURE_NAMES: &[(&str, FeatureFlags)] = &[
    ("const-bindings", FeatureFlags::CONST_BINDINGS),
    ("if-local", FeatureFlags::IF_LOCAL),
    ("generic-instantiation", FeatureFlags::GENERIC_INSTANTIATION),
    ("generic-bounds-colon", FeatureFlags::GENERIC_BOUNDS_COLON),
    ("generic-bounds-extends", FeatureFlags::GENERIC_BOUNDS_EXTENDS),
    ("named-returns", FeatureFlags::NAMED_RETURNS),
    ("integer-suffix", FeatureFlags::INTEGER_SUFFIX),
    ("multiline-interpolation", FeatureFlags::MULTILINE_INTERPOLATION),
    ("attribute-arguments", FeatureFlags::ATTRIBUTE_ARGUMENTS),
];

/// Script files hold executable code; declaration files hold only
/// `declare` statements and type aliases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParseMode {
    #[default]
    Script,
    Declarations,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseConfig {
    pub edition: Edition,
    pub features: FeatureFlags,
    pub long_bracket_mode: LongBracketMode,
    pub mode: ParseMode,
    /// Deepest nesting of blocks, expressions and types before the parse
    /// is abandoned.
    pub max_depth: u32,
    /// Largest accepted source, in bytes.
    pub max_source_len: usize,
    /// Parsing stops after this many errors.
    pub error_limit: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig::for_edition(Edition::Baseline)
    }
}

impl ParseConfig {
    pub const DEFAULT_MAX_DEPTH: u32 = 200;
    pub const DEFAULT_MAX_SOURCE_LEN: usize = 16 * 1024 * 1024;
    pub const DEFAULT_ERROR_LIMIT: usize = 64;

    pub fn for_edition(edition: Edition) -> Self {
        let long_bracket_mode = match edition {
            Edition::Baseline => LongBracketMode::LongBracketWins,
            Edition::E2026 => LongBracketMode::IndexBracketWins,
        };
        ParseConfig {
            edition,
            features: FeatureFlags::STABLE,
            long_bracket_mode,
            mode: ParseMode::Script,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_source_len: Self::DEFAULT_MAX_SOURCE_LEN,
            error_limit: Self::DEFAULT_ERROR_LIMIT,
        }
    }

    #[must_use]
    pub fn with_features(mut self, features: FeatureFlags) -> Self {
        self.features |= features;
        self
    }

    #[must_use]
    pub fn with_long_bracket_mode(mut self, mode: LongBracketMode) -> Self {
        self.long_bracket_mode = mode;
        self
    }

    #[must_use]
    pub fn declarations(mut self) -> Self {
        self.mode = ParseMode::Declarations;
        self
    }

    /// Whether the syntax behind `feature` is accepted. Editions may turn
    /// features on regardless of the flag set.
    pub fn allows(&self, feature: FeatureFlags) -> bool {
        if self.features.contains(feature) {
            return true;
        }
        self.edition >= Edition::E2026 && feature == FeatureFlags::CONST_BINDINGS
    }

    pub fn is_declaration_file(&self) -> bool {
        self.mode == ParseMode::Declarations
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            long_bracket_mode: self.long_bracket_mode,
            multiline_interpolation: self.allows(FeatureFlags::MULTILINE_INTERPOLATION),
        }
    }
}
