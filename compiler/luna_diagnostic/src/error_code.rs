use std::fmt;

/// Stable diagnostic codes.
///
/// The first digit names the phase:
/// - E0xxx: lexer
/// - E1xxx: parser
/// - E2xxx: type construction and checking
/// - E3xxx: scopes and bindings
/// - E9xxx: limits that stop a phase
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    // Lexer
    /// Unterminated string literal
    E0001,
    /// Unexpected character
    E0002,
    /// Malformed number literal
    E0003,
    /// Unterminated block comment
    E0004,
    /// Malformed escape sequence
    E0005,
    /// Malformed long bracket
    E0006,

    // Parser
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Expected type
    E1005,
    /// Trailing comma after `...`
    E1006,
    /// Duplicate read/write modifier on a table type field
    E1007,
    /// Duplicate attribute
    E1008,
    /// Syntax needs a feature flag or newer edition
    E1009,
    /// Executable statement in a declaration file
    E1010,
    /// `declare` outside a declaration file
    E1011,
    /// `[[` right after an indexed expression
    E1012,
    /// Invalid generic parameter list
    E1013,
    /// Invalid assignment target
    E1014,

    // Types
    /// Duplicate field in a table type
    E2001,
    /// Duplicate read/write modifier
    E2002,
    /// `const` without an initializer
    E2003,
    /// Ill-formed generic constraint or default
    E2004,
    /// Unknown type name
    E2005,
    /// Write type is not a subtype of the read type
    E2006,
    /// Wrong number of type arguments
    E2007,
    /// Type mismatch
    E2010,

    // Scopes
    /// Assignment to a `const` binding
    E3001,

    // Limits
    /// Nesting too deep
    E9001,
    /// Type evaluation exceeded its budget
    E9002,
    /// Source file too large
    E9003,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            ErrorCode::E1012 => "E1012",
            ErrorCode::E1013 => "E1013",
            ErrorCode::E1014 => "E1014",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::E9003 => "E9003",
        }
    }

    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Codes that stop the phase that raised them.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9003)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
