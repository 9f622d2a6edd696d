//! What the parser was doing when an error occurred.

/// Attached to an error as a "while parsing ..." note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    // Statements
    LocalDeclaration,
    Assignment,
    IfStatement,
    WhileLoop,
    RepeatLoop,
    ForLoop,
    FunctionDeclaration,
    ReturnStatement,
    TypeAlias,
    Declaration,
    ClassDeclaration,

    // Expressions
    ArgumentList,
    TableConstructor,
    IfExpression,
    InterpolatedString,
    TypeInstantiation,

    // Types
    TypeAnnotation,
    TableType,
    FunctionType,
    GenericParameters,
    TypeArguments,

    // Other
    ParameterList,
    Attribute,
}

impl ErrorContext {
    pub fn description(self) -> &'static str {
        match self {
            ErrorContext::LocalDeclaration => "a local declaration",
            ErrorContext::Assignment => "an assignment",
            ErrorContext::IfStatement => "an if statement",
            ErrorContext::WhileLoop => "a while loop",
            ErrorContext::RepeatLoop => "a repeat loop",
            ErrorContext::ForLoop => "a for loop",
            ErrorContext::FunctionDeclaration => "a function declaration",
            ErrorContext::ReturnStatement => "a return statement",
            ErrorContext::TypeAlias => "a type alias",
            ErrorContext::Declaration => "a declaration",
            ErrorContext::ClassDeclaration => "a class declaration",
            ErrorContext::ArgumentList => "an argument list",
            ErrorContext::TableConstructor => "a table constructor",
            ErrorContext::IfExpression => "an if expression",
            ErrorContext::InterpolatedString => "an interpolated string",
            ErrorContext::TypeInstantiation => "an explicit instantiation",
            ErrorContext::TypeAnnotation => "a type annotation",
            ErrorContext::TableType => "a table type",
            ErrorContext::FunctionType => "a function type",
            ErrorContext::GenericParameters => "a generic parameter list",
            ErrorContext::TypeArguments => "type arguments",
            ErrorContext::ParameterList => "a parameter list",
            ErrorContext::Attribute => "an attribute",
        }
    }
}
