use luna_diagnostic::ErrorCode;
use luna_ir::ast::{ClassKind, ClassMemberKind, StmtKind};
use luna_parse::{FeatureFlags, ParseConfig};
use pretty_assertions::assert_eq;

use super::common::parse_with;

fn declarations() -> ParseConfig {
    ParseConfig::default()
        .with_features(FeatureFlags::all())
        .declarations()
}

#[test]
fn declaration_file_statements() {
    let source = "\
declare version: string
declare function print(...: any): ()
declare class Instance
    Name: string
    read Parent: Instance?
    function Destroy(self): ()
    [string]: any
end
declare extern type Part extends Instance with
    Size: number;
end
export type Handle = { id: number }
";
    let (result, interner) = parse_with(source, &declarations());
    assert!(!result.has_errors(), "{:?}", result.errors);
    let stmts = &result.chunk.block.stmts;
    assert_eq!(stmts.len(), 5);
    assert!(matches!(stmts[0].kind, StmtKind::DeclareGlobal(_)));
    assert!(matches!(stmts[1].kind, StmtKind::DeclareFunction(_)));

    let StmtKind::DeclareClass(class) = &stmts[2].kind else {
        panic!("expected class");
    };
    assert_eq!(class.kind, ClassKind::Class);
    assert_eq!(class.members.len(), 4);
    assert!(matches!(
        class.members[2].kind,
        ClassMemberKind::Method { .. }
    ));
    assert!(matches!(class.members[3].kind, ClassMemberKind::Indexer(_)));

    let StmtKind::DeclareClass(extern_type) = &stmts[3].kind else {
        panic!("expected extern type");
    };
    assert_eq!(extern_type.kind, ClassKind::ExternType);
    assert_eq!(
        interner.lookup(extern_type.superclass.unwrap().name),
        "Instance"
    );
}

#[test]
fn executable_code_is_flagged_but_parsed() {
    let source = "local x = 1\nprint(x)\ntype T = number";
    let (result, _) = parse_with(source, &declarations());
    let codes: Vec<_> = result.errors.iter().map(luna_parse::ParseError::code).collect();
    assert_eq!(codes, vec![ErrorCode::E1010, ErrorCode::E1010]);
    assert_eq!(result.chunk.block.stmts.len(), 3);
}

#[test]
fn declare_outside_declaration_file() {
    let config = ParseConfig::default();
    let (result, _) = parse_with("declare x: number", &config);
    let codes: Vec<_> = result.errors.iter().map(luna_parse::ParseError::code).collect();
    assert_eq!(codes, vec![ErrorCode::E1011]);
    assert!(matches!(
        result.chunk.block.stmts[0].kind,
        StmtKind::DeclareGlobal(_)
    ));
}

#[test]
fn extern_type_requires_with() {
    let (result, _) = parse_with("declare extern type Part\n x: number\nend", &declarations());
    assert!(result.has_errors());
}

#[test]
fn declare_as_identifier() {
    let (result, _) = parse_with("declare = 1\ndeclare(2)", &ParseConfig::default());
    assert!(!result.has_errors(), "{:?}", result.errors);
}
