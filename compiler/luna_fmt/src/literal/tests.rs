use luna_ir::ast::NumberLit;

use super::*;

#[test]
fn quoted_escapes_specials() {
    assert_eq!(quoted("plain"), "\"plain\"");
    assert_eq!(quoted("a\"b"), "\"a\\\"b\"");
    assert_eq!(quoted("line\nbreak\ttab"), "\"line\\nbreak\\ttab\"");
    assert_eq!(quoted("back\\slash"), "\"back\\\\slash\"");
    assert_eq!(quoted("\u{07}1"), "\"\\0071\"");
    assert_eq!(quoted("héllo"), "\"héllo\"");
}

#[test]
fn interp_segments_escape_braces_and_backticks() {
    assert_eq!(interp_segment("a{b}`c", false), "a\\{b\\}\\`c");
    assert_eq!(interp_segment("x\ny", false), "x\\ny");
    assert_eq!(interp_segment("x\ny", true), "x\ny");
    assert_eq!(interp_segment("'\"", false), "'\"");
}

#[test]
fn long_strings_keep_their_level() {
    assert_eq!(long_string("abc", 0), "[[abc]]");
    assert_eq!(long_string("abc", 2), "[==[abc]==]");
}

#[test]
fn long_strings_protect_a_leading_newline() {
    assert_eq!(long_string("\nabc", 0), "[[\n\nabc]]");
}

#[test]
fn long_strings_raise_a_clashing_level() {
    assert_eq!(long_string("a]]b", 0), "[=[a]]b]=]");
    assert_eq!(long_string("a]]b]=]", 0), "[==[a]]b]=]]==]");
}

#[test]
fn long_strings_do_not_fuse_a_trailing_bracket_with_the_closer() {
    assert_eq!(long_string("a]", 0), "[=[a]]=]");
    assert_eq!(long_string("a]=", 1), "[==[a]=]==]");
    assert_eq!(long_string("a]=", 0), "[[a]=]]");
}

#[test]
fn long_strings_starting_with_a_bracket_never_open_with_three() {
    assert_eq!(long_string("[x", 0), "[=[[x]=]");
    assert_eq!(long_string("[x", 2), "[==[[x]==]");
}

#[test]
fn numbers() {
    assert_eq!(number(NumberLit::Float(1.0)), "1");
    assert_eq!(number(NumberLit::Float(255.0)), "255");
    assert_eq!(number(NumberLit::Float(0.5)), "0.5");
    assert_eq!(number(NumberLit::Float(1e300)), "1e300");
    assert_eq!(number(NumberLit::Float(f64::INFINITY)), "1e999");
    assert_eq!(number(NumberLit::Integer(42)), "42i");
}

#[test]
fn doc_comments() {
    assert_eq!(doc_comment("Adds numbers", false), "--- Adds numbers");
    assert_eq!(doc_comment("Adds numbers", true), "--[[ Adds numbers ]]");
    assert_eq!(doc_comment("one\ntwo", false), "--[[ one\ntwo ]]");
    assert_eq!(doc_comment("has ]] inside", true), "--[=[ has ]] inside ]=]");
}
