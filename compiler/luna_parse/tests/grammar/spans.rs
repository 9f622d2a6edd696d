use luna_ir::ast::visit::{walk_expr, walk_stmt, walk_type, Visitor};
use luna_ir::ast::{Chunk, Expr, Stmt, TypeExpr};
use luna_ir::Span;
use proptest::prelude::*;

use super::common::{all_features, parse_with};

/// Statements covering most of the grammar, each valid on its own.
const SNIPPETS: &[&str] = &[
    "local x: number = 1 + 2 * 3",
    "const LIMIT = 10",
    "local t: { read x: number, write y: string } = { x = 5, y = \"a\" }",
    "export type Pair<A, B = A> = { first: A, second: B }",
    "type Callback = (err: string?, ...any) -> ()",
    "type U = | \"a\" | \"b\" | nil",
    "local function add<T>(a: T, b: T): T return a end",
    "function obj.method:call(self, ...) return ... end",
    "if local v = find() in v > 0 then print(v) elseif w then else end",
    "while local line = read() do continue end",
    "for i = 1, 10 do total += i end",
    "for k, v in pairs(t) do print(k, v) end",
    "repeat local done = step() until done",
    "do local s = `value: {x} and {y :: string}` end",
    "local f = @native function(a, b,) return if a then b else nil end",
    "local r = f<<number, string>>(1, {2}, [[three]])",
    "@[checked] local function g(x: { [string]: number }) end",
    "local v = -x ^ 2 .. \"s\" .. #t",
    "a.b[c], d = e:f \"g\", h { 1, 2; 3 }",
];

/// Checks that every node's span lies inside its parent's.
struct Containment {
    parents: Vec<Span>,
    violations: Vec<String>,
}

impl Containment {
    fn enter(&mut self, what: &str, span: Span) {
        if let Some(parent) = self.parents.last() {
            if !parent.contains_span(span) {
                self.violations
                    .push(format!("{what} {span:?} escapes parent {parent:?}"));
            }
        }
        self.parents.push(span);
    }
}

impl<'ast> Visitor<'ast> for Containment {
    fn visit_chunk(&mut self, chunk: &'ast Chunk) {
        self.enter("chunk", chunk.span);
        self.visit_block(&chunk.block);
        self.parents.pop();
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        self.enter("statement", stmt.span);
        walk_stmt(self, stmt);
        self.parents.pop();
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        self.enter("expression", expr.span);
        walk_expr(self, expr);
        self.parents.pop();
    }

    fn visit_type(&mut self, ty: &'ast TypeExpr) {
        self.enter("type", ty.span);
        walk_type(self, ty);
        self.parents.pop();
    }
}

fn violations(source: &str) -> Vec<String> {
    let (result, _) = parse_with(source, &all_features());
    assert!(
        !result.has_errors(),
        "{source}: {:?}",
        result.errors
    );
    let mut check = Containment {
        parents: Vec::new(),
        violations: Vec::new(),
    };
    check.visit_chunk(&result.chunk);
    check.violations
}

#[test]
fn every_snippet_nests() {
    for snippet in SNIPPETS {
        assert_eq!(violations(snippet), Vec::<String>::new(), "{snippet}");
    }
}

proptest! {
    #[test]
    fn generated_programs_nest(
        picks in prop::sample::subsequence(SNIPPETS.to_vec(), 1..SNIPPETS.len()),
        separator in prop::sample::select(vec!["\n", "; ", "\n\n  "]),
    ) {
        let source = picks.join(separator);
        prop_assert!(violations(&source).is_empty());
    }
}
