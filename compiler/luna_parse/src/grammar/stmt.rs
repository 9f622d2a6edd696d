//! Statements.

use luna_ir::ast::{
    AssignStmt, Attribute, CompoundAssignStmt, CompoundOp, Condition, Expr, ExprKind,
    FunctionName, FunctionStmt, GenericForStmt, IfClause, IfStmt, LocalCondition, LocalFunctionStmt,
    LocalKind, LocalStmt, NumericForStmt, RepeatStmt, Stmt, StmtKind, TypeAlias, WhileStmt,
};
use luna_ir::{Span, TokenKind};

use crate::doc::DocRule;
use crate::recovery::BLOCK_END;
use crate::{ErrorContext, FeatureFlags, PResult, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn parse_stmt(&mut self) -> PResult<Stmt> {
        let first = self.cursor.position();
        let start = self.current_span();
        let stmt = self.parse_stmt_inner(first, start)?;
        if self.config.is_declaration_file() {
            if let Some(what) = executable_statement(&stmt.kind) {
                self.error(ParseError::new(
                    ParseErrorKind::NotAllowedInDeclarationFile { what },
                    stmt.span,
                ));
            }
        }
        Ok(stmt)
    }

    fn parse_stmt_inner(&mut self, first: usize, start: Span) -> PResult<Stmt> {
        let kind = match self.current_kind() {
            TokenKind::At => {
                let attrs = self.parse_attributes()?;
                return self.parse_attributed(attrs, first, start);
            }
            TokenKind::Local => {
                self.advance();
                if self.check(&TokenKind::Function) {
                    return self.parse_local_function(Vec::new(), first, start);
                }
                return self.parse_local(LocalKind::Local, Vec::new(), first, start);
            }
            TokenKind::Function => return self.parse_function_stmt(Vec::new(), first, start),
            TokenKind::If => self.in_error_context(ErrorContext::IfStatement, Self::parse_if)?,
            TokenKind::While => self.in_error_context(ErrorContext::WhileLoop, Self::parse_while)?,
            TokenKind::Repeat => {
                self.in_error_context(ErrorContext::RepeatLoop, Self::parse_repeat)?
            }
            TokenKind::For => self.in_error_context(ErrorContext::ForLoop, Self::parse_for)?,
            TokenKind::Do => {
                self.advance();
                let body = self.parse_block()?;
                self.expect_block_end(start)?;
                StmtKind::Do(body)
            }
            TokenKind::Return => {
                self.advance();
                let values = if BLOCK_END.contains(self.cursor.current_kind())
                    || self.check(&TokenKind::Semicolon)
                {
                    Vec::new()
                } else {
                    self.in_error_context(ErrorContext::ReturnStatement, Self::parse_expr_list)?
                };
                StmtKind::Return(values)
            }
            TokenKind::Break => {
                self.advance();
                StmtKind::Break
            }
            TokenKind::Ident(word) => {
                if self.words.is_continue_statement(&self.cursor) {
                    self.advance();
                    StmtKind::Continue
                } else if self.words.starts_contextual_statement(&self.cursor) {
                    return self.parse_contextual(word, Vec::new(), first, start);
                } else {
                    self.parse_expr_stmt()?
                }
            }
            _ => self.parse_expr_stmt()?,
        };
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    /// `type`, `export type`, `const`, `declare`.
    fn parse_contextual(
        &mut self,
        word: luna_ir::Name,
        attrs: Vec<Attribute>,
        first: usize,
        start: Span,
    ) -> PResult<Stmt> {
        let words = self.words;
        if word == words.const_ {
            let keyword = self.advance();
            self.require_feature(FeatureFlags::CONST_BINDINGS, "`const` bindings", keyword.span);
            return self.parse_local(LocalKind::Const, attrs, first, start);
        }
        if word == words.declare {
            let keyword = self.advance();
            if !self.config.is_declaration_file() {
                self.error(ParseError::new(
                    ParseErrorKind::DeclareOutsideDeclarationFile,
                    keyword.span,
                ));
            }
            return self.in_error_context(ErrorContext::Declaration, |p| {
                p.parse_declare(attrs, first, start)
            });
        }
        let exported = self.cursor.eat_word(words.export);
        self.advance();
        self.in_error_context(ErrorContext::TypeAlias, |p| {
            p.parse_type_alias(exported, attrs, first, start)
        })
    }

    /// Declarations after `@attr ...`.
    fn parse_attributed(
        &mut self,
        attrs: Vec<Attribute>,
        first: usize,
        start: Span,
    ) -> PResult<Stmt> {
        match self.current_kind() {
            TokenKind::Function => self.parse_function_stmt(attrs, first, start),
            TokenKind::Local => {
                self.advance();
                if self.check(&TokenKind::Function) {
                    self.parse_local_function(attrs, first, start)
                } else {
                    self.parse_local(LocalKind::Local, attrs, first, start)
                }
            }
            TokenKind::Ident(word) if self.words.starts_contextual_statement(&self.cursor) => {
                self.parse_contextual(word, attrs, first, start)
            }
            _ => Err(self
                .cursor
                .unexpected("a declaration after the attributes")
                .in_context(ErrorContext::Attribute)),
        }
    }

    /// After `local`/`const`: `a [: T], b [: T] [= values]`.
    fn parse_local(
        &mut self,
        kind: LocalKind,
        attrs: Vec<Attribute>,
        first: usize,
        start: Span,
    ) -> PResult<Stmt> {
        self.in_error_context(ErrorContext::LocalDeclaration, |p| {
            let bindings = p.parse_binding_list()?;
            let values = if p.eat(&TokenKind::Eq) {
                p.parse_expr_list()?
            } else {
                Vec::new()
            };
            let doc = p.doc_for(first, DocRule::Adjacent);
            Ok(Stmt::new(
                StmtKind::Local(Box::new(LocalStmt {
                    kind,
                    attrs,
                    bindings,
                    values,
                    doc,
                })),
                p.span_from(start),
            ))
        })
    }

    fn parse_local_function(
        &mut self,
        attrs: Vec<Attribute>,
        first: usize,
        start: Span,
    ) -> PResult<Stmt> {
        self.in_error_context(ErrorContext::FunctionDeclaration, |p| {
            p.expect(&TokenKind::Function)?;
            let name = p.parse_ident()?;
            let func = p.parse_function_body(start)?;
            let doc = p.doc_for(first, DocRule::Adjacent);
            Ok(Stmt::new(
                StmtKind::LocalFunction(Box::new(LocalFunctionStmt {
                    attrs,
                    name,
                    func,
                    doc,
                })),
                p.span_from(start),
            ))
        })
    }

    /// `function a.b:c(...) ... end`
    fn parse_function_stmt(
        &mut self,
        attrs: Vec<Attribute>,
        first: usize,
        start: Span,
    ) -> PResult<Stmt> {
        self.in_error_context(ErrorContext::FunctionDeclaration, |p| {
            p.expect(&TokenKind::Function)?;
            let mut path = vec![p.parse_ident()?];
            while p.eat(&TokenKind::Dot) {
                path.push(p.parse_ident()?);
            }
            let method = if p.eat(&TokenKind::Colon) {
                Some(p.parse_ident()?)
            } else {
                None
            };
            let func = p.parse_function_body(start)?;
            let doc = p.doc_for(first, DocRule::Adjacent);
            Ok(Stmt::new(
                StmtKind::Function(Box::new(FunctionStmt {
                    attrs,
                    name: FunctionName { path, method },
                    func,
                    doc,
                })),
                p.span_from(start),
            ))
        })
    }

    /// After `type`: `Name<generics> = Type`.
    fn parse_type_alias(
        &mut self,
        exported: bool,
        attrs: Vec<Attribute>,
        first: usize,
        start: Span,
    ) -> PResult<Stmt> {
        let name = self.parse_ident()?;
        let generics = if self.check(&TokenKind::Lt) {
            self.parse_generic_params(true)?
        } else {
            Vec::new()
        };
        self.expect(&TokenKind::Eq)?;
        let ty = self.parse_type()?;
        let doc = self.doc_for(first, DocRule::Adjacent);
        Ok(Stmt::new(
            StmtKind::TypeAlias(Box::new(TypeAlias {
                exported,
                attrs,
                name,
                generics,
                ty,
                doc,
            })),
            self.span_from(start),
        ))
    }

    fn parse_if(&mut self) -> PResult<StmtKind> {
        let mut clauses = Vec::new();
        let mut clause_start = self.expect(&TokenKind::If)?.span;
        loop {
            let cond = self.parse_condition()?;
            self.expect(&TokenKind::Then)?;
            let body = self.parse_block()?;
            clauses.push(IfClause {
                cond,
                body,
                span: self.span_from(clause_start),
            });
            if self.check(&TokenKind::Elseif) {
                clause_start = self.advance().span;
            } else {
                break;
            }
        }
        let else_block = if self.eat(&TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };
        let opener = clauses.first().map_or(Span::DUMMY, |c| c.span);
        self.expect_block_end(opener)?;
        Ok(StmtKind::If(Box::new(IfStmt {
            clauses,
            else_block,
        })))
    }

    fn parse_while(&mut self) -> PResult<StmtKind> {
        let opener = self.expect(&TokenKind::While)?.span;
        let cond = self.parse_condition()?;
        self.expect(&TokenKind::Do)?;
        let body = self.parse_block()?;
        self.expect_block_end(opener)?;
        Ok(StmtKind::While(Box::new(WhileStmt { cond, body })))
    }

    fn parse_repeat(&mut self) -> PResult<StmtKind> {
        self.expect(&TokenKind::Repeat)?;
        let body = self.parse_block()?;
        self.expect(&TokenKind::Until)?;
        let cond = self.parse_expr()?;
        Ok(StmtKind::Repeat(Box::new(RepeatStmt { body, cond })))
    }

    /// `if`/`elseif`/`while` condition, including the `local` binding form.
    fn parse_condition(&mut self) -> PResult<Condition> {
        if !self.check(&TokenKind::Local) {
            return Ok(Condition::Expr(self.parse_expr()?));
        }
        let start = self.advance().span;
        self.require_feature(FeatureFlags::IF_LOCAL, "`local` in a condition", start);
        let bindings = self.parse_binding_list()?;
        self.expect(&TokenKind::Eq)?;
        let values = self.parse_expr_list()?;
        let refinement = if self.eat(&TokenKind::In) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Condition::Local(Box::new(LocalCondition {
            bindings,
            values,
            refinement,
            span: self.span_from(start),
        })))
    }

    fn parse_for(&mut self) -> PResult<StmtKind> {
        let opener = self.expect(&TokenKind::For)?.span;
        let first = self.parse_binding()?;
        if self.eat(&TokenKind::Eq) {
            let start = self.parse_expr()?;
            self.expect(&TokenKind::Comma)?;
            let limit = self.parse_expr()?;
            let step = if self.eat(&TokenKind::Comma) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            self.expect(&TokenKind::Do)?;
            let body = self.parse_block()?;
            self.expect_block_end(opener)?;
            return Ok(StmtKind::NumericFor(Box::new(NumericForStmt {
                var: first,
                start,
                limit,
                step,
                body,
            })));
        }
        let mut vars = vec![first];
        while self.eat(&TokenKind::Comma) {
            vars.push(self.parse_binding()?);
        }
        if !self.check(&TokenKind::In) {
            return Err(self.cursor.unexpected("`=` or `in`"));
        }
        self.advance();
        let values = self.parse_expr_list()?;
        self.expect(&TokenKind::Do)?;
        let body = self.parse_block()?;
        self.expect_block_end(opener)?;
        Ok(StmtKind::GenericFor(Box::new(GenericForStmt { vars, values, body })))
    }

    /// `end` closing the construct opened at `opener`.
    pub(crate) fn expect_block_end(&mut self, opener: Span) -> PResult<()> {
        if self.eat(&TokenKind::End) {
            return Ok(());
        }
        let found = self.cursor.describe_current();
        let mut err = ParseError::new(ParseErrorKind::UnexpectedToken, self.current_span())
            .with_expected("`end`")
            .with_found(found);
        if self.cursor.is_at_end() {
            err.kind = ParseErrorKind::UnclosedDelimiter {
                delimiter: "block",
                opened_at: opener,
            };
        }
        Err(err)
    }

    /// Assignment, compound assignment or call.
    fn parse_expr_stmt(&mut self) -> PResult<StmtKind> {
        let target = self.parse_suffixed_expr()?;
        if self.check(&TokenKind::Comma) || self.check(&TokenKind::Eq) {
            return self.in_error_context(ErrorContext::Assignment, |p| {
                let mut targets = vec![target];
                while p.eat(&TokenKind::Comma) {
                    targets.push(p.parse_suffixed_expr()?);
                }
                p.expect(&TokenKind::Eq)?;
                let values = p.parse_expr_list()?;
                for target in &targets {
                    p.check_assignable(target);
                }
                Ok(StmtKind::Assign(AssignStmt { targets, values }))
            });
        }
        if let Some(op) = compound_op(self.current_kind()) {
            self.advance();
            let value = self.parse_expr()?;
            self.check_assignable(&target);
            return Ok(StmtKind::CompoundAssign(CompoundAssignStmt { op, target, value }));
        }
        if target.is_call() {
            return Ok(StmtKind::Expr(target));
        }
        // The lexer already reported the bad token.
        if matches!(target.kind, ExprKind::Error) {
            return Ok(StmtKind::Error);
        }
        Err(self.cursor.unexpected("`=` or a call after this expression"))
    }

    fn check_assignable(&mut self, target: &Expr) {
        if !target.is_assignable() {
            self.error(ParseError::new(
                ParseErrorKind::InvalidAssignmentTarget,
                target.span,
            ));
        }
    }
}

fn compound_op(kind: TokenKind) -> Option<CompoundOp> {
    Some(match kind {
        TokenKind::PlusEq => CompoundOp::Add,
        TokenKind::MinusEq => CompoundOp::Sub,
        TokenKind::StarEq => CompoundOp::Mul,
        TokenKind::SlashEq => CompoundOp::Div,
        TokenKind::SlashSlashEq => CompoundOp::FloorDiv,
        TokenKind::PercentEq => CompoundOp::Mod,
        TokenKind::CaretEq => CompoundOp::Pow,
        TokenKind::DotDotEq => CompoundOp::Concat,
        _ => return None,
    })
}

/// Description of a statement a declaration file may not contain.
fn executable_statement(kind: &StmtKind) -> Option<&'static str> {
    match kind {
        StmtKind::TypeAlias(_)
        | StmtKind::DeclareGlobal(_)
        | StmtKind::DeclareFunction(_)
        | StmtKind::DeclareClass(_)
        | StmtKind::Error => None,
        StmtKind::Local(_) => Some("a local declaration"),
        StmtKind::LocalFunction(_) | StmtKind::Function(_) => Some("a function definition"),
        StmtKind::Assign(_) | StmtKind::CompoundAssign(_) => Some("an assignment"),
        StmtKind::Expr(_) => Some("a call"),
        StmtKind::Return(_) => Some("`return`"),
        StmtKind::Break | StmtKind::Continue => Some("a loop control statement"),
        StmtKind::Do(_)
        | StmtKind::While(_)
        | StmtKind::Repeat(_)
        | StmtKind::If(_)
        | StmtKind::NumericFor(_)
        | StmtKind::GenericFor(_) => Some("control flow"),
    }
}
