//! Statement parsing.
//!
//! | Statement | Method |
//! |-----------|--------|
//! | `var` / `let` / `const` | `parse_variable_statement` |
//! | `if` | `parse_if_statement` |
//! | `for`, `for-in`, `for-of`, `for await` | `parse_for_statement` |
//! | `while` / `do-while` | `parse_while_statement` / `parse_do_while_statement` |
//! | `break` / `continue` | `parse_break_continue` |
//! | `return` / `throw` | `parse_return_statement` / `parse_throw_statement` |
//! | `switch` | `parse_switch_statement` |
//! | `try` | `parse_try_statement` |
//! | `with` | `parse_with_statement` |
//! | labelled statements | `parse_labeled_statement` |
//!
//! Functions and classes live in `functions.rs` and `classes.rs`, module
//! declarations in `modules.rs`.

use super::context::Context;
use super::parser::{Label, LabelKind, Marker, Parser};
use super::patterns::{BindTarget, CoverGrammar};
use super::scope::{BindingKind, ScopeFlags};
use crate::ast::*;
use crate::error::{ErrorKind, Result};
use crate::lexer::{TokenFlags, TokenKind};
use tracing::trace;

/// Where a statement appears. Declarations are only allowed directly in
/// statement lists; sloppy code additionally accepts plain function
/// declarations as the body of an `if` or a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum StatementSlot {
    /// Directly in the program body
    TopLevel,
    /// In a block, function body, case clause or static block
    Declaration,
    /// Body of an `if` or `else`
    If,
    /// Body of a label whose own statement is in a declaration slot
    Label,
    /// Any other single-statement body (loops, `with`)
    Nested,
}

impl StatementSlot {
    fn is_declaration(self) -> bool {
        matches!(self, StatementSlot::TopLevel | StatementSlot::Declaration)
    }
}

impl<'a> Parser<'a> {
    /// Parses the program body, starting with its directive prologue.
    pub(super) fn parse_top_level(&mut self, ctx: Context) -> Result<Vec<Statement>> {
        let (mut body, ctx, _) =
            self.parse_directives(ctx, StatementSlot::TopLevel, &TokenKind::Eof)?;
        while !self.is_at_end() {
            body.push(self.parse_statement(ctx, StatementSlot::TopLevel)?);
        }
        Ok(body)
    }

    /// Parses the directive prologue of a program or function body.
    ///
    /// Returns the statements read (the last one may be an ordinary
    /// statement that ended the prologue), the context for the rest of the
    /// body, and whether a `"use strict"` directive switched it to strict.
    pub(super) fn parse_directives(
        &mut self,
        ctx: Context,
        slot: StatementSlot,
        end: &TokenKind,
    ) -> Result<(Vec<Statement>, Context, bool)> {
        let mut body = Vec::new();
        let mut ctx = ctx;
        let mut use_strict = false;
        let mut octal_escape: Option<usize> = None;

        while !self.check(end) && matches!(self.current.kind, TokenKind::String(_)) {
            let token_start = self.current.span.start;
            let has_octal = self.current.flags.contains(TokenFlags::OCTAL_ESCAPE);
            let mut stmt = self.parse_statement(ctx, slot)?;

            let Some(directive) = self.directive_of(&stmt) else {
                body.push(stmt);
                break;
            };
            if has_octal && octal_escape.is_none() {
                octal_escape = Some(token_start);
            }
            if directive == "use strict" && !ctx.is_strict() {
                trace!(offset = token_start, "use strict directive");
                if let Some(offset) = octal_escape {
                    return Err(self.raise(
                        ErrorKind::StrictModeViolation,
                        offset,
                        "Octal escape sequences are not allowed in strict mode",
                    ));
                }
                use_strict = true;
                ctx |= Context::STRICT;
            }
            if let Statement::Expression(es) = &mut stmt {
                es.directive = Some(directive);
            }
            body.push(stmt);
        }
        Ok((body, ctx, use_strict))
    }

    /// Returns the raw directive text if `stmt` is a bare string literal
    /// statement.
    fn directive_of(&self, stmt: &Statement) -> Option<String> {
        let Statement::Expression(es) = stmt else {
            return None;
        };
        match &es.expression {
            Expression::Literal(lit)
                if lit.span.start == es.span.start
                    && matches!(lit.value, LiteralValue::String(_)) =>
            {
                let inner = lit.raw.get(1..lit.raw.len().saturating_sub(1))?;
                Some(inner.to_string())
            }
            _ => None,
        }
    }

    /// Parses a single statement.
    pub(super) fn parse_statement(&mut self, ctx: Context, slot: StatementSlot) -> Result<Statement> {
        self.nested(|p| p.parse_statement_inner(ctx, slot))
    }

    fn parse_statement_inner(&mut self, ctx: Context, slot: StatementSlot) -> Result<Statement> {
        if self.is_let(slot)? {
            return self.parse_variable_statement(ctx, slot, VariableKind::Let);
        }

        match &self.current.kind {
            TokenKind::Var => self.parse_variable_statement(ctx, slot, VariableKind::Var),
            TokenKind::Const => self.parse_variable_statement(ctx, slot, VariableKind::Const),
            TokenKind::Function => {
                let hanging = !slot.is_declaration();
                if hanging
                    && (ctx.is_strict()
                        || !matches!(slot, StatementSlot::If | StatementSlot::Label)
                        || !self.options.web_compat())
                {
                    return Err(self.unexpected());
                }
                let start = self.start();
                self.advance()?;
                self.parse_function_statement(ctx, start, false, hanging)
            }
            TokenKind::Class => {
                if !slot.is_declaration() {
                    return Err(self.unexpected());
                }
                let start = self.start();
                let class = self.parse_class(ctx, start, super::classes::ClassRole::Declaration)?;
                Ok(Statement::ClassDeclaration(class))
            }
            TokenKind::If => self.parse_if_statement(ctx),
            TokenKind::For => self.parse_for_statement(ctx),
            TokenKind::While => self.parse_while_statement(ctx),
            TokenKind::Do => self.parse_do_while_statement(ctx),
            TokenKind::Break => self.parse_break_continue(ctx, true),
            TokenKind::Continue => self.parse_break_continue(ctx, false),
            TokenKind::Return => self.parse_return_statement(ctx),
            TokenKind::Throw => self.parse_throw_statement(ctx),
            TokenKind::Try => self.parse_try_statement(ctx),
            TokenKind::Switch => self.parse_switch_statement(ctx),
            TokenKind::With => self.parse_with_statement(ctx),
            TokenKind::LeftBrace => Ok(Statement::Block(self.parse_block(ctx, true)?)),
            TokenKind::Semicolon => {
                let start = self.start();
                self.advance()?;
                Ok(Statement::Empty(EmptyStatement {
                    span: self.finish(start),
                }))
            }
            TokenKind::Debugger => {
                let start = self.start();
                self.advance()?;
                self.semicolon()?;
                Ok(Statement::Debugger(DebuggerStatement {
                    span: self.finish(start),
                }))
            }
            TokenKind::Import | TokenKind::Export => {
                let is_import = self.check(&TokenKind::Import);
                if is_import {
                    let next = self.peek()?;
                    if matches!(next.kind, TokenKind::LeftParen | TokenKind::Dot) {
                        return self.parse_expression_statement(ctx, slot);
                    }
                }
                if slot != StatementSlot::TopLevel {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        self.current.span.start,
                        "'import' and 'export' may only appear at the top level",
                    ));
                }
                if !ctx.is_module() {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        self.current.span.start,
                        "'import' and 'export' may appear only with 'sourceType: module'",
                    ));
                }
                if is_import {
                    self.parse_import(ctx)
                } else {
                    self.parse_export(ctx)
                }
            }
            _ => {
                if self.is_async_function()? {
                    if !slot.is_declaration() {
                        return Err(self.unexpected());
                    }
                    let start = self.start();
                    self.advance()?; // async
                    self.advance()?; // function
                    return self.parse_function_statement(ctx, start, true, false);
                }
                self.parse_expression_statement(ctx, slot)
            }
        }
    }

    /// Returns true if a `let` at the current position starts a declaration.
    pub(super) fn is_let(&self, slot: StatementSlot) -> Result<bool> {
        if !self.is_contextual("let") {
            return Ok(false);
        }
        let next = self.peek()?;
        if matches!(next.kind, TokenKind::LeftBracket) || next.is_escaped() {
            return Ok(true);
        }
        if !slot.is_declaration() {
            return Ok(false);
        }
        Ok(match &next.kind {
            TokenKind::LeftBrace | TokenKind::Identifier(_) => true,
            TokenKind::In | TokenKind::Instanceof => false,
            kind => kind.is_keyword(),
        })
    }

    /// Returns true at `async function` with no line break in between.
    pub(super) fn is_async_function(&self) -> Result<bool> {
        if !self.is_contextual("async") {
            return Ok(false);
        }
        let next = self.peek()?;
        Ok(matches!(next.kind, TokenKind::Function) && !next.newline_before() && !next.is_escaped())
    }

    fn parse_expression_statement(&mut self, ctx: Context, slot: StatementSlot) -> Result<Statement> {
        let start = self.start();
        let starts_with_name = matches!(self.current.kind, TokenKind::Identifier(_));
        let expression = self.parse_expression(ctx, None)?;

        if starts_with_name && self.check(&TokenKind::Colon) {
            if let Expression::Identifier(label) = expression {
                self.advance()?;
                return self.parse_labeled_statement(ctx, slot, start, label);
            }
        }

        self.semicolon()?;
        Ok(Statement::Expression(ExpressionStatement {
            span: self.finish(start),
            expression,
            directive: None,
        }))
    }

    /// Parses a block, optionally in a fresh lexical scope.
    pub(super) fn parse_block(&mut self, ctx: Context, new_scope: bool) -> Result<BlockStatement> {
        let start = self.start();
        self.expect(&TokenKind::LeftBrace)?;
        if new_scope {
            self.scope.push_scope(ScopeFlags::empty());
        }
        let mut body = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            body.push(self.parse_statement(ctx, StatementSlot::Declaration)?);
        }
        self.expect(&TokenKind::RightBrace)?;
        if new_scope {
            self.scope.pop_scope();
        }
        Ok(BlockStatement {
            span: self.finish(start),
            body,
        })
    }

    fn parse_variable_statement(
        &mut self,
        ctx: Context,
        slot: StatementSlot,
        kind: VariableKind,
    ) -> Result<Statement> {
        if kind != VariableKind::Var && !slot.is_declaration() {
            return Err(self.unexpected());
        }
        let start = self.start();
        self.advance()?;
        let mut declaration = self.parse_var(ctx, start, kind, false)?;
        self.semicolon()?;
        declaration.span = self.finish(start);
        Ok(Statement::VariableDeclaration(declaration))
    }

    /// Parses the declarators after `var`, `let` or `const`.
    pub(super) fn parse_var(
        &mut self,
        ctx: Context,
        start: Marker,
        kind: VariableKind,
        is_for: bool,
    ) -> Result<VariableDeclaration> {
        let binding = match kind {
            VariableKind::Var => BindingKind::Var,
            VariableKind::Let | VariableKind::Const => BindingKind::Lexical,
        };
        let mut declarations = Vec::new();
        loop {
            let decl_start = self.start();
            let id = self.parse_binding_atom(ctx)?;
            self.check_pattern(ctx, &id, BindTarget::Declare(binding), None)?;

            let in_for_head = is_for && (self.check(&TokenKind::In) || self.is_contextual("of"));
            let init = if self.eat(&TokenKind::Equal)? {
                Some(self.parse_maybe_assign(ctx.with(Context::DISALLOW_IN, is_for), None)?)
            } else if kind == VariableKind::Const && !in_for_head {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    self.current.span.start,
                    "Missing initializer in const declaration",
                ));
            } else if !matches!(id, Pattern::Identifier(_)) && !in_for_head {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    self.previous.span.end,
                    "Complex binding patterns require an initialization value",
                ));
            } else {
                None
            };

            declarations.push(VariableDeclarator {
                id,
                init,
                span: self.finish(decl_start),
            });
            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }
        Ok(VariableDeclaration {
            span: self.finish(start),
            kind,
            declarations,
        })
    }

    fn parse_if_statement(&mut self, ctx: Context) -> Result<Statement> {
        let start = self.start();
        self.advance()?;
        let test = self.parse_paren_expression(ctx)?;
        let consequent = Box::new(self.parse_statement(ctx, StatementSlot::If)?);
        let alternate = if self.eat(&TokenKind::Else)? {
            Some(Box::new(self.parse_statement(ctx, StatementSlot::If)?))
        } else {
            None
        };
        Ok(Statement::If(IfStatement {
            span: self.finish(start),
            test,
            consequent,
            alternate,
        }))
    }

    fn parse_while_statement(&mut self, ctx: Context) -> Result<Statement> {
        let start = self.start();
        self.advance()?;
        let test = self.parse_paren_expression(ctx)?;
        let body = Box::new(self.parse_statement(ctx | Context::IN_ITERATION, StatementSlot::Nested)?);
        Ok(Statement::While(WhileStatement {
            span: self.finish(start),
            test,
            body,
        }))
    }

    fn parse_do_while_statement(&mut self, ctx: Context) -> Result<Statement> {
        let start = self.start();
        self.advance()?;
        let body = Box::new(self.parse_statement(ctx | Context::IN_ITERATION, StatementSlot::Nested)?);
        self.expect(&TokenKind::While)?;
        let test = self.parse_paren_expression(ctx)?;
        // The semicolon after do-while is always optional.
        self.eat(&TokenKind::Semicolon)?;
        Ok(Statement::DoWhile(DoWhileStatement {
            span: self.finish(start),
            body,
            test,
        }))
    }

    fn parse_for_statement(&mut self, ctx: Context) -> Result<Statement> {
        let start = self.start();
        self.advance()?;
        let await_at = if ctx.is_async() && self.is_contextual("await") {
            let offset = self.current.span.start;
            self.advance()?;
            Some(offset)
        } else {
            None
        };
        self.scope.push_scope(ScopeFlags::empty());
        self.expect(&TokenKind::LeftParen)?;
        let head = ctx | Context::DISALLOW_IN;

        if self.check(&TokenKind::Semicolon) {
            if let Some(offset) = await_at {
                return Err(self.unexpected_at(offset));
            }
            return self.parse_for_rest(ctx, start, None);
        }

        let is_let = self.is_let(StatementSlot::Declaration)?;
        if self.check(&TokenKind::Var) || self.check(&TokenKind::Const) || is_let {
            let decl_start = self.start();
            let kind = match self.current.kind {
                TokenKind::Var => VariableKind::Var,
                TokenKind::Const => VariableKind::Const,
                _ => VariableKind::Let,
            };
            self.advance()?;
            let declaration = self.parse_var(ctx, decl_start, kind, true)?;
            let is_of = self.is_contextual("of");
            if (is_of || self.check(&TokenKind::In)) && declaration.declarations.len() == 1 {
                if !is_of {
                    if let Some(offset) = await_at {
                        return Err(self.unexpected_at(offset));
                    }
                }
                if is_of && kind == VariableKind::Var {
                    let mut names = Vec::new();
                    bound_names_of(&declaration.declarations[0].id, &mut names);
                    for (name, offset) in names {
                        self.declare(&name, BindingKind::ForOfVar, offset)?;
                    }
                }
                let left = ForTarget::VariableDeclaration(declaration);
                return self.parse_for_in_of(ctx, start, left, is_of, await_at.is_some());
            }
            if let Some(offset) = await_at {
                return Err(self.unexpected_at(offset));
            }
            return self.parse_for_rest(ctx, start, Some(ForInit::VariableDeclaration(declaration)));
        }

        let starts_with_let = self.is_contextual("let");
        let contains_escape = self.current.is_escaped();
        let init_start = self.current.span.start;
        let mut cover = CoverGrammar::default();
        let init = if await_at.is_some() {
            self.parse_expr_subscripts(head, Some(&mut cover))?
        } else {
            self.parse_expression(head, Some(&mut cover))?
        };

        let is_of = self.is_contextual("of");
        if is_of || self.check(&TokenKind::In) {
            if let Some(offset) = await_at {
                if !is_of {
                    return Err(self.unexpected_at(offset));
                }
            } else if is_of
                && !contains_escape
                && init.span().start == init_start
                && matches!(&init, Expression::Identifier(id) if id.name == "async")
            {
                return Err(self.unexpected());
            }
            if starts_with_let && is_of {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    init.span().start,
                    "The left-hand side of a for-of loop may not start with 'let'",
                ));
            }
            let target = self.to_assign_target(ctx, init, Some(&mut cover))?;
            self.check_pattern(ctx, &target, BindTarget::Assign, None)?;
            let left = ForTarget::Pattern(target);
            return self.parse_for_in_of(ctx, start, left, is_of, await_at.is_some());
        }
        self.check_expression_errors(&cover)?;
        if let Some(offset) = await_at {
            return Err(self.unexpected_at(offset));
        }
        self.parse_for_rest(ctx, start, Some(ForInit::Expression(init)))
    }

    /// `for (init; test; update) body`, after the initializer.
    fn parse_for_rest(&mut self, ctx: Context, start: Marker, init: Option<ForInit>) -> Result<Statement> {
        let inner = ctx.without(Context::DISALLOW_IN);
        self.expect(&TokenKind::Semicolon)?;
        let test = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression(inner, None)?)
        };
        self.expect(&TokenKind::Semicolon)?;
        let update = if self.check(&TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expression(inner, None)?)
        };
        self.expect(&TokenKind::RightParen)?;
        let body = Box::new(self.parse_statement(ctx | Context::IN_ITERATION, StatementSlot::Nested)?);
        self.scope.pop_scope();
        Ok(Statement::For(ForStatement {
            span: self.finish(start),
            init,
            test,
            update,
            body,
        }))
    }

    /// `for (left in right)` / `for (left of right)`, at `in` or `of`.
    fn parse_for_in_of(
        &mut self,
        ctx: Context,
        start: Marker,
        left: ForTarget,
        is_of: bool,
        is_await: bool,
    ) -> Result<Statement> {
        if let ForTarget::VariableDeclaration(decl) = &left {
            let first = &decl.declarations[0];
            if first.init.is_some() {
                // Annex B keeps `for (var x = 1 in y)` for sloppy code.
                let legacy = !is_of
                    && !ctx.is_strict()
                    && self.options.web_compat()
                    && decl.kind == VariableKind::Var
                    && matches!(first.id, Pattern::Identifier(_));
                if !legacy {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        decl.span.start,
                        format!(
                            "{} loop variable declaration may not have an initializer",
                            if is_of { "for-of" } else { "for-in" }
                        ),
                    ));
                }
            }
        }
        self.advance()?; // in / of
        let inner = ctx.without(Context::DISALLOW_IN);
        let right = if is_of {
            self.parse_maybe_assign(inner, None)?
        } else {
            self.parse_expression(inner, None)?
        };
        self.expect(&TokenKind::RightParen)?;
        let body = Box::new(self.parse_statement(ctx | Context::IN_ITERATION, StatementSlot::Nested)?);
        self.scope.pop_scope();
        let span = self.finish(start);
        Ok(if is_of {
            Statement::ForOf(ForOfStatement {
                span,
                is_await,
                left,
                right,
                body,
            })
        } else {
            Statement::ForIn(ForInStatement {
                span,
                left,
                right,
                body,
            })
        })
    }

    fn parse_break_continue(&mut self, ctx: Context, is_break: bool) -> Result<Statement> {
        let start = self.start();
        let keyword = if is_break { "break" } else { "continue" };
        self.advance()?;

        let label = if self.eat(&TokenKind::Semicolon)? || self.can_insert_semicolon() {
            None
        } else if matches!(self.current.kind, TokenKind::Identifier(_)) {
            let label = self.parse_identifier(ctx)?;
            self.semicolon()?;
            Some(label)
        } else {
            return Err(self.unexpected());
        };

        match &label {
            None => {
                let allowed = if is_break {
                    ctx.intersects(Context::IN_ITERATION | Context::IN_SWITCH)
                } else {
                    ctx.contains(Context::IN_ITERATION)
                };
                if !allowed {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        start.offset,
                        format!("Illegal {} statement", keyword),
                    ));
                }
            }
            Some(id) => match self.labels.iter().rev().find(|l| l.name == id.name) {
                None => {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        id.span.start,
                        format!("Undefined label '{}'", id.name),
                    ));
                }
                Some(target) if !is_break && target.kind != LabelKind::Loop => {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        id.span.start,
                        format!(
                            "Illegal continue statement: '{}' does not denote an iteration statement",
                            id.name
                        ),
                    ));
                }
                Some(_) => {}
            },
        }

        let span = self.finish(start);
        Ok(if is_break {
            Statement::Break(BreakStatement { span, label })
        } else {
            Statement::Continue(ContinueStatement { span, label })
        })
    }

    fn parse_return_statement(&mut self, ctx: Context) -> Result<Statement> {
        if !ctx.contains(Context::IN_FUNCTION) {
            return Err(self.raise(
                ErrorKind::EarlyError,
                self.current.span.start,
                "Illegal return statement",
            ));
        }
        let start = self.start();
        self.advance()?;
        let argument = if self.eat(&TokenKind::Semicolon)? || self.can_insert_semicolon() {
            None
        } else {
            let argument = self.parse_expression(ctx, None)?;
            self.semicolon()?;
            Some(argument)
        };
        Ok(Statement::Return(ReturnStatement {
            span: self.finish(start),
            argument,
        }))
    }

    fn parse_throw_statement(&mut self, ctx: Context) -> Result<Statement> {
        let start = self.start();
        self.advance()?;
        if self.current.newline_before() {
            return Err(self.raise(
                ErrorKind::EarlyError,
                self.previous.span.end,
                "Illegal newline after throw",
            ));
        }
        let argument = self.parse_expression(ctx, None)?;
        self.semicolon()?;
        Ok(Statement::Throw(ThrowStatement {
            span: self.finish(start),
            argument,
        }))
    }

    fn parse_try_statement(&mut self, ctx: Context) -> Result<Statement> {
        let start = self.start();
        self.advance()?;
        let block = self.parse_block(ctx, true)?;

        let handler = if self.check(&TokenKind::Catch) {
            let clause_start = self.start();
            self.advance()?;
            let param = if self.eat(&TokenKind::LeftParen)? {
                let param = self.parse_binding_atom(ctx)?;
                self.scope.push_scope(ScopeFlags::empty());
                match &param {
                    Pattern::Identifier(id) => {
                        self.scope.set_catch_param(&id.name);
                        self.check_pattern(ctx, &param, BindTarget::Declare(BindingKind::SimpleCatch), None)?;
                    }
                    _ => {
                        self.check_pattern(ctx, &param, BindTarget::Declare(BindingKind::Lexical), None)?;
                    }
                }
                self.expect(&TokenKind::RightParen)?;
                Some(param)
            } else {
                self.scope.push_scope(ScopeFlags::empty());
                None
            };
            let body = self.parse_block(ctx, false)?;
            self.scope.pop_scope();
            Some(CatchClause {
                span: self.finish(clause_start),
                param,
                body,
            })
        } else {
            None
        };

        let finalizer = if self.eat(&TokenKind::Finally)? {
            Some(self.parse_block(ctx, true)?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.raise(
                ErrorKind::UnexpectedToken,
                self.current.span.start,
                "Missing catch or finally after try",
            ));
        }
        Ok(Statement::Try(TryStatement {
            span: self.finish(start),
            block,
            handler,
            finalizer,
        }))
    }

    fn parse_switch_statement(&mut self, ctx: Context) -> Result<Statement> {
        let start = self.start();
        self.advance()?;
        let discriminant = self.parse_paren_expression(ctx)?;
        self.expect(&TokenKind::LeftBrace)?;
        self.scope.push_scope(ScopeFlags::empty());

        let case_ctx = ctx | Context::IN_SWITCH;
        let mut cases = Vec::new();
        let mut saw_default = false;
        while !self.check(&TokenKind::RightBrace) {
            let case_start = self.start();
            let test = match self.current.kind {
                TokenKind::Case => {
                    self.advance()?;
                    Some(self.parse_expression(ctx.without(Context::DISALLOW_IN), None)?)
                }
                TokenKind::Default => {
                    if saw_default {
                        return Err(self.raise(
                            ErrorKind::EarlyError,
                            self.current.span.start,
                            "More than one default clause in switch statement",
                        ));
                    }
                    saw_default = true;
                    self.advance()?;
                    None
                }
                _ => return Err(self.unexpected()),
            };
            self.expect(&TokenKind::Colon)?;

            let mut consequent = Vec::new();
            while !matches!(
                self.current.kind,
                TokenKind::Case | TokenKind::Default | TokenKind::RightBrace
            ) {
                consequent.push(self.parse_statement(case_ctx, StatementSlot::Declaration)?);
            }
            cases.push(SwitchCase {
                span: self.finish(case_start),
                test,
                consequent,
            });
        }
        self.scope.pop_scope();
        self.expect(&TokenKind::RightBrace)?;
        Ok(Statement::Switch(SwitchStatement {
            span: self.finish(start),
            discriminant,
            cases,
        }))
    }

    fn parse_with_statement(&mut self, ctx: Context) -> Result<Statement> {
        if ctx.is_strict() {
            return Err(self.raise(
                ErrorKind::StrictModeViolation,
                self.current.span.start,
                "Strict mode code may not include a with statement",
            ));
        }
        let start = self.start();
        self.advance()?;
        let object = self.parse_paren_expression(ctx)?;
        let body = Box::new(self.parse_statement(ctx, StatementSlot::Nested)?);
        Ok(Statement::With(WithStatement {
            span: self.finish(start),
            object,
            body,
        }))
    }

    fn parse_labeled_statement(
        &mut self,
        ctx: Context,
        slot: StatementSlot,
        start: Marker,
        label: Identifier,
    ) -> Result<Statement> {
        if self.labels.iter().any(|l| l.name == label.name) {
            return Err(self.raise(
                ErrorKind::EarlyError,
                label.span.start,
                format!("Label '{}' has already been declared", label.name),
            ));
        }
        let kind = match self.current.kind {
            TokenKind::For | TokenKind::While | TokenKind::Do => LabelKind::Loop,
            TokenKind::Switch => LabelKind::Switch,
            _ => LabelKind::Other,
        };
        let statement_start = self.current.span.start;
        // Labels chained onto the same statement take its kind.
        for outer in self.labels.iter_mut().rev() {
            if outer.statement_start != start.offset {
                break;
            }
            outer.statement_start = statement_start;
            outer.kind = kind;
        }
        self.labels.push(Label {
            name: label.name.clone(),
            kind,
            statement_start,
        });

        let body_slot = match slot {
            StatementSlot::TopLevel | StatementSlot::Declaration | StatementSlot::Label => {
                StatementSlot::Label
            }
            _ => StatementSlot::Nested,
        };
        let body = self.parse_statement(ctx, body_slot);
        self.labels.pop();
        Ok(Statement::Labeled(LabeledStatement {
            span: self.finish(start),
            label,
            body: Box::new(body?),
        }))
    }

    /// `( Expression )`
    pub(super) fn parse_paren_expression(&mut self, ctx: Context) -> Result<Expression> {
        self.expect(&TokenKind::LeftParen)?;
        let expression = self.parse_expression(ctx.without(Context::DISALLOW_IN), None)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(expression)
    }
}

/// Collects the names bound by a pattern with their offsets.
pub(super) fn bound_names_of(pattern: &Pattern, names: &mut Vec<(String, usize)>) {
    match pattern {
        Pattern::Identifier(id) => names.push((id.name.clone(), id.span.start)),
        Pattern::Member(_) => {}
        Pattern::Array(array) => {
            for element in array.elements.iter().flatten() {
                bound_names_of(element, names);
            }
        }
        Pattern::Object(object) => {
            for member in &object.properties {
                match member {
                    ObjectPatternMember::Property(prop) => bound_names_of(&prop.value, names),
                    ObjectPatternMember::Rest(rest) => bound_names_of(&rest.argument, names),
                }
            }
        }
        Pattern::Assignment(assign) => bound_names_of(&assign.left, names),
        Pattern::Rest(rest) => bound_names_of(&rest.argument, names),
    }
}
