//! Functions, methods and arrow functions.
//!
//! Parameters are declared in the function scope before the body is read.
//! A `"use strict"` directive in the body is only seen afterwards, so the
//! parameter list and the function name are checked again against the
//! strict rules once the directive prologue has been parsed.

use rustc_hash::FxHashSet;

use super::context::Context;
use super::parser::{Marker, Parser};
use super::patterns::BindTarget;
use super::scope::{BindingKind, ScopeFlags};
use super::statements::{StatementSlot, bound_names_of};
use crate::ast::*;
use crate::error::{ErrorKind, Result};
use crate::lexer::TokenKind;

/// Where a `function` keyword was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FunctionRole {
    /// A declaration; `hanging` when it is the body of an `if` or a label
    /// and does not bind its name
    Declaration { hanging: bool },
    /// `export default function`: the name is optional
    DefaultExport,
    /// A function expression
    Expression,
}

/// How parameters and body relate for the duplicate-parameter rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Function,
    Method,
    Arrow,
}

fn is_simple_params(params: &[Pattern]) -> bool {
    params.iter().all(|param| matches!(param, Pattern::Identifier(_)))
}

impl<'a> Parser<'a> {
    /// A function declaration statement. The `function` keyword (and any
    /// `async` before it) has been consumed.
    pub(super) fn parse_function_statement(
        &mut self,
        ctx: Context,
        start: Marker,
        is_async: bool,
        hanging: bool,
    ) -> Result<Statement> {
        let func = self.parse_function(ctx, start, FunctionRole::Declaration { hanging }, is_async)?;
        Ok(Statement::FunctionDeclaration(func))
    }

    /// A function expression. The `function` keyword has been consumed.
    pub(super) fn parse_function_expression(&mut self, ctx: Context, start: Marker, is_async: bool) -> Result<Function> {
        self.parse_function(ctx, start, FunctionRole::Expression, is_async)
    }

    pub(super) fn parse_function(
        &mut self,
        ctx: Context,
        start: Marker,
        role: FunctionRole,
        is_async: bool,
    ) -> Result<Function> {
        let generator = self.eat(&TokenKind::Star)?;
        if generator && role == (FunctionRole::Declaration { hanging: true }) {
            return Err(self.unexpected_at(self.previous.span.start));
        }
        let inner = ctx.function(is_async, generator);

        // Declarations bind their name in the enclosing scope, in the
        // enclosing context.
        let mut id = None;
        let mut id_ctx = ctx;
        let anonymous_default =
            role == FunctionRole::DefaultExport && !matches!(self.current.kind, TokenKind::Identifier(_));
        if role != FunctionRole::Expression && !anonymous_default {
            let name = self.parse_identifier(ctx)?;
            if role == (FunctionRole::Declaration { hanging: false }) || role == FunctionRole::DefaultExport {
                let kind = if ctx.is_strict() || generator || is_async || !self.options.web_compat() {
                    if self.scope.functions_act_as_var() {
                        BindingKind::Var
                    } else {
                        BindingKind::Lexical
                    }
                } else {
                    BindingKind::Function
                };
                self.check_pattern(ctx, &Pattern::Identifier(name.clone()), BindTarget::Declare(kind), None)?;
            } else {
                self.check_pattern(ctx, &Pattern::Identifier(name.clone()), BindTarget::Check, None)?;
            }
            id = Some(name);
        }

        let old_yield = self.yield_pos.take();
        let old_await = self.await_pos.take();
        let old_await_ident = self.await_ident_pos.take();
        self.scope.push_scope(ScopeFlags::FUNCTION);

        if role == FunctionRole::Expression && matches!(self.current.kind, TokenKind::Identifier(_)) {
            id = Some(self.parse_identifier(inner)?);
            id_ctx = inner;
        }

        self.expect(&TokenKind::LeftParen)?;
        let params = self.parse_params(inner)?;
        let body = self.parse_function_body(inner, &params, id.as_ref().map(|id| (id, id_ctx)), BodyKind::Function)?;

        self.scope.pop_scope();
        self.yield_pos = old_yield;
        self.await_pos = old_await;
        self.await_ident_pos = old_await_ident;

        Ok(Function {
            span: self.finish(start),
            id,
            params,
            body,
            is_async,
            generator,
        })
    }

    /// A method value: parameters and body, starting at `(`.
    ///
    /// `ctx` is the context of the enclosing object or class body.
    pub(super) fn parse_method(
        &mut self,
        ctx: Context,
        is_async: bool,
        generator: bool,
        allow_super_call: bool,
    ) -> Result<Function> {
        let start = self.start();
        let inner = ctx
            .function(is_async, generator)
            .union(Context::ALLOW_SUPER_PROPERTY)
            .with(Context::ALLOW_SUPER_CALL, allow_super_call);

        let old_yield = self.yield_pos.take();
        let old_await = self.await_pos.take();
        let old_await_ident = self.await_ident_pos.take();
        self.scope.push_scope(ScopeFlags::FUNCTION);

        self.expect(&TokenKind::LeftParen)?;
        let params = self.parse_params(inner)?;
        let body = self.parse_function_body(inner, &params, None, BodyKind::Method)?;

        self.scope.pop_scope();
        self.yield_pos = old_yield;
        self.await_pos = old_await;
        self.await_ident_pos = old_await_ident;

        Ok(Function {
            span: self.finish(start),
            id: None,
            params,
            body,
            is_async,
            generator,
        })
    }

    /// Formal parameters after the opening `(`.
    fn parse_params(&mut self, ctx: Context) -> Result<Vec<Pattern>> {
        let params = self.parse_binding_list(ctx, &TokenKind::RightParen, false, true)?;
        self.check_yield_await_in_default_params()?;
        Ok(params.into_iter().flatten().collect())
    }

    /// Rejects `yield` and `await` expressions recorded while parsing a
    /// parameter list.
    pub(super) fn check_yield_await_in_default_params(&self) -> Result<()> {
        if let Some(yield_at) = self.yield_pos {
            if self.await_pos.is_none_or(|await_at| yield_at < await_at) {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    yield_at,
                    "Yield expression cannot be a default value",
                ));
            }
        }
        if let Some(await_at) = self.await_pos {
            return Err(self.raise(
                ErrorKind::EarlyError,
                await_at,
                "Await expression cannot be a default value",
            ));
        }
        Ok(())
    }

    /// Declares parameters in the current (function) scope.
    fn declare_params(&mut self, ctx: Context, params: &[Pattern], allow_duplicates: bool) -> Result<()> {
        let mut seen = FxHashSet::default();
        for param in params {
            let clashes = if allow_duplicates { None } else { Some(&mut seen) };
            self.check_pattern(ctx, param, BindTarget::Declare(BindingKind::Param), clashes)?;
        }
        Ok(())
    }

    /// Re-validates already declared parameters and the function name after
    /// a `"use strict"` directive.
    fn recheck_strict(&mut self, ctx: Context, params: &[Pattern], id: Option<(&Identifier, Context)>) -> Result<()> {
        let mut names = Vec::new();
        for param in params {
            bound_names_of(param, &mut names);
        }
        for (name, offset) in &names {
            self.check_unreserved(ctx, name, *offset)?;
        }
        let mut seen = FxHashSet::default();
        for param in params {
            self.check_pattern(ctx, param, BindTarget::Check, Some(&mut seen))?;
        }
        if let Some((id, id_ctx)) = id {
            let strict = id_ctx | Context::STRICT;
            self.check_unreserved(strict, &id.name, id.span.start)?;
            self.check_pattern(strict, &Pattern::Identifier(id.clone()), BindTarget::Check, None)?;
        }
        Ok(())
    }

    /// `{ body }` of a function, method or arrow.
    fn parse_function_body(
        &mut self,
        ctx: Context,
        params: &[Pattern],
        id: Option<(&Identifier, Context)>,
        kind: BodyKind,
    ) -> Result<BlockStatement> {
        let simple = is_simple_params(params);
        let allow_duplicates = !ctx.is_strict() && kind == BodyKind::Function && simple;
        self.declare_params(ctx, params, allow_duplicates)?;

        let old_labels = std::mem::take(&mut self.labels);
        let start = self.start();
        self.expect(&TokenKind::LeftBrace)?;
        let (mut body, ctx, use_strict) =
            self.parse_directives(ctx, StatementSlot::Declaration, &TokenKind::RightBrace)?;
        if use_strict {
            if !simple {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    start.offset,
                    "Illegal 'use strict' directive in function with non-simple parameter list",
                ));
            }
            self.recheck_strict(ctx, params, id)?;
        }
        while !self.check(&TokenKind::RightBrace) {
            if self.is_at_end() {
                return Err(self.unexpected());
            }
            body.push(self.parse_statement(ctx, StatementSlot::Declaration)?);
        }
        self.expect(&TokenKind::RightBrace)?;
        self.labels = old_labels;

        Ok(BlockStatement {
            span: self.finish(start),
            body,
        })
    }

    /// The body of an arrow function whose `=>` has been consumed.
    ///
    /// `ctx` is the context the arrow appears in; a concise body keeps its
    /// `in` restriction.
    pub(super) fn parse_arrow_expression(
        &mut self,
        ctx: Context,
        start: Marker,
        params: Vec<Pattern>,
        is_async: bool,
    ) -> Result<Expression> {
        let inner = ctx.arrow(is_async);
        let old_yield = self.yield_pos.take();
        let old_await = self.await_pos.take();
        let old_await_ident = self.await_ident_pos.take();
        self.scope.push_scope(ScopeFlags::FUNCTION | ScopeFlags::ARROW);

        let (body, expression) = if self.check(&TokenKind::LeftBrace) {
            let block = self.parse_function_body(inner, &params, None, BodyKind::Arrow)?;
            (ArrowBody::Block(block), false)
        } else {
            self.declare_params(inner, &params, false)?;
            let concise = inner.with(Context::DISALLOW_IN, ctx.contains(Context::DISALLOW_IN));
            let value = self.parse_maybe_assign(concise, None)?;
            (ArrowBody::Expression(Box::new(value)), true)
        };

        self.scope.pop_scope();
        self.yield_pos = old_yield;
        self.await_pos = old_await;
        self.await_ident_pos = old_await_ident;

        Ok(Expression::Arrow(ArrowFunctionExpression {
            span: self.finish(start),
            params,
            body,
            is_async,
            expression,
        }))
    }
}
