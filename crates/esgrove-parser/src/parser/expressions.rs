//! Expression parsing.
//!
//! Precedence, lowest first:
//!
//! | Level | Method |
//! |-------|--------|
//! | `,` | `parse_expression` |
//! | `=`, `+=`, arrows, `yield` | `parse_maybe_assign` |
//! | `?:` | `parse_maybe_conditional` |
//! | `??` `\|\|` `&&` `\|` `^` `&` equality, relational, shift, additive, multiplicative | `parse_expr_op` |
//! | unary, `await`, `++`/`--`, `**` | `parse_maybe_unary` |
//! | member access, calls, optional chains, tagged templates | `parse_subscripts` |
//! | literals, identifiers, `(...)`, `[...]`, `{...}`, `new` | `parse_expr_atom` |
//!
//! Every level that may produce an assignment target threads an optional
//! [`CoverGrammar`] so array and object literals can be reinterpreted as
//! patterns.

use super::context::Context;
use super::parser::{Marker, Parser};
use super::patterns::{BindTarget, CoverGrammar, TargetMode};
use crate::ast::*;
use crate::error::{ErrorKind, Result};
use crate::lexer::{TokenFlags, TokenKind};

/// A binary operator and the node it builds.
#[derive(Debug, Clone, Copy)]
enum BinaryOp {
    Binary(BinaryOperator),
    Logical(LogicalOperator),
}

/// Binding power of a binary operator token. `**` is handled with the unary
/// operators because it is right associative.
fn binary_operator(kind: &TokenKind) -> Option<(u8, BinaryOp)> {
    use BinaryOp::*;
    let entry = match kind {
        TokenKind::QuestionQuestion => (1, Logical(LogicalOperator::NullishCoalescing)),
        TokenKind::PipePipe => (1, Logical(LogicalOperator::Or)),
        TokenKind::AmpersandAmpersand => (2, Logical(LogicalOperator::And)),
        TokenKind::Pipe => (3, Binary(BinaryOperator::BitwiseOr)),
        TokenKind::Caret => (4, Binary(BinaryOperator::BitwiseXor)),
        TokenKind::Ampersand => (5, Binary(BinaryOperator::BitwiseAnd)),
        TokenKind::EqualEqual => (6, Binary(BinaryOperator::Equal)),
        TokenKind::NotEqual => (6, Binary(BinaryOperator::NotEqual)),
        TokenKind::StrictEqual => (6, Binary(BinaryOperator::StrictEqual)),
        TokenKind::StrictNotEqual => (6, Binary(BinaryOperator::StrictNotEqual)),
        TokenKind::LessThan => (7, Binary(BinaryOperator::LessThan)),
        TokenKind::LessThanEqual => (7, Binary(BinaryOperator::LessThanEqual)),
        TokenKind::GreaterThan => (7, Binary(BinaryOperator::GreaterThan)),
        TokenKind::GreaterThanEqual => (7, Binary(BinaryOperator::GreaterThanEqual)),
        TokenKind::In => (7, Binary(BinaryOperator::In)),
        TokenKind::Instanceof => (7, Binary(BinaryOperator::Instanceof)),
        TokenKind::LeftShift => (8, Binary(BinaryOperator::LeftShift)),
        TokenKind::RightShift => (8, Binary(BinaryOperator::RightShift)),
        TokenKind::UnsignedRightShift => (8, Binary(BinaryOperator::UnsignedRightShift)),
        TokenKind::Plus => (9, Binary(BinaryOperator::Add)),
        TokenKind::Minus => (9, Binary(BinaryOperator::Subtract)),
        TokenKind::Star => (10, Binary(BinaryOperator::Multiply)),
        TokenKind::Slash => (10, Binary(BinaryOperator::Divide)),
        TokenKind::Percent => (10, Binary(BinaryOperator::Modulo)),
        _ => return None,
    };
    Some(entry)
}

fn assignment_operator(kind: &TokenKind) -> Option<AssignmentOperator> {
    use AssignmentOperator::*;
    Some(match kind {
        TokenKind::Equal => Assign,
        TokenKind::PlusEqual => AddAssign,
        TokenKind::MinusEqual => SubtractAssign,
        TokenKind::StarEqual => MultiplyAssign,
        TokenKind::SlashEqual => DivideAssign,
        TokenKind::PercentEqual => ModuloAssign,
        TokenKind::StarStarEqual => ExponentAssign,
        TokenKind::LeftShiftEqual => LeftShiftAssign,
        TokenKind::RightShiftEqual => RightShiftAssign,
        TokenKind::UnsignedRightShiftEqual => UnsignedRightShiftAssign,
        TokenKind::AmpersandEqual => BitwiseAndAssign,
        TokenKind::PipeEqual => BitwiseOrAssign,
        TokenKind::CaretEqual => BitwiseXorAssign,
        TokenKind::AmpersandAmpersandEqual => AndAssign,
        TokenKind::PipePipeEqual => OrAssign,
        TokenKind::QuestionQuestionEqual => NullishAssign,
        _ => return None,
    })
}

fn unary_operator(kind: &TokenKind) -> Option<UnaryOperator> {
    Some(match kind {
        TokenKind::Minus => UnaryOperator::Minus,
        TokenKind::Plus => UnaryOperator::Plus,
        TokenKind::Bang => UnaryOperator::Not,
        TokenKind::Tilde => UnaryOperator::BitwiseNot,
        TokenKind::Typeof => UnaryOperator::Typeof,
        TokenKind::Void => UnaryOperator::Void,
        TokenKind::Delete => UnaryOperator::Delete,
        _ => return None,
    })
}

fn update_operator(kind: &TokenKind) -> Option<UpdateOperator> {
    match kind {
        TokenKind::PlusPlus => Some(UpdateOperator::Increment),
        TokenKind::MinusMinus => Some(UpdateOperator::Decrement),
        _ => None,
    }
}

/// True for `a.#x`, including inside an optional chain.
fn is_private_field_access(expr: &Expression) -> bool {
    match expr {
        Expression::Member(member) => matches!(*member.property, Expression::PrivateIdentifier(_)),
        Expression::Chain(chain) => is_private_field_access(&chain.expression),
        _ => false,
    }
}

fn is_identifier_named(expr: &Expression, name: &str) -> bool {
    matches!(expr, Expression::Identifier(id) if id.name == name)
}

impl<'a> Parser<'a> {
    /// Expression, including comma sequences.
    pub(super) fn parse_expression(
        &mut self,
        ctx: Context,
        mut cover: Option<&mut CoverGrammar>,
    ) -> Result<Expression> {
        let start = self.start();
        let first = self.parse_maybe_assign(ctx, cover.as_deref_mut())?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(&TokenKind::Comma)? {
            expressions.push(self.parse_maybe_assign(ctx, cover.as_deref_mut())?);
        }
        Ok(Expression::Sequence(SequenceExpression {
            span: self.finish(start),
            expressions,
        }))
    }

    /// AssignmentExpression: assignments, arrows, `yield` and everything
    /// tighter.
    pub(super) fn parse_maybe_assign(
        &mut self,
        ctx: Context,
        cover: Option<&mut CoverGrammar>,
    ) -> Result<Expression> {
        self.nested(|p| p.parse_maybe_assign_inner(ctx, cover))
    }

    fn parse_maybe_assign_inner(
        &mut self,
        ctx: Context,
        cover: Option<&mut CoverGrammar>,
    ) -> Result<Expression> {
        if ctx.is_generator() && self.is_contextual("yield") {
            return self.parse_yield(ctx);
        }

        let mut own = CoverGrammar::default();
        let owned = cover.is_none();
        let cover = match cover {
            Some(cover) => cover,
            None => &mut own,
        };
        let old_paren_assign = cover.parenthesized_assign.take();
        let old_trailing_comma = cover.trailing_comma.take();
        let old_double_proto = cover.double_proto;

        let start = self.start();
        if matches!(self.current.kind, TokenKind::LeftParen | TokenKind::Identifier(_)) {
            self.potential_arrow_at = Some(self.current.span.start);
        }
        let left = self.parse_maybe_conditional(ctx, cover)?;

        if let Some(operator) = assignment_operator(&self.current.kind) {
            let left_start = left.span().start;
            let target = if operator == AssignmentOperator::Assign {
                let target = self.to_assign_target(ctx, left, Some(&mut *cover))?;
                if !owned {
                    cover.parenthesized_assign = None;
                    cover.trailing_comma = None;
                    cover.double_proto = None;
                }
                if cover.shorthand_assign.is_some_and(|offset| offset >= left_start) {
                    cover.shorthand_assign = None;
                }
                self.check_pattern(ctx, &target, BindTarget::Assign, None)?;
                target
            } else {
                if !owned {
                    cover.parenthesized_assign = None;
                    cover.trailing_comma = None;
                    cover.double_proto = None;
                }
                self.check_simple_target(ctx, &left)?;
                self.to_pattern(ctx, left, TargetMode::Assign, None)?
            };
            self.advance()?;
            let right = self.parse_maybe_assign(ctx, None)?;
            if old_double_proto.is_some() {
                cover.double_proto = old_double_proto;
            }
            return Ok(Expression::Assignment(AssignmentExpression {
                span: self.finish(start),
                operator,
                left: Box::new(target),
                right: Box::new(right),
            }));
        } else if owned {
            self.check_expression_errors(cover)?;
        }

        if old_paren_assign.is_some() {
            cover.parenthesized_assign = old_paren_assign;
        }
        if old_trailing_comma.is_some() {
            cover.trailing_comma = old_trailing_comma;
        }
        Ok(left)
    }

    fn parse_maybe_conditional(&mut self, ctx: Context, cover: &mut CoverGrammar) -> Result<Expression> {
        let start = self.start();
        let test = self.parse_expr_ops(ctx, cover)?;
        if cover.has_expression_errors() {
            return Ok(test);
        }
        if test.span().start == start.offset && matches!(test, Expression::Arrow(_)) {
            return Ok(test);
        }
        if !self.eat(&TokenKind::Question)? {
            return Ok(test);
        }
        let consequent = self.parse_maybe_assign(ctx.without(Context::DISALLOW_IN), None)?;
        self.expect(&TokenKind::Colon)?;
        let alternate = self.parse_maybe_assign(ctx, None)?;
        Ok(Expression::Conditional(ConditionalExpression {
            span: self.finish(start),
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }))
    }

    fn parse_expr_ops(&mut self, ctx: Context, cover: &mut CoverGrammar) -> Result<Expression> {
        let start = self.start();
        let expr = self.parse_maybe_unary(ctx, Some(&mut *cover), false, false)?;
        if cover.has_expression_errors() {
            return Ok(expr);
        }
        if expr.span().start == start.offset && matches!(expr, Expression::Arrow(_)) {
            return Ok(expr);
        }
        self.parse_expr_op(ctx, expr, start, 0)
    }

    /// Precedence climbing over binary operators binding tighter than
    /// `min_prec`.
    fn parse_expr_op(&mut self, ctx: Context, left: Expression, start: Marker, min_prec: u8) -> Result<Expression> {
        let mut left = left;
        loop {
            let Some((prec, op)) = binary_operator(&self.current.kind) else {
                return Ok(left);
            };
            if prec <= min_prec || (ctx.contains(Context::DISALLOW_IN) && self.check(&TokenKind::In)) {
                return Ok(left);
            }
            let logical = matches!(op, BinaryOp::Logical(LogicalOperator::Or | LogicalOperator::And));
            let coalesce = matches!(op, BinaryOp::Logical(LogicalOperator::NullishCoalescing));
            // `??` binds its right operand like `&&` so mixing is detected.
            let right_prec = if coalesce { 2 } else { prec };

            if matches!(left, Expression::PrivateIdentifier(_))
                && !matches!(op, BinaryOp::Binary(BinaryOperator::In))
            {
                return Err(self.unexpected_at(left.span().start));
            }

            self.advance()?;
            let right_start = self.start();
            let operand = self.parse_maybe_unary(ctx, None, false, false)?;
            let right = self.parse_expr_op(ctx, operand, right_start, right_prec)?;
            if let Expression::PrivateIdentifier(name) = &right {
                return Err(self.unexpected_at(name.span.start));
            }

            let span = self.finish(start);
            left = match op {
                BinaryOp::Binary(operator) => Expression::Binary(BinaryExpression {
                    span,
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                }),
                BinaryOp::Logical(operator) => Expression::Logical(LogicalExpression {
                    span,
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                }),
            };

            let next_logical = matches!(self.current.kind, TokenKind::PipePipe | TokenKind::AmpersandAmpersand);
            if (logical && self.check(&TokenKind::QuestionQuestion)) || (coalesce && next_logical) {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    self.current.span.start,
                    "Logical expressions and coalesce expressions cannot be mixed. Wrap either by parentheses",
                ));
            }
        }
    }

    /// Unary operators, `await`, update expressions and `**`.
    fn parse_maybe_unary(
        &mut self,
        ctx: Context,
        cover: Option<&mut CoverGrammar>,
        saw_unary: bool,
        inc_dec: bool,
    ) -> Result<Expression> {
        self.nested(|p| p.parse_maybe_unary_inner(ctx, cover, saw_unary, inc_dec))
    }

    fn parse_maybe_unary_inner(
        &mut self,
        ctx: Context,
        mut cover: Option<&mut CoverGrammar>,
        saw_unary: bool,
        inc_dec: bool,
    ) -> Result<Expression> {
        let start = self.start();
        let mut saw_unary = saw_unary;
        let mut expr;

        if ctx.is_async() && self.is_contextual("await") {
            expr = self.parse_await(ctx)?;
            saw_unary = true;
        } else if let Some(operator) = update_operator(&self.current.kind) {
            self.advance()?;
            let argument = self.parse_maybe_unary(ctx, None, true, true)?;
            self.check_simple_target(ctx, &argument)?;
            expr = Expression::Update(UpdateExpression {
                span: self.finish(start),
                operator,
                prefix: true,
                argument: Box::new(argument),
            });
        } else if let Some(operator) = unary_operator(&self.current.kind) {
            self.advance()?;
            let argument = self.parse_maybe_unary(ctx, None, true, false)?;
            if operator == UnaryOperator::Delete {
                if ctx.is_strict() && matches!(argument, Expression::Identifier(_)) {
                    return Err(self.raise(
                        ErrorKind::StrictModeViolation,
                        start.offset,
                        "Deleting local variable in strict mode",
                    ));
                }
                if is_private_field_access(&argument) {
                    return Err(self.raise(ErrorKind::EarlyError, start.offset, "Private fields can not be deleted"));
                }
            }
            saw_unary = true;
            expr = Expression::Unary(UnaryExpression {
                span: self.finish(start),
                operator,
                prefix: true,
                argument: Box::new(argument),
            });
        } else if !saw_unary && matches!(self.current.kind, TokenKind::PrivateIdentifier(_)) {
            // `#x in obj`
            if ctx.contains(Context::DISALLOW_IN) || self.private_names.is_empty() {
                return Err(self.unexpected());
            }
            expr = Expression::PrivateIdentifier(self.parse_private_identifier()?);
            if !self.check(&TokenKind::In) {
                return Err(self.unexpected());
            }
        } else {
            expr = self.parse_expr_subscripts(ctx, cover.as_deref_mut())?;
            if cover.is_some_and(|cover| cover.has_expression_errors()) {
                return Ok(expr);
            }
            while let Some(operator) = update_operator(&self.current.kind) {
                if self.current.newline_before() {
                    break;
                }
                self.check_simple_target(ctx, &expr)?;
                self.advance()?;
                expr = Expression::Update(UpdateExpression {
                    span: self.finish(start),
                    operator,
                    prefix: false,
                    argument: Box::new(expr),
                });
            }
        }

        if !inc_dec && self.check(&TokenKind::StarStar) {
            if saw_unary {
                return Err(self.unexpected());
            }
            self.advance()?;
            let right = self.parse_maybe_unary(ctx, None, false, false)?;
            return Ok(Expression::Binary(BinaryExpression {
                span: self.finish(start),
                operator: BinaryOperator::Exponent,
                left: Box::new(expr),
                right: Box::new(right),
            }));
        }
        Ok(expr)
    }

    fn parse_await(&mut self, ctx: Context) -> Result<Expression> {
        if self.await_pos.is_none() {
            self.await_pos = Some(self.current.span.start);
        }
        let start = self.start();
        self.advance()?;
        let argument = self.parse_maybe_unary(ctx, None, true, false)?;
        Ok(Expression::Await(AwaitExpression {
            span: self.finish(start),
            argument: Box::new(argument),
        }))
    }

    fn parse_yield(&mut self, ctx: Context) -> Result<Expression> {
        if self.yield_pos.is_none() {
            self.yield_pos = Some(self.current.span.start);
        }
        let start = self.start();
        self.advance()?;
        let (argument, delegate) = if self.check(&TokenKind::Semicolon)
            || self.can_insert_semicolon()
            || (!self.check(&TokenKind::Star) && !self.starts_expression())
        {
            (None, false)
        } else {
            let delegate = self.eat(&TokenKind::Star)?;
            (Some(Box::new(self.parse_maybe_assign(ctx, None)?)), delegate)
        };
        Ok(Expression::Yield(YieldExpression {
            span: self.finish(start),
            argument,
            delegate,
        }))
    }

    /// An atom followed by its member accesses and calls.
    pub(super) fn parse_expr_subscripts(
        &mut self,
        ctx: Context,
        mut cover: Option<&mut CoverGrammar>,
    ) -> Result<Expression> {
        let start = self.start();
        let expr = self.parse_expr_atom(ctx, cover.as_deref_mut(), false)?;
        if matches!(expr, Expression::Arrow(_)) && !matches!(self.previous.kind, TokenKind::RightParen) {
            return Ok(expr);
        }
        let result = self.parse_subscripts(ctx, expr, start, false)?;
        if let (Some(cover), Expression::Member(member)) = (cover, &result) {
            let from = member.span.start;
            for slot in [
                &mut cover.parenthesized_assign,
                &mut cover.parenthesized_bind,
                &mut cover.trailing_comma,
            ] {
                if slot.is_some_and(|offset| offset >= from) {
                    *slot = None;
                }
            }
        }
        Ok(result)
    }

    /// Member accesses, calls, optional chains and tagged templates.
    ///
    /// `no_calls` is set for the callee of `new`.
    pub(super) fn parse_subscripts(
        &mut self,
        ctx: Context,
        base: Expression,
        start: Marker,
        no_calls: bool,
    ) -> Result<Expression> {
        let base_span = base.span();
        let maybe_async_arrow = is_identifier_named(&base, "async")
            && self.previous.span.end == base_span.end
            && !self.can_insert_semicolon()
            && base_span.len() == 5
            && self.potential_arrow_at == Some(base_span.start);
        let inner = ctx.without(Context::DISALLOW_IN);

        let mut base = base;
        let mut chained = false;
        loop {
            let optional = self.check(&TokenKind::QuestionDot);
            if optional {
                if no_calls {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        self.current.span.start,
                        "Optional chaining cannot appear in the callee of new expressions",
                    ));
                }
                self.advance()?;
                chained = true;
            }

            if self.eat(&TokenKind::LeftBracket)? {
                let property = self.parse_expression(inner, None)?;
                self.expect(&TokenKind::RightBracket)?;
                base = Expression::Member(MemberExpression {
                    span: self.finish(start),
                    object: Box::new(base),
                    property: Box::new(property),
                    computed: true,
                    optional,
                });
                continue;
            }

            let dotted = !optional && self.check(&TokenKind::Dot);
            if dotted
                || (optional
                    && !matches!(self.current.kind, TokenKind::LeftParen | TokenKind::Template { .. }))
            {
                if dotted {
                    self.advance()?;
                }
                let property = if let TokenKind::PrivateIdentifier(_) = self.current.kind {
                    if matches!(base, Expression::Super(_)) {
                        return Err(self.unexpected());
                    }
                    Expression::PrivateIdentifier(self.parse_private_identifier()?)
                } else {
                    Expression::Identifier(self.parse_identifier_name()?)
                };
                base = Expression::Member(MemberExpression {
                    span: self.finish(start),
                    object: Box::new(base),
                    property: Box::new(property),
                    computed: false,
                    optional,
                });
                continue;
            }

            if !no_calls && self.check(&TokenKind::LeftParen) {
                let async_head = maybe_async_arrow && matches!(base, Expression::Identifier(_));
                let old_yield = self.yield_pos.take();
                let old_await = self.await_pos.take();
                let old_await_ident = self.await_ident_pos.take();
                self.advance()?;
                let mut cover = CoverGrammar::default();
                let arguments = self.parse_expr_list(
                    ctx,
                    &TokenKind::RightParen,
                    true,
                    false,
                    if async_head { Some(&mut cover) } else { None },
                )?;

                if async_head
                    && !optional
                    && !chained
                    && !self.can_insert_semicolon()
                    && self.check(&TokenKind::Arrow)
                {
                    self.check_pattern_errors(&cover, false)?;
                    self.check_yield_await_in_default_params()?;
                    if let Some(offset) = self.await_ident_pos {
                        return Err(self.raise(
                            ErrorKind::EarlyError,
                            offset,
                            "Cannot use 'await' as identifier inside an async function",
                        ));
                    }
                    self.yield_pos = old_yield;
                    self.await_pos = old_await;
                    self.await_ident_pos = old_await_ident;
                    self.advance()?;
                    let arrow_ctx = ctx.arrow(true);
                    let params = self.to_pattern_list(arrow_ctx, arguments, TargetMode::Bind)?;
                    let params = params.into_iter().flatten().collect();
                    return self.parse_arrow_expression(ctx, start, params, true);
                }

                self.check_expression_errors(&cover)?;
                self.yield_pos = old_yield.or(self.yield_pos);
                self.await_pos = old_await.or(self.await_pos);
                self.await_ident_pos = old_await_ident.or(self.await_ident_pos);
                base = Expression::Call(CallExpression {
                    span: self.finish(start),
                    callee: Box::new(base),
                    arguments: arguments.into_iter().flatten().collect(),
                    optional,
                });
                continue;
            }

            if let TokenKind::Template { .. } = self.current.kind {
                if optional || chained {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        self.current.span.start,
                        "Optional chaining cannot appear in the tag of tagged template expressions",
                    ));
                }
                let quasi = self.parse_template(ctx, true)?;
                base = Expression::TaggedTemplate(TaggedTemplateExpression {
                    span: self.finish(start),
                    tag: Box::new(base),
                    quasi,
                });
                continue;
            }

            break;
        }

        if chained {
            base = Expression::Chain(ChainExpression {
                span: base.span(),
                expression: Box::new(base),
            });
        }
        Ok(base)
    }

    /// Comma separated expressions up to and including `close`. Holes are
    /// `None` and only allowed with `allow_empty`.
    pub(super) fn parse_expr_list(
        &mut self,
        ctx: Context,
        close: &TokenKind,
        allow_trailing_comma: bool,
        allow_empty: bool,
        mut cover: Option<&mut CoverGrammar>,
    ) -> Result<Vec<Option<ExpressionOrSpread>>> {
        let inner = ctx.without(Context::DISALLOW_IN);
        let mut elements = Vec::new();
        let mut first = true;
        while !self.eat(close)? {
            if first {
                first = false;
            } else {
                self.expect(&TokenKind::Comma)?;
                if allow_trailing_comma && self.eat(close)? {
                    break;
                }
            }

            if allow_empty && self.check(&TokenKind::Comma) {
                elements.push(None);
            } else if self.check(&TokenKind::Ellipsis) {
                let spread = self.parse_spread(inner, cover.as_deref_mut())?;
                if let Some(cover) = cover.as_deref_mut() {
                    if self.check(&TokenKind::Comma) && cover.trailing_comma.is_none() {
                        cover.trailing_comma = Some(self.current.span.start);
                    }
                }
                elements.push(Some(ExpressionOrSpread::Spread(spread)));
            } else {
                let element = self.parse_maybe_assign(inner, cover.as_deref_mut())?;
                elements.push(Some(ExpressionOrSpread::Expression(element)));
            }
        }
        Ok(elements)
    }

    fn parse_spread(&mut self, ctx: Context, cover: Option<&mut CoverGrammar>) -> Result<SpreadElement> {
        let start = self.start();
        self.advance()?;
        let argument = self.parse_maybe_assign(ctx, cover)?;
        Ok(SpreadElement {
            span: self.finish(start),
            argument: Box::new(argument),
        })
    }

    /// Primary expressions.
    fn parse_expr_atom(
        &mut self,
        ctx: Context,
        cover: Option<&mut CoverGrammar>,
        for_new: bool,
    ) -> Result<Expression> {
        let can_be_arrow = self.potential_arrow_at == Some(self.current.span.start);
        let start = self.start();

        match self.current.kind {
            TokenKind::Super => self.parse_super(ctx),
            TokenKind::This => {
                self.advance()?;
                Ok(Expression::This(ThisExpression {
                    span: self.finish(start),
                }))
            }
            TokenKind::Identifier(_) => self.parse_identifier_atom(ctx, start, can_be_arrow),
            TokenKind::Number(_)
            | TokenKind::BigInt(_)
            | TokenKind::String(_)
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null
            | TokenKind::RegExp { .. } => Ok(Expression::Literal(self.parse_literal(ctx)?)),
            TokenKind::Slash | TokenKind::SlashEqual => {
                self.rescan_regex()?;
                Ok(Expression::Literal(self.parse_literal(ctx)?))
            }
            TokenKind::LeftParen => {
                let offset = self.current.span.start;
                let expr = self.parse_paren_and_distinguish(ctx, can_be_arrow)?;
                if let Some(cover) = cover {
                    if cover.parenthesized_assign.is_none() && !Self::is_simple_target(&expr) {
                        cover.parenthesized_assign = Some(offset);
                    }
                    if cover.parenthesized_bind.is_none() {
                        cover.parenthesized_bind = Some(offset);
                    }
                }
                Ok(expr)
            }
            TokenKind::LeftBracket => {
                self.advance()?;
                let elements = self.parse_expr_list(ctx, &TokenKind::RightBracket, true, true, cover)?;
                Ok(Expression::Array(ArrayExpression {
                    span: self.finish(start),
                    elements,
                }))
            }
            TokenKind::LeftBrace => self.parse_object(ctx, cover),
            TokenKind::Function => {
                self.advance()?;
                Ok(Expression::Function(self.parse_function_expression(ctx, start, false)?))
            }
            TokenKind::Class => Ok(Expression::Class(
                self.parse_class(ctx, start, super::classes::ClassRole::Expression)?,
            )),
            TokenKind::New => self.parse_new(ctx),
            TokenKind::Template { .. } => Ok(Expression::Template(self.parse_template(ctx, false)?)),
            TokenKind::Import => self.parse_import_expression(ctx, for_new),
            _ => Err(self.unexpected()),
        }
    }

    /// An identifier, or the start of an arrow or async function that
    /// begins with one.
    fn parse_identifier_atom(&mut self, ctx: Context, start: Marker, can_be_arrow: bool) -> Result<Expression> {
        let contains_escape = self.current.is_escaped();
        let id = self.parse_identifier(ctx)?;

        if id.name == "async" && !contains_escape && !self.can_insert_semicolon() && self.check(&TokenKind::Function) {
            self.advance()?;
            return Ok(Expression::Function(self.parse_function_expression(ctx, start, true)?));
        }

        if can_be_arrow && !self.can_insert_semicolon() {
            if self.check(&TokenKind::Arrow) {
                self.advance()?;
                return self.parse_arrow_expression(ctx, start, vec![Pattern::Identifier(id)], false);
            }
            if id.name == "async" && !contains_escape && matches!(self.current.kind, TokenKind::Identifier(_)) {
                let param = self.parse_identifier(ctx)?;
                if param.name == "await" {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        param.span.start,
                        "Cannot use 'await' as identifier inside an async function",
                    ));
                }
                if self.can_insert_semicolon() || !self.check(&TokenKind::Arrow) {
                    return Err(self.unexpected());
                }
                self.advance()?;
                return self.parse_arrow_expression(ctx, start, vec![Pattern::Identifier(param)], true);
            }
        }
        Ok(Expression::Identifier(id))
    }

    /// A literal token, with the strict mode and web compatibility octal
    /// checks.
    pub(super) fn parse_literal(&mut self, ctx: Context) -> Result<Literal> {
        let token = self.current.clone();
        if ctx.is_strict() {
            if token.flags.contains(TokenFlags::LEGACY_OCTAL) {
                return Err(self.raise(
                    ErrorKind::StrictModeViolation,
                    token.span.start,
                    "Octal literals are not allowed in strict mode",
                ));
            }
            if token.flags.contains(TokenFlags::OCTAL_ESCAPE) {
                return Err(self.raise(
                    ErrorKind::StrictModeViolation,
                    token.span.start,
                    "Octal escape sequences are not allowed in strict mode",
                ));
            }
        } else if !self.options.web_compat() {
            if token.flags.contains(TokenFlags::LEGACY_OCTAL) {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    token.span.start,
                    "Legacy octal literals require web compatibility",
                ));
            }
            if token.flags.contains(TokenFlags::OCTAL_ESCAPE) {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    token.span.start,
                    "Legacy octal escape sequences require web compatibility",
                ));
            }
        }
        let value = match token.kind {
            TokenKind::Number(n) => LiteralValue::Number(n),
            TokenKind::BigInt(digits) => LiteralValue::BigInt(digits),
            TokenKind::String(s) => LiteralValue::String(s),
            TokenKind::True => LiteralValue::Boolean(true),
            TokenKind::False => LiteralValue::Boolean(false),
            TokenKind::Null => LiteralValue::Null,
            TokenKind::RegExp { pattern, flags } => LiteralValue::RegExp(RegExpLiteral { pattern, flags }),
            _ => return Err(self.unexpected()),
        };
        let span = self.token_span(&self.current);
        let raw = self.slice(token.span).to_string();
        self.advance()?;
        Ok(Literal { span, value, raw })
    }

    /// A template literal; `tagged` allows invalid escapes.
    pub(super) fn parse_template(&mut self, ctx: Context, tagged: bool) -> Result<TemplateLiteral> {
        let start = self.start();
        let inner = ctx.without(Context::DISALLOW_IN);
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        loop {
            let TokenKind::Template { cooked, raw, tail } = &self.current.kind else {
                return Err(self.unexpected());
            };
            let (cooked, raw, tail) = (cooked.clone(), raw.clone(), *tail);
            let token = &self.current;
            if cooked.is_none() && !tagged {
                return Err(self.raise(
                    ErrorKind::LexicalError,
                    token.span.start + 1,
                    "Bad escape sequence in untagged template literal",
                ));
            }
            // Elements exclude the delimiters: "`" or "}" before, "`" or "${" after.
            let closing = if tail { 1 } else { 2 };
            let mut span = Span::new(token.span.start + 1, token.span.end - closing);
            if self.options.track_source_locations {
                let mut loc = token.loc;
                loc.start.column += 1;
                loc.end.column = loc.end.column.saturating_sub(closing as u32);
                span.loc = Some(loc);
            }
            quasis.push(TemplateElement {
                span,
                value: TemplateValue { cooked, raw },
                tail,
            });
            self.advance()?;
            if tail {
                break;
            }
            expressions.push(self.parse_expression(inner, None)?);
            if !self.check(&TokenKind::RightBrace) {
                return Err(self.unexpected());
            }
            self.rescan_template()?;
        }
        Ok(TemplateLiteral {
            span: self.finish(start),
            quasis,
            expressions,
        })
    }

    /// `( ... )`: a parenthesized expression or arrow parameters.
    fn parse_paren_and_distinguish(&mut self, ctx: Context, can_be_arrow: bool) -> Result<Expression> {
        let start = self.start();
        self.advance()?;
        let inner = ctx.without(Context::DISALLOW_IN);
        let inner_start = self.start();

        let old_yield = self.yield_pos.take();
        let old_await = self.await_pos.take();
        let mut cover = CoverGrammar::default();
        let mut list = Vec::new();
        let mut rest: Option<Pattern> = None;
        let mut trailing_comma = false;
        let mut first = true;

        while !self.check(&TokenKind::RightParen) {
            if first {
                first = false;
            } else {
                self.expect(&TokenKind::Comma)?;
                if self.check(&TokenKind::RightParen) {
                    trailing_comma = true;
                    break;
                }
            }
            if self.check(&TokenKind::Ellipsis) {
                rest = Some(self.parse_binding_rest(inner)?);
                if self.check(&TokenKind::Comma) {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        self.current.span.start,
                        "Comma is not permitted after the rest element",
                    ));
                }
                break;
            }
            list.push(self.parse_maybe_assign(inner, Some(&mut cover))?);
        }
        let inner_end = (self.previous.span.end, self.previous.loc.end);
        self.expect(&TokenKind::RightParen)?;

        if can_be_arrow && !self.can_insert_semicolon() && self.check(&TokenKind::Arrow) {
            self.check_pattern_errors(&cover, false)?;
            self.check_yield_await_in_default_params()?;
            self.yield_pos = old_yield;
            self.await_pos = old_await;
            self.advance()?;
            let elements = list
                .into_iter()
                .map(|expr| Some(ExpressionOrSpread::Expression(expr)))
                .collect();
            let mut params: Vec<Pattern> = self
                .to_pattern_list(ctx.arrow(false), elements, TargetMode::Bind)?
                .into_iter()
                .flatten()
                .collect();
            params.extend(rest);
            return self.parse_arrow_expression(ctx, start, params, false);
        }

        if list.is_empty() || trailing_comma {
            return Err(self.unexpected_at(self.previous.span.start));
        }
        if let Some(rest) = rest {
            return Err(self.unexpected_at(rest.span().start));
        }
        self.check_expression_errors(&cover)?;
        self.yield_pos = old_yield.or(self.yield_pos);
        self.await_pos = old_await.or(self.await_pos);

        if list.len() > 1 {
            Ok(Expression::Sequence(SequenceExpression {
                span: self.span_to(inner_start, inner_end.0, inner_end.1),
                expressions: list,
            }))
        } else {
            Ok(list.remove(0))
        }
    }

    /// `new X(args)` or `new.target`.
    fn parse_new(&mut self, ctx: Context) -> Result<Expression> {
        self.nested(|p| p.parse_new_inner(ctx))
    }

    fn parse_new_inner(&mut self, ctx: Context) -> Result<Expression> {
        let start = self.start();
        let meta_span = self.token_span(&self.current);
        self.advance()?;

        if self.eat(&TokenKind::Dot)? {
            let escaped = self.current.is_escaped();
            let property = self.parse_identifier_name()?;
            if property.name != "target" {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    property.span.start,
                    "The only valid meta property for new is 'new.target'",
                ));
            }
            if escaped {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    property.span.start,
                    "'new.target' must not contain escaped characters",
                ));
            }
            if !ctx.contains(Context::ALLOW_NEW_TARGET) {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    start.offset,
                    "'new.target' can only be used in functions and class static block",
                ));
            }
            return Ok(Expression::MetaProperty(MetaProperty {
                span: self.finish(start),
                meta: Identifier {
                    span: meta_span,
                    name: "new".to_string(),
                },
                property,
            }));
        }

        let callee_start = self.start();
        let atom = self.parse_expr_atom(ctx, None, true)?;
        let callee = self.parse_subscripts(ctx, atom, callee_start, true)?;
        let arguments = if self.eat(&TokenKind::LeftParen)? {
            self.parse_expr_list(ctx, &TokenKind::RightParen, true, false, None)?
                .into_iter()
                .flatten()
                .collect()
        } else {
            Vec::new()
        };
        Ok(Expression::New(NewExpression {
            span: self.finish(start),
            callee: Box::new(callee),
            arguments,
        }))
    }

    fn parse_super(&mut self, ctx: Context) -> Result<Expression> {
        let start = self.start();
        self.advance()?;
        match self.current.kind {
            TokenKind::LeftParen => {
                if !ctx.contains(Context::ALLOW_SUPER_CALL) {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        start.offset,
                        "super() call outside constructor of a subclass",
                    ));
                }
            }
            TokenKind::Dot | TokenKind::LeftBracket => {
                if !ctx.contains(Context::ALLOW_SUPER_PROPERTY) {
                    return Err(self.raise(ErrorKind::EarlyError, start.offset, "'super' keyword outside a method"));
                }
            }
            _ => return Err(self.unexpected()),
        }
        Ok(Expression::Super(SuperExpression {
            span: self.finish(start),
        }))
    }

    /// `import(source[, options])` or `import.meta`.
    fn parse_import_expression(&mut self, ctx: Context, for_new: bool) -> Result<Expression> {
        let start = self.start();
        let meta_span = self.token_span(&self.current);
        self.advance()?;

        if self.check(&TokenKind::LeftParen) {
            if for_new {
                return Err(self.raise(ErrorKind::EarlyError, start.offset, "Cannot use new with import()"));
            }
            self.advance()?;
            let inner = ctx.without(Context::DISALLOW_IN);
            let source = self.parse_maybe_assign(inner, None)?;
            let mut options = None;
            if self.eat(&TokenKind::Comma)? && !self.check(&TokenKind::RightParen) {
                options = Some(Box::new(self.parse_maybe_assign(inner, None)?));
                self.eat(&TokenKind::Comma)?;
            }
            self.expect(&TokenKind::RightParen)?;
            return Ok(Expression::Import(ImportExpression {
                span: self.finish(start),
                source: Box::new(source),
                options,
            }));
        }

        if self.eat(&TokenKind::Dot)? {
            let escaped = self.current.is_escaped();
            let property = self.parse_identifier_name()?;
            if property.name != "meta" {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    property.span.start,
                    "The only valid meta property for import is 'import.meta'",
                ));
            }
            if escaped {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    property.span.start,
                    "'import.meta' must not contain escaped characters",
                ));
            }
            if !ctx.is_module() {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    start.offset,
                    "Cannot use 'import.meta' outside a module",
                ));
            }
            return Ok(Expression::MetaProperty(MetaProperty {
                span: self.finish(start),
                meta: Identifier {
                    span: meta_span,
                    name: "import".to_string(),
                },
                property,
            }));
        }
        Err(self.unexpected())
    }

    /// `#name`, recorded for the enclosing class body's declaration check.
    pub(super) fn parse_private_identifier(&mut self) -> Result<PrivateIdentifier> {
        let TokenKind::PrivateIdentifier(name) = &self.current.kind else {
            return Err(self.unexpected());
        };
        let name = name.clone();
        let span = self.token_span(&self.current);
        let Some(scope) = self.private_names.last_mut() else {
            return Err(self.raise(
                ErrorKind::EarlyError,
                span.start,
                format!("Private field '#{}' must be declared in an enclosing class", name),
            ));
        };
        scope.used.push((name.clone(), span.start));
        self.bump()?;
        Ok(PrivateIdentifier { span, name })
    }

    // =====================================================================
    // Object literals
    // =====================================================================

    fn parse_object(&mut self, ctx: Context, mut cover: Option<&mut CoverGrammar>) -> Result<Expression> {
        let start = self.start();
        self.advance()?;
        let mut properties = Vec::new();
        let mut has_proto = false;
        let mut first = true;

        while !self.eat(&TokenKind::RightBrace)? {
            if !first {
                self.expect(&TokenKind::Comma)?;
                if self.eat(&TokenKind::RightBrace)? {
                    break;
                }
            }
            first = false;

            if self.check(&TokenKind::Ellipsis) {
                let spread = self.parse_spread(ctx.without(Context::DISALLOW_IN), cover.as_deref_mut())?;
                if let Some(cover) = cover.as_deref_mut() {
                    if self.check(&TokenKind::Comma) && cover.trailing_comma.is_none() {
                        cover.trailing_comma = Some(self.current.span.start);
                    }
                }
                properties.push(ObjectMember::Spread(spread));
                continue;
            }

            let prop = self.parse_property(ctx, cover.as_deref_mut())?;
            if !prop.computed && !prop.shorthand && !prop.method && prop.kind == PropertyKind::Init {
                let is_proto = match prop.key.as_ref() {
                    Expression::Identifier(id) => id.name == "__proto__",
                    Expression::Literal(lit) => lit.as_str() == Some("__proto__"),
                    _ => false,
                };
                if is_proto {
                    if has_proto {
                        let offset = prop.key.span().start;
                        match cover.as_deref_mut() {
                            Some(cover) => {
                                if cover.double_proto.is_none() {
                                    cover.double_proto = Some(offset);
                                }
                            }
                            None => {
                                return Err(self.raise(
                                    ErrorKind::EarlyError,
                                    offset,
                                    "Redefinition of __proto__ property",
                                ));
                            }
                        }
                    }
                    has_proto = true;
                }
            }
            properties.push(ObjectMember::Property(prop));
        }
        Ok(Expression::Object(ObjectExpression {
            span: self.finish(start),
            properties,
        }))
    }

    /// Property key: identifier name, string, number or `[computed]`.
    pub(super) fn parse_property_name(&mut self, ctx: Context) -> Result<(Expression, bool)> {
        if self.eat(&TokenKind::LeftBracket)? {
            let key = self.parse_maybe_assign(ctx.without(Context::DISALLOW_IN), None)?;
            self.expect(&TokenKind::RightBracket)?;
            return Ok((key, true));
        }
        let key = match self.current.kind {
            TokenKind::Number(_) | TokenKind::String(_) | TokenKind::BigInt(_) => {
                Expression::Literal(self.parse_literal(ctx)?)
            }
            _ => Expression::Identifier(self.parse_identifier_name()?),
        };
        Ok((key, false))
    }

    /// True if the token after `async` or `get`/`set` continues a method
    /// definition on the same line.
    fn starts_property_name(&self) -> bool {
        (matches!(
            self.current.kind,
            TokenKind::Identifier(_)
                | TokenKind::Number(_)
                | TokenKind::String(_)
                | TokenKind::BigInt(_)
                | TokenKind::LeftBracket
                | TokenKind::Star
        ) || self.current.kind.is_keyword())
            && !self.current.newline_before()
    }

    fn parse_property(&mut self, ctx: Context, cover: Option<&mut CoverGrammar>) -> Result<Property> {
        let start = self.start();
        let contains_escape = self.current.is_escaped();
        let mut is_generator = self.eat(&TokenKind::Star)?;
        let (mut key, mut computed) = self.parse_property_name(ctx)?;
        let mut is_async = false;

        if !contains_escape && !is_generator && !computed && is_identifier_named(&key, "async") && self.starts_property_name() {
            is_async = true;
            is_generator = self.eat(&TokenKind::Star)?;
            (key, computed) = self.parse_property_name(ctx)?;
        }

        if (is_generator || is_async) && self.check(&TokenKind::Colon) {
            return Err(self.unexpected());
        }

        let mut kind = PropertyKind::Init;
        let mut method = false;
        let mut shorthand = false;
        let value = if self.eat(&TokenKind::Colon)? {
            self.parse_maybe_assign(ctx.without(Context::DISALLOW_IN), cover)?
        } else if self.check(&TokenKind::LeftParen) {
            method = true;
            let func = self.parse_method(ctx, is_async, is_generator, false)?;
            Expression::Function(func)
        } else if !contains_escape
            && !computed
            && (is_identifier_named(&key, "get") || is_identifier_named(&key, "set"))
            && !matches!(
                self.current.kind,
                TokenKind::Comma | TokenKind::RightBrace | TokenKind::Equal
            )
        {
            if is_generator || is_async {
                return Err(self.unexpected());
            }
            kind = if is_identifier_named(&key, "get") {
                PropertyKind::Get
            } else {
                PropertyKind::Set
            };
            (key, computed) = self.parse_property_name(ctx)?;
            let func = self.parse_method(ctx, false, false, false)?;
            self.check_accessor_params(kind, &func)?;
            Expression::Function(func)
        } else if let (Expression::Identifier(id), false) = (&key, computed) {
            if is_generator || is_async {
                return Err(self.unexpected());
            }
            self.check_unreserved(ctx, &id.name, id.span.start)?;
            shorthand = true;
            match cover {
                Some(cover) if self.check(&TokenKind::Equal) => {
                    if cover.shorthand_assign.is_none() {
                        cover.shorthand_assign = Some(self.current.span.start);
                    }
                    self.advance()?;
                    let right = self.parse_maybe_assign(ctx.without(Context::DISALLOW_IN), None)?;
                    Expression::Assignment(AssignmentExpression {
                        span: self.finish(start),
                        operator: AssignmentOperator::Assign,
                        left: Box::new(Pattern::Identifier(id.clone())),
                        right: Box::new(right),
                    })
                }
                _ => Expression::Identifier(id.clone()),
            }
        } else {
            return Err(self.unexpected());
        };

        Ok(Property {
            span: self.finish(start),
            key: Box::new(key),
            value: Box::new(value),
            kind,
            method,
            shorthand,
            computed,
        })
    }

    /// Getters take no parameters; setters take exactly one, not a rest.
    pub(super) fn check_accessor_params(&self, kind: PropertyKind, func: &Function) -> Result<()> {
        let offset = func.span.start;
        match kind {
            PropertyKind::Get if !func.params.is_empty() => {
                Err(self.raise(ErrorKind::EarlyError, offset, "getter should have no params"))
            }
            PropertyKind::Set if func.params.len() != 1 => {
                Err(self.raise(ErrorKind::EarlyError, offset, "setter should have exactly one param"))
            }
            PropertyKind::Set if matches!(func.params[0], Pattern::Rest(_)) => {
                Err(self.raise(ErrorKind::EarlyError, offset, "Setter cannot use rest params"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::{Error, ErrorKind};
    use crate::options::ParseOptions;
    use crate::parser::Parser;

    fn parse_ok(src: &str) -> Program {
        let mut parser = Parser::new(src);
        parser.parse_program().expect("Should parse")
    }

    fn parse_err(src: &str) -> Error {
        let mut parser = Parser::new(src);
        parser.parse_program().unwrap_err()
    }

    fn expr(src: &str) -> Expression {
        match parse_ok(src).body.into_iter().next() {
            Some(Statement::Expression(stmt)) => stmt.expression,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    fn binary(e: &Expression) -> (&Expression, BinaryOperator, &Expression) {
        match e {
            Expression::Binary(b) => (&b.left, b.operator, &b.right),
            other => panic!("expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_multiplicative_over_additive() {
        let e = expr("1 + 2 * 3;");
        let (left, op, right) = binary(&e);
        assert_eq!(op, BinaryOperator::Add);
        assert!(matches!(left, Expression::Literal(_)));
        assert_eq!(binary(right).1, BinaryOperator::Multiply);
    }

    #[test]
    fn test_left_associativity() {
        let e = expr("a - b - c;");
        let (left, op, _) = binary(&e);
        assert_eq!(op, BinaryOperator::Subtract);
        assert_eq!(binary(left).1, BinaryOperator::Subtract);
    }

    #[test]
    fn test_exponent_right_associative() {
        let e = expr("a ** b ** c;");
        let (left, op, right) = binary(&e);
        assert_eq!(op, BinaryOperator::Exponent);
        assert!(matches!(left, Expression::Identifier(_)));
        assert_eq!(binary(right).1, BinaryOperator::Exponent);
    }

    #[test]
    fn test_exponent_unary_operand() {
        assert_eq!(parse_err("-a ** 2;").kind(), Some(ErrorKind::UnexpectedToken));
        parse_ok("(-a) ** 2;");
        parse_ok("++a ** 2;");
        parse_ok("a++ ** 2;");
    }

    #[test]
    fn test_logical_and_coalesce() {
        match expr("a || b && c;") {
            Expression::Logical(l) => {
                assert_eq!(l.operator, LogicalOperator::Or);
                assert!(matches!(*l.right, Expression::Logical(_)));
            }
            other => panic!("expected logical, got {:?}", other),
        }
        parse_ok("a ?? b ?? c;");
        parse_ok("(a || b) ?? c;");
        assert!(Parser::new("a ?? b || c;").parse_program().is_err());
        assert!(Parser::new("a || b ?? c;").parse_program().is_err());
        assert!(Parser::new("a && b ?? c;").parse_program().is_err());
    }

    #[test]
    fn test_conditional() {
        match expr("a ? b : c ? d : e;") {
            Expression::Conditional(c) => assert!(matches!(*c.alternate, Expression::Conditional(_))),
            other => panic!("expected conditional, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_operators() {
        match expr("a += 1;") {
            Expression::Assignment(a) => assert_eq!(a.operator, AssignmentOperator::AddAssign),
            other => panic!("expected assignment, got {:?}", other),
        }
        match expr("a = b = c;") {
            Expression::Assignment(a) => assert!(matches!(*a.right, Expression::Assignment(_))),
            other => panic!("expected assignment, got {:?}", other),
        }
        parse_ok("a.b ??= c;");
        assert_eq!(parse_err("[a] += 1;").kind(), Some(ErrorKind::InvalidTarget));
        assert_eq!(parse_err("1 = 2;").kind(), Some(ErrorKind::InvalidTarget));
    }

    #[test]
    fn test_update_expressions() {
        match expr("a++;") {
            Expression::Update(u) => assert!(!u.prefix),
            other => panic!("expected update, got {:?}", other),
        }
        match expr("--a.b;") {
            Expression::Update(u) => assert!(u.prefix),
            other => panic!("expected update, got {:?}", other),
        }
        assert_eq!(parse_err("a() ++;").kind(), Some(ErrorKind::InvalidTarget));
        assert_eq!(parse_err("++a();").kind(), Some(ErrorKind::InvalidTarget));
        // no postfix across a line break
        assert_eq!(parse_ok("a\n++b").body.len(), 2);
        assert_eq!(
            parse_err("'use strict'; eval++;").kind(),
            Some(ErrorKind::StrictModeViolation)
        );
    }

    #[test]
    fn test_unary_and_delete() {
        match expr("typeof a;") {
            Expression::Unary(u) => assert_eq!(u.operator, UnaryOperator::Typeof),
            other => panic!("expected unary, got {:?}", other),
        }
        parse_ok("delete a;");
        parse_ok("'use strict'; delete a.b;");
        assert_eq!(
            parse_err("'use strict'; delete a;").kind(),
            Some(ErrorKind::StrictModeViolation)
        );
    }

    #[test]
    fn test_in_operator_and_for_head() {
        assert_eq!(binary(&expr("a in b;")).1, BinaryOperator::In);
        parse_ok("for (var i = (a in b); ;) break;");
        parse_ok("for (var i = [a in b]; ;) break;");
    }

    #[test]
    fn test_member_and_call_chains() {
        match expr("a.b[c](d).e;") {
            Expression::Member(m) => {
                assert!(!m.computed);
                assert!(matches!(*m.object, Expression::Call(_)));
            }
            other => panic!("expected member, got {:?}", other),
        }
        match expr("a.if;") {
            Expression::Member(m) => assert!(matches!(&*m.property, Expression::Identifier(id) if id.name == "if")),
            other => panic!("expected member, got {:?}", other),
        }
    }

    #[test]
    fn test_optional_chain() {
        match expr("a?.b.c();") {
            Expression::Chain(chain) => match *chain.expression {
                Expression::Call(call) => match *call.callee {
                    Expression::Member(m) => match *m.object {
                        Expression::Member(inner) => assert!(inner.optional),
                        other => panic!("expected member, got {:?}", other),
                    },
                    other => panic!("expected member, got {:?}", other),
                },
                other => panic!("expected call, got {:?}", other),
            },
            other => panic!("expected chain, got {:?}", other),
        }
        assert!(matches!(expr("a?.[0];"), Expression::Chain(_)));
        assert!(matches!(expr("a?.(1);"), Expression::Chain(_)));
        assert!(Parser::new("a?.b`t`;").parse_program().is_err());
        assert!(Parser::new("new a?.b();").parse_program().is_err());
    }

    #[test]
    fn test_new_expression() {
        match expr("new Foo(1, 2);") {
            Expression::New(n) => assert_eq!(n.arguments.len(), 2),
            other => panic!("expected new, got {:?}", other),
        }
        match expr("new a.b.C;") {
            Expression::New(n) => assert!(matches!(*n.callee, Expression::Member(_))),
            other => panic!("expected new, got {:?}", other),
        }
        match expr("new Foo().bar;") {
            Expression::Member(m) => assert!(matches!(*m.object, Expression::New(_))),
            other => panic!("expected member, got {:?}", other),
        }
    }

    #[test]
    fn test_new_target() {
        parse_ok("function f() { new.target; }");
        parse_ok("function f() { () => new.target; }");
        assert_eq!(parse_err("new.target;").kind(), Some(ErrorKind::EarlyError));
        assert!(Parser::new("function f() { new.foo; }").parse_program().is_err());
    }

    #[test]
    fn test_import_meta_and_dynamic_import() {
        let module = ParseOptions::module();
        assert!(Parser::with_options("import.meta.url;", module).parse_program().is_ok());
        assert_eq!(parse_err("import.meta;").kind(), Some(ErrorKind::EarlyError));
        match expr("import('a', { with: {} });") {
            Expression::Import(i) => assert!(i.options.is_some()),
            other => panic!("expected import, got {:?}", other),
        }
        assert!(Parser::new("new import('a');").parse_program().is_err());
    }

    #[test]
    fn test_super_outside_method() {
        assert_eq!(parse_err("super.a;").kind(), Some(ErrorKind::EarlyError));
        assert_eq!(parse_err("function f() { super(); }").kind(), Some(ErrorKind::EarlyError));
        parse_ok("({ m() { return super.x; } });");
    }

    #[test]
    fn test_sequence_and_parens() {
        match expr("(a, b);") {
            Expression::Sequence(s) => {
                assert_eq!(s.expressions.len(), 2);
                assert_eq!(s.span, Span::new(1, 5));
            }
            other => panic!("expected sequence, got {:?}", other),
        }
        assert!(Parser::new("();").parse_program().is_err());
        assert!(Parser::new("(a,);").parse_program().is_err());
        assert!(Parser::new("(...a);").parse_program().is_err());
    }

    #[test]
    fn test_array_literal_holes() {
        match expr("[1, , 3,];") {
            Expression::Array(a) => {
                assert_eq!(a.elements.len(), 3);
                assert!(a.elements[1].is_none());
            }
            other => panic!("expected array, got {:?}", other),
        }
        match expr("[...a, b];") {
            Expression::Array(a) => assert!(matches!(a.elements[0], Some(ExpressionOrSpread::Spread(_)))),
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_object_literal_forms() {
        match expr("({ a, b: 1, [c]: 2, d() {}, get e() { return 1; }, set e(v) {}, async f() {}, *g() {}, async *h() {}, ...i });") {
            Expression::Object(o) => {
                assert_eq!(o.properties.len(), 10);
                let kinds: Vec<_> = o
                    .properties
                    .iter()
                    .filter_map(|p| match p {
                        ObjectMember::Property(p) => Some((p.kind, p.method, p.shorthand, p.computed)),
                        ObjectMember::Spread(_) => None,
                    })
                    .collect();
                assert_eq!(kinds[0], (PropertyKind::Init, false, true, false));
                assert_eq!(kinds[2], (PropertyKind::Init, false, false, true));
                assert_eq!(kinds[3], (PropertyKind::Init, true, false, false));
                assert_eq!(kinds[4].0, PropertyKind::Get);
                assert_eq!(kinds[5].0, PropertyKind::Set);
            }
            other => panic!("expected object, got {:?}", other),
        }
        // contextual names as plain keys
        parse_ok("({ get: 1, set: 2, async: 3, get() {}, async() {} });");
    }

    #[test]
    fn test_accessor_parameter_counts() {
        assert!(Parser::new("({ get a(x) {} });").parse_program().is_err());
        assert!(Parser::new("({ set a() {} });").parse_program().is_err());
        assert!(Parser::new("({ set a(...v) {} });").parse_program().is_err());
    }

    #[test]
    fn test_duplicate_proto() {
        assert_eq!(
            parse_err("({ __proto__: 1, '__proto__': 2 });").kind(),
            Some(ErrorKind::EarlyError)
        );
        parse_ok("({ __proto__: 1, __proto__ });");
        parse_ok("({ __proto__: a, __proto__: b } = c);");
    }

    #[test]
    fn test_templates() {
        match expr("`a${b}c${d}e`;") {
            Expression::Template(t) => {
                assert_eq!(t.quasis.len(), 3);
                assert_eq!(t.expressions.len(), 2);
                assert_eq!(t.quasis[0].span, Span::new(1, 2));
                assert_eq!(t.quasis[1].span, Span::new(6, 7));
                assert!(t.quasis[2].tail);
                assert_eq!(t.quasis[2].value.cooked.as_deref(), Some("e"));
            }
            other => panic!("expected template, got {:?}", other),
        }
        match expr("tag`\\u{`;") {
            Expression::TaggedTemplate(t) => assert!(t.quasi.quasis[0].value.cooked.is_none()),
            other => panic!("expected tagged template, got {:?}", other),
        }
        assert_eq!(parse_err("`\\u{`;").kind(), Some(ErrorKind::LexicalError));
    }

    #[test]
    fn test_regex_in_expression_position() {
        match expr("x = /ab+c/gi;") {
            Expression::Assignment(a) => match *a.right {
                Expression::Literal(Literal {
                    value: LiteralValue::RegExp(re),
                    ..
                }) => {
                    assert_eq!(re.pattern, "ab+c");
                    assert_eq!(re.flags, "gi");
                }
                other => panic!("expected regex, got {:?}", other),
            },
            other => panic!("expected assignment, got {:?}", other),
        }
        assert_eq!(binary(&expr("a / b / c;")).1, BinaryOperator::Divide);
    }

    #[test]
    fn test_literal_values() {
        let values: Vec<_> = ["1.5;", "'s';", "true;", "null;", "10n;"]
            .iter()
            .map(|src| match expr(src) {
                Expression::Literal(lit) => lit.value,
                other => panic!("expected literal, got {:?}", other),
            })
            .collect();
        assert_eq!(values[0], LiteralValue::Number(1.5));
        assert_eq!(values[1], LiteralValue::String("s".into()));
        assert_eq!(values[2], LiteralValue::Boolean(true));
        assert_eq!(values[3], LiteralValue::Null);
        assert_eq!(values[4], LiteralValue::BigInt("10".into()));
    }

    #[test]
    fn test_strict_octal_literals() {
        parse_ok("010;");
        assert_eq!(parse_err("'use strict'; 010;").kind(), Some(ErrorKind::StrictModeViolation));
        assert_eq!(parse_err("'use strict'; '\\07';").kind(), Some(ErrorKind::StrictModeViolation));
    }

    #[test]
    fn test_octal_literals_without_web_compat() {
        let options = ParseOptions::default().with_web_compat_disabled(true);
        let kind_of = |src: &str| Parser::with_options(src, options).parse_program().unwrap_err().kind();
        assert_eq!(kind_of("010;"), Some(ErrorKind::EarlyError));
        assert_eq!(kind_of("08;"), Some(ErrorKind::EarlyError));
        assert_eq!(kind_of("'\\01';"), Some(ErrorKind::EarlyError));
        assert_eq!(kind_of("x = '\\8';"), Some(ErrorKind::EarlyError));
        assert!(Parser::with_options("0o10; 0; '\\0'; 1.5;", options).parse_program().is_ok());
    }

    #[test]
    fn test_arrow_is_not_a_conditional_test() {
        assert!(Parser::new("x = () => {} ? 1 : 2;").parse_program().is_err());
        assert!(Parser::new("async () => {} ? 1 : 2;").parse_program().is_err());
        parse_ok("x = (() => {}) ? 1 : 2;");
        parse_ok("x = a ? () => {} : () => 1;");
        parse_ok("x = () => a ? 1 : 2;");
    }

    #[test]
    fn test_yield_and_await_as_identifiers() {
        parse_ok("var yield = 1; yield + 1;");
        parse_ok("var await = 1; await + 1;");
        assert!(Parser::new("function* g() { var yield; }").parse_program().is_err());
        assert!(Parser::new("async function f() { var await; }").parse_program().is_err());
        assert!(Parser::with_options("var await;", ParseOptions::module()).parse_program().is_err());
    }

    #[test]
    fn test_yield_expressions() {
        let program = parse_ok("function* g() { yield; yield a; yield* b; }");
        let Statement::FunctionDeclaration(func) = &program.body[0] else {
            panic!("expected function");
        };
        let yields: Vec<_> = func
            .body
            .body
            .iter()
            .map(|s| match s {
                Statement::Expression(ExpressionStatement {
                    expression: Expression::Yield(y),
                    ..
                }) => (y.argument.is_some(), y.delegate),
                other => panic!("expected yield, got {:?}", other),
            })
            .collect();
        assert_eq!(yields, vec![(false, false), (true, false), (true, true)]);
    }

    #[test]
    fn test_await_precedence() {
        let program = parse_ok("async function f(){ let y = await x * x; }");
        let Statement::FunctionDeclaration(func) = &program.body[0] else {
            panic!("expected function");
        };
        assert!(func.is_async);
        let Statement::VariableDeclaration(decl) = &func.body.body[0] else {
            panic!("expected declaration");
        };
        let init = decl.declarations[0].init.as_ref().unwrap();
        let (left, op, _) = binary(init);
        assert_eq!(op, BinaryOperator::Multiply);
        assert!(matches!(left, Expression::Await(_)));
    }

    #[test]
    fn test_top_level_await_in_modules() {
        let module = ParseOptions::module();
        assert!(Parser::with_options("await x;", module).parse_program().is_ok());
        assert!(Parser::with_options("function f() { await x; }", module).parse_program().is_err());
    }

    #[test]
    fn test_expression_spans() {
        let e = expr("  a + b * c;");
        assert_eq!(e.span(), Span::new(2, 11));
        let (_, _, right) = binary(&e);
        assert_eq!(right.span(), Span::new(6, 11));
    }
}
