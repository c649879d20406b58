//! Class declarations and expressions.

use super::context::Context;
use super::parser::{Marker, Parser, PrivateNameScope, PrivateSlot};
use super::patterns::BindTarget;
use super::scope::{BindingKind, ScopeFlags};
use super::statements::StatementSlot;
use crate::ast::*;
use crate::error::{ErrorKind, Result};
use crate::lexer::TokenKind;

/// Where a `class` keyword was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ClassRole {
    /// `class A {}` in a statement list: the name is required and bound
    Declaration,
    /// `export default class {}`: the name is optional
    DefaultExport,
    /// A class expression
    Expression,
}

/// True if a non-computed key spells `name`.
fn is_key_named(key: &Expression, computed: bool, name: &str) -> bool {
    if computed {
        return false;
    }
    match key {
        Expression::Identifier(id) => id.name == name,
        Expression::Literal(lit) => lit.as_str() == Some(name),
        _ => false,
    }
}

impl<'a> Parser<'a> {
    /// Parses a class; the current token is `class`.
    pub(super) fn parse_class(&mut self, ctx: Context, start: Marker, role: ClassRole) -> Result<Class> {
        self.advance()?;
        let class_ctx = ctx.class_body();

        let id = if matches!(self.current.kind, TokenKind::Identifier(_)) {
            let id = self.parse_identifier(class_ctx)?;
            if role != ClassRole::Expression {
                let target = BindTarget::Declare(BindingKind::Lexical);
                self.check_pattern(class_ctx, &Pattern::Identifier(id.clone()), target, None)?;
            }
            Some(id)
        } else if role == ClassRole::Declaration {
            return Err(self.unexpected());
        } else {
            None
        };

        let super_class = if self.eat(&TokenKind::Extends)? {
            let heritage = self.nested(|p| p.parse_expr_subscripts(class_ctx, None))?;
            Some(Box::new(heritage))
        } else {
            None
        };

        self.private_names.push(PrivateNameScope::default());
        let body = self.parse_class_body(class_ctx, super_class.is_some());
        let scope = self.private_names.pop().unwrap_or_default();
        let body = body?;
        self.resolve_private_names(scope)?;

        Ok(Class {
            span: self.finish(start),
            id,
            super_class,
            body,
        })
    }

    /// Hands unresolved private names to the enclosing class, or rejects
    /// them at the outermost class.
    fn resolve_private_names(&mut self, scope: PrivateNameScope) -> Result<()> {
        for (name, offset) in scope.used {
            if scope.declared.contains_key(&name) {
                continue;
            }
            match self.private_names.last_mut() {
                Some(parent) => parent.used.push((name, offset)),
                None => {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        offset,
                        format!("Private field '#{}' must be declared in an enclosing class", name),
                    ));
                }
            }
        }
        Ok(())
    }

    fn parse_class_body(&mut self, ctx: Context, derived: bool) -> Result<ClassBody> {
        let start = self.start();
        self.expect(&TokenKind::LeftBrace)?;
        let mut body = Vec::new();
        let mut had_constructor = false;

        while !self.eat(&TokenKind::RightBrace)? {
            if self.eat(&TokenKind::Semicolon)? {
                continue;
            }
            let element = self.parse_class_element(ctx, derived)?;
            match &element {
                ClassElement::Method(method) if method.kind == MethodKind::Constructor => {
                    if had_constructor {
                        return Err(self.raise(
                            ErrorKind::EarlyError,
                            method.span.start,
                            "Duplicate constructor in the same class",
                        ));
                    }
                    had_constructor = true;
                }
                ClassElement::Method(method) => {
                    let slot = match method.kind {
                        MethodKind::Get => PrivateSlot::Getter { is_static: method.is_static },
                        MethodKind::Set => PrivateSlot::Setter { is_static: method.is_static },
                        _ => PrivateSlot::Member,
                    };
                    self.declare_private_name(&method.key, slot)?;
                }
                ClassElement::Property(field) => self.declare_private_name(&field.key, PrivateSlot::Member)?,
                ClassElement::StaticBlock(_) => {}
            }
            body.push(element);
        }

        Ok(ClassBody {
            span: self.finish(start),
            body,
        })
    }

    /// Records a private member; a getter and a setter of the same
    /// staticness may share a name.
    fn declare_private_name(&mut self, key: &Expression, slot: PrivateSlot) -> Result<()> {
        let Expression::PrivateIdentifier(private) = key else {
            return Ok(());
        };
        let Some(scope) = self.private_names.last_mut() else {
            return Ok(());
        };
        let conflict = match scope.declared.get(&private.name).copied() {
            None => {
                scope.declared.insert(private.name.clone(), slot);
                false
            }
            Some(PrivateSlot::Getter { is_static: a }) if slot == (PrivateSlot::Setter { is_static: a }) => {
                scope.declared.insert(private.name.clone(), PrivateSlot::Member);
                false
            }
            Some(PrivateSlot::Setter { is_static: a }) if slot == (PrivateSlot::Getter { is_static: a }) => {
                scope.declared.insert(private.name.clone(), PrivateSlot::Member);
                false
            }
            Some(_) => true,
        };
        if conflict {
            return Err(self.raise(
                ErrorKind::DuplicateBinding,
                private.span.start,
                format!("Identifier '#{}' has already been declared", private.name),
            ));
        }
        Ok(())
    }

    /// True if the current token can start a class element name.
    fn starts_class_element_name(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Identifier(_)
                | TokenKind::PrivateIdentifier(_)
                | TokenKind::Number(_)
                | TokenKind::BigInt(_)
                | TokenKind::String(_)
                | TokenKind::LeftBracket
        ) || self.current.kind.is_keyword()
    }

    /// Consumes a contextual modifier and returns it as an identifier.
    fn modifier_as_key(&mut self, name: &str) -> Result<Identifier> {
        let span = self.token_span(&self.current);
        self.advance()?;
        Ok(Identifier {
            span,
            name: name.to_string(),
        })
    }

    fn parse_class_element(&mut self, ctx: Context, derived: bool) -> Result<ClassElement> {
        let start = self.start();
        // A modifier followed by something that cannot be a name is itself
        // the name: `static() {}`, `async = 1`, `get;`.
        let mut key_name: Option<Identifier> = None;
        let mut is_static = false;
        let mut is_async = false;
        let mut generator = false;
        let mut kind = MethodKind::Method;

        if self.is_contextual("static") {
            let modifier = self.modifier_as_key("static")?;
            if self.eat(&TokenKind::LeftBrace)? {
                return self.parse_static_block(ctx, start);
            }
            if self.starts_class_element_name() || self.check(&TokenKind::Star) {
                is_static = true;
            } else {
                key_name = Some(modifier);
            }
        }

        if key_name.is_none() && self.is_contextual("async") {
            let modifier = self.modifier_as_key("async")?;
            if (self.starts_class_element_name() || self.check(&TokenKind::Star)) && !self.can_insert_semicolon() {
                is_async = true;
            } else {
                key_name = Some(modifier);
            }
        }

        if key_name.is_none() && self.eat(&TokenKind::Star)? {
            generator = true;
        }

        if key_name.is_none() && !is_async && !generator {
            for (name, accessor) in [("get", MethodKind::Get), ("set", MethodKind::Set)] {
                if self.is_contextual(name) {
                    let modifier = self.modifier_as_key(name)?;
                    if self.starts_class_element_name() {
                        kind = accessor;
                    } else {
                        key_name = Some(modifier);
                    }
                    break;
                }
            }
        }

        let (key, computed) = match key_name {
            Some(id) => (Expression::Identifier(id), false),
            None => self.parse_class_element_name(ctx)?,
        };

        let is_method = self.check(&TokenKind::LeftParen) || kind != MethodKind::Method || generator || is_async;
        if is_method {
            self.parse_class_method(ctx, start, key, computed, is_static, kind, is_async, generator, derived)
        } else {
            self.parse_class_field(ctx, start, key, computed, is_static)
        }
    }

    fn parse_class_element_name(&mut self, ctx: Context) -> Result<(Expression, bool)> {
        if let TokenKind::PrivateIdentifier(name) = &self.current.kind {
            if name == "constructor" {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    self.current.span.start,
                    "Classes can't have an element named '#constructor'",
                ));
            }
            return Ok((Expression::PrivateIdentifier(self.parse_private_identifier()?), false));
        }
        self.parse_property_name(ctx)
    }

    #[allow(clippy::too_many_arguments)]
    fn parse_class_method(
        &mut self,
        ctx: Context,
        start: Marker,
        key: Expression,
        computed: bool,
        is_static: bool,
        kind: MethodKind,
        is_async: bool,
        generator: bool,
        derived: bool,
    ) -> Result<ClassElement> {
        let key_start = key.span().start;
        let is_constructor = !is_static && is_key_named(&key, computed, "constructor");
        let kind = if is_constructor {
            if kind != MethodKind::Method {
                return Err(self.raise(ErrorKind::EarlyError, key_start, "Constructor can't have get/set modifier"));
            }
            if generator {
                return Err(self.raise(ErrorKind::EarlyError, key_start, "Constructor can't be a generator"));
            }
            if is_async {
                return Err(self.raise(ErrorKind::EarlyError, key_start, "Constructor can't be an async method"));
            }
            MethodKind::Constructor
        } else {
            if is_static && is_key_named(&key, computed, "prototype") {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    key_start,
                    "Classes may not have a static property named prototype",
                ));
            }
            kind
        };

        let value = self.parse_method(ctx, is_async, generator, is_constructor && derived)?;
        match kind {
            MethodKind::Get => self.check_accessor_params(PropertyKind::Get, &value)?,
            MethodKind::Set => self.check_accessor_params(PropertyKind::Set, &value)?,
            _ => {}
        }

        Ok(ClassElement::Method(MethodDefinition {
            span: self.finish(start),
            key: Box::new(key),
            computed,
            is_static,
            kind,
            value,
        }))
    }

    fn parse_class_field(
        &mut self,
        ctx: Context,
        start: Marker,
        key: Expression,
        computed: bool,
        is_static: bool,
    ) -> Result<ClassElement> {
        let key_start = key.span().start;
        if is_key_named(&key, computed, "constructor") {
            return Err(self.raise(
                ErrorKind::EarlyError,
                key_start,
                "Classes can't have a field named 'constructor'",
            ));
        }
        if is_static && is_key_named(&key, computed, "prototype") {
            return Err(self.raise(
                ErrorKind::EarlyError,
                key_start,
                "Classes can't have a static field named 'prototype'",
            ));
        }

        let value = if self.eat(&TokenKind::Equal)? {
            let old_await_ident = self.await_ident_pos.take();
            let value = self.parse_maybe_assign(ctx.field_init(), None)?;
            self.await_ident_pos = old_await_ident;
            Some(Box::new(value))
        } else {
            None
        };
        self.semicolon()?;

        Ok(ClassElement::Property(PropertyDefinition {
            span: self.finish(start),
            key: Box::new(key),
            computed,
            is_static,
            value,
        }))
    }

    /// `static { ... }` after its opening brace.
    fn parse_static_block(&mut self, ctx: Context, start: Marker) -> Result<ClassElement> {
        let old_labels = std::mem::take(&mut self.labels);
        self.scope.push_scope(ScopeFlags::STATIC_BLOCK);
        let inner = ctx.static_block();
        let mut body = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            if self.is_at_end() {
                return Err(self.unexpected());
            }
            body.push(self.parse_statement(inner, StatementSlot::Declaration)?);
        }
        self.expect(&TokenKind::RightBrace)?;
        self.scope.pop_scope();
        self.labels = old_labels;

        Ok(ClassElement::StaticBlock(StaticBlock {
            span: self.finish(start),
            body,
        }))
    }
}
