//! Binding patterns, assignment targets and the cover grammar.
//!
//! Array and object literals are parsed as expressions first and converted
//! with [`Parser::to_pattern`] once a following `=` (or `=>`, or a `for-in`
//! head) shows they were targets all along. Errors that only matter for one
//! of the two readings are parked in a [`CoverGrammar`] until the reading is
//! known.

use rustc_hash::FxHashSet;

use super::context::Context;
use super::parser::{Marker, Parser};
use super::scope::BindingKind;
use crate::ast::*;
use crate::error::{Error, ErrorKind, Result};
use crate::lexer::TokenKind;

/// Words reserved only in strict mode code.
const STRICT_RESERVED: &[&str] = &[
    "implements",
    "interface",
    "let",
    "package",
    "private",
    "protected",
    "public",
    "static",
    "yield",
];

/// Offsets of errors whose validity depends on whether an expression turns
/// out to be a pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverGrammar {
    /// `{ a = 1 }`: only valid as a pattern
    pub shorthand_assign: Option<usize>,
    /// A comma after a spread: invalid as a pattern
    pub trailing_comma: Option<usize>,
    /// A parenthesized non-simple target: invalid as an assignment pattern
    pub parenthesized_assign: Option<usize>,
    /// Any parenthesized element: invalid as a binding pattern
    pub parenthesized_bind: Option<usize>,
    /// A second `__proto__` property: only valid as a pattern
    pub double_proto: Option<usize>,
}

impl CoverGrammar {
    /// True if any error that rules out the expression reading is recorded.
    pub fn has_expression_errors(&self) -> bool {
        self.shorthand_assign.is_some() || self.double_proto.is_some()
    }
}

/// The kind of target an expression is converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// Left side of `=` or a `for-in`/`for-of` head
    Assign,
    /// Arrow function parameters
    Bind,
}

/// What [`Parser::check_pattern`] does with the names it finds.
#[derive(Debug, Clone, Copy)]
pub(super) enum BindTarget {
    /// Assignment target: validate only
    Assign,
    /// Declare in the current scope
    Declare(BindingKind),
    /// Binding already declared elsewhere: validate only
    Check,
}

impl<'a> Parser<'a> {
    /// Declares a name, turning scope conflicts into syntax errors.
    pub(super) fn declare(&mut self, name: &str, kind: BindingKind, offset: usize) -> Result<()> {
        self.scope
            .declare(name, kind, offset)
            .map_err(|conflict| self.raise(ErrorKind::DuplicateBinding, conflict.offset, conflict.to_string()))
    }

    fn invalid_target(&self, offset: usize, message: &str) -> Error {
        self.raise(ErrorKind::InvalidTarget, offset, message)
    }

    /// Fails if the expression reading of a cover is invalid.
    pub(super) fn check_expression_errors(&self, cover: &CoverGrammar) -> Result<()> {
        if let Some(offset) = cover.shorthand_assign {
            return Err(self.raise(
                ErrorKind::EarlyError,
                offset,
                "Shorthand property assignments are valid only in destructuring patterns",
            ));
        }
        if let Some(offset) = cover.double_proto {
            return Err(self.raise(ErrorKind::EarlyError, offset, "Redefinition of __proto__ property"));
        }
        Ok(())
    }

    /// Fails if the pattern reading of a cover is invalid.
    pub(super) fn check_pattern_errors(&self, cover: &CoverGrammar, is_assign: bool) -> Result<()> {
        if let Some(offset) = cover.trailing_comma {
            return Err(self.raise(
                ErrorKind::EarlyError,
                offset,
                "Comma is not permitted after the rest element",
            ));
        }
        let parens = if is_assign {
            cover.parenthesized_assign
        } else {
            cover.parenthesized_bind
        };
        if let Some(offset) = parens {
            return Err(if is_assign {
                self.invalid_target(offset, "Assigning to rvalue")
            } else {
                self.invalid_target(offset, "Parenthesized pattern")
            });
        }
        Ok(())
    }

    /// Converts the whole left-hand side of `=` or a for-in/of head. Only
    /// nested elements may carry a default value.
    pub(super) fn to_assign_target(
        &mut self,
        ctx: Context,
        expr: Expression,
        cover: Option<&mut CoverGrammar>,
    ) -> Result<Pattern> {
        if let Expression::Assignment(assign) = &expr {
            return Err(self.invalid_target(assign.span.start, "Invalid left-hand side in assignment"));
        }
        self.to_pattern(ctx, expr, TargetMode::Assign, cover)
    }

    /// Converts an expression into an assignment or binding target.
    pub(super) fn to_pattern(
        &mut self,
        ctx: Context,
        expr: Expression,
        mode: TargetMode,
        cover: Option<&mut CoverGrammar>,
    ) -> Result<Pattern> {
        match expr {
            Expression::Identifier(id) => {
                if ctx.is_async() && id.name == "await" {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        id.span.start,
                        "Cannot use 'await' as identifier inside an async function",
                    ));
                }
                Ok(Pattern::Identifier(id))
            }
            Expression::Member(member) => match mode {
                TargetMode::Assign => Ok(Pattern::Member(member)),
                TargetMode::Bind => Err(self.invalid_target(member.span.start, "Binding member expression")),
            },
            Expression::Object(object) => {
                if let Some(cover) = cover {
                    self.check_pattern_errors(cover, true)?;
                }
                let mut properties = Vec::with_capacity(object.properties.len());
                for member in object.properties {
                    properties.push(match member {
                        ObjectMember::Property(prop) => {
                            if prop.kind != PropertyKind::Init || prop.method {
                                return Err(self.invalid_target(
                                    prop.key.span().start,
                                    "Object pattern can't contain getter or setter",
                                ));
                            }
                            let value = self.to_pattern(ctx, *prop.value, mode, None)?;
                            ObjectPatternMember::Property(AssignmentProperty {
                                span: prop.span,
                                key: prop.key,
                                value,
                                kind: PropertyKind::Init,
                                method: false,
                                shorthand: prop.shorthand,
                                computed: prop.computed,
                            })
                        }
                        ObjectMember::Spread(spread) => {
                            let argument = self.to_pattern(ctx, *spread.argument, mode, None)?;
                            match argument {
                                Pattern::Identifier(_) | Pattern::Member(_) => {}
                                Pattern::Assignment(_) => {
                                    return Err(self.raise(
                                        ErrorKind::EarlyError,
                                        argument.span().start,
                                        "Rest elements cannot have a default value",
                                    ));
                                }
                                _ => {
                                    return Err(self.invalid_target(
                                        argument.span().start,
                                        "`...` must be followed by an assignable reference in assignment contexts",
                                    ));
                                }
                            }
                            ObjectPatternMember::Rest(RestElement {
                                span: spread.span,
                                argument: Box::new(argument),
                            })
                        }
                    });
                }
                Ok(Pattern::Object(ObjectPattern {
                    span: object.span,
                    properties,
                }))
            }
            Expression::Array(array) => {
                if let Some(cover) = cover {
                    self.check_pattern_errors(cover, true)?;
                }
                let elements = self.to_pattern_list(ctx, array.elements, mode)?;
                Ok(Pattern::Array(ArrayPattern {
                    span: array.span,
                    elements,
                }))
            }
            Expression::Assignment(assign) => {
                if assign.operator != AssignmentOperator::Assign {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        assign.left.span().end,
                        "Only '=' operator can be used for specifying default value.",
                    ));
                }
                if mode == TargetMode::Bind {
                    self.ensure_bindable(&assign.left)?;
                }
                Ok(Pattern::Assignment(AssignmentPattern {
                    span: assign.span,
                    left: assign.left,
                    right: assign.right,
                }))
            }
            Expression::Chain(chain) => Err(self.invalid_target(
                chain.span.start,
                "Optional chaining cannot appear in left-hand side",
            )),
            other => Err(self.invalid_target(other.span().start, "Assigning to rvalue")),
        }
    }

    /// Converts array elements or arrow parameters. A spread becomes a rest
    /// element and must come last.
    pub(super) fn to_pattern_list(
        &mut self,
        ctx: Context,
        elements: Vec<Option<ExpressionOrSpread>>,
        mode: TargetMode,
    ) -> Result<Vec<Option<Pattern>>> {
        let len = elements.len();
        let mut patterns = Vec::with_capacity(len);
        for (index, element) in elements.into_iter().enumerate() {
            patterns.push(match element {
                None => None,
                Some(ExpressionOrSpread::Expression(expr)) => Some(self.to_pattern(ctx, expr, mode, None)?),
                Some(ExpressionOrSpread::Spread(spread)) => {
                    if index + 1 != len {
                        return Err(self.raise(
                            ErrorKind::EarlyError,
                            spread.span.start,
                            "Rest element must be last element",
                        ));
                    }
                    let argument = self.to_pattern(ctx, *spread.argument, mode, None)?;
                    if let Pattern::Assignment(_) = argument {
                        return Err(self.raise(
                            ErrorKind::EarlyError,
                            argument.span().start,
                            "Rest elements cannot have a default value",
                        ));
                    }
                    Some(Pattern::Rest(RestElement {
                        span: spread.span,
                        argument: Box::new(argument),
                    }))
                }
            });
        }
        Ok(patterns)
    }

    /// Rejects member expressions anywhere in a pattern that must bind names.
    fn ensure_bindable(&self, pattern: &Pattern) -> Result<()> {
        match pattern {
            Pattern::Identifier(_) => Ok(()),
            Pattern::Member(member) => Err(self.invalid_target(member.span.start, "Binding member expression")),
            Pattern::Array(array) => array
                .elements
                .iter()
                .flatten()
                .try_for_each(|element| self.ensure_bindable(element)),
            Pattern::Object(object) => object.properties.iter().try_for_each(|member| match member {
                ObjectPatternMember::Property(prop) => self.ensure_bindable(&prop.value),
                ObjectPatternMember::Rest(rest) => self.ensure_bindable(&rest.argument),
            }),
            Pattern::Assignment(assign) => self.ensure_bindable(&assign.left),
            Pattern::Rest(rest) => self.ensure_bindable(&rest.argument),
        }
    }

    /// Validates a target and declares the names it binds.
    ///
    /// `clashes` collects parameter names when duplicates are not allowed.
    pub(super) fn check_pattern(
        &mut self,
        ctx: Context,
        pattern: &Pattern,
        target: BindTarget,
        mut clashes: Option<&mut FxHashSet<String>>,
    ) -> Result<()> {
        match pattern {
            Pattern::Identifier(id) => self.check_binding_identifier(ctx, id, target, clashes),
            Pattern::Member(member) => match target {
                BindTarget::Assign => Ok(()),
                _ => Err(self.invalid_target(member.span.start, "Binding member expression")),
            },
            Pattern::Array(array) => {
                for element in array.elements.iter().flatten() {
                    self.check_pattern(ctx, element, target, clashes.as_deref_mut())?;
                }
                Ok(())
            }
            Pattern::Object(object) => {
                for member in &object.properties {
                    let value = match member {
                        ObjectPatternMember::Property(prop) => &prop.value,
                        ObjectPatternMember::Rest(rest) => rest.argument.as_ref(),
                    };
                    self.check_pattern(ctx, value, target, clashes.as_deref_mut())?;
                }
                Ok(())
            }
            Pattern::Assignment(assign) => self.check_pattern(ctx, &assign.left, target, clashes),
            Pattern::Rest(rest) => self.check_pattern(ctx, &rest.argument, target, clashes),
        }
    }

    fn check_binding_identifier(
        &mut self,
        ctx: Context,
        id: &Identifier,
        target: BindTarget,
        clashes: Option<&mut FxHashSet<String>>,
    ) -> Result<()> {
        let is_bind = !matches!(target, BindTarget::Assign);
        if ctx.is_strict() && (id.name == "eval" || id.name == "arguments") {
            let verb = if is_bind { "Binding" } else { "Assigning to" };
            return Err(self.raise(
                ErrorKind::StrictModeViolation,
                id.span.start,
                format!("{} {} in strict mode", verb, id.name),
            ));
        }
        if let Some(seen) = clashes {
            if !seen.insert(id.name.clone()) {
                return Err(self.raise(ErrorKind::DuplicateBinding, id.span.start, "Argument name clash"));
            }
        }
        if let BindTarget::Declare(kind) = target {
            if kind == BindingKind::Lexical && id.name == "let" {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    id.span.start,
                    "let is disallowed as a lexically bound name",
                ));
            }
            self.declare(&id.name, kind, id.span.start)?;
        }
        Ok(())
    }

    /// True for targets of compound assignment and update expressions.
    pub(super) fn is_simple_target(expr: &Expression) -> bool {
        matches!(expr, Expression::Identifier(_) | Expression::Member(_))
    }

    /// Checks the operand of `++`/`--` or the left side of a compound
    /// assignment.
    pub(super) fn check_simple_target(&mut self, ctx: Context, expr: &Expression) -> Result<()> {
        match expr {
            Expression::Identifier(id) => {
                self.check_binding_identifier(ctx, id, BindTarget::Assign, None)
            }
            Expression::Member(_) => Ok(()),
            Expression::Chain(chain) => Err(self.invalid_target(
                chain.span.start,
                "Optional chaining cannot appear in left-hand side",
            )),
            other => Err(self.invalid_target(other.span().start, "Invalid left-hand side in assignment")),
        }
    }

    /// Rejects reserved words used as identifiers in `ctx`.
    pub(super) fn check_unreserved(&mut self, ctx: Context, name: &str, offset: usize) -> Result<()> {
        if ctx.is_generator() && name == "yield" {
            return Err(self.raise(
                ErrorKind::EarlyError,
                offset,
                "Cannot use 'yield' as identifier inside a generator",
            ));
        }
        if name == "await" {
            if ctx.is_async() {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    offset,
                    "Cannot use 'await' as identifier inside an async function",
                ));
            }
            if ctx.is_module() {
                return Err(self.raise(ErrorKind::EarlyError, offset, "Cannot use 'await' as identifier in a module"));
            }
            if ctx.contains(Context::IN_STATIC_BLOCK) {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    offset,
                    "Cannot use 'await' in class static initialization block",
                ));
            }
            if self.await_ident_pos.is_none() {
                self.await_ident_pos = Some(offset);
            }
        }
        if name == "arguments" && ctx.intersects(Context::IN_CLASS_FIELD_INIT | Context::IN_STATIC_BLOCK) {
            return Err(self.raise(
                ErrorKind::EarlyError,
                offset,
                "Cannot use 'arguments' in class field initializer",
            ));
        }
        if TokenKind::keyword(name).is_some() {
            return Err(self.raise(
                ErrorKind::UnexpectedToken,
                offset,
                format!("Unexpected keyword '{}'", name),
            ));
        }
        if ctx.is_strict() && STRICT_RESERVED.contains(&name) {
            return Err(self.raise(
                ErrorKind::StrictModeViolation,
                offset,
                format!("The keyword '{}' is reserved", name),
            ));
        }
        Ok(())
    }

    /// Parses an IdentifierReference or BindingIdentifier.
    pub(super) fn parse_identifier(&mut self, ctx: Context) -> Result<Identifier> {
        let id = self.parse_identifier_name()?;
        self.check_unreserved(ctx, &id.name, id.span.start)?;
        Ok(id)
    }

    /// Parses any IdentifierName, reserved words included.
    pub(super) fn parse_identifier_name(&mut self) -> Result<Identifier> {
        let Some(name) = self.current.kind.identifier_name().map(str::to_string) else {
            return Err(self.unexpected());
        };
        let span = self.token_span(&self.current);
        self.bump()?;
        Ok(Identifier { span, name })
    }

    /// Parses a binding identifier or an array/object binding pattern.
    pub(super) fn parse_binding_atom(&mut self, ctx: Context) -> Result<Pattern> {
        match self.current.kind {
            TokenKind::LeftBracket => {
                let start = self.start();
                self.advance()?;
                let elements = self.parse_binding_list(ctx, &TokenKind::RightBracket, true, true)?;
                Ok(Pattern::Array(ArrayPattern {
                    span: self.finish(start),
                    elements,
                }))
            }
            TokenKind::LeftBrace => self.parse_object_binding(ctx),
            _ => Ok(Pattern::Identifier(self.parse_identifier(ctx)?)),
        }
    }

    /// Parses binding elements up to and including `close`.
    pub(super) fn parse_binding_list(
        &mut self,
        ctx: Context,
        close: &TokenKind,
        allow_empty: bool,
        allow_trailing_comma: bool,
    ) -> Result<Vec<Option<Pattern>>> {
        let mut elements = Vec::new();
        let mut first = true;
        while !self.eat(close)? {
            if first {
                first = false;
            } else if !self.eat(&TokenKind::Comma)? {
                if self.is_at_end() {
                    return Err(self.unexpected());
                }
                return Err(self.invalid_target(
                    self.current.span.start,
                    "Invalid destructuring assignment target",
                ));
            }
            if allow_empty && self.check(&TokenKind::Comma) {
                elements.push(None);
            } else if allow_trailing_comma && self.eat(close)? {
                break;
            } else if self.check(&TokenKind::Ellipsis) {
                let rest = self.parse_binding_rest(ctx)?;
                elements.push(Some(rest));
                if self.check(&TokenKind::Comma) {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        self.current.span.start,
                        "Comma is not permitted after the rest element",
                    ));
                }
                self.expect(close)?;
                break;
            } else {
                elements.push(Some(self.parse_binding_element(ctx)?));
            }
        }
        Ok(elements)
    }

    /// `... BindingPattern`
    pub(super) fn parse_binding_rest(&mut self, ctx: Context) -> Result<Pattern> {
        let start = self.start();
        self.advance()?;
        let argument = self.parse_binding_atom(ctx)?;
        Ok(Pattern::Rest(RestElement {
            span: self.finish(start),
            argument: Box::new(argument),
        }))
    }

    /// A binding atom with an optional `= default`.
    pub(super) fn parse_binding_element(&mut self, ctx: Context) -> Result<Pattern> {
        let start = self.start();
        let left = self.parse_binding_atom(ctx)?;
        self.parse_maybe_default(ctx, start, left)
    }

    pub(super) fn parse_maybe_default(&mut self, ctx: Context, start: Marker, left: Pattern) -> Result<Pattern> {
        if !self.eat(&TokenKind::Equal)? {
            return Ok(left);
        }
        let right = self.parse_maybe_assign(ctx.without(Context::DISALLOW_IN), None)?;
        Ok(Pattern::Assignment(AssignmentPattern {
            span: self.finish(start),
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    fn parse_object_binding(&mut self, ctx: Context) -> Result<Pattern> {
        let start = self.start();
        self.advance()?;
        let mut properties = Vec::new();
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
                let rest_start = self.start();
                self.advance()?;
                let argument = Pattern::Identifier(self.parse_identifier(ctx)?);
                if self.check(&TokenKind::Comma) {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        self.current.span.start,
                        "Comma is not permitted after the rest element",
                    ));
                }
                properties.push(ObjectPatternMember::Rest(RestElement {
                    span: self.finish(rest_start),
                    argument: Box::new(argument),
                }));
                continue;
            }

            let prop_start = self.start();
            let key_is_name = matches!(self.current.kind, TokenKind::Identifier(_))
                || self.current.kind.is_keyword();
            let (key, computed) = self.parse_property_name(ctx)?;
            let (value, shorthand) = if self.eat(&TokenKind::Colon)? {
                (self.parse_binding_element(ctx)?, false)
            } else if let (Expression::Identifier(id), false, true) = (&key, computed, key_is_name) {
                self.check_unreserved(ctx, &id.name, id.span.start)?;
                let left = Pattern::Identifier(id.clone());
                (self.parse_maybe_default(ctx, prop_start, left)?, true)
            } else {
                return Err(self.unexpected());
            };
            properties.push(ObjectPatternMember::Property(AssignmentProperty {
                span: self.finish(prop_start),
                key: Box::new(key),
                value,
                kind: PropertyKind::Init,
                method: false,
                shorthand,
                computed,
            }));
        }
        Ok(Pattern::Object(ObjectPattern {
            span: self.finish(start),
            properties,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::{Error, ErrorKind};
    use crate::parser::Parser;

    fn parse_ok(src: &str) -> Program {
        let mut parser = Parser::new(src);
        parser.parse_program().expect("Should parse")
    }

    fn parse_err(src: &str) -> Error {
        let mut parser = Parser::new(src);
        parser.parse_program().unwrap_err()
    }

    fn declarator_id(src: &str) -> Pattern {
        match parse_ok(src).body.into_iter().next() {
            Some(Statement::VariableDeclaration(decl)) => decl.declarations.into_iter().next().unwrap().id,
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    fn assignment_target(src: &str) -> Pattern {
        match parse_ok(src).body.into_iter().next() {
            Some(Statement::Expression(ExpressionStatement {
                expression: Expression::Assignment(assign),
                ..
            })) => *assign.left,
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_object_binding_with_rest() {
        match declarator_id("var {a, ...rest} = obj;") {
            Pattern::Object(object) => {
                assert_eq!(object.properties.len(), 2);
                match &object.properties[0] {
                    ObjectPatternMember::Property(prop) => {
                        assert!(prop.shorthand);
                        assert!(matches!(&prop.value, Pattern::Identifier(id) if id.name == "a"));
                    }
                    other => panic!("expected property, got {:?}", other),
                }
                assert!(matches!(object.properties[1], ObjectPatternMember::Rest(_)));
            }
            other => panic!("expected object pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_object_binding_defaults_and_renames() {
        match declarator_id("var {a = 1, b: c, d: {e} = {}} = obj;") {
            Pattern::Object(object) => {
                let values: Vec<_> = object
                    .properties
                    .iter()
                    .map(|member| match member {
                        ObjectPatternMember::Property(prop) => &prop.value,
                        ObjectPatternMember::Rest(rest) => rest.argument.as_ref(),
                    })
                    .collect();
                assert!(matches!(values[0], Pattern::Assignment(_)));
                assert!(matches!(values[1], Pattern::Identifier(id) if id.name == "c"));
                assert!(matches!(values[2], Pattern::Assignment(_)));
            }
            other => panic!("expected object pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_object_binding_rest_must_be_identifier() {
        assert!(Parser::new("var {...[a]} = b;").parse_program().is_err());
        assert!(Parser::new("var {...a, b} = c;").parse_program().is_err());
    }

    #[test]
    fn test_array_binding_trailing_comma() {
        match declarator_id("var [a,] = [];") {
            Pattern::Array(array) => assert_eq!(array.elements.len(), 1),
            other => panic!("expected array pattern, got {:?}", other),
        }
        match declarator_id("var [, a, , b] = [];") {
            Pattern::Array(array) => {
                assert_eq!(array.elements.len(), 4);
                assert!(array.elements[0].is_none());
                assert!(array.elements[2].is_none());
            }
            other => panic!("expected array pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_array_binding_rest_position() {
        parse_ok("var [...a] = x;");
        parse_ok("var [a, ...[b, c]] = x;");
        assert!(Parser::new("var [...a, b] = x;").parse_program().is_err());
        assert!(Parser::new("var [...a,] = x;").parse_program().is_err());
        assert!(Parser::new("var [...a = 1] = x;").parse_program().is_err());
    }

    #[test]
    fn test_invalid_binding_element() {
        assert_eq!(parse_err("var [a--] = [];").kind(), Some(ErrorKind::InvalidTarget));
        assert_eq!(parse_err("var [a.b] = [];").kind(), Some(ErrorKind::InvalidTarget));
    }

    #[test]
    fn test_array_assignment_target() {
        assert!(matches!(assignment_target("[a] = [];"), Pattern::Array(_)));
        assert!(matches!(assignment_target("[a.b, c[0]] = [];"), Pattern::Array(_)));
        assert!(matches!(assignment_target("({a, b: c.d} = {});"), Pattern::Object(_)));
    }

    #[test]
    fn test_invalid_assignment_targets() {
        for src in ["[a--] = [];", "[a + b] = [];", "(a + b) = 1;", "a() = 1;", "[(a = 1)] = [];"] {
            assert_eq!(parse_err(src).kind(), Some(ErrorKind::InvalidTarget), "{}", src);
        }
        assert_eq!(parse_err("a?.b = 1;").kind(), Some(ErrorKind::InvalidTarget));
        assert_eq!(parse_err("this = 1;").kind(), Some(ErrorKind::InvalidTarget));
    }

    #[test]
    fn test_assignment_rest_rules() {
        parse_ok("[...a] = b;");
        parse_ok("[...a.b] = c;");
        assert!(Parser::new("[...a, b] = c;").parse_program().is_err());
        assert!(Parser::new("[...a,] = c;").parse_program().is_err());
        assert!(Parser::new("({...[a]} = b);").parse_program().is_err());
        assert!(Parser::new("[...a = 1] = c;").parse_program().is_err());
    }

    #[test]
    fn test_shorthand_default_only_in_patterns() {
        parse_ok("({a = 1} = b);");
        parse_ok("[{a = 1}] = b;");
        assert!(Parser::new("({a = 1});").parse_program().is_err());
        assert!(Parser::new("f({a = 1});").parse_program().is_err());
    }

    #[test]
    fn test_compound_operator_default_rejected() {
        assert!(Parser::new("[a += 1] = b;").parse_program().is_err());
        assert!(Parser::new("({a: b += 1} = c);").parse_program().is_err());
    }

    #[test]
    fn test_parenthesized_targets() {
        parse_ok("(a) = 1;");
        parse_ok("[(a)] = 1;");
        parse_ok("[(a.b)] = 1;");
        assert_eq!(parse_err("([a]) = 1;").kind(), Some(ErrorKind::InvalidTarget));
        assert_eq!(parse_err("[([a])] = 1;").kind(), Some(ErrorKind::InvalidTarget));
    }

    #[test]
    fn test_parenthesized_assignment_is_not_a_target() {
        assert_eq!(parse_err("(a = 1) = 2;").kind(), Some(ErrorKind::InvalidTarget));
        assert_eq!(parse_err("({a} = 1) = 2;").kind(), Some(ErrorKind::InvalidTarget));
        assert_eq!(parse_err("([a] = 1) = 2;").kind(), Some(ErrorKind::InvalidTarget));
        assert!(parse_err("[(a = 1)] = 2;").kind().is_some());

        match assignment_target("[a = 1] = [];") {
            Pattern::Array(array) => assert!(matches!(array.elements[0], Some(Pattern::Assignment(_)))),
            other => panic!("expected array pattern, got {:?}", other),
        }
        parse_ok("({x: y = 1} = {});");
    }

    #[test]
    fn test_getters_and_methods_are_not_targets() {
        assert!(Parser::new("({get a() {}} = b);").parse_program().is_err());
        assert!(Parser::new("({a() {}} = b);").parse_program().is_err());
    }

    #[test]
    fn test_strict_binding_restrictions() {
        assert_eq!(
            parse_err("'use strict'; var eval;").kind(),
            Some(ErrorKind::StrictModeViolation)
        );
        assert_eq!(
            parse_err("'use strict'; [arguments] = [];").kind(),
            Some(ErrorKind::StrictModeViolation)
        );
        assert_eq!(
            parse_err("'use strict'; var {a: interface} = b;").kind(),
            Some(ErrorKind::StrictModeViolation)
        );
        parse_ok("var eval, arguments;");
        parse_ok("var interface, yield, static;");
    }

    #[test]
    fn test_keywords_are_not_bindings() {
        assert_eq!(parse_err("var if = 1;").kind(), Some(ErrorKind::UnexpectedToken));
        assert_eq!(parse_err("var {if} = b;").kind(), Some(ErrorKind::UnexpectedToken));
        parse_ok("var {if: a} = b;");
    }

    #[test]
    fn test_binding_spans() {
        match declarator_id("var {a = 1} = b;") {
            Pattern::Object(object) => {
                assert_eq!(object.span, Span::new(4, 11));
                match &object.properties[0] {
                    ObjectPatternMember::Property(prop) => {
                        assert_eq!(prop.span, Span::new(5, 10));
                        assert_eq!(prop.value.span(), Span::new(5, 10));
                    }
                    other => panic!("expected property, got {:?}", other),
                }
            }
            other => panic!("expected object pattern, got {:?}", other),
        }
    }
}
