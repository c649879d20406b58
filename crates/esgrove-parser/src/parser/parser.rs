//! The parser core: token handling, spans, errors and program entry.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::context::Context;
use super::scope::ScopeTracker;
use crate::ast::*;
use crate::error::{Error, ErrorKind, Result, SyntaxError};
use crate::lexer::{Scanner, Token, TokenKind, position_at};
use crate::options::ParseOptions;

/// What kind of statement a label is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LabelKind {
    Loop,
    Switch,
    Other,
}

/// A label in scope for `break` and `continue`.
#[derive(Debug, Clone)]
pub(super) struct Label {
    pub(super) name: String,
    pub(super) kind: LabelKind,
    /// Start of the labelled statement; chained labels share it
    pub(super) statement_start: usize,
}

/// Private names of one class body.
#[derive(Debug, Default)]
pub(super) struct PrivateNameScope {
    /// Declared names and how (`field`, or a getter/setter half)
    pub(super) declared: rustc_hash::FxHashMap<String, PrivateSlot>,
    /// Referenced names with their offsets
    pub(super) used: Vec<(String, usize)>,
}

/// How a private name has been declared so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PrivateSlot {
    Member,
    Getter { is_static: bool },
    Setter { is_static: bool },
}

/// Start of a node: byte offset and line/column.
#[derive(Debug, Clone, Copy)]
pub(super) struct Marker {
    pub(super) offset: usize,
    pub(super) position: Position,
}

/// A recursive descent parser for ECMAScript.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    source: &'a str,
    pub(super) current: Token,
    pub(super) previous: Token,
    pub(super) options: ParseOptions,
    pub(super) scope: ScopeTracker,
    pub(super) labels: Vec<Label>,
    pub(super) private_names: Vec<PrivateNameScope>,
    /// Exported names, for duplicate detection
    pub(super) exports: FxHashSet<String>,
    /// `export { x }` locals that must be declared by the end of the module
    pub(super) local_exports: Vec<(String, usize)>,
    /// First `yield` seen since the innermost parameter list started
    pub(super) yield_pos: Option<usize>,
    /// First `await` expression seen since the innermost parameter list started
    pub(super) await_pos: Option<usize>,
    /// First `await` used as an identifier, for async arrow parameters
    pub(super) await_ident_pos: Option<usize>,
    /// Offset of an expression that may turn out to be arrow parameters
    pub(super) potential_arrow_at: Option<usize>,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser for sloppy-mode script code.
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    /// Creates a parser with the given options.
    pub fn with_options(source: &'a str, options: ParseOptions) -> Self {
        let scanner = Scanner::with_goal(source, options.module, options.web_compat());
        let placeholder = Token::new(TokenKind::Eof, Span::new(0, 0));
        Self {
            scanner,
            source,
            current: placeholder.clone(),
            previous: placeholder,
            options,
            scope: ScopeTracker::new(options.module, options.web_compat()),
            labels: Vec::new(),
            private_names: Vec::new(),
            exports: FxHashSet::default(),
            local_exports: Vec::new(),
            yield_pos: None,
            await_pos: None,
            await_ident_pos: None,
            potential_arrow_at: None,
            depth: 0,
        }
    }

    /// Returns the scope tracker, including the frames of closed scopes.
    pub fn scopes(&self) -> &ScopeTracker {
        &self.scope
    }

    /// Parses the source code into a Program AST node.
    pub fn parse_program(&mut self) -> Result<Program> {
        let source_type = if self.options.module {
            SourceType::Module
        } else {
            SourceType::Script
        };
        debug!(len = self.source.len(), ?source_type, "parse program");

        self.advance()?;
        let ctx = Context::program(self.options.module, self.options.strict_by_default);
        let body = self.parse_top_level(ctx)?;

        if self.options.module {
            for (name, offset) in std::mem::take(&mut self.local_exports) {
                if !self.scope.is_top_level_declared(&name) {
                    return Err(self.raise(
                        ErrorKind::EarlyError,
                        offset,
                        format!("Export '{}' is not defined", name),
                    ));
                }
            }
        }
        self.scope.finish();

        let mut span = Span::new(0, self.source.len());
        if self.options.track_source_locations {
            span.loc = Some(SourceLocation {
                start: Position::new(1, 0),
                end: self.current.loc.end,
            });
        }
        debug!(statements = body.len(), "parsed program");
        Ok(Program {
            span,
            source_type,
            body,
        })
    }

    // =====================================================================
    // Token handling
    // =====================================================================

    /// Moves to the next token. Escaped keywords may not be consumed as
    /// keywords.
    pub(super) fn advance(&mut self) -> Result<()> {
        if self.current.kind.is_keyword() && self.current.is_escaped() {
            return Err(self.raise(
                ErrorKind::EarlyError,
                self.current.span.start,
                "Keyword must not contain escaped characters",
            ));
        }
        self.bump()
    }

    /// Moves to the next token without the escaped-keyword check; used where
    /// any IdentifierName is allowed.
    pub(super) fn bump(&mut self) -> Result<()> {
        let next = self.scanner.next_token()?;
        self.previous = std::mem::replace(&mut self.current, next);
        Ok(())
    }

    /// Returns the token after the current one.
    pub(super) fn peek(&self) -> Result<Token> {
        self.scanner.peek_token()
    }

    /// Re-reads the current `/` or `/=` as a regular expression.
    pub(super) fn rescan_regex(&mut self) -> Result<()> {
        self.current = self.scanner.rescan_regex(&self.current)?;
        Ok(())
    }

    /// Re-reads the current `}` as the continuation of a template.
    pub(super) fn rescan_template(&mut self) -> Result<()> {
        self.current = self.scanner.rescan_template_continuation(&self.current)?;
        Ok(())
    }

    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    pub(super) fn eat(&mut self, kind: &TokenKind) -> Result<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected())
        }
    }

    /// Returns true if the current token is the unescaped contextual
    /// keyword `name`.
    pub(super) fn is_contextual(&self, name: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Identifier(n) if n == name)
            && !self.current.is_escaped()
    }

    pub(super) fn eat_contextual(&mut self, name: &str) -> Result<bool> {
        if self.is_contextual(name) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(super) fn expect_contextual(&mut self, name: &str) -> Result<()> {
        if self.eat_contextual(name)? {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    pub(super) fn is_at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    /// True where automatic semicolon insertion may terminate a statement.
    pub(super) fn can_insert_semicolon(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof | TokenKind::RightBrace)
            || self.current.newline_before()
    }

    /// Consumes a statement terminator, inserting one where allowed.
    pub(super) fn semicolon(&mut self) -> Result<()> {
        if self.eat(&TokenKind::Semicolon)? || self.can_insert_semicolon() {
            return Ok(());
        }
        Err(self.raise(
            ErrorKind::AsiFailure,
            self.previous.span.end,
            format!(
                "Missing semicolon before {}",
                self.current.kind.describe()
            ),
        ))
    }

    // =====================================================================
    // Spans
    // =====================================================================

    /// Records the start of a node at the current token.
    pub(super) fn start(&self) -> Marker {
        Marker {
            offset: self.current.span.start,
            position: self.current.loc.start,
        }
    }

    /// Ends a node at the previous token.
    pub(super) fn finish(&self, marker: Marker) -> Span {
        self.span_to(marker, self.previous.span.end, self.previous.loc.end)
    }

    /// Ends a node at an explicit offset.
    pub(super) fn span_to(&self, marker: Marker, end: usize, end_position: Position) -> Span {
        Span {
            start: marker.offset,
            end,
            loc: self.options.track_source_locations.then_some(SourceLocation {
                start: marker.position,
                end: end_position,
            }),
        }
    }

    /// The span of a token, without `loc` unless tracking is on.
    pub(super) fn token_span(&self, token: &Token) -> Span {
        Span {
            start: token.span.start,
            end: token.span.end,
            loc: self.options.track_source_locations.then_some(token.loc),
        }
    }

    /// Source text covered by `span`.
    pub(super) fn slice(&self, span: Span) -> &'a str {
        self.source.get(span.start..span.end).unwrap_or_default()
    }

    // =====================================================================
    // Errors
    // =====================================================================

    pub(super) fn raise(&self, kind: ErrorKind, offset: usize, message: impl Into<String>) -> Error {
        let pos = position_at(self.source, offset);
        Error::Syntax(SyntaxError {
            kind,
            message: message.into(),
            offset,
            line: pos.line,
            column: pos.column,
        })
    }

    /// An `UnexpectedToken` error at the current token.
    pub(super) fn unexpected(&self) -> Error {
        self.unexpected_at(self.current.span.start)
    }

    pub(super) fn unexpected_at(&self, offset: usize) -> Error {
        let message = if offset == self.current.span.start {
            match self.current.kind {
                TokenKind::Eof => "Unexpected end of input".to_string(),
                ref other => format!("Unexpected {}", other.describe()),
            }
        } else {
            "Unexpected token".to_string()
        };
        self.raise(ErrorKind::UnexpectedToken, offset, message)
    }

    /// Runs `f` one nesting level deeper, rejecting input nested beyond
    /// `max_depth`.
    pub(super) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.options.max_depth {
            return Err(self.raise(
                ErrorKind::EarlyError,
                self.current.span.start,
                "Maximum nesting depth exceeded",
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Returns true if the current token can begin an expression.
    pub(super) fn starts_expression(&self) -> bool {
        use TokenKind::*;
        match &self.current.kind {
            Identifier(_) | PrivateIdentifier(_) => true,
            kind if kind.is_literal() => true,
            This | Function | Class | New | Super | Typeof | Void | Delete | Import => true,
            LeftParen | LeftBracket | LeftBrace | Plus | Minus | Bang | Tilde | PlusPlus
            | MinusMinus | Slash | SlashEqual => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to parse and check it succeeds
    fn parse_ok(src: &str) -> Program {
        let mut parser = Parser::new(src);
        parser.parse_program().unwrap()
    }

    // Helper to parse and check it fails
    fn parse_err(src: &str) -> Error {
        let mut parser = Parser::new(src);
        parser.parse_program().unwrap_err()
    }

    #[test]
    fn test_parse_empty_program() {
        let program = parse_ok("");
        assert!(program.body.is_empty());
        assert_eq!(program.source_type, SourceType::Script);
        assert_eq!(program.span, Span::new(0, 0));
    }

    #[test]
    fn test_program_span_covers_source() {
        let program = parse_ok("  x;  // trailing\n");
        assert_eq!(program.span.start, 0);
        assert_eq!(program.span.end, 18);
        assert_eq!(program.body[0].span(), Span::new(2, 4));
    }

    #[test]
    fn test_locations_when_requested() {
        let options = ParseOptions::default().with_locations(true);
        let mut parser = Parser::with_options("a;\n  b;", options);
        let program = parser.parse_program().unwrap();
        let loc = program.body[1].span().loc.unwrap();
        assert_eq!(loc.start, Position::new(2, 2));
        assert_eq!(loc.end, Position::new(2, 4));
        assert!(parse_ok("a;").body[0].span().loc.is_none());
    }

    #[test]
    fn test_asi_failure() {
        let err = parse_err("a b");
        assert_eq!(err.kind(), Some(ErrorKind::AsiFailure));
        let syntax = err.as_syntax().unwrap();
        assert_eq!(syntax.offset, 1);
        assert_eq!((syntax.line, syntax.column), (1, 1));
    }

    #[test]
    fn test_asi_on_newline_and_brace() {
        assert_eq!(parse_ok("a\nb").body.len(), 2);
        assert_eq!(parse_ok("{ a }").body.len(), 1);
    }

    #[test]
    fn test_lexical_error_propagates() {
        let err = parse_err("'unterminated");
        assert_eq!(err.kind(), Some(ErrorKind::LexicalError));
    }

    #[test]
    fn test_escaped_keyword_rejected() {
        let err = parse_err("v\\u0061r x;");
        assert_eq!(err.kind(), Some(ErrorKind::EarlyError));
        // allowed as a property name
        parse_ok("a.v\\u0061r;");
    }

    #[test]
    fn test_depth_limit() {
        let options = ParseOptions::default().with_max_depth(32);
        let source = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        let mut parser = Parser::with_options(&source, options);
        let err = parser.parse_program().unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::EarlyError));

        let shallow = format!("{}1{}", "(".repeat(8), ")".repeat(8));
        let mut parser = Parser::with_options(&shallow, options);
        assert!(parser.parse_program().is_ok());
    }

    #[test]
    fn test_depth_limit_new_chain() {
        let options = ParseOptions::default().with_max_depth(32);
        let source = format!("x = {}a", "new ".repeat(5000));
        let mut parser = Parser::with_options(&source, options);
        let err = parser.parse_program().unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::EarlyError));
        assert!(err.to_string().contains("Maximum nesting depth"));

        let mut parser = Parser::with_options("x = new new new a", options);
        assert!(parser.parse_program().is_ok());
    }

    #[test]
    fn test_depth_limit_class_heritage() {
        let options = ParseOptions::default().with_max_depth(32);
        let source = format!("({}a {{}});", "class extends ".repeat(5000));
        let mut parser = Parser::with_options(&source, options);
        let err = parser.parse_program().unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::EarlyError));
        assert!(err.to_string().contains("Maximum nesting depth"));

        let mut parser = Parser::with_options("(class extends class extends a {} {});", options);
        assert!(parser.parse_program().is_ok());
    }
}
