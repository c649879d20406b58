//! The scanner that produces tokens from source text.
//!
//! The scanner is pull-based: the parser asks for one token at a time and
//! the scanner never buffers more than that. Two inputs are ambiguous at the
//! character level and are resolved by the parser re-reading the current
//! token under a different lexical goal:
//!
//! - `/` and `/=` are scanned as punctuators; [`Scanner::rescan_regex`] turns
//!   them into a regular expression literal when the parser is at the start
//!   of an expression.
//! - `}` is scanned as a punctuator; [`Scanner::rescan_template_continuation`]
//!   re-reads it as the start of the next template span.

use super::identifiers::{is_id_continue, is_id_start, is_line_terminator, is_whitespace};
use super::literals::{combine_surrogates, is_high_surrogate, is_low_surrogate};
use super::{Position, SourceLocation, Span, Token, TokenFlags, TokenKind};
use crate::error::{Error, ErrorKind, Result, SyntaxError};

/// A scanner that tokenizes ECMAScript source code.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    pub(super) source: &'a str,
    pub(super) pos: usize,
    pub(super) line: u32,
    pub(super) column: u32,
    module: bool,
    web_compat: bool,
    /// No token has been produced yet
    at_start: bool,
    /// Iterator state: the end-of-input token was already yielded
    finished: bool,
}

/// Outcome of decoding one escape sequence.
enum Escape {
    /// The escape contributes this character
    Char(char),
    /// A line continuation, contributing nothing
    Continuation,
    /// Not valid in a template; the cooked value becomes undefined
    Invalid(usize, &'static str),
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner for script code with web compatibility enabled.
    pub fn new(source: &'a str) -> Self {
        Self::with_goal(source, false, true)
    }

    /// Creates a scanner for the given goal symbol.
    ///
    /// HTML-like comments are only recognised in script code with web
    /// compatibility enabled.
    pub fn with_goal(source: &'a str, module: bool, web_compat: bool) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 0,
            module,
            web_compat,
            at_start: true,
            finished: false,
        }
    }

    /// Returns the source text being scanned.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Result<Token> {
        let newline = self.skip_trivia()?;
        let start = self.pos;
        let start_pos = self.current_position();
        let mut flags = TokenFlags::empty();
        if newline {
            flags |= TokenFlags::NEWLINE_BEFORE;
        }

        let kind = match self.peek() {
            None => TokenKind::Eof,
            Some(ch) => self.scan_token(ch, &mut flags)?,
        };
        self.at_start = false;

        Ok(self.finish(kind, start, start_pos, flags))
    }

    /// Returns the token after the current position without consuming it.
    pub fn peek_token(&self) -> Result<Token> {
        self.clone().next_token()
    }

    /// Re-reads `token` (a `/` or `/=`) as a regular expression literal.
    pub fn rescan_regex(&mut self, token: &Token) -> Result<Token> {
        self.reset_to(token.span.start, token.loc.start);
        let start = self.pos;
        self.advance(); // consume '/'

        let mut in_class = false;
        loop {
            match self.peek() {
                None => return Err(self.error(start, "Unterminated regular expression")),
                Some(ch) if is_line_terminator(ch) => {
                    return Err(self.error(start, "Unterminated regular expression"));
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some(ch) if !is_line_terminator(ch) => {
                            self.advance();
                        }
                        _ => return Err(self.error(start, "Unterminated regular expression")),
                    }
                }
                Some('[') => {
                    in_class = true;
                    self.advance();
                }
                Some(']') => {
                    in_class = false;
                    self.advance();
                }
                Some('/') if !in_class => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
        let pattern = self.source[start + 1..self.pos - 1].to_string();

        let flags_start = self.pos;
        while let Some(ch) = self.peek() {
            if ch == '\\' {
                return Err(self.error(self.pos, "Invalid regular expression flags"));
            }
            if !is_id_continue(ch) {
                break;
            }
            self.advance();
        }
        let flags = self.source[flags_start..self.pos].to_string();
        self.validate_regex_flags(&flags, flags_start)?;

        let kind = TokenKind::RegExp { pattern, flags };
        Ok(self.finish(kind, start, token.loc.start, token.flags))
    }

    /// Re-reads `token` (a `}`) as the continuation of a template literal.
    pub fn rescan_template_continuation(&mut self, token: &Token) -> Result<Token> {
        self.reset_to(token.span.start, token.loc.start);
        let start = self.pos;
        self.advance(); // consume '}'
        let kind = self.scan_template_span(start)?;
        Ok(self.finish(kind, start, token.loc.start, token.flags))
    }

    /// Returns the current line/column.
    pub fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn scan_token(&mut self, ch: char, flags: &mut TokenFlags) -> Result<TokenKind> {
        let start = self.pos;
        let kind = match ch {
            // Single-character tokens
            '{' => self.single(TokenKind::LeftBrace),
            '}' => self.single(TokenKind::RightBrace),
            '(' => self.single(TokenKind::LeftParen),
            ')' => self.single(TokenKind::RightParen),
            '[' => self.single(TokenKind::LeftBracket),
            ']' => self.single(TokenKind::RightBracket),
            ';' => self.single(TokenKind::Semicolon),
            ',' => self.single(TokenKind::Comma),
            ':' => self.single(TokenKind::Colon),
            '~' => self.single(TokenKind::Tilde),

            // Numbers, including `.5`
            '0'..='9' => self.scan_number(flags)?,
            '.' if matches!(self.peek_next(), Some('0'..='9')) => self.scan_number(flags)?,

            // String literals
            '"' | '\'' => self.scan_string(ch, flags)?,

            // Template literals
            '`' => {
                self.advance();
                self.scan_template_span(start)?
            }

            // Private identifiers
            '#' => {
                self.advance();
                match self.peek() {
                    Some(c) if is_id_start(c) || c == '\\' => {
                        TokenKind::PrivateIdentifier(self.scan_identifier_name(flags)?)
                    }
                    _ => return Err(self.error(start, "Unexpected character '#'")),
                }
            }

            // Identifiers and keywords
            '\\' => self.scan_identifier(flags)?,
            _ if is_id_start(ch) => self.scan_identifier(flags)?,

            // Multi-character punctuators
            _ => match self.scan_punctuator(ch) {
                Some(kind) => kind,
                None => {
                    return Err(self.error(start, format!("Unexpected character '{}'", ch)));
                }
            },
        };
        Ok(kind)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    fn scan_identifier(&mut self, flags: &mut TokenFlags) -> Result<TokenKind> {
        let name = self.scan_identifier_name(flags)?;
        Ok(TokenKind::keyword(&name).unwrap_or(TokenKind::Identifier(name)))
    }

    /// Scans an IdentifierName, decoding `\u` escapes into one logical name.
    fn scan_identifier_name(&mut self, flags: &mut TokenFlags) -> Result<String> {
        let mut name = String::new();
        let mut first = true;

        loop {
            match self.peek() {
                Some('\\') => {
                    let escape_start = self.pos;
                    self.advance();
                    if !self.eat('u') {
                        return Err(self.error(
                            escape_start,
                            "Expecting Unicode escape sequence \\uXXXX",
                        ));
                    }
                    let cp = self.scan_code_point(escape_start)?;
                    let ch = char::from_u32(cp)
                        .filter(|&c| if first { is_id_start(c) } else { is_id_continue(c) })
                        .ok_or_else(|| self.error(escape_start, "Invalid Unicode escape"))?;
                    name.push(ch);
                    *flags |= TokenFlags::ESCAPED;
                }
                Some(ch) if (first && is_id_start(ch)) || (!first && is_id_continue(ch)) => {
                    self.advance();
                    name.push(ch);
                }
                _ => break,
            }
            first = false;
        }

        Ok(name)
    }

    /// Scans the body of a `\u` escape (after the `u`): `XXXX` or `{X...}`.
    fn scan_code_point(&mut self, escape_start: usize) -> Result<u32> {
        if self.eat('{') {
            let digits_start = self.pos;
            let mut value: u32 = 0;
            while let Some(d) = self.peek().and_then(|c| c.to_digit(16)) {
                self.advance();
                value = value.saturating_mul(16).saturating_add(d);
                if value > 0x10FFFF {
                    return Err(self.error(escape_start, "Code point out of bounds"));
                }
            }
            if self.pos == digits_start || !self.eat('}') {
                return Err(self.error(escape_start, "Bad character escape sequence"));
            }
            Ok(value)
        } else {
            self.scan_hex_digits(4)
                .ok_or_else(|| self.error(escape_start, "Bad character escape sequence"))
        }
    }

    /// Reads exactly `count` hex digits, consuming nothing on failure.
    fn scan_hex_digits(&mut self, count: usize) -> Option<u32> {
        let rest = self.source.get(self.pos..)?;
        let digits = rest.get(..count)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        for _ in 0..count {
            self.advance();
        }
        Some(value)
    }

    fn scan_string(&mut self, quote: char, flags: &mut TokenFlags) -> Result<TokenKind> {
        let start = self.pos;
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.peek() {
                None => return Err(self.error(start, "Unterminated string constant")),
                Some(ch) if ch == quote => {
                    self.advance();
                    break;
                }
                Some('\n' | '\r') => return Err(self.error(start, "Unterminated string constant")),
                Some('\\') => {
                    self.advance();
                    match self.scan_escape(false, flags)? {
                        Escape::Char(c) => value.push(c),
                        Escape::Continuation => {}
                        Escape::Invalid(offset, msg) => return Err(self.error(offset, msg)),
                    }
                }
                Some(ch) => {
                    self.advance();
                    value.push(ch);
                }
            }
        }

        Ok(TokenKind::String(value))
    }

    /// Scans template characters up to and including the closing backtick or
    /// `${`. `start` is the offset of the opening backtick or `}`.
    fn scan_template_span(&mut self, start: usize) -> Result<TokenKind> {
        let content_start = self.pos;
        let mut cooked = Some(String::new());
        let mut ignored = TokenFlags::empty();

        let (content_end, tail) = loop {
            match self.peek() {
                None => return Err(self.error(start, "Unterminated template")),
                Some('`') => {
                    let end = self.pos;
                    self.advance();
                    break (end, true);
                }
                Some('$') if self.peek_next() == Some('{') => {
                    let end = self.pos;
                    self.advance();
                    self.advance();
                    break (end, false);
                }
                Some('\\') => {
                    self.advance();
                    match self.scan_escape(true, &mut ignored)? {
                        Escape::Char(c) => {
                            if let Some(text) = cooked.as_mut() {
                                text.push(c);
                            }
                        }
                        Escape::Continuation => {}
                        Escape::Invalid(..) => cooked = None,
                    }
                }
                Some('\r') => {
                    self.advance();
                    self.eat('\n');
                    if let Some(text) = cooked.as_mut() {
                        text.push('\n');
                    }
                }
                Some(ch) => {
                    self.advance();
                    if let Some(text) = cooked.as_mut() {
                        text.push(ch);
                    }
                }
            }
        };

        let raw = self.source[content_start..content_end]
            .replace("\r\n", "\n")
            .replace('\r', "\n");
        Ok(TokenKind::Template { cooked, raw, tail })
    }

    /// Decodes one escape sequence; the backslash is already consumed.
    fn scan_escape(&mut self, in_template: bool, flags: &mut TokenFlags) -> Result<Escape> {
        let escape_start = self.pos - 1;
        let Some(ch) = self.advance() else {
            return Err(self.error(escape_start, "Unterminated string constant"));
        };

        let escape = match ch {
            'n' => Escape::Char('\n'),
            't' => Escape::Char('\t'),
            'r' => Escape::Char('\r'),
            'b' => Escape::Char('\u{8}'),
            'v' => Escape::Char('\u{B}'),
            'f' => Escape::Char('\u{C}'),
            '\r' => {
                self.eat('\n');
                Escape::Continuation
            }
            '\n' | '\u{2028}' | '\u{2029}' => Escape::Continuation,
            'x' => match self.scan_hex_digits(2).and_then(char::from_u32) {
                Some(c) => Escape::Char(c),
                None => Escape::Invalid(escape_start, "Bad character escape sequence"),
            },
            'u' => self.scan_unicode_escape(escape_start, in_template)?,
            '0' if !matches!(self.peek(), Some('0'..='9')) => Escape::Char('\0'),
            '0'..='7' if in_template => {
                Escape::Invalid(escape_start, "Octal literal in template string")
            }
            '0'..='7' => {
                *flags |= TokenFlags::OCTAL_ESCAPE;
                Escape::Char(self.scan_legacy_octal_escape(ch))
            }
            '8' | '9' if in_template => {
                Escape::Invalid(escape_start, "Octal literal in template string")
            }
            '8' | '9' => {
                *flags |= TokenFlags::OCTAL_ESCAPE;
                Escape::Char(ch)
            }
            other => Escape::Char(other),
        };
        Ok(escape)
    }

    fn scan_unicode_escape(&mut self, escape_start: usize, in_template: bool) -> Result<Escape> {
        let saved = self.clone();
        let cp = match self.scan_code_point(escape_start) {
            Ok(cp) => cp,
            Err(err) if in_template => {
                // Leave the offending characters for the raw value.
                *self = saved;
                let msg = match err {
                    Error::Syntax(SyntaxError { message, .. })
                        if message.contains("out of bounds") =>
                    {
                        "Code point out of bounds"
                    }
                    _ => "Bad character escape sequence",
                };
                return Ok(Escape::Invalid(escape_start, msg));
            }
            Err(err) => return Err(err),
        };

        if is_high_surrogate(cp) && self.source[self.pos..].starts_with("\\u") {
            let mut ahead = self.clone();
            ahead.advance();
            ahead.advance();
            if let Some(low) = ahead.scan_hex_digits(4).filter(|&lo| is_low_surrogate(lo)) {
                *self = ahead;
                return Ok(Escape::Char(combine_surrogates(cp, low)));
            }
        }

        // Lone surrogates cannot be held in a Rust string.
        let ch = char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER);
        Ok(Escape::Char(ch))
    }

    /// `first` is the already consumed leading digit.
    fn scan_legacy_octal_escape(&mut self, first: char) -> char {
        let mut value = first.to_digit(8).unwrap_or(0);
        let max_len = if first <= '3' { 3 } else { 2 };
        let mut len = 1;
        while len < max_len {
            match self.peek().and_then(|c| c.to_digit(8)) {
                Some(d) => {
                    self.advance();
                    value = value * 8 + d;
                    len += 1;
                }
                None => break,
            }
        }
        char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn validate_regex_flags(&self, flags: &str, offset: usize) -> Result<()> {
        let mut seen = String::new();
        for ch in flags.chars() {
            if !"dgimsuyv".contains(ch) || seen.contains(ch) {
                return Err(self.error(offset, "Invalid regular expression flags"));
            }
            seen.push(ch);
        }
        if seen.contains('u') && seen.contains('v') {
            return Err(self.error(offset, "Invalid regular expression flags"));
        }
        Ok(())
    }

    /// Skips whitespace and comments, returning whether a line terminator
    /// was crossed.
    fn skip_trivia(&mut self) -> Result<bool> {
        let mut newline = false;

        if self.at_start && self.pos == 0 && self.source.starts_with("#!") {
            self.skip_line_comment();
        }

        loop {
            match self.peek() {
                Some(ch) if is_line_terminator(ch) => {
                    self.advance();
                    newline = true;
                }
                Some(ch) if is_whitespace(ch) => {
                    self.advance();
                }
                Some('/') => match self.peek_next() {
                    Some('/') => self.skip_line_comment(),
                    Some('*') => {
                        if self.skip_block_comment()? {
                            newline = true;
                        }
                    }
                    _ => break,
                },
                Some('<') if self.html_comments() && self.rest().starts_with("<!--") => {
                    self.skip_line_comment();
                }
                Some('-')
                    if self.html_comments()
                        && (newline || self.at_start)
                        && self.rest().starts_with("-->") =>
                {
                    self.skip_line_comment();
                }
                _ => break,
            }
        }

        Ok(newline)
    }

    fn html_comments(&self) -> bool {
        self.web_compat && !self.module
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if is_line_terminator(ch) {
                break;
            }
            self.advance();
        }
    }

    /// Returns whether the comment contained a line terminator.
    fn skip_block_comment(&mut self) -> Result<bool> {
        let start = self.pos;
        self.advance(); // '/'
        self.advance(); // '*'
        let mut newline = false;
        loop {
            match self.advance() {
                None => return Err(self.error(start, "Unterminated comment")),
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return Ok(newline);
                }
                Some(ch) if is_line_terminator(ch) => newline = true,
                Some(_) => {}
            }
        }
    }

    fn finish(
        &self,
        kind: TokenKind,
        start: usize,
        start_pos: Position,
        flags: TokenFlags,
    ) -> Token {
        Token {
            kind,
            span: Span::new(start, self.pos),
            loc: SourceLocation {
                start: start_pos,
                end: self.current_position(),
            },
            flags,
        }
    }

    fn reset_to(&mut self, offset: usize, pos: Position) {
        self.pos = offset;
        self.line = pos.line;
        self.column = pos.column;
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub(super) fn advance(&mut self) -> Option<char> {
        let ch = self.rest().chars().next()?;
        self.pos += ch.len_utf8();
        match ch {
            // CRLF counts as a single line break, taken at the LF.
            '\r' if self.peek() == Some('\n') => self.column += 1,
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                self.line += 1;
                self.column = 0;
            }
            _ => self.column += ch.len_utf16() as u32,
        }
        Some(ch)
    }

    pub(super) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(super) fn peek_next(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    pub(super) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn error(&self, offset: usize, message: impl Into<String>) -> Error {
        let pos = position_at(self.source, offset);
        Error::Syntax(SyntaxError {
            kind: ErrorKind::LexicalError,
            message: message.into(),
            offset,
            line: pos.line,
            column: pos.column,
        })
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(t) if t.kind == TokenKind::Eof => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
            ok => Some(ok),
        }
    }
}

/// Computes the line/column of a byte offset.
///
/// Offsets inside a multi-byte character are clamped to its start.
pub fn position_at(source: &str, offset: usize) -> Position {
    let mut line = 1;
    let mut column = 0;
    let mut chars = source.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if idx >= offset {
            break;
        }
        match ch {
            '\r' if matches!(chars.peek(), Some((_, '\n'))) => column += 1,
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                line += 1;
                column = 0;
            }
            _ => column += ch.len_utf16() as u32,
        }
    }
    Position::new(line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Scanner::new(src)
            .map(|t| t.unwrap().kind)
            .collect()
    }

    fn scan_err(src: &str) -> SyntaxError {
        let mut scanner = Scanner::new(src);
        loop {
            match scanner.next_token() {
                Ok(t) if t.kind == TokenKind::Eof => panic!("expected error for {:?}", src),
                Ok(_) => {}
                Err(Error::Syntax(err)) => return err,
                Err(other) => panic!("unexpected error {:?}", other),
            }
        }
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            kinds("let x = 42;"),
            vec![
                TokenKind::Identifier("let".to_string()),
                TokenKind::Identifier("x".to_string()),
                TokenKind::Equal,
                TokenKind::Number(42.0),
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_keywords_and_contextual_words() {
        assert_eq!(
            kinds("if async await yield"),
            vec![
                TokenKind::If,
                TokenKind::Identifier("async".to_string()),
                TokenKind::Identifier("await".to_string()),
                TokenKind::Identifier("yield".to_string()),
            ]
        );
    }

    #[test]
    fn test_escaped_identifier_is_one_name() {
        let mut scanner = Scanner::new("\\u0061b\\u{63}");
        let token = scanner.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Identifier("abc".to_string()));
        assert!(token.is_escaped());
    }

    #[test]
    fn test_escaped_keyword_keeps_kind() {
        let token = Scanner::new("\\u0069f").next_token().unwrap();
        assert_eq!(token.kind, TokenKind::If);
        assert!(token.is_escaped());
    }

    #[test]
    fn test_invalid_identifier_escape() {
        assert_eq!(scan_err("\\u0031x").kind, ErrorKind::LexicalError);
        assert_eq!(scan_err("a\\x41").kind, ErrorKind::LexicalError);
    }

    #[test]
    fn test_astral_identifier() {
        let token = Scanner::new("\u{1D400}x").next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Identifier("\u{1D400}x".to_string()));
        // Two UTF-16 units for the astral character plus one.
        assert_eq!(token.loc.end.column, 3);
    }

    #[test]
    fn test_nfkc_unstable_identifier_start() {
        let token = Scanner::new("\u{309B}x").next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Identifier("\u{309B}x".to_string()));
        let token = Scanner::new("\\u309Bx").next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Identifier("\u{309B}x".to_string()));
    }

    #[test]
    fn test_newline_before_flag() {
        let mut scanner = Scanner::new("a\nb /* x\n */ c d");
        assert!(!scanner.next_token().unwrap().newline_before());
        assert!(scanner.next_token().unwrap().newline_before());
        assert!(scanner.next_token().unwrap().newline_before());
        assert!(!scanner.next_token().unwrap().newline_before());
    }

    #[test]
    fn test_line_and_column_tracking() {
        let mut scanner = Scanner::new("a\r\n  b\u{2028}c");
        let a = scanner.next_token().unwrap();
        let b = scanner.next_token().unwrap();
        let c = scanner.next_token().unwrap();
        assert_eq!(a.loc.start, Position::new(1, 0));
        assert_eq!(b.loc.start, Position::new(2, 2));
        assert_eq!(c.loc.start, Position::new(3, 0));
        assert_eq!(scanner.current_position(), Position::new(3, 1));
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#"'a\n\x41B\u{43}\0'"#),
            vec![TokenKind::String("a\nABC\0".to_string())]
        );
        assert_eq!(
            kinds("'\\uD83D\\uDE00'"),
            vec![TokenKind::String("\u{1F600}".to_string())]
        );
        assert_eq!(
            kinds("'\\uD83D'"),
            vec![TokenKind::String("\u{FFFD}".to_string())]
        );
        assert_eq!(kinds("'a\\\nb'"), vec![TokenKind::String("ab".to_string())]);
    }

    #[test]
    fn test_legacy_octal_escape_flag() {
        let token = Scanner::new("'\\101'").next_token().unwrap();
        assert_eq!(token.kind, TokenKind::String("A".to_string()));
        assert!(token.flags.contains(TokenFlags::OCTAL_ESCAPE));

        let token = Scanner::new("'\\8'").next_token().unwrap();
        assert!(token.flags.contains(TokenFlags::OCTAL_ESCAPE));

        let token = Scanner::new("'\\0'").next_token().unwrap();
        assert!(!token.flags.contains(TokenFlags::OCTAL_ESCAPE));
    }

    #[test]
    fn test_unterminated_string() {
        let err = scan_err("'abc");
        assert_eq!(err.kind, ErrorKind::LexicalError);
        assert_eq!(err.offset, 0);
        assert_eq!(scan_err("'a\nb'").kind, ErrorKind::LexicalError);
        assert_eq!(scan_err("'\\x4'").kind, ErrorKind::LexicalError);
        assert_eq!(scan_err("'\\u{110000}'").kind, ErrorKind::LexicalError);
    }

    #[test]
    fn test_template_tokens() {
        let mut scanner = Scanner::new("`a${b}c`");
        let head = scanner.next_token().unwrap();
        assert_eq!(
            head.kind,
            TokenKind::Template {
                cooked: Some("a".to_string()),
                raw: "a".to_string(),
                tail: false
            }
        );
        assert_eq!(
            scanner.next_token().unwrap().kind,
            TokenKind::Identifier("b".to_string())
        );
        let close = scanner.next_token().unwrap();
        assert_eq!(close.kind, TokenKind::RightBrace);
        let tail = scanner.rescan_template_continuation(&close).unwrap();
        assert_eq!(
            tail.kind,
            TokenKind::Template {
                cooked: Some("c".to_string()),
                raw: "c".to_string(),
                tail: true
            }
        );
        assert_eq!(tail.span, Span::new(5, 8));
    }

    #[test]
    fn test_template_invalid_escape_has_no_cooked_value() {
        let token = Scanner::new("`\\unicode`").next_token().unwrap();
        assert_eq!(
            token.kind,
            TokenKind::Template {
                cooked: None,
                raw: "\\unicode".to_string(),
                tail: true
            }
        );
    }

    #[test]
    fn test_template_raw_normalises_line_endings() {
        let token = Scanner::new("`a\r\nb\rc`").next_token().unwrap();
        assert_eq!(
            token.kind,
            TokenKind::Template {
                cooked: Some("a\nb\nc".to_string()),
                raw: "a\nb\nc".to_string(),
                tail: true
            }
        );
    }

    #[test]
    fn test_rescan_regex() {
        let mut scanner = Scanner::new("/a[/]b\\//gi;");
        let slash = scanner.next_token().unwrap();
        assert_eq!(slash.kind, TokenKind::Slash);
        let regex = scanner.rescan_regex(&slash).unwrap();
        assert_eq!(
            regex.kind,
            TokenKind::RegExp {
                pattern: "a[/]b\\/".to_string(),
                flags: "gi".to_string()
            }
        );
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_regex_errors() {
        let mut scanner = Scanner::new("/abc");
        let slash = scanner.next_token().unwrap();
        assert!(scanner.rescan_regex(&slash).is_err());

        let mut scanner = Scanner::new("/a/gg");
        let slash = scanner.next_token().unwrap();
        assert!(scanner.rescan_regex(&slash).is_err());

        let mut scanner = Scanner::new("/a/uv");
        let slash = scanner.next_token().unwrap();
        assert!(scanner.rescan_regex(&slash).is_err());
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("a // line\n/* block */ b"),
            vec![
                TokenKind::Identifier("a".to_string()),
                TokenKind::Identifier("b".to_string()),
            ]
        );
        assert_eq!(scan_err("/* open").kind, ErrorKind::LexicalError);
    }

    #[test]
    fn test_hashbang() {
        assert_eq!(
            kinds("#!/usr/bin/env node\nx"),
            vec![TokenKind::Identifier("x".to_string())]
        );
    }

    #[test]
    fn test_html_comments_in_scripts_only() {
        assert_eq!(
            kinds("a <!-- hidden\n--> also hidden\nb"),
            vec![
                TokenKind::Identifier("a".to_string()),
                TokenKind::Identifier("b".to_string()),
            ]
        );

        let module: Vec<TokenKind> = Scanner::with_goal("a <!-- b", true, true)
            .map(|t| t.unwrap().kind)
            .collect();
        assert_eq!(module.len(), 5);

        // `-->` in the middle of a line is a decrement and a comparison.
        assert_eq!(
            kinds("x --> y"),
            vec![
                TokenKind::Identifier("x".to_string()),
                TokenKind::MinusMinus,
                TokenKind::GreaterThan,
                TokenKind::Identifier("y".to_string()),
            ]
        );
    }

    #[test]
    fn test_private_identifier() {
        assert_eq!(
            kinds("#foo"),
            vec![TokenKind::PrivateIdentifier("foo".to_string())]
        );
        assert_eq!(scan_err("# foo").kind, ErrorKind::LexicalError);
    }

    #[test]
    fn test_peek_token_does_not_advance() {
        let mut scanner = Scanner::new("a b");
        let peeked = scanner.peek_token().unwrap();
        let next = scanner.next_token().unwrap();
        assert_eq!(peeked, next);
    }

    #[test]
    fn test_position_at() {
        let src = "ab\ncd\r\nef";
        assert_eq!(position_at(src, 0), Position::new(1, 0));
        assert_eq!(position_at(src, 4), Position::new(2, 1));
        assert_eq!(position_at(src, 7), Position::new(3, 0));
    }

    #[test]
    fn test_unexpected_character() {
        let err = scan_err("a @ b");
        assert_eq!(err.offset, 2);
        assert_eq!(err.column, 2);
    }
}
