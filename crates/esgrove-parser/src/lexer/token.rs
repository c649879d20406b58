//! Token definitions for the ECMAScript lexer.

use bitflags::bitflags;

/// A line/column position in the source.
///
/// Lines are 1-based; columns are 0-based and counted in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    /// Line number (1-based)
    pub line: u32,
    /// Column (0-based)
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A start/end pair of line/column positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceLocation {
    /// Position of the first character
    pub start: Position,
    /// Position just past the last character
    pub end: Position,
}

/// A span in the source code, representing a range of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Line/column pair, present on AST nodes when location tracking is on
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub loc: Option<SourceLocation>,
}

impl Span {
    /// Creates a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            loc: None,
        }
    }

    /// Returns the length of this span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if this span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `other` lies within this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

bitflags! {
    /// Facts about a token that later grammar decisions depend on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TokenFlags: u8 {
        /// A line terminator occurred between the previous token and this one
        const NEWLINE_BEFORE = 1 << 0;
        /// An identifier or keyword spelled with `\u` escapes
        const ESCAPED = 1 << 1;
        /// A legacy octal (`010`) or leading-zero decimal (`08`) literal
        const LEGACY_OCTAL = 1 << 2;
        /// A string holding a legacy octal escape (`\01`) or `\8`/`\9`
        const OCTAL_ESCAPE = 1 << 3;
        /// A numeric literal with `_` separators
        const NUMERIC_SEPARATOR = 1 << 4;
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The span in the source code
    pub span: Span,
    /// Line/column of the token boundaries
    pub loc: SourceLocation,
    /// Adjacency and literal-legality facts
    pub flags: TokenFlags,
}

impl Token {
    /// Creates a new token without flags at line 1.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            loc: SourceLocation {
                start: Position::new(1, 0),
                end: Position::new(1, 0),
            },
            flags: TokenFlags::empty(),
        }
    }

    /// Returns true if a line terminator preceded this token.
    pub fn newline_before(&self) -> bool {
        self.flags.contains(TokenFlags::NEWLINE_BEFORE)
    }

    /// Returns true if the token was spelled with unicode escapes.
    pub fn is_escaped(&self) -> bool {
        self.flags.contains(TokenFlags::ESCAPED)
    }
}

/// The different kinds of tokens in ECMAScript.
///
/// Only reserved words get their own variant; contextual keywords such as
/// `let`, `async`, `await`, `yield`, `of`, `get`, `set` and `static` are
/// scanned as [`TokenKind::Identifier`] and recognised by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal (integer or floating point)
    Number(f64),
    /// BigInt literal, holding its value in decimal digits
    BigInt(String),
    /// String literal with escapes cooked
    String(String),
    /// Template span; `tail` is set when it ends with a backtick
    Template {
        cooked: Option<String>,
        raw: String,
        tail: bool,
    },
    /// Regular expression literal
    RegExp {
        pattern: String,
        flags: String,
    },
    /// Boolean true
    True,
    /// Boolean false
    False,
    /// null
    Null,

    // Identifiers
    /// Identifier (including contextual keywords)
    Identifier(String),
    /// Private identifier (#name)
    PrivateIdentifier(String),

    // Reserved words
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Enum,
    Export,
    Extends,
    Finally,
    For,
    Function,
    If,
    Import,
    In,
    Instanceof,
    New,
    Return,
    Super,
    Switch,
    This,
    Throw,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,

    // Punctuation
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// .
    Dot,
    /// ...
    Ellipsis,
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// <
    LessThan,
    /// >
    GreaterThan,
    /// <=
    LessThanEqual,
    /// >=
    GreaterThanEqual,
    /// ==
    EqualEqual,
    /// !=
    NotEqual,
    /// ===
    StrictEqual,
    /// !==
    StrictNotEqual,
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// **
    StarStar,
    /// ++
    PlusPlus,
    /// --
    MinusMinus,
    /// <<
    LeftShift,
    /// >>
    RightShift,
    /// >>>
    UnsignedRightShift,
    /// &
    Ampersand,
    /// |
    Pipe,
    /// ^
    Caret,
    /// !
    Bang,
    /// ~
    Tilde,
    /// &&
    AmpersandAmpersand,
    /// ||
    PipePipe,
    /// ??
    QuestionQuestion,
    /// ?
    Question,
    /// ?.
    QuestionDot,
    /// :
    Colon,
    /// =
    Equal,
    /// +=
    PlusEqual,
    /// -=
    MinusEqual,
    /// *=
    StarEqual,
    /// /=
    SlashEqual,
    /// %=
    PercentEqual,
    /// **=
    StarStarEqual,
    /// <<=
    LeftShiftEqual,
    /// >>=
    RightShiftEqual,
    /// >>>=
    UnsignedRightShiftEqual,
    /// &=
    AmpersandEqual,
    /// |=
    PipeEqual,
    /// ^=
    CaretEqual,
    /// &&=
    AmpersandAmpersandEqual,
    /// ||=
    PipePipeEqual,
    /// ??=
    QuestionQuestionEqual,
    /// =>
    Arrow,

    // Special
    /// End of file
    Eof,
}

impl TokenKind {
    /// Looks up the reserved word spelled by `name`.
    pub fn keyword(name: &str) -> Option<TokenKind> {
        let kind = match name {
            "break" => TokenKind::Break,
            "case" => TokenKind::Case,
            "catch" => TokenKind::Catch,
            "class" => TokenKind::Class,
            "const" => TokenKind::Const,
            "continue" => TokenKind::Continue,
            "debugger" => TokenKind::Debugger,
            "default" => TokenKind::Default,
            "delete" => TokenKind::Delete,
            "do" => TokenKind::Do,
            "else" => TokenKind::Else,
            "enum" => TokenKind::Enum,
            "export" => TokenKind::Export,
            "extends" => TokenKind::Extends,
            "false" => TokenKind::False,
            "finally" => TokenKind::Finally,
            "for" => TokenKind::For,
            "function" => TokenKind::Function,
            "if" => TokenKind::If,
            "import" => TokenKind::Import,
            "in" => TokenKind::In,
            "instanceof" => TokenKind::Instanceof,
            "new" => TokenKind::New,
            "null" => TokenKind::Null,
            "return" => TokenKind::Return,
            "super" => TokenKind::Super,
            "switch" => TokenKind::Switch,
            "this" => TokenKind::This,
            "throw" => TokenKind::Throw,
            "true" => TokenKind::True,
            "try" => TokenKind::Try,
            "typeof" => TokenKind::Typeof,
            "var" => TokenKind::Var,
            "void" => TokenKind::Void,
            "while" => TokenKind::While,
            "with" => TokenKind::With,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns the source spelling of a reserved word.
    pub fn keyword_str(&self) -> Option<&'static str> {
        let name = match self {
            TokenKind::Break => "break",
            TokenKind::Case => "case",
            TokenKind::Catch => "catch",
            TokenKind::Class => "class",
            TokenKind::Const => "const",
            TokenKind::Continue => "continue",
            TokenKind::Debugger => "debugger",
            TokenKind::Default => "default",
            TokenKind::Delete => "delete",
            TokenKind::Do => "do",
            TokenKind::Else => "else",
            TokenKind::Enum => "enum",
            TokenKind::Export => "export",
            TokenKind::Extends => "extends",
            TokenKind::False => "false",
            TokenKind::Finally => "finally",
            TokenKind::For => "for",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::Import => "import",
            TokenKind::In => "in",
            TokenKind::Instanceof => "instanceof",
            TokenKind::New => "new",
            TokenKind::Null => "null",
            TokenKind::Return => "return",
            TokenKind::Super => "super",
            TokenKind::Switch => "switch",
            TokenKind::This => "this",
            TokenKind::Throw => "throw",
            TokenKind::True => "true",
            TokenKind::Try => "try",
            TokenKind::Typeof => "typeof",
            TokenKind::Var => "var",
            TokenKind::Void => "void",
            TokenKind::While => "while",
            TokenKind::With => "with",
            _ => return None,
        };
        Some(name)
    }

    /// Returns true if this token is a reserved word.
    pub fn is_keyword(&self) -> bool {
        self.keyword_str().is_some()
    }

    /// Returns the IdentifierName spelled by this token, if any.
    ///
    /// Reserved words count: they are valid property names.
    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            TokenKind::Identifier(name) => Some(name),
            _ => self.keyword_str(),
        }
    }

    /// Returns true if this token is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Number(_)
                | TokenKind::BigInt(_)
                | TokenKind::String(_)
                | TokenKind::Template { .. }
                | TokenKind::RegExp { .. }
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    /// Returns true for `=` and every compound assignment operator.
    pub fn is_assign(&self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::PlusEqual
                | TokenKind::MinusEqual
                | TokenKind::StarEqual
                | TokenKind::SlashEqual
                | TokenKind::PercentEqual
                | TokenKind::StarStarEqual
                | TokenKind::LeftShiftEqual
                | TokenKind::RightShiftEqual
                | TokenKind::UnsignedRightShiftEqual
                | TokenKind::AmpersandEqual
                | TokenKind::PipeEqual
                | TokenKind::CaretEqual
                | TokenKind::AmpersandAmpersandEqual
                | TokenKind::PipePipeEqual
                | TokenKind::QuestionQuestionEqual
        )
    }

    /// A short human readable description used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Number(_) | TokenKind::BigInt(_) => "number".to_string(),
            TokenKind::String(_) => "string".to_string(),
            TokenKind::Template { .. } => "template".to_string(),
            TokenKind::RegExp { .. } => "regular expression".to_string(),
            TokenKind::Identifier(name) => format!("identifier '{}'", name),
            TokenKind::PrivateIdentifier(name) => format!("private name '#{}'", name),
            TokenKind::Eof => "end of input".to_string(),
            other => match other.keyword_str() {
                Some(kw) => format!("keyword '{}'", kw),
                None => format!("{:?}", other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_new() {
        let span = Span::new(0, 10);
        assert_eq!(span.start, 0);
        assert_eq!(span.end, 10);
        assert!(span.loc.is_none());
    }

    #[test]
    fn test_span_len_and_contains() {
        let outer = Span::new(5, 15);
        assert_eq!(outer.len(), 10);
        assert!(outer.contains(&Span::new(5, 6)));
        assert!(outer.contains(&Span::new(14, 15)));
        assert!(!outer.contains(&Span::new(4, 6)));
        assert!(Span::new(5, 5).is_empty());
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("if"), Some(TokenKind::If));
        assert_eq!(TokenKind::keyword("null"), Some(TokenKind::Null));
        assert_eq!(TokenKind::keyword("let"), None);
        assert_eq!(TokenKind::keyword("await"), None);
        assert_eq!(TokenKind::keyword("yield"), None);
    }

    #[test]
    fn test_keyword_round_trip_spelling() {
        for kw in ["break", "class", "enum", "instanceof", "typeof", "with"] {
            let kind = TokenKind::keyword(kw).unwrap();
            assert!(kind.is_keyword());
            assert_eq!(kind.keyword_str(), Some(kw));
        }
    }

    #[test]
    fn test_identifier_name() {
        assert_eq!(
            TokenKind::Identifier("foo".to_string()).identifier_name(),
            Some("foo")
        );
        assert_eq!(TokenKind::Default.identifier_name(), Some("default"));
        assert_eq!(TokenKind::Plus.identifier_name(), None);
    }

    #[test]
    fn test_is_literal() {
        assert!(TokenKind::Number(42.0).is_literal());
        assert!(TokenKind::BigInt("123".to_string()).is_literal());
        assert!(
            TokenKind::RegExp {
                pattern: ".*".to_string(),
                flags: "g".to_string()
            }
            .is_literal()
        );
        assert!(!TokenKind::If.is_literal());
        assert!(!TokenKind::Identifier("x".to_string()).is_literal());
    }

    #[test]
    fn test_is_assign() {
        assert!(TokenKind::Equal.is_assign());
        assert!(TokenKind::QuestionQuestionEqual.is_assign());
        assert!(!TokenKind::EqualEqual.is_assign());
        assert!(!TokenKind::Arrow.is_assign());
    }

    #[test]
    fn test_token_flags() {
        let mut token = Token::new(TokenKind::Identifier("x".to_string()), Span::new(0, 1));
        assert!(!token.newline_before());
        token.flags |= TokenFlags::NEWLINE_BEFORE | TokenFlags::ESCAPED;
        assert!(token.newline_before());
        assert!(token.is_escaped());
    }
}
