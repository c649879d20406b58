//! Punctuator scanning.
//!
//! Multi-character operators are resolved by maximal munch: each leading
//! character has a scanner method that peeks ahead for the longest match.
//!
//! | Token | Variants |
//! |-------|----------|
//! | `+` | `+`, `++`, `+=` |
//! | `-` | `-`, `--`, `-=` |
//! | `*` | `*`, `**`, `*=`, `**=` |
//! | `/` | `/`, `/=` |
//! | `%` | `%`, `%=` |
//! | `<` | `<`, `<=`, `<<`, `<<=` |
//! | `>` | `>`, `>=`, `>>`, `>>>`, `>>=`, `>>>=` |
//! | `=` | `=`, `==`, `===`, `=>` |
//! | `!` | `!`, `!=`, `!==` |
//! | `&` | `&`, `&&`, `&=`, `&&=` |
//! | `\|` | `\|`, `\|\|`, `\|=`, `\|\|=` |
//! | `^` | `^`, `^=` |
//! | `?` | `?`, `?.`, `??`, `??=` |
//! | `.` | `.`, `...` |
//!
//! `/` is always scanned as division here; the parser asks for a regular
//! expression through `Scanner::rescan_regex` when it expects an operand.
//! `?.` followed by a decimal digit is a conditional operator and a number
//! (`a?.5:b`).

use super::{Scanner, TokenKind};

impl Scanner<'_> {
    /// Scans the punctuator starting with `ch`, or returns `None` if `ch`
    /// cannot start one.
    pub(super) fn scan_punctuator(&mut self, ch: char) -> Option<TokenKind> {
        self.advance();
        let kind = match ch {
            '.' => self.scan_dot()?,
            '+' => self.scan_repeat_or_assign(
                '+',
                TokenKind::Plus,
                TokenKind::PlusPlus,
                TokenKind::PlusEqual,
            ),
            '-' => self.scan_repeat_or_assign(
                '-',
                TokenKind::Minus,
                TokenKind::MinusMinus,
                TokenKind::MinusEqual,
            ),
            '*' => self.scan_star(),
            '/' => self.with_assign(TokenKind::Slash, TokenKind::SlashEqual),
            '%' => self.with_assign(TokenKind::Percent, TokenKind::PercentEqual),
            '^' => self.with_assign(TokenKind::Caret, TokenKind::CaretEqual),
            '<' => self.scan_less_than(),
            '>' => self.scan_greater_than(),
            '=' => self.scan_equal(),
            '!' => self.scan_bang(),
            '&' => self.scan_logical(
                '&',
                TokenKind::Ampersand,
                TokenKind::AmpersandEqual,
                TokenKind::AmpersandAmpersand,
                TokenKind::AmpersandAmpersandEqual,
            ),
            '|' => self.scan_logical(
                '|',
                TokenKind::Pipe,
                TokenKind::PipeEqual,
                TokenKind::PipePipe,
                TokenKind::PipePipeEqual,
            ),
            '?' => self.scan_question(),
            _ => return None,
        };
        Some(kind)
    }

    fn with_assign(&mut self, plain: TokenKind, assign: TokenKind) -> TokenKind {
        if self.eat('=') {
            assign
        } else {
            plain
        }
    }

    /// `+`/`-`: doubled form or compound assignment.
    fn scan_repeat_or_assign(
        &mut self,
        ch: char,
        plain: TokenKind,
        doubled: TokenKind,
        assign: TokenKind,
    ) -> TokenKind {
        if self.eat(ch) {
            doubled
        } else if self.eat('=') {
            assign
        } else {
            plain
        }
    }

    /// `&`/`|`: bitwise, logical, and both assignment forms.
    fn scan_logical(
        &mut self,
        ch: char,
        bitwise: TokenKind,
        bitwise_assign: TokenKind,
        logical: TokenKind,
        logical_assign: TokenKind,
    ) -> TokenKind {
        if self.eat(ch) {
            self.with_assign(logical, logical_assign)
        } else {
            self.with_assign(bitwise, bitwise_assign)
        }
    }

    fn scan_dot(&mut self) -> Option<TokenKind> {
        if self.peek() == Some('.') && self.peek_next() == Some('.') {
            self.advance();
            self.advance();
            Some(TokenKind::Ellipsis)
        } else if self.peek() == Some('.') {
            // ".." is never valid
            None
        } else {
            Some(TokenKind::Dot)
        }
    }

    fn scan_star(&mut self) -> TokenKind {
        if self.eat('*') {
            self.with_assign(TokenKind::StarStar, TokenKind::StarStarEqual)
        } else {
            self.with_assign(TokenKind::Star, TokenKind::StarEqual)
        }
    }

    fn scan_less_than(&mut self) -> TokenKind {
        if self.eat('<') {
            self.with_assign(TokenKind::LeftShift, TokenKind::LeftShiftEqual)
        } else {
            self.with_assign(TokenKind::LessThan, TokenKind::LessThanEqual)
        }
    }

    fn scan_greater_than(&mut self) -> TokenKind {
        if self.eat('>') {
            if self.eat('>') {
                self.with_assign(TokenKind::UnsignedRightShift, TokenKind::UnsignedRightShiftEqual)
            } else {
                self.with_assign(TokenKind::RightShift, TokenKind::RightShiftEqual)
            }
        } else {
            self.with_assign(TokenKind::GreaterThan, TokenKind::GreaterThanEqual)
        }
    }

    fn scan_equal(&mut self) -> TokenKind {
        if self.eat('>') {
            TokenKind::Arrow
        } else if self.eat('=') {
            self.with_assign(TokenKind::EqualEqual, TokenKind::StrictEqual)
        } else {
            TokenKind::Equal
        }
    }

    fn scan_bang(&mut self) -> TokenKind {
        if self.eat('=') {
            self.with_assign(TokenKind::NotEqual, TokenKind::StrictNotEqual)
        } else {
            TokenKind::Bang
        }
    }

    fn scan_question(&mut self) -> TokenKind {
        if self.eat('?') {
            self.with_assign(TokenKind::QuestionQuestion, TokenKind::QuestionQuestionEqual)
        } else if self.peek() == Some('.') && !matches!(self.peek_next(), Some('0'..='9')) {
            self.advance();
            TokenKind::QuestionDot
        } else {
            TokenKind::Question
        }
    }
}
