//! Numeric literal scanning and literal value helpers.
//!
//! ## Numeric Literals
//!
//! ```text
//! 42        -> Integer
//! 3.14      -> Float
//! .5        -> Float (no leading zero)
//! 1.5e-3    -> Exponential
//! 1_000_000 -> With separators
//! 42n       -> BigInt
//! ```
//!
//! | Prefix | Base | Example |
//! |--------|------|---------|
//! | `0x` | 16 | `0xFF` |
//! | `0o` | 8 | `0o777` |
//! | `0b` | 2 | `0b1010` |
//! | `0` | 8 (legacy) | `0777` |
//!
//! Legacy octal literals (`010`) and leading-zero decimals (`08`) carry
//! [`TokenFlags::LEGACY_OCTAL`] so the parser can reject them in strict code.
//! Integer literals wider than 53 bits are converted through `num-bigint` so
//! the nearest double is produced; BigInt values are stored in decimal.

use num_bigint::BigUint;
use num_traits::{Num, ToPrimitive};

use super::identifiers::is_id_start;
use super::{Scanner, TokenFlags, TokenKind};
use crate::error::Result;

impl Scanner<'_> {
    pub(super) fn scan_number(&mut self, flags: &mut TokenFlags) -> Result<TokenKind> {
        let start = self.pos;

        if self.peek() == Some('0') {
            let radix = match self.peek_next() {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.advance();
                self.advance();
                let digits = self.scan_digits(radix, flags)?;
                if digits.is_empty() {
                    return Err(self.error(start, format!("Expected number in radix {}", radix)));
                }
                let kind = if self.eat('n') {
                    TokenKind::BigInt(bigint_decimal(&digits, radix))
                } else {
                    TokenKind::Number(radix_to_f64(&digits, radix))
                };
                self.check_number_end(start)?;
                return Ok(kind);
            }
            if matches!(self.peek_next(), Some('0'..='9' | '_')) {
                return self.scan_legacy_octal(start, flags);
            }
        }

        let digits = if self.peek() == Some('.') {
            String::new()
        } else {
            self.scan_digits(10, flags)?
        };
        self.scan_decimal_tail(digits, start, flags, true)
    }

    /// Scans the fraction, exponent and BigInt suffix after integer digits.
    fn scan_decimal_tail(
        &mut self,
        mut text: String,
        start: usize,
        flags: &mut TokenFlags,
        allow_bigint: bool,
    ) -> Result<TokenKind> {
        let mut is_integer = true;

        if self.eat('.') {
            is_integer = false;
            text.push('.');
            text.push_str(&self.scan_digits(10, flags)?);
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            is_integer = false;
            self.advance();
            text.push('e');
            if let Some(sign @ ('+' | '-')) = self.peek() {
                self.advance();
                text.push(sign);
            }
            let exponent = self.scan_digits(10, flags)?;
            if exponent.is_empty() {
                return Err(self.error(start, "Invalid number"));
            }
            text.push_str(&exponent);
        }

        if self.peek() == Some('n') {
            if !is_integer || !allow_bigint {
                return Err(self.error(start, "Invalid BigInt syntax"));
            }
            self.advance();
            self.check_number_end(start)?;
            return Ok(TokenKind::BigInt(bigint_decimal(&text, 10)));
        }

        self.check_number_end(start)?;
        let value = text
            .parse::<f64>()
            .map_err(|_| self.error(start, "Invalid number"))?;
        Ok(TokenKind::Number(value))
    }

    /// `0777` (octal) or `089` (decimal with a leading zero).
    fn scan_legacy_octal(&mut self, start: usize, flags: &mut TokenFlags) -> Result<TokenKind> {
        let mut digits = String::new();
        let mut octal = true;

        while let Some(ch) = self.peek() {
            if ch == '_' {
                return Err(self.error(
                    self.pos,
                    "Numeric separator is not allowed in legacy octal-like literals",
                ));
            }
            if !ch.is_ascii_digit() {
                break;
            }
            if ch >= '8' {
                octal = false;
            }
            digits.push(ch);
            self.advance();
        }
        *flags |= TokenFlags::LEGACY_OCTAL;

        if octal {
            self.check_number_end(start)?;
            Ok(TokenKind::Number(radix_to_f64(&digits, 8)))
        } else {
            self.scan_decimal_tail(digits, start, flags, false)
        }
    }

    /// Scans digits of `radix`, validating `_` separator placement. The
    /// returned string has the separators removed.
    fn scan_digits(&mut self, radix: u32, flags: &mut TokenFlags) -> Result<String> {
        let mut digits = String::new();
        let mut last_was_separator = false;

        while let Some(ch) = self.peek() {
            if ch == '_' {
                if digits.is_empty() || last_was_separator {
                    return Err(self.error(self.pos, "Numeric separator is not allowed here"));
                }
                last_was_separator = true;
                *flags |= TokenFlags::NUMERIC_SEPARATOR;
                self.advance();
                continue;
            }
            if !ch.is_digit(radix) {
                break;
            }
            digits.push(ch);
            last_was_separator = false;
            self.advance();
        }

        if last_was_separator {
            return Err(self.error(
                self.pos - 1,
                "Numeric separator is not allowed at the last of digits",
            ));
        }
        Ok(digits)
    }

    fn check_number_end(&self, start: usize) -> Result<()> {
        match self.peek() {
            Some(ch) if is_id_start(ch) || ch.is_ascii_digit() || ch == '\\' => {
                Err(self.error(start, "Identifier directly after number"))
            }
            _ => Ok(()),
        }
    }
}

/// Converts integer digits of `radix` to the nearest double.
pub fn radix_to_f64(digits: &str, radix: u32) -> f64 {
    BigUint::from_str_radix(digits, radix)
        .ok()
        .and_then(|value| value.to_f64())
        .unwrap_or(f64::INFINITY)
}

/// Renders integer digits of `radix` as a decimal BigInt string.
pub fn bigint_decimal(digits: &str, radix: u32) -> String {
    BigUint::from_str_radix(digits, radix)
        .map(|value| value.to_string())
        .unwrap_or_else(|_| digits.to_string())
}

/// Returns true for a UTF-16 high (leading) surrogate.
pub fn is_high_surrogate(cp: u32) -> bool {
    (0xD800..=0xDBFF).contains(&cp)
}

/// Returns true for a UTF-16 low (trailing) surrogate.
pub fn is_low_surrogate(cp: u32) -> bool {
    (0xDC00..=0xDFFF).contains(&cp)
}

/// Combines a surrogate pair into one scalar value.
pub fn combine_surrogates(high: u32, low: u32) -> char {
    let cp = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER)
}
