//! Character classification for identifiers, whitespace and line terminators.
//!
//! Identifier characters follow Unicode `ID_Start` / `ID_Continue`.
//! `unicode-xid` provides the XID variants, which drop a few code points
//! that are unstable under NFKC; those are added back here. `$`, `_`,
//! ZWNJ and ZWJ are added as the grammar requires.

use unicode_xid::UnicodeXID;

/// Zero width non-joiner, allowed inside identifiers.
pub const ZWNJ: char = '\u{200C}';
/// Zero width joiner, allowed inside identifiers.
pub const ZWJ: char = '\u{200D}';

/// Returns true for `ID_Start` code points missing from `XID_Start`.
fn is_nfkc_unstable_start(ch: char) -> bool {
    matches!(
        ch,
        '\u{037A}'
            | '\u{0E33}'
            | '\u{0EB3}'
            | '\u{309B}'
            | '\u{309C}'
            | '\u{FC5E}'..='\u{FC63}'
            | '\u{FDFA}'
            | '\u{FDFB}'
            | '\u{FE70}'
            | '\u{FE72}'
            | '\u{FE74}'
            | '\u{FE76}'
            | '\u{FE78}'
            | '\u{FE7A}'
            | '\u{FE7C}'
            | '\u{FE7E}'
            | '\u{FF9E}'
            | '\u{FF9F}'
    )
}

/// Returns true if `ch` can start an identifier.
pub fn is_id_start(ch: char) -> bool {
    if ch.is_ascii() {
        return ch.is_ascii_alphabetic() || ch == '$' || ch == '_';
    }
    UnicodeXID::is_xid_start(ch) || is_nfkc_unstable_start(ch)
}

/// Returns true if `ch` can continue an identifier.
pub fn is_id_continue(ch: char) -> bool {
    if ch.is_ascii() {
        return ch.is_ascii_alphanumeric() || ch == '$' || ch == '_';
    }
    UnicodeXID::is_xid_continue(ch) || is_nfkc_unstable_start(ch) || ch == ZWNJ || ch == ZWJ
}

/// Returns true for LF, CR, LS and PS.
pub fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Returns true for ECMAScript `WhiteSpace` (excluding line terminators).
pub fn is_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\u{000B}'
            | '\u{000C}'
            | ' '
            | '\u{00A0}'
            | '\u{FEFF}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Returns true if `name` is a valid IdentifierName.
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_id_start(first) => chars.all(is_id_continue),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_identifier_chars() {
        assert!(is_id_start('a'));
        assert!(is_id_start('Z'));
        assert!(is_id_start('$'));
        assert!(is_id_start('_'));
        assert!(!is_id_start('1'));
        assert!(is_id_continue('1'));
        assert!(!is_id_continue('-'));
    }

    #[test]
    fn test_unicode_identifier_chars() {
        assert!(is_id_start('ñ'));
        assert!(is_id_start('λ'));
        assert!(is_id_start('中'));
        // Astral plane letter (MATHEMATICAL BOLD CAPITAL A)
        assert!(is_id_start('\u{1D400}'));
        assert!(!is_id_start(ZWJ));
        assert!(is_id_continue(ZWJ));
        assert!(is_id_continue(ZWNJ));
    }

    #[test]
    fn test_id_start_outside_xid_start() {
        for ch in ['\u{037A}', '\u{309B}', '\u{309C}', '\u{FC5E}', '\u{FDFA}', '\u{FE7E}', '\u{FF9E}'] {
            assert!(is_id_start(ch), "{:?}", ch);
            assert!(is_id_continue(ch), "{:?}", ch);
        }
        assert!(is_identifier_name("\u{309B}a\u{FF9F}"));
        assert!(is_identifier_name("a\u{0E33}"));
        assert!(!is_id_start('\u{2E2F}'));
    }

    #[test]
    fn test_whitespace_and_terminators() {
        assert!(is_whitespace(' '));
        assert!(is_whitespace('\u{FEFF}'));
        assert!(is_whitespace('\u{3000}'));
        assert!(!is_whitespace('\n'));
        assert!(is_line_terminator('\u{2028}'));
        assert!(is_line_terminator('\r'));
        assert!(!is_line_terminator(' '));
    }

    #[test]
    fn test_is_identifier_name() {
        assert!(is_identifier_name("foo"));
        assert!(is_identifier_name("$_1"));
        assert!(!is_identifier_name("1a"));
        assert!(!is_identifier_name(""));
    }
}
