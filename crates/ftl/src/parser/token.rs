//! Token-level parsers using winnow.
//!
//! These recognize the lexical pieces of FTL (identifiers, numbers, blanks,
//! line ends, escapes). The entry-level grammar in [`super::resource`] drives
//! them and maps their failures onto [`super::ParseErrorKind`]s.

use winnow::combinator::{alt, opt};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

/// Parse an identifier: `[a-zA-Z][a-zA-Z0-9_-]*`.
pub(super) fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., is_ident_cont),
    )
        .take()
        .parse_next(input)
}

/// Parse a number literal: `-?[0-9]+(\.[0-9]+)?`.
pub(super) fn number<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (opt('-'), digits, opt(('.', digits)))
        .take()
        .parse_next(input)
}

/// Parse one or more ASCII digits.
fn digits<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)
}

/// Parse inline blank space (spaces only; tabs are not blank in FTL).
pub(super) fn blank_inline<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(0.., ' ').parse_next(input)
}

/// Parse a line ending. CRLF, LF and a lone CR all count as one newline.
pub(super) fn line_end(input: &mut &str) -> ModalResult<()> {
    alt(("\r\n", "\n", "\r")).void().parse_next(input)
}

/// Parse a run of hex digits, at most `max` long.
pub(super) fn hex_digits<'i>(input: &mut &'i str, max: usize) -> ModalResult<&'i str> {
    take_while(0..=max, |c: char| c.is_ascii_hexdigit()).parse_next(input)
}

/// Check if a character can continue an identifier.
pub(super) fn is_ident_cont(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Check if an identifier is a valid function callee (`[A-Z][A-Z0-9_-]*`).
pub(super) fn is_callee(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

/// Check if a character may start an indented continuation line of a
/// pattern. Lines starting with these belong to the surrounding syntax.
pub(super) fn is_pattern_continuation(c: char) -> bool {
    !matches!(c, '}' | '.' | '[' | '*')
}
