//! Patterns, placeables and expressions.
//!
//! Multiline patterns are dedented by the smallest indentation among their
//! continuation lines. Blank lines are kept as line breaks and trailing
//! whitespace after the last non-blank element is dropped.

use super::ast::*;
use super::error::ParseErrorKind;
use super::resource::{PResult, Parser};
use super::token;

/// Maximum nesting of placeables and call arguments within one entry.
pub const MAX_NESTING: usize = 100;

/// Where a text slice begins relative to the pattern's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextRole {
    /// On the same line as the `=` or `]` that opened the pattern.
    InitialLineStart,
    /// At the start of a continuation line, indentation included.
    LineStart,
    /// After a placeable on the same line.
    Continuation,
}

/// How a text slice ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Termination {
    LineEnd,
    PlaceableStart,
    Eof,
}

struct TextSlice {
    content_end: usize,
    blank: bool,
    termination: Termination,
}

/// A pattern element before dedenting. Text is kept as byte offsets until
/// the common indentation is known.
enum PendingElement {
    Text {
        start: usize,
        end: usize,
        indent: usize,
        role: TextRole,
        newline: bool,
    },
    Placeable(Expression),
}

impl Parser<'_> {
    /// Parse a pattern after `=` or a variant key. Returns `None` if the
    /// pattern is empty.
    pub(super) fn pattern(&mut self) -> PResult<Option<Pattern>> {
        let mut elements = Vec::new();
        let mut last_non_blank = None;
        let mut common_indent: Option<usize> = None;

        self.skip_blank_inline();
        let mut role = if self.skip_eol() {
            self.skip_blank_block();
            TextRole::LineStart
        } else {
            TextRole::InitialLineStart
        };

        while !self.is_eof() {
            if self.take_char_if('{') {
                if role == TextRole::LineStart {
                    common_indent = Some(0);
                }
                let expression = self.placeable()?;
                last_non_blank = Some(elements.len());
                elements.push(PendingElement::Placeable(expression));
                role = TextRole::Continuation;
                continue;
            }

            let line_start = self.input;
            let start = self.pos();
            let mut indent = 0;
            if role == TextRole::LineStart {
                indent = self.skip_blank_inline();
                let Some(c) = self.peek() else {
                    break;
                };
                if indent == 0 {
                    if c != '\n' && c != '\r' {
                        break;
                    }
                } else if !token::is_pattern_continuation(c) {
                    self.input = line_start;
                    break;
                }
            }

            let slice = self.text_slice()?;
            let newline = slice.termination == Termination::LineEnd;
            if slice.content_end != start || newline {
                if role == TextRole::LineStart && !slice.blank {
                    common_indent = Some(common_indent.map_or(indent, |common| common.min(indent)));
                }
                if role != TextRole::LineStart || !slice.blank || newline {
                    if !slice.blank {
                        last_non_blank = Some(elements.len());
                    }
                    elements.push(PendingElement::Text {
                        start,
                        end: slice.content_end,
                        indent,
                        role,
                        newline,
                    });
                }
            }

            role = match slice.termination {
                Termination::LineEnd => TextRole::LineStart,
                Termination::PlaceableStart | Termination::Eof => TextRole::Continuation,
            };
        }

        let Some(last_non_blank) = last_non_blank else {
            return Ok(None);
        };

        let mut built: Vec<PatternElement> = Vec::new();
        for (index, element) in elements.into_iter().take(last_non_blank + 1).enumerate() {
            match element {
                PendingElement::Placeable(expression) => {
                    built.push(PatternElement::Placeable(Placeable {
                        expression: Box::new(expression),
                    }));
                }
                PendingElement::Text {
                    start,
                    end,
                    indent,
                    role,
                    newline,
                } => {
                    let start = match role {
                        TextRole::LineStart => start + common_indent.map_or(indent, |c| c.min(indent)),
                        TextRole::InitialLineStart | TextRole::Continuation => start,
                    };
                    let mut value = self.source[start..end].to_string();
                    if newline {
                        value.push('\n');
                    }
                    if index == last_non_blank {
                        value.truncate(value.trim_end_matches([' ', '\n', '\r']).len());
                    }
                    push_text(&mut built, value);
                }
            }
        }

        Ok(Some(Pattern {
            elements: built.into(),
        }))
    }

    /// Consume text up to a line end, a placeable, or the end of input.
    fn text_slice(&mut self) -> PResult<TextSlice> {
        let end = self
            .input
            .find(['\n', '\r', '{', '}'])
            .unwrap_or(self.input.len());
        let blank = self.input[..end].chars().all(|c| c == ' ');
        self.input = &self.input[end..];
        let content_end = self.pos();

        let termination = match self.peek() {
            None => Termination::Eof,
            Some('{') => Termination::PlaceableStart,
            Some('}') => return Err(self.error(ParseErrorKind::UnbalancedClosingBrace)),
            Some(_) => {
                self.skip_eol();
                Termination::LineEnd
            }
        };

        Ok(TextSlice {
            content_end,
            blank,
            termination,
        })
    }

    /// Parse the inside of a placeable; the opening `{` is already consumed.
    fn placeable(&mut self) -> PResult<Expression> {
        self.nested(|parser| {
            parser.skip_blank();
            let expression = parser.expression()?;
            parser.skip_blank();
            parser.expect_char('}')?;
            Ok(expression)
        })
    }

    /// Run `f` one nesting level deeper, failing past [`MAX_NESTING`].
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(ParseErrorKind::TooDeeplyNested(MAX_NESTING)));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Parse an inline expression, or a select expression if `->` follows.
    fn expression(&mut self) -> PResult<Expression> {
        let selector = self.inline_expression(false)?;
        self.skip_blank();

        if !self.input.starts_with("->") {
            if let Expression::TermReference(TermReference {
                attribute: Some(_),
                ..
            }) = &selector
            {
                return Err(self.error(ParseErrorKind::TermAttributeAsPlaceable));
            }
            return Ok(selector);
        }

        let invalid_selector = match &selector {
            Expression::MessageReference(reference) if reference.attribute.is_none() => {
                Some(ParseErrorKind::MessageReferenceAsSelector)
            }
            Expression::MessageReference(_) => Some(ParseErrorKind::MessageAttributeAsSelector),
            Expression::TermReference(reference) if reference.attribute.is_none() => {
                Some(ParseErrorKind::TermReferenceAsSelector)
            }
            Expression::Placeable(_) | Expression::Select(_) => {
                Some(ParseErrorKind::ExpectedSimpleExpressionAsSelector)
            }
            _ => None,
        };
        if let Some(kind) = invalid_selector {
            return Err(self.error(kind));
        }

        self.input = &self.input[2..];
        self.skip_blank_inline();
        if !self.skip_eol() {
            return Err(self.error(ParseErrorKind::ExpectedToken('⏎')));
        }

        let variants = self.variants()?;
        Ok(Expression::Select(SelectExpression {
            selector: Box::new(selector),
            variants: variants.into(),
        }))
    }

    fn variants(&mut self) -> PResult<Vec<Variant>> {
        let mut variants = Vec::new();
        let mut has_default = false;

        self.skip_blank();
        while matches!(self.peek(), Some('*' | '[')) {
            let default = self.take_char_if('*');
            if default {
                if has_default {
                    return Err(self.error(ParseErrorKind::MultipleDefaultVariants));
                }
                has_default = true;
            }
            self.expect_char('[')?;
            let key = self.variant_key()?;
            let Some(value) = self.pattern()? else {
                return Err(self.error(ParseErrorKind::MissingValue));
            };
            variants.push(Variant {
                key,
                value,
                default,
            });
            self.skip_blank();
        }

        if variants.is_empty() {
            return Err(self.error(ParseErrorKind::MissingVariants));
        }
        if !has_default {
            return Err(self.error(ParseErrorKind::MissingDefaultVariant));
        }
        Ok(variants)
    }

    fn variant_key(&mut self) -> PResult<VariantKey> {
        self.skip_blank();
        let key = match self.peek() {
            None | Some(']') => return Err(self.error(ParseErrorKind::MissingVariantKey)),
            Some(c) if c.is_ascii_digit() || c == '-' => {
                VariantKey::NumberLiteral(self.number_literal()?)
            }
            Some(_) => VariantKey::Identifier(self.identifier()?),
        };
        self.skip_blank();
        self.expect_char(']')?;
        Ok(key)
    }

    /// Parse an inline expression. With `only_literal`, anything but a
    /// string or number literal is an error.
    fn inline_expression(&mut self, only_literal: bool) -> PResult<Expression> {
        match self.peek() {
            Some('"') => return self.string_literal().map(Expression::StringLiteral),
            Some(c) if c.is_ascii_digit() => {
                return self.number_literal().map(Expression::NumberLiteral);
            }
            Some('-') if self.peek_second().is_some_and(|c| c.is_ascii_digit()) => {
                return self.number_literal().map(Expression::NumberLiteral);
            }
            _ => {}
        }

        if only_literal {
            return Err(self.error(ParseErrorKind::MissingLiteral));
        }

        match self.peek() {
            Some('$') => {
                self.bump();
                let id = self.identifier()?;
                Ok(Expression::VariableReference(VariableReference { id }))
            }
            Some('-') => {
                self.bump();
                let id = self.identifier()?;
                let attribute = self.attribute_accessor()?;
                let arguments = self.optional_call_arguments()?;
                Ok(Expression::TermReference(TermReference {
                    id,
                    attribute,
                    arguments,
                }))
            }
            Some('{') => {
                self.bump();
                let expression = self.placeable()?;
                Ok(Expression::Placeable(Placeable {
                    expression: Box::new(expression),
                }))
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let id = self.identifier()?;
                let attribute = self.attribute_accessor()?;
                if attribute.is_none() {
                    let checkpoint = self.input;
                    self.skip_blank();
                    if self.peek() == Some('(') {
                        if !token::is_callee(&id.name) {
                            return Err(self.error(ParseErrorKind::ForbiddenCallee));
                        }
                        let arguments = self.call_arguments()?;
                        return Ok(Expression::FunctionReference(FunctionReference {
                            id,
                            arguments,
                        }));
                    }
                    self.input = checkpoint;
                }
                Ok(Expression::MessageReference(MessageReference { id, attribute }))
            }
            _ => Err(self.error(ParseErrorKind::ExpectedInlineExpression)),
        }
    }

    fn attribute_accessor(&mut self) -> PResult<Option<Identifier>> {
        if self.take_char_if('.') {
            Ok(Some(self.identifier()?))
        } else {
            Ok(None)
        }
    }

    fn optional_call_arguments(&mut self) -> PResult<Option<CallArguments>> {
        let checkpoint = self.input;
        self.skip_blank();
        if self.peek() == Some('(') {
            return self.call_arguments().map(Some);
        }
        self.input = checkpoint;
        Ok(None)
    }

    /// Parse `( ... )` call arguments.
    fn call_arguments(&mut self) -> PResult<CallArguments> {
        self.nested(Self::argument_list)
    }

    fn argument_list(&mut self) -> PResult<CallArguments> {
        self.expect_char('(')?;
        let mut positional = Vec::new();
        let mut named: Vec<NamedArgument> = Vec::new();

        loop {
            self.skip_blank();
            if self.peek() == Some(')') {
                break;
            }

            let argument = self.inline_expression(false)?;
            self.skip_blank();
            if self.take_char_if(':') {
                let Expression::MessageReference(MessageReference {
                    id: name,
                    attribute: None,
                }) = argument
                else {
                    return Err(self.error(ParseErrorKind::ForbiddenKey));
                };
                self.skip_blank();
                let value = self.literal()?;
                if named.iter().any(|arg| arg.name == name) {
                    return Err(self.error(ParseErrorKind::DuplicatedNamedArgument(name.name)));
                }
                named.push(NamedArgument { name, value });
            } else {
                if !named.is_empty() {
                    return Err(self.error(ParseErrorKind::PositionalArgumentFollowsNamed));
                }
                positional.push(argument);
            }

            self.skip_blank();
            if !self.take_char_if(',') {
                break;
            }
        }

        self.skip_blank();
        self.expect_char(')')?;
        Ok(CallArguments {
            positional: positional.into(),
            named: named.into(),
        })
    }

    fn literal(&mut self) -> PResult<Literal> {
        match self.inline_expression(true)? {
            Expression::StringLiteral(literal) => Ok(Literal::String(literal)),
            Expression::NumberLiteral(literal) => Ok(Literal::Number(literal)),
            _ => Err(self.error(ParseErrorKind::MissingLiteral)),
        }
    }

    fn number_literal(&mut self) -> PResult<NumberLiteral> {
        let Ok(raw) = token::number(&mut self.input) else {
            return Err(self.error(ParseErrorKind::ExpectedCharRange("0-9")));
        };
        let Ok(value) = raw.parse::<f64>() else {
            return Err(self.error(ParseErrorKind::ExpectedCharRange("0-9")));
        };
        Ok(NumberLiteral {
            value,
            raw: raw.to_string(),
        })
    }

    fn string_literal(&mut self) -> PResult<StringLiteral> {
        self.expect_char('"')?;
        let raw_start = self.pos();
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n' | '\r') => {
                    return Err(self.error(ParseErrorKind::UnterminatedStringExpression));
                }
                Some('"') => break,
                Some('\\') => {
                    self.bump();
                    value.push(self.escape()?);
                }
                Some(c) => {
                    self.bump();
                    value.push(c);
                }
            }
        }
        let raw = self.source[raw_start..self.pos()].to_string();
        self.bump();
        Ok(StringLiteral { value, raw })
    }

    /// Decode one escape sequence; the backslash is already consumed.
    fn escape(&mut self) -> PResult<char> {
        match self.peek() {
            Some('\\') => {
                self.bump();
                Ok('\\')
            }
            Some('"') => {
                self.bump();
                Ok('"')
            }
            Some(marker @ ('u' | 'U')) => {
                self.bump();
                let len = if marker == 'u' { 4 } else { 6 };
                let digits = token::hex_digits(&mut self.input, len).unwrap_or_default();
                if digits.len() != len {
                    let sequence = format!("\\{marker}{digits}");
                    return Err(self.error(ParseErrorKind::InvalidUnicodeEscapeSequence(sequence)));
                }
                // Surrogates and out-of-range code points decode to U+FFFD.
                Ok(u32::from_str_radix(digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER))
            }
            Some(c) if c != '\n' && c != '\r' => Err(self.error(ParseErrorKind::UnknownEscapeSequence(c))),
            _ => Err(self.error(ParseErrorKind::UnterminatedStringExpression)),
        }
    }
}

/// Append text to a pattern, merging it into a preceding text element.
fn push_text(elements: &mut Vec<PatternElement>, value: String) {
    if value.is_empty() {
        return;
    }
    if let Some(PatternElement::Text(previous)) = elements.last_mut() {
        previous.value.push_str(&value);
    } else {
        elements.push(PatternElement::Text(TextElement { value }));
    }
}
