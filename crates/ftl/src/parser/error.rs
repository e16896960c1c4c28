//! Parse error types for FTL.

use thiserror::Error;

use super::ast::{Annotation, Span};

/// An error that occurred while parsing one entry.
///
/// Entry-level errors never abort a parse: the parser turns them into
/// [`Annotation`]s on a [`Junk`](super::ast::Junk) entry and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} at {}..{}: {kind}", kind.code(), span.start, span.end)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Converts this error into the annotation stored on junk.
    pub fn to_annotation(&self) -> Annotation {
        Annotation {
            code: self.kind.code().to_string(),
            message: self.kind.to_string(),
            span: Some(self.span),
        }
    }
}

/// The kind of a syntax error, mirroring the FTL reference error codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Generic error")]
    Generic,
    #[error("Expected an entry start")]
    ExpectedEntry,
    #[error("Expected token: \"{0}\"")]
    ExpectedToken(char),
    #[error("Expected a character from range: \"{0}\"")]
    ExpectedCharRange(&'static str),
    #[error("Expected message \"{0}\" to have a value or attributes")]
    ExpectedMessageField(String),
    #[error("Expected term \"-{0}\" to have a value")]
    ExpectedTermField(String),
    #[error("The callee has to be an upper-case identifier or a term")]
    ForbiddenCallee,
    #[error("The key has to be a simple identifier")]
    ForbiddenKey,
    #[error("Expected one of the variants to be marked as default (*)")]
    MissingDefaultVariant,
    #[error("Expected at least one variant after \"->\"")]
    MissingVariants,
    #[error("Expected value")]
    MissingValue,
    #[error("Expected variant key")]
    MissingVariantKey,
    #[error("Expected literal")]
    MissingLiteral,
    #[error("Only one variant can be marked as default (*)")]
    MultipleDefaultVariants,
    #[error("Message references cannot be used as selectors")]
    MessageReferenceAsSelector,
    #[error("Terms cannot be used as selectors")]
    TermReferenceAsSelector,
    #[error("Attributes of messages cannot be used as selectors")]
    MessageAttributeAsSelector,
    #[error("Attributes of terms cannot be used as placeables")]
    TermAttributeAsPlaceable,
    #[error("Unterminated string expression")]
    UnterminatedStringExpression,
    #[error("Positional arguments must not follow named arguments")]
    PositionalArgumentFollowsNamed,
    #[error("The \"{0}\" argument appears twice")]
    DuplicatedNamedArgument(String),
    #[error("Unknown escape sequence: \\{0}")]
    UnknownEscapeSequence(char),
    #[error("Invalid Unicode escape sequence: {0}")]
    InvalidUnicodeEscapeSequence(String),
    #[error("Unbalanced closing brace in TextElement")]
    UnbalancedClosingBrace,
    #[error("Expected an inline expression")]
    ExpectedInlineExpression,
    #[error("Expected simple expression as selector")]
    ExpectedSimpleExpressionAsSelector,
    #[error("Expressions nested deeper than {0} levels")]
    TooDeeplyNested(usize),
}

impl ParseErrorKind {
    /// The reference error code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::Generic => "E0001",
            ParseErrorKind::ExpectedEntry => "E0002",
            ParseErrorKind::ExpectedToken(_) => "E0003",
            ParseErrorKind::ExpectedCharRange(_) => "E0004",
            ParseErrorKind::ExpectedMessageField(_) => "E0005",
            ParseErrorKind::ExpectedTermField(_) => "E0006",
            ParseErrorKind::ForbiddenCallee => "E0008",
            ParseErrorKind::ForbiddenKey => "E0009",
            ParseErrorKind::MissingDefaultVariant => "E0010",
            ParseErrorKind::MissingVariants => "E0011",
            ParseErrorKind::MissingValue => "E0012",
            ParseErrorKind::MissingVariantKey => "E0013",
            ParseErrorKind::MissingLiteral => "E0014",
            ParseErrorKind::MultipleDefaultVariants => "E0015",
            ParseErrorKind::MessageReferenceAsSelector => "E0016",
            ParseErrorKind::TermReferenceAsSelector => "E0017",
            ParseErrorKind::MessageAttributeAsSelector => "E0018",
            ParseErrorKind::TermAttributeAsPlaceable => "E0019",
            ParseErrorKind::UnterminatedStringExpression => "E0020",
            ParseErrorKind::PositionalArgumentFollowsNamed => "E0021",
            ParseErrorKind::DuplicatedNamedArgument(_) => "E0022",
            ParseErrorKind::UnknownEscapeSequence(_) => "E0025",
            ParseErrorKind::InvalidUnicodeEscapeSequence(_) => "E0026",
            ParseErrorKind::UnbalancedClosingBrace => "E0027",
            ParseErrorKind::ExpectedInlineExpression => "E0028",
            ParseErrorKind::ExpectedSimpleExpressionAsSelector => "E0029",
            ParseErrorKind::TooDeeplyNested(_) => "E0030",
        }
    }
}
