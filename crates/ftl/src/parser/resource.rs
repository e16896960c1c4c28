//! FTL resource parser.
//!
//! A single-pass recursive descent over a cursor into the source text. Each
//! top-level entry is parsed independently: when one fails, the parser skips
//! to the next line that looks like an entry start and keeps the skipped text
//! as [`Junk`], so one malformed entry never takes its neighbours with it.

use super::ast::*;
use super::error::{ParseError, ParseErrorKind};
use super::token;

pub(super) type PResult<T> = Result<T, ParseError>;

/// Parse an FTL source into a [`Resource`].
///
/// Never fails: syntax errors become [`Junk`] entries carrying
/// [`Annotation`]s.
///
/// # Example
///
/// ```
/// use ftl::parser::{Entry, parse};
///
/// let resource = parse("hello = Hello!\nbroken = {\nbye = Bye!\n");
/// assert_eq!(resource.body.len(), 3);
/// assert!(matches!(resource.body[1], Entry::Junk(_)));
/// ```
pub fn parse(source: &str) -> Resource {
    Parser::new(source).resource()
}

/// Calculate 1-based line and column from a byte offset.
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let consumed = source.get(..offset).unwrap_or(source);
    let line = consumed.matches('\n').count() + 1;
    let column = match consumed.rfind('\n') {
        Some(pos) => consumed[pos + 1..].chars().count() + 1,
        None => consumed.chars().count() + 1,
    };
    (line, column)
}

/// Cursor state: the full source and the unparsed remainder.
///
/// The remainder is a subslice of `source`, so the byte offset is always
/// `source.len() - input.len()`. Saving and restoring a position is copying
/// a `&str`.
pub(super) struct Parser<'s> {
    pub(super) source: &'s str,
    pub(super) input: &'s str,
    /// Open placeables and call argument lists around the cursor.
    pub(super) depth: usize,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            input: source,
            depth: 0,
        }
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    pub(super) fn pos(&self) -> usize {
        self.source.len() - self.input.len()
    }

    pub(super) fn is_eof(&self) -> bool {
        self.input.is_empty()
    }

    pub(super) fn peek(&self) -> Option<char> {
        self.input.chars().next()
    }

    pub(super) fn peek_second(&self) -> Option<char> {
        self.input.chars().nth(1)
    }

    pub(super) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.input = &self.input[c.len_utf8()..];
        Some(c)
    }

    pub(super) fn take_char_if(&mut self, expected: char) -> bool {
        match self.input.strip_prefix(expected) {
            Some(rest) => {
                self.input = rest;
                true
            }
            None => false,
        }
    }

    pub(super) fn expect_char(&mut self, expected: char) -> PResult<()> {
        if self.take_char_if(expected) {
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::ExpectedToken(expected)))
        }
    }

    /// Build an error pointing at the current character.
    pub(super) fn error(&self, kind: ParseErrorKind) -> ParseError {
        let start = self.pos();
        let end = start + self.peek().map_or(0, char::len_utf8);
        ParseError::new(kind, Span::new(start, end))
    }

    /// Skip spaces, returning how many were skipped.
    pub(super) fn skip_blank_inline(&mut self) -> usize {
        token::blank_inline(&mut self.input).map_or(0, str::len)
    }

    /// Skip one line ending, if present.
    pub(super) fn skip_eol(&mut self) -> bool {
        token::line_end(&mut self.input).is_ok()
    }

    /// Skip whitespace-only lines, returning how many were skipped.
    ///
    /// Trailing spaces at the end of input count as a blank line.
    pub(super) fn skip_blank_block(&mut self) -> usize {
        let mut count = 0;
        loop {
            let line_start = self.input;
            self.skip_blank_inline();
            if self.skip_eol() {
                count += 1;
                continue;
            }
            if self.is_eof() {
                if line_start.is_empty() {
                    return count;
                }
                return count + 1;
            }
            self.input = line_start;
            return count;
        }
    }

    /// Skip spaces and line endings.
    pub(super) fn skip_blank(&mut self) {
        self.input = self.input.trim_start_matches([' ', '\n', '\r']);
    }

    pub(super) fn identifier(&mut self) -> PResult<Identifier> {
        match token::identifier(&mut self.input) {
            Ok(name) => Ok(Identifier::new(name)),
            Err(_) => Err(self.error(ParseErrorKind::ExpectedCharRange("a-zA-Z"))),
        }
    }

    // =========================================================================
    // Entries
    // =========================================================================

    fn resource(mut self) -> Resource {
        let mut body = Vec::new();
        let mut pending_comment: Option<Comment> = None;

        self.skip_blank_block();
        while !self.is_eof() {
            let entry_start = self.pos();
            match self.entry() {
                Ok(Entry::Comment(comment)) if comment.level == CommentLevel::Comment => {
                    if let Some(previous) = pending_comment.take() {
                        body.push(Entry::Comment(previous));
                    }
                    // A comment directly above a message or term belongs to it.
                    if self.skip_blank_block() == 0 && !self.is_eof() {
                        pending_comment = Some(comment);
                    } else {
                        body.push(Entry::Comment(comment));
                    }
                    continue;
                }
                Ok(entry) => {
                    let entry = attach_comment(entry, pending_comment.take(), &mut body);
                    body.push(entry);
                }
                Err(error) => {
                    if let Some(previous) = pending_comment.take() {
                        body.push(Entry::Comment(previous));
                    }
                    body.push(Entry::Junk(self.junk(entry_start, &error)));
                }
            }
            self.skip_blank_block();
        }

        if let Some(comment) = pending_comment {
            body.push(Entry::Comment(comment));
        }

        Resource { body: body.into() }
    }

    fn entry(&mut self) -> PResult<Entry> {
        match self.peek() {
            Some('#') => self.comment().map(Entry::Comment),
            Some('-') => self.term().map(Entry::Term),
            _ => self.message().map(Entry::Message),
        }
    }

    /// Recover from `error`: skip to the next entry start and keep the
    /// skipped text as junk.
    fn junk(&mut self, entry_start: usize, error: &ParseError) -> Junk {
        self.skip_to_next_entry_start(entry_start);
        let end = self.pos();

        // The annotation must point inside the junk.
        let mut annotation = error.to_annotation();
        if let Some(span) = annotation.span.as_mut()
            && span.start > end
        {
            *span = Span::new(end, end);
        }

        Junk {
            content: self.source[entry_start..end].to_string(),
            annotations: Box::new([annotation]),
            span: Some(Span::new(entry_start, end)),
        }
    }

    /// Advance to the beginning of the next line that starts with an
    /// identifier, `-`, or `#`.
    ///
    /// If the error happened on a later line than the entry start, scanning
    /// restarts at the beginning of that line, so an entry swallowed by an
    /// unterminated placeable is still recovered.
    fn skip_to_next_entry_start(&mut self, entry_start: usize) {
        let error_pos = self.pos();
        if let Some(newline) = self.source[..error_pos].rfind(['\n', '\r'])
            && newline > entry_start
        {
            self.input = &self.source[newline..];
        }
        while let Some(c) = self.bump() {
            if c != '\n' && c != '\r' {
                continue;
            }
            if self
                .peek()
                .is_some_and(|first| first.is_ascii_alphabetic() || first == '-' || first == '#')
            {
                break;
            }
        }
    }

    fn message(&mut self) -> PResult<Message> {
        let start = self.pos();
        let id = self.identifier()?;
        self.skip_blank_inline();
        self.expect_char('=')?;
        let value = self.pattern()?;
        let attributes = self.attributes()?;

        if value.is_none() && attributes.is_empty() {
            return Err(self.error(ParseErrorKind::ExpectedMessageField(id.name)));
        }

        Ok(Message {
            id,
            value,
            attributes: attributes.into(),
            comment: None,
            span: self.span_from(start),
        })
    }

    fn term(&mut self) -> PResult<Term> {
        let start = self.pos();
        self.expect_char('-')?;
        let id = self.identifier()?;
        self.skip_blank_inline();
        self.expect_char('=')?;
        let Some(value) = self.pattern()? else {
            return Err(self.error(ParseErrorKind::ExpectedTermField(id.name)));
        };
        let attributes = self.attributes()?;

        Ok(Term {
            id,
            value,
            attributes: attributes.into(),
            comment: None,
            span: self.span_from(start),
        })
    }

    fn attributes(&mut self) -> PResult<Vec<Attribute>> {
        let mut attributes = Vec::new();
        loop {
            let line_start = self.input;
            self.skip_blank_inline();
            if !self.take_char_if('.') {
                self.input = line_start;
                break;
            }
            attributes.push(self.attribute()?);
        }
        Ok(attributes)
    }

    fn attribute(&mut self) -> PResult<Attribute> {
        let id = self.identifier()?;
        self.skip_blank_inline();
        self.expect_char('=')?;
        match self.pattern()? {
            Some(value) => Ok(Attribute { id, value }),
            None => Err(self.error(ParseErrorKind::MissingValue)),
        }
    }

    /// Span from `start` to the current position, without trailing blanks.
    fn span_from(&self, start: usize) -> Span {
        let text = &self.source[start..self.pos()];
        Span::new(start, start + text.trim_end_matches([' ', '\n', '\r']).len())
    }

    // =========================================================================
    // Comments
    // =========================================================================

    fn comment(&mut self) -> PResult<Comment> {
        let level = self.comment_sigils()?;
        let mut content = Vec::new();
        loop {
            content.push(self.comment_line()?);
            if !self.next_line_is_comment(level) {
                break;
            }
            self.input = &self.input[level.sigil().len()..];
        }
        Ok(Comment {
            level,
            content: content.into(),
        })
    }

    fn comment_sigils(&mut self) -> PResult<CommentLevel> {
        let sigils = self.input.len() - self.input.trim_start_matches('#').len();
        let level = match sigils {
            1 => CommentLevel::Comment,
            2 => CommentLevel::Group,
            3 => CommentLevel::Resource,
            _ => {
                self.input = &self.input[3..];
                return Err(self.error(ParseErrorKind::ExpectedToken(' ')));
            }
        };
        self.input = &self.input[sigils..];
        Ok(level)
    }

    /// The rest of a comment line after its sigils, including the line end.
    fn comment_line(&mut self) -> PResult<String> {
        if self.skip_eol() || self.is_eof() {
            return Ok(String::new());
        }
        self.expect_char(' ')?;
        let end = self.input.find(['\n', '\r']).unwrap_or(self.input.len());
        let text = self.input[..end].to_string();
        self.input = &self.input[end..];
        self.skip_eol();
        Ok(text)
    }

    fn next_line_is_comment(&self, level: CommentLevel) -> bool {
        self.input
            .strip_prefix(level.sigil())
            .is_some_and(|rest| matches!(rest.chars().next(), None | Some(' ' | '\n' | '\r')))
    }
}

/// Attach a pending `#` comment to a message or term; any other entry leaves
/// the comment standalone, pushed ahead of it.
fn attach_comment(entry: Entry, comment: Option<Comment>, body: &mut Vec<Entry>) -> Entry {
    let Some(comment) = comment else {
        return entry;
    };
    match entry {
        Entry::Message(message) => Entry::Message(Message {
            comment: Some(comment),
            ..message
        }),
        Entry::Term(term) => Entry::Term(Term {
            comment: Some(comment),
            ..term
        }),
        other => {
            body.push(Entry::Comment(comment));
            other
        }
    }
}
