//! Turns an AST back into FTL source.
//!
//! The output is normalized: four-space indentation, one space around `=`,
//! placeables written as `{ expr }`, and multiline patterns starting on the
//! line after `=` unless their first character would read as syntax there. Parsing the output yields an equivalent resource.

use super::ast::*;

/// Serialization options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Write junk entries back verbatim instead of dropping them.
    pub with_junk: bool,
}

/// Serialize a resource with default options (junk is dropped).
///
/// # Example
///
/// ```
/// use ftl::parser::{parse, serialize};
///
/// let resource = parse("hello   =   Hello, { $name }!\n");
/// assert_eq!(serialize(&resource), "hello = Hello, { $name }!\n");
/// ```
pub fn serialize(resource: &Resource) -> String {
    serialize_with_options(resource, SerializeOptions::default())
}

/// Serialize a resource.
pub fn serialize_with_options(resource: &Resource, options: SerializeOptions) -> String {
    let mut serializer = Serializer {
        writer: TextWriter::default(),
        options,
        has_entries: false,
    };
    serializer.resource(resource);
    serializer.writer.buffer
}

struct Serializer {
    writer: TextWriter,
    options: SerializeOptions,
    has_entries: bool,
}

impl Serializer {
    fn resource(&mut self, resource: &Resource) {
        for entry in &resource.body {
            match entry {
                Entry::Message(message) => self.message(message),
                Entry::Term(term) => self.term(term),
                Entry::Comment(comment) => self.free_comment(comment),
                Entry::Junk(junk) => {
                    if !self.options.with_junk {
                        continue;
                    }
                    self.writer.write_literal(&junk.content);
                }
            }
            self.has_entries = true;
        }
    }

    fn free_comment(&mut self, comment: &Comment) {
        if self.has_entries {
            self.writer.newline();
        }
        self.comment(comment);
        self.writer.newline();
    }

    fn comment(&mut self, comment: &Comment) {
        for line in &comment.content {
            self.writer.write_literal(comment.level.sigil());
            if !line.trim().is_empty() {
                self.writer.write_literal(" ");
                self.writer.write_literal(line);
            }
            self.writer.newline();
        }
    }

    fn message(&mut self, message: &Message) {
        if let Some(comment) = &message.comment {
            self.comment(comment);
        }
        self.writer.write_literal(&message.id.name);
        self.writer.write_literal(" =");
        if let Some(value) = &message.value {
            self.pattern(value);
        }
        self.attributes(&message.attributes);
        self.writer.newline();
    }

    fn term(&mut self, term: &Term) {
        if let Some(comment) = &term.comment {
            self.comment(comment);
        }
        self.writer.write_literal("-");
        self.writer.write_literal(&term.id.name);
        self.writer.write_literal(" =");
        self.pattern(&term.value);
        self.attributes(&term.attributes);
        self.writer.newline();
    }

    fn attributes(&mut self, attributes: &[Attribute]) {
        if attributes.is_empty() {
            return;
        }
        self.writer.indent();
        for attribute in attributes {
            self.writer.newline();
            self.writer.write_literal(".");
            self.writer.write_literal(&attribute.id.name);
            self.writer.write_literal(" =");
            self.pattern(&attribute.value);
        }
        self.writer.dedent();
    }

    fn pattern(&mut self, pattern: &Pattern) {
        let multiline = is_multiline(pattern);
        if multiline {
            self.writer.indent();
        }
        if multiline && !starts_with_special_char(pattern) {
            self.writer.newline();
        } else {
            self.writer.write_literal(" ");
        }

        for element in &pattern.elements {
            match element {
                PatternElement::Text(text) => self.text(&text.value),
                PatternElement::Placeable(placeable) => self.placeable(placeable),
            }
        }

        if multiline {
            self.writer.dedent();
        }
    }

    fn text(&mut self, value: &str) {
        for line in value.split_inclusive('\n') {
            if line == "\n" {
                self.writer.newline();
            } else {
                self.writer.write_literal(line);
            }
        }
    }

    fn placeable(&mut self, placeable: &Placeable) {
        match placeable.expression.as_ref() {
            Expression::Placeable(inner) => {
                self.writer.write_literal("{{ ");
                self.expression(&inner.expression);
                self.writer.write_literal(" }}");
            }
            Expression::Select(select) => {
                self.writer.write_literal("{ ");
                self.select(select);
                self.writer.write_literal("}");
            }
            expression => {
                self.writer.write_literal("{ ");
                self.expression(expression);
                self.writer.write_literal(" }");
            }
        }
    }

    fn expression(&mut self, expression: &Expression) {
        match expression {
            Expression::StringLiteral(literal) => self.string_literal(literal),
            Expression::NumberLiteral(literal) => self.writer.write_literal(&literal.raw),
            Expression::VariableReference(reference) => {
                self.writer.write_literal("$");
                self.writer.write_literal(&reference.id.name);
            }
            Expression::MessageReference(reference) => {
                self.writer.write_literal(&reference.id.name);
                self.attribute_accessor(reference.attribute.as_ref());
            }
            Expression::TermReference(reference) => {
                self.writer.write_literal("-");
                self.writer.write_literal(&reference.id.name);
                self.attribute_accessor(reference.attribute.as_ref());
                if let Some(arguments) = &reference.arguments {
                    self.call_arguments(arguments);
                }
            }
            Expression::FunctionReference(reference) => {
                self.writer.write_literal(&reference.id.name);
                self.call_arguments(&reference.arguments);
            }
            Expression::Select(select) => self.select(select),
            Expression::Placeable(placeable) => {
                self.writer.write_literal("{ ");
                self.expression(&placeable.expression);
                self.writer.write_literal(" }");
            }
        }
    }

    fn string_literal(&mut self, literal: &StringLiteral) {
        self.writer.write_literal("\"");
        self.writer.write_literal(&literal.raw);
        self.writer.write_literal("\"");
    }

    fn attribute_accessor(&mut self, attribute: Option<&Identifier>) {
        if let Some(attribute) = attribute {
            self.writer.write_literal(".");
            self.writer.write_literal(&attribute.name);
        }
    }

    fn call_arguments(&mut self, arguments: &CallArguments) {
        self.writer.write_literal("(");
        let mut first = true;
        for argument in &arguments.positional {
            if !first {
                self.writer.write_literal(", ");
            }
            first = false;
            self.expression(argument);
        }
        for argument in &arguments.named {
            if !first {
                self.writer.write_literal(", ");
            }
            first = false;
            self.writer.write_literal(&argument.name.name);
            self.writer.write_literal(": ");
            match &argument.value {
                Literal::String(literal) => self.string_literal(literal),
                Literal::Number(literal) => self.writer.write_literal(&literal.raw),
            }
        }
        self.writer.write_literal(")");
    }

    fn select(&mut self, select: &SelectExpression) {
        self.expression(&select.selector);
        self.writer.write_literal(" ->");
        self.writer.newline();
        self.writer.indent();
        for variant in &select.variants {
            if variant.default {
                self.writer.write_char_into_indent('*');
            }
            self.writer.write_literal("[");
            match &variant.key {
                VariantKey::Identifier(id) => self.writer.write_literal(&id.name),
                VariantKey::NumberLiteral(literal) => self.writer.write_literal(&literal.raw),
            }
            self.writer.write_literal("]");
            self.pattern(&variant.value);
            self.writer.newline();
        }
        self.writer.dedent();
    }
}

/// A pattern is written on its own lines if it spans lines or contains a
/// select expression.
fn is_multiline(pattern: &Pattern) -> bool {
    pattern.elements.iter().any(|element| match element {
        PatternElement::Text(text) => text.value.contains('\n'),
        PatternElement::Placeable(placeable) => is_select(&placeable.expression),
    })
}

/// Text starting with `[`, `*` or `.` would read as a variant key, a default
/// marker or an attribute at the start of an indented line, so such a
/// pattern stays on the `=` line.
fn starts_with_special_char(pattern: &Pattern) -> bool {
    match pattern.elements.first() {
        Some(PatternElement::Text(text)) => text.value.starts_with(['[', '*', '.']),
        _ => false,
    }
}

fn is_select(expression: &Expression) -> bool {
    match expression {
        Expression::Select(_) => true,
        Expression::Placeable(placeable) => is_select(&placeable.expression),
        _ => false,
    }
}

/// A string buffer that indents every line it starts.
#[derive(Debug, Default)]
struct TextWriter {
    buffer: String,
    indent_level: usize,
}

impl TextWriter {
    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn newline(&mut self) {
        self.buffer.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str("    ");
        }
    }

    fn write_literal(&mut self, item: &str) {
        if item.is_empty() {
            return;
        }
        if self.buffer.ends_with('\n') {
            self.write_indent();
        }
        self.buffer.push_str(item);
    }

    /// Replace the last indentation space with `ch` (the default-variant
    /// marker sits one column left of its siblings).
    fn write_char_into_indent(&mut self, ch: char) {
        if self.buffer.ends_with('\n') {
            self.write_indent();
        }
        self.buffer.pop();
        self.buffer.push(ch);
    }
}
