//! Public AST types for FTL resources.
//!
//! Every node is immutable once the parser hands it out: child sequences are
//! boxed slices, nodes never point back at their parents, and rewriting a tree
//! goes through [`crate::parser::visit::Transformer`], which builds new nodes.
//! These types are public to enable external tooling (linters, formatters, etc.).

use serde::Serialize;

/// A byte range into the source text a node was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Root of one parsed source unit. Entries keep source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub body: Box<[Entry]>,
}

impl Resource {
    /// Iterates over the messages of this resource.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.body.iter().filter_map(|entry| match entry {
            Entry::Message(message) => Some(message),
            _ => None,
        })
    }

    /// Iterates over the terms of this resource.
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.body.iter().filter_map(|entry| match entry {
            Entry::Term(term) => Some(term),
            _ => None,
        })
    }

    /// Iterates over the unparseable spans of this resource.
    pub fn junk(&self) -> impl Iterator<Item = &Junk> {
        self.body.iter().filter_map(|entry| match entry {
            Entry::Junk(junk) => Some(junk),
            _ => None,
        })
    }

    /// Returns every annotation attached to junk entries, in source order.
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.junk().flat_map(|junk| junk.annotations.iter())
    }
}

/// A top-level entry of a resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Entry {
    Message(Message),
    Term(Term),
    Comment(Comment),
    Junk(Junk),
}

/// A public translatable unit: `id = pattern` plus attributes.
///
/// The parser only produces messages that have a value, at least one
/// attribute, or both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: Identifier,
    pub value: Option<Pattern>,
    pub attributes: Box<[Attribute]>,
    pub comment: Option<Comment>,
    pub span: Span,
}

impl Message {
    /// Looks up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.id.name == name)
    }
}

/// A private reusable unit: `-id = pattern`. The stored id has no `-` prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Term {
    pub id: Identifier,
    pub value: Pattern,
    pub attributes: Box<[Attribute]>,
    pub comment: Option<Comment>,
    pub span: Span,
}

impl Term {
    /// Looks up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.id.name == name)
    }
}

/// A named sub-pattern of a message or term: `.id = pattern`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub id: Identifier,
    pub value: Pattern,
}

/// Comment level, by the number of `#` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommentLevel {
    /// `#`
    Comment,
    /// `##`
    Group,
    /// `###`
    Resource,
}

impl CommentLevel {
    /// The line prefix for this level.
    pub fn sigil(self) -> &'static str {
        match self {
            CommentLevel::Comment => "#",
            CommentLevel::Group => "##",
            CommentLevel::Resource => "###",
        }
    }
}

/// A comment block. Each line is stored without its `#` prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub level: CommentLevel,
    pub content: Box<[String]>,
}

/// Unparseable source kept for diagnostics; never resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Junk {
    pub content: String,
    pub annotations: Box<[Annotation]>,
    pub span: Option<Span>,
}

/// A diagnostic attached to a junk entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// Reference error code, e.g. `E0003`.
    pub code: String,
    pub message: String,
    pub span: Option<Span>,
}

/// Text content of a message, term, attribute, or variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    pub elements: Box<[PatternElement]>,
}

/// One element of a pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PatternElement {
    Text(TextElement),
    Placeable(Placeable),
}

/// Literal text, never interpolated further.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextElement {
    pub value: String,
}

/// `{ expression }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeable {
    pub expression: Box<Expression>,
}

/// Everything that may appear between braces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expression {
    StringLiteral(StringLiteral),
    NumberLiteral(NumberLiteral),
    VariableReference(VariableReference),
    MessageReference(MessageReference),
    TermReference(TermReference),
    FunctionReference(FunctionReference),
    Select(SelectExpression),
    /// A placeable nested directly inside another: `{ { "x" } }`.
    Placeable(Placeable),
}

/// `"text"`. `value` has escapes applied, `raw` is the source form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringLiteral {
    pub value: String,
    pub raw: String,
}

/// `-?[0-9]+(\.[0-9]+)?`. `raw` keeps the source precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberLiteral {
    pub value: f64,
    pub raw: String,
}

/// A literal value; the only thing allowed as a named argument value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Literal {
    String(StringLiteral),
    Number(NumberLiteral),
}

/// `$name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableReference {
    pub id: Identifier,
}

/// `message` or `message.attribute`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageReference {
    pub id: Identifier,
    pub attribute: Option<Identifier>,
}

/// `-term`, `-term.attribute`, `-term(name: "value")`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermReference {
    pub id: Identifier,
    pub attribute: Option<Identifier>,
    pub arguments: Option<CallArguments>,
}

/// `NAME(positional, named: literal)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionReference {
    pub id: Identifier,
    pub arguments: CallArguments,
}

/// Arguments of a function call or parameterized term reference.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CallArguments {
    pub positional: Box<[Expression]>,
    pub named: Box<[NamedArgument]>,
}

/// `name: literal`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedArgument {
    pub name: Identifier,
    pub value: Literal,
}

/// `selector -> variants`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectExpression {
    pub selector: Box<Expression>,
    pub variants: Box<[Variant]>,
}

impl SelectExpression {
    /// The variant used when nothing else matches: the first one flagged
    /// default, or the first variant if none is flagged.
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants
            .iter()
            .find(|variant| variant.default)
            .or_else(|| self.variants.first())
    }
}

/// One arm of a select expression: `*[key] pattern`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variant {
    pub key: VariantKey,
    pub value: Pattern,
    pub default: bool,
}

/// The key of a variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum VariantKey {
    Identifier(Identifier),
    NumberLiteral(NumberLiteral),
}

/// A name: `[a-zA-Z][a-zA-Z0-9_-]*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
