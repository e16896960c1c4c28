//! Traversal of the AST.
//!
//! [`Visitor`] walks a tree read-only. Every `visit_*` method defaults to the
//! matching `walk_*` function, so an implementation overrides only the node
//! kinds it cares about and calls `walk_*` itself to keep descending.
//!
//! [`Transformer`] rewrites a tree. [`fold_resource`] rebuilds every node
//! bottom-up and hands each rebuilt node to the transformer, which returns a
//! replacement. Sequence members (entries, attributes, pattern elements,
//! variants) may also be deleted by returning `None`. The input tree is never
//! modified.
//!
//! # Example
//!
//! ```
//! use ftl::parser::visit::{Visitor, walk_variable_reference};
//! use ftl::parser::{VariableReference, parse};
//!
//! #[derive(Default)]
//! struct Variables(Vec<String>);
//!
//! impl<'a> Visitor<'a> for Variables {
//!     fn visit_variable_reference(&mut self, reference: &'a VariableReference) {
//!         self.0.push(reference.id.name.clone());
//!         walk_variable_reference(self, reference);
//!     }
//! }
//!
//! let resource = parse("greeting = Hi { $first } { $last }!\n");
//! let mut variables = Variables::default();
//! variables.visit_resource(&resource);
//! assert_eq!(variables.0, ["first", "last"]);
//! ```

use super::ast::*;

/// A borrowed reference to any AST node, for double dispatch through
/// [`Visitor::visit`].
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Resource(&'a Resource),
    Entry(&'a Entry),
    Message(&'a Message),
    Term(&'a Term),
    Comment(&'a Comment),
    Junk(&'a Junk),
    Attribute(&'a Attribute),
    Pattern(&'a Pattern),
    PatternElement(&'a PatternElement),
    TextElement(&'a TextElement),
    Placeable(&'a Placeable),
    Expression(&'a Expression),
    StringLiteral(&'a StringLiteral),
    NumberLiteral(&'a NumberLiteral),
    VariableReference(&'a VariableReference),
    MessageReference(&'a MessageReference),
    TermReference(&'a TermReference),
    FunctionReference(&'a FunctionReference),
    CallArguments(&'a CallArguments),
    NamedArgument(&'a NamedArgument),
    SelectExpression(&'a SelectExpression),
    Variant(&'a Variant),
    Identifier(&'a Identifier),
}

macro_rules! node_from {
    ($($kind:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a $kind> for Node<'a> {
                fn from(node: &'a $kind) -> Self {
                    Node::$kind(node)
                }
            }
        )*
    };
}

node_from!(
    Resource,
    Entry,
    Message,
    Term,
    Comment,
    Junk,
    Attribute,
    Pattern,
    PatternElement,
    TextElement,
    Placeable,
    Expression,
    StringLiteral,
    NumberLiteral,
    VariableReference,
    MessageReference,
    TermReference,
    FunctionReference,
    CallArguments,
    NamedArgument,
    SelectExpression,
    Variant,
    Identifier,
);

/// Read-only traversal with one method per node kind.
pub trait Visitor<'a> {
    /// Dispatch on the kind of `node`.
    fn visit(&mut self, node: Node<'a>) {
        match node {
            Node::Resource(node) => self.visit_resource(node),
            Node::Entry(node) => self.visit_entry(node),
            Node::Message(node) => self.visit_message(node),
            Node::Term(node) => self.visit_term(node),
            Node::Comment(node) => self.visit_comment(node),
            Node::Junk(node) => self.visit_junk(node),
            Node::Attribute(node) => self.visit_attribute(node),
            Node::Pattern(node) => self.visit_pattern(node),
            Node::PatternElement(node) => self.visit_pattern_element(node),
            Node::TextElement(node) => self.visit_text_element(node),
            Node::Placeable(node) => self.visit_placeable(node),
            Node::Expression(node) => self.visit_expression(node),
            Node::StringLiteral(node) => self.visit_string_literal(node),
            Node::NumberLiteral(node) => self.visit_number_literal(node),
            Node::VariableReference(node) => self.visit_variable_reference(node),
            Node::MessageReference(node) => self.visit_message_reference(node),
            Node::TermReference(node) => self.visit_term_reference(node),
            Node::FunctionReference(node) => self.visit_function_reference(node),
            Node::CallArguments(node) => self.visit_call_arguments(node),
            Node::NamedArgument(node) => self.visit_named_argument(node),
            Node::SelectExpression(node) => self.visit_select_expression(node),
            Node::Variant(node) => self.visit_variant(node),
            Node::Identifier(node) => self.visit_identifier(node),
        }
    }

    fn visit_resource(&mut self, resource: &'a Resource) {
        walk_resource(self, resource);
    }

    fn visit_entry(&mut self, entry: &'a Entry) {
        walk_entry(self, entry);
    }

    fn visit_message(&mut self, message: &'a Message) {
        walk_message(self, message);
    }

    fn visit_term(&mut self, term: &'a Term) {
        walk_term(self, term);
    }

    fn visit_comment(&mut self, _comment: &'a Comment) {}

    fn visit_junk(&mut self, _junk: &'a Junk) {}

    fn visit_attribute(&mut self, attribute: &'a Attribute) {
        walk_attribute(self, attribute);
    }

    fn visit_pattern(&mut self, pattern: &'a Pattern) {
        walk_pattern(self, pattern);
    }

    fn visit_pattern_element(&mut self, element: &'a PatternElement) {
        walk_pattern_element(self, element);
    }

    fn visit_text_element(&mut self, _text: &'a TextElement) {}

    fn visit_placeable(&mut self, placeable: &'a Placeable) {
        walk_placeable(self, placeable);
    }

    fn visit_expression(&mut self, expression: &'a Expression) {
        walk_expression(self, expression);
    }

    fn visit_string_literal(&mut self, _literal: &'a StringLiteral) {}

    fn visit_number_literal(&mut self, _literal: &'a NumberLiteral) {}

    fn visit_variable_reference(&mut self, reference: &'a VariableReference) {
        walk_variable_reference(self, reference);
    }

    fn visit_message_reference(&mut self, reference: &'a MessageReference) {
        walk_message_reference(self, reference);
    }

    fn visit_term_reference(&mut self, reference: &'a TermReference) {
        walk_term_reference(self, reference);
    }

    fn visit_function_reference(&mut self, reference: &'a FunctionReference) {
        walk_function_reference(self, reference);
    }

    fn visit_call_arguments(&mut self, arguments: &'a CallArguments) {
        walk_call_arguments(self, arguments);
    }

    fn visit_named_argument(&mut self, argument: &'a NamedArgument) {
        walk_named_argument(self, argument);
    }

    fn visit_select_expression(&mut self, select: &'a SelectExpression) {
        walk_select_expression(self, select);
    }

    fn visit_variant(&mut self, variant: &'a Variant) {
        walk_variant(self, variant);
    }

    fn visit_identifier(&mut self, _identifier: &'a Identifier) {}
}

pub fn walk_resource<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, resource: &'a Resource) {
    for entry in &resource.body {
        visitor.visit_entry(entry);
    }
}

pub fn walk_entry<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, entry: &'a Entry) {
    match entry {
        Entry::Message(message) => visitor.visit_message(message),
        Entry::Term(term) => visitor.visit_term(term),
        Entry::Comment(comment) => visitor.visit_comment(comment),
        Entry::Junk(junk) => visitor.visit_junk(junk),
    }
}

pub fn walk_message<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, message: &'a Message) {
    visitor.visit_identifier(&message.id);
    if let Some(value) = &message.value {
        visitor.visit_pattern(value);
    }
    for attribute in &message.attributes {
        visitor.visit_attribute(attribute);
    }
    if let Some(comment) = &message.comment {
        visitor.visit_comment(comment);
    }
}

pub fn walk_term<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, term: &'a Term) {
    visitor.visit_identifier(&term.id);
    visitor.visit_pattern(&term.value);
    for attribute in &term.attributes {
        visitor.visit_attribute(attribute);
    }
    if let Some(comment) = &term.comment {
        visitor.visit_comment(comment);
    }
}

pub fn walk_attribute<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, attribute: &'a Attribute) {
    visitor.visit_identifier(&attribute.id);
    visitor.visit_pattern(&attribute.value);
}

pub fn walk_pattern<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, pattern: &'a Pattern) {
    for element in &pattern.elements {
        visitor.visit_pattern_element(element);
    }
}

pub fn walk_pattern_element<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    element: &'a PatternElement,
) {
    match element {
        PatternElement::Text(text) => visitor.visit_text_element(text),
        PatternElement::Placeable(placeable) => visitor.visit_placeable(placeable),
    }
}

pub fn walk_placeable<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, placeable: &'a Placeable) {
    visitor.visit_expression(&placeable.expression);
}

pub fn walk_expression<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, expression: &'a Expression) {
    match expression {
        Expression::StringLiteral(literal) => visitor.visit_string_literal(literal),
        Expression::NumberLiteral(literal) => visitor.visit_number_literal(literal),
        Expression::VariableReference(reference) => visitor.visit_variable_reference(reference),
        Expression::MessageReference(reference) => visitor.visit_message_reference(reference),
        Expression::TermReference(reference) => visitor.visit_term_reference(reference),
        Expression::FunctionReference(reference) => visitor.visit_function_reference(reference),
        Expression::Select(select) => visitor.visit_select_expression(select),
        Expression::Placeable(placeable) => visitor.visit_placeable(placeable),
    }
}

pub fn walk_variable_reference<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    reference: &'a VariableReference,
) {
    visitor.visit_identifier(&reference.id);
}

pub fn walk_message_reference<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    reference: &'a MessageReference,
) {
    visitor.visit_identifier(&reference.id);
    if let Some(attribute) = &reference.attribute {
        visitor.visit_identifier(attribute);
    }
}

pub fn walk_term_reference<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    reference: &'a TermReference,
) {
    visitor.visit_identifier(&reference.id);
    if let Some(attribute) = &reference.attribute {
        visitor.visit_identifier(attribute);
    }
    if let Some(arguments) = &reference.arguments {
        visitor.visit_call_arguments(arguments);
    }
}

pub fn walk_function_reference<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    reference: &'a FunctionReference,
) {
    visitor.visit_identifier(&reference.id);
    visitor.visit_call_arguments(&reference.arguments);
}

pub fn walk_call_arguments<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    arguments: &'a CallArguments,
) {
    for argument in &arguments.positional {
        visitor.visit_expression(argument);
    }
    for argument in &arguments.named {
        visitor.visit_named_argument(argument);
    }
}

pub fn walk_named_argument<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    argument: &'a NamedArgument,
) {
    visitor.visit_identifier(&argument.name);
    match &argument.value {
        Literal::String(literal) => visitor.visit_string_literal(literal),
        Literal::Number(literal) => visitor.visit_number_literal(literal),
    }
}

pub fn walk_select_expression<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    select: &'a SelectExpression,
) {
    visitor.visit_expression(&select.selector);
    for variant in &select.variants {
        visitor.visit_variant(variant);
    }
}

pub fn walk_variant<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, variant: &'a Variant) {
    match &variant.key {
        VariantKey::Identifier(identifier) => visitor.visit_identifier(identifier),
        VariantKey::NumberLiteral(literal) => visitor.visit_number_literal(literal),
    }
    visitor.visit_pattern(&variant.value);
}

/// Structural rewriting. Each method receives a node whose children have
/// already been rebuilt and returns its replacement.
///
/// Methods returning `Option` belong to sequence members: `None` removes the
/// node from its parent. The rebuilt tree stays parseable:
/// - a message value left without elements becomes no value, and a message
///   left without value and attributes is removed
/// - a term, attribute or non-default variant left without elements is removed
/// - the default variant of a select is never removed, and only it is
///   marked default
pub trait Transformer {
    fn transform_entry(&mut self, entry: Entry) -> Option<Entry> {
        Some(entry)
    }

    fn transform_message(&mut self, message: Message) -> Option<Message> {
        Some(message)
    }

    fn transform_term(&mut self, term: Term) -> Option<Term> {
        Some(term)
    }

    fn transform_comment(&mut self, comment: Comment) -> Option<Comment> {
        Some(comment)
    }

    fn transform_junk(&mut self, junk: Junk) -> Option<Junk> {
        Some(junk)
    }

    fn transform_attribute(&mut self, attribute: Attribute) -> Option<Attribute> {
        Some(attribute)
    }

    fn transform_pattern(&mut self, pattern: Pattern) -> Pattern {
        pattern
    }

    fn transform_pattern_element(&mut self, element: PatternElement) -> Option<PatternElement> {
        Some(element)
    }

    fn transform_expression(&mut self, expression: Expression) -> Expression {
        expression
    }

    fn transform_variant(&mut self, variant: Variant) -> Option<Variant> {
        Some(variant)
    }
}

/// Rebuild `resource` through `transformer`, bottom-up.
pub fn fold_resource<T: Transformer + ?Sized>(transformer: &mut T, resource: &Resource) -> Resource {
    let body = resource
        .body
        .iter()
        .filter_map(|entry| fold_entry(transformer, entry))
        .collect();
    Resource { body }
}

fn fold_entry<T: Transformer + ?Sized>(transformer: &mut T, entry: &Entry) -> Option<Entry> {
    let rebuilt = match entry {
        Entry::Message(message) => Entry::Message(fold_message(transformer, message)?),
        Entry::Term(term) => Entry::Term(fold_term(transformer, term)?),
        Entry::Comment(comment) => Entry::Comment(transformer.transform_comment(comment.clone())?),
        Entry::Junk(junk) => Entry::Junk(transformer.transform_junk(junk.clone())?),
    };
    transformer.transform_entry(rebuilt)
}

fn fold_message<T: Transformer + ?Sized>(transformer: &mut T, message: &Message) -> Option<Message> {
    let value = message
        .value
        .as_ref()
        .map(|value| fold_pattern(transformer, value))
        .filter(|value| !value.elements.is_empty());
    let attributes: Box<[Attribute]> = fold_attributes(transformer, &message.attributes);
    let comment = match &message.comment {
        Some(comment) => transformer.transform_comment(comment.clone()),
        None => None,
    };
    let rebuilt = transformer.transform_message(Message {
        id: message.id.clone(),
        value,
        attributes,
        comment,
        span: message.span,
    })?;
    (rebuilt.value.is_some() || !rebuilt.attributes.is_empty()).then_some(rebuilt)
}

fn fold_term<T: Transformer + ?Sized>(transformer: &mut T, term: &Term) -> Option<Term> {
    let value = fold_pattern(transformer, &term.value);
    let attributes = fold_attributes(transformer, &term.attributes);
    let comment = match &term.comment {
        Some(comment) => transformer.transform_comment(comment.clone()),
        None => None,
    };
    transformer
        .transform_term(Term {
            id: term.id.clone(),
            value,
            attributes,
            comment,
            span: term.span,
        })
        .filter(|term| !term.value.elements.is_empty())
}

fn fold_attributes<T: Transformer + ?Sized>(
    transformer: &mut T,
    attributes: &[Attribute],
) -> Box<[Attribute]> {
    attributes
        .iter()
        .filter_map(|attribute| {
            let value = fold_pattern(transformer, &attribute.value);
            transformer
                .transform_attribute(Attribute {
                    id: attribute.id.clone(),
                    value,
                })
                .filter(|attribute| !attribute.value.elements.is_empty())
        })
        .collect()
}

fn fold_pattern<T: Transformer + ?Sized>(transformer: &mut T, pattern: &Pattern) -> Pattern {
    let elements = pattern
        .elements
        .iter()
        .filter_map(|element| {
            let rebuilt = match element {
                PatternElement::Text(text) => PatternElement::Text(text.clone()),
                PatternElement::Placeable(placeable) => {
                    PatternElement::Placeable(fold_placeable(transformer, placeable))
                }
            };
            transformer.transform_pattern_element(rebuilt)
        })
        .collect();
    transformer.transform_pattern(Pattern { elements })
}

fn fold_placeable<T: Transformer + ?Sized>(transformer: &mut T, placeable: &Placeable) -> Placeable {
    Placeable {
        expression: Box::new(fold_expression(transformer, &placeable.expression)),
    }
}

fn fold_expression<T: Transformer + ?Sized>(
    transformer: &mut T,
    expression: &Expression,
) -> Expression {
    let rebuilt = match expression {
        Expression::TermReference(reference) => Expression::TermReference(TermReference {
            id: reference.id.clone(),
            attribute: reference.attribute.clone(),
            arguments: reference
                .arguments
                .as_ref()
                .map(|arguments| fold_call_arguments(transformer, arguments)),
        }),
        Expression::FunctionReference(reference) => {
            Expression::FunctionReference(FunctionReference {
                id: reference.id.clone(),
                arguments: fold_call_arguments(transformer, &reference.arguments),
            })
        }
        Expression::Select(select) => Expression::Select(SelectExpression {
            selector: Box::new(fold_expression(transformer, &select.selector)),
            variants: select
                .variants
                .iter()
                .filter_map(|variant| fold_variant(transformer, variant))
                .collect(),
        }),
        Expression::Placeable(placeable) => {
            Expression::Placeable(fold_placeable(transformer, placeable))
        }
        Expression::StringLiteral(_)
        | Expression::NumberLiteral(_)
        | Expression::VariableReference(_)
        | Expression::MessageReference(_) => expression.clone(),
    };
    transformer.transform_expression(rebuilt)
}

fn fold_variant<T: Transformer + ?Sized>(transformer: &mut T, variant: &Variant) -> Option<Variant> {
    let folded = Variant {
        key: variant.key.clone(),
        value: fold_pattern(transformer, &variant.value),
        default: variant.default,
    };
    if !variant.default {
        return transformer
            .transform_variant(folded)
            .filter(|rebuilt| !rebuilt.value.elements.is_empty())
            .map(|rebuilt| Variant {
                default: false,
                ..rebuilt
            });
    }
    let rebuilt = transformer.transform_variant(folded.clone()).unwrap_or(folded);
    Some(Variant {
        default: true,
        ..rebuilt
    })
}

fn fold_call_arguments<T: Transformer + ?Sized>(
    transformer: &mut T,
    arguments: &CallArguments,
) -> CallArguments {
    CallArguments {
        positional: arguments
            .positional
            .iter()
            .map(|argument| fold_expression(transformer, argument))
            .collect(),
        named: arguments.named.clone(),
    }
}
