//! Pattern resolution: turns parsed patterns into strings.
//!
//! Resolution never fails. Every problem is recorded as a [`ResolveError`]
//! and the offending placeable is replaced by a fallback string such as
//! `{$name}` or `{-brand}`, so callers always get displayable text.

use bon::Builder;

use crate::interpreter::context::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_PLACEABLES, Frame, ResolveContext};
use crate::interpreter::plural::plural_category_for;
use crate::interpreter::{EntryTable, FunctionRegistry, ResolveError, compute_suggestions};
use crate::parser::ast::{
    CallArguments, Expression, FunctionReference, Literal, MessageReference, NamedArgument,
    Pattern, PatternElement, SelectExpression, TermReference, Variant, VariantKey,
    VariableReference,
};
use crate::types::{Args, NumberValue, Value};

/// First strong isolate.
const FSI: char = '\u{2068}';
/// Pop directional isolate.
const PDI: char = '\u{2069}';

/// Replacement text for a placeable that could not be resolved.
///
/// The matching error has already been reported to the context.
struct Fallback(String);

type Resolved = Result<Value, Fallback>;

/// Resolves messages from one entry table.
///
/// A resolver only borrows its inputs, so it is cheap to build one per call.
///
/// ```
/// use ftl::{EntryTable, FunctionRegistry, Resolver, parse, args};
/// use ftl::parser::Entry;
///
/// let mut entries = EntryTable::new();
/// for entry in parse("hello = Hello, { $name }!\n").body.into_vec() {
///     if let Entry::Message(message) = entry {
///         entries.insert_message(message);
///     }
/// }
/// let functions = FunctionRegistry::new();
/// let resolver = Resolver::builder()
///     .entries(&entries)
///     .functions(&functions)
///     .use_isolating(false)
///     .build();
///
/// let (text, errors) = resolver.resolve("hello", None, Some(&args! { "name" => "World" }));
/// assert_eq!(text, "Hello, World!");
/// assert!(errors.is_empty());
/// ```
#[derive(Debug, Builder)]
pub struct Resolver<'b> {
    entries: &'b EntryTable,
    functions: &'b FunctionRegistry,
    #[builder(default = "en")]
    locale: &'b str,
    /// Wrap interpolated values in Unicode isolation marks.
    ///
    /// A pattern made of a single placeable is left unwrapped.
    #[builder(default = true)]
    use_isolating: bool,
    #[builder(default = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    #[builder(default = DEFAULT_MAX_PLACEABLES)]
    max_placeables: usize,
}

impl Resolver<'_> {
    /// Resolve a message, or one of its attributes, to a string.
    ///
    /// Returns the text together with every error met along the way. When
    /// the message itself cannot be found the text is `{id}`.
    pub fn resolve(
        &self,
        id: &str,
        attribute: Option<&str>,
        args: Option<&Args>,
    ) -> (String, Vec<ResolveError>) {
        let mut ctx = ResolveContext::new(args, self.max_depth, self.max_placeables);
        let text = match self.message(id, attribute, &mut ctx) {
            Ok(text) | Err(Fallback(text)) => text,
        };
        (text, ctx.into_errors())
    }

    /// Resolve a free-standing pattern with the given variables.
    pub fn resolve_pattern(
        &self,
        pattern: &Pattern,
        args: Option<&Args>,
    ) -> (String, Vec<ResolveError>) {
        let mut ctx = ResolveContext::new(args, self.max_depth, self.max_placeables);
        let text = self.pattern_string(pattern, &mut ctx);
        (text, ctx.into_errors())
    }

    fn pattern_string(&self, pattern: &Pattern, ctx: &mut ResolveContext<'_>) -> String {
        let mut out = String::new();
        self.write_pattern(pattern, ctx, &mut out);
        out
    }

    fn write_pattern(&self, pattern: &Pattern, ctx: &mut ResolveContext<'_>, out: &mut String) {
        let isolate = self.use_isolating && pattern.elements.len() > 1;
        for element in &pattern.elements {
            if ctx.is_dirty() {
                return;
            }
            match element {
                PatternElement::Text(text) => out.push_str(&text.value),
                PatternElement::Placeable(placeable) => {
                    if !ctx.count_placeable() {
                        return;
                    }
                    let expression = placeable.expression.as_ref();
                    let isolated = isolate && is_isolated(expression);
                    if isolated {
                        out.push(FSI);
                    }
                    self.write_expression(expression, ctx, out);
                    if isolated {
                        out.push(PDI);
                    }
                }
            }
        }
    }

    fn write_expression(
        &self,
        expression: &Expression,
        ctx: &mut ResolveContext<'_>,
        out: &mut String,
    ) {
        match self.resolve_expression(expression, ctx) {
            Ok(value) => self.write_value(&value, ctx, out),
            Err(Fallback(text)) => out.push_str(&text),
        }
    }

    fn write_value(&self, value: &Value, ctx: &mut ResolveContext<'_>, out: &mut String) {
        if let Some(text) = value.format(self.locale) {
            out.push_str(&text);
            return;
        }
        ctx.report(ResolveError::Uninterpolatable {
            type_name: value.type_name().to_string(),
        });
        let fallback = match value {
            Value::Custom(custom) => format!("{custom:?}"),
            _ => format!("{value:?}"),
        };
        out.push_str(&fallback);
    }

    fn resolve_expression(&self, expression: &Expression, ctx: &mut ResolveContext<'_>) -> Resolved {
        match expression {
            Expression::StringLiteral(literal) => Ok(Value::String(literal.value.clone())),
            Expression::NumberLiteral(literal) => {
                Ok(Value::Number(NumberValue::from_literal(literal)))
            }
            Expression::VariableReference(reference) => self.variable(reference, ctx),
            Expression::MessageReference(reference) => self.message_reference(reference, ctx),
            Expression::TermReference(reference) => self.term_reference(reference, ctx),
            Expression::FunctionReference(reference) => self.call_function(reference, ctx),
            Expression::Select(select) => self.select(select, ctx),
            Expression::Placeable(placeable) => {
                self.resolve_expression(&placeable.expression, ctx)
            }
        }
    }

    fn variable(&self, reference: &VariableReference, ctx: &mut ResolveContext<'_>) -> Resolved {
        let name = &reference.id.name;
        if let Some(value) = ctx.arg(name) {
            return Ok(value.clone());
        }
        ctx.report(ResolveError::VariableNotFound { name: name.clone() });
        Err(Fallback(format!("{{${name}}}")))
    }

    fn message_reference(
        &self,
        reference: &MessageReference,
        ctx: &mut ResolveContext<'_>,
    ) -> Resolved {
        let attribute = reference.attribute.as_ref().map(|a| a.name.as_str());
        self.message(&reference.id.name, attribute, ctx)
            .map(Value::String)
    }

    /// Resolve a message in the caller's variable scope.
    fn message(
        &self,
        id: &str,
        attribute: Option<&str>,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<String, Fallback> {
        let fallback = || Fallback(format!("{{{}}}", reference_name(id, attribute)));

        let Some(message) = self.entries.message(id) else {
            ctx.report(ResolveError::MessageNotFound {
                id: id.to_string(),
                suggestions: compute_suggestions(id, self.entries.message_ids()),
            });
            return Err(fallback());
        };

        let pattern = match attribute {
            Some(name) => match message.attribute(name) {
                Some(attribute) => &attribute.value,
                None => {
                    ctx.report(ResolveError::AttributeNotFound {
                        id: id.to_string(),
                        attribute: name.to_string(),
                    });
                    return Err(fallback());
                }
            },
            None => match &message.value {
                Some(value) => value,
                None => {
                    ctx.report(ResolveError::NoValue { id: id.to_string() });
                    return Err(fallback());
                }
            },
        };

        match ctx.with_frame(Frame::message(id, attribute), |ctx| {
            self.pattern_string(pattern, ctx)
        }) {
            Ok(text) => Ok(text),
            Err(error) => {
                ctx.report(error);
                Err(fallback())
            }
        }
    }

    /// Resolve a term in a fresh scope holding only its named arguments.
    fn term_reference(&self, reference: &TermReference, ctx: &mut ResolveContext<'_>) -> Resolved {
        let id = &reference.id.name;
        let attribute = reference.attribute.as_ref().map(|a| a.name.as_str());
        let fallback = || Fallback(format!("{{-{}}}", reference_name(id, attribute)));

        let Some(term) = self.entries.term(id) else {
            ctx.report(ResolveError::TermNotFound { id: id.clone() });
            return Err(fallback());
        };

        let pattern = match attribute {
            Some(name) => match term.attribute(name) {
                Some(attribute) => &attribute.value,
                None => {
                    ctx.report(ResolveError::AttributeNotFound {
                        id: format!("-{id}"),
                        attribute: name.to_string(),
                    });
                    return Err(fallback());
                }
            },
            None => &term.value,
        };

        let local_args = reference
            .arguments
            .as_ref()
            .map(|arguments| named_args(&arguments.named))
            .unwrap_or_default();
        let mut child = ctx.term_child(&local_args);
        let result = child.with_frame(Frame::term(id, attribute), |child| {
            self.pattern_string(pattern, child)
        });
        ctx.absorb(child);

        match result {
            Ok(text) => Ok(Value::String(text)),
            Err(error) => {
                ctx.report(error);
                Err(fallback())
            }
        }
    }

    fn call_function(
        &self,
        reference: &FunctionReference,
        ctx: &mut ResolveContext<'_>,
    ) -> Resolved {
        let name = &reference.id.name;
        let fallback = || Fallback(format!("{{{name}()}}"));

        let Ok(positional) = self.positional_args(&reference.arguments, ctx) else {
            return Err(fallback());
        };
        let named = named_args(&reference.arguments.named);

        let Some(function) = self.functions.get(name) else {
            ctx.report(ResolveError::UnknownFunction { name: name.clone() });
            return Err(fallback());
        };

        function(&positional, &named, self.locale).map_err(|source| {
            ctx.report(ResolveError::Function {
                name: name.clone(),
                source,
            });
            fallback()
        })
    }

    fn positional_args(
        &self,
        arguments: &CallArguments,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Vec<Value>, Fallback> {
        arguments
            .positional
            .iter()
            .map(|expression| self.resolve_expression(expression, ctx))
            .collect()
    }

    fn select(&self, select: &SelectExpression, ctx: &mut ResolveContext<'_>) -> Resolved {
        let variant = match self.resolve_expression(&select.selector, ctx) {
            Ok(value) => self
                .matching_variant(select, &value)
                .or_else(|| select.default_variant()),
            Err(_) => select.default_variant(),
        };
        let Some(variant) = variant else {
            ctx.report(ResolveError::NoVariants);
            return Err(Fallback("{???}".to_string()));
        };
        Ok(Value::String(self.pattern_string(&variant.value, ctx)))
    }

    /// Find the variant whose key equals the selector, then the one named by
    /// the selector's plural category.
    fn matching_variant<'s>(&self, select: &'s SelectExpression, value: &Value) -> Option<&'s Variant> {
        if let Some(variant) = select
            .variants
            .iter()
            .find(|variant| key_matches(&variant.key, value))
        {
            return Some(variant);
        }

        let number = value.as_number()?;
        let category = plural_category_for(self.locale, number);
        select.variants.iter().find(|variant| {
            matches!(&variant.key, VariantKey::Identifier(key) if key.name == category)
        })
    }
}

fn key_matches(key: &VariantKey, value: &Value) -> bool {
    match (key, value) {
        (VariantKey::Identifier(key), Value::String(text)) => key.name == *text,
        (VariantKey::Identifier(key), Value::Bool(flag)) => {
            key.name == if *flag { "true" } else { "false" }
        }
        (VariantKey::NumberLiteral(key), Value::Number(number)) => key.value == number.value,
        _ => false,
    }
}

/// Whether a placeable's output gets isolation marks. Literals and select
/// expressions produce translator-controlled text and are left bare.
fn is_isolated(expression: &Expression) -> bool {
    match expression {
        Expression::VariableReference(_)
        | Expression::MessageReference(_)
        | Expression::TermReference(_)
        | Expression::FunctionReference(_) => true,
        Expression::Placeable(placeable) => is_isolated(&placeable.expression),
        Expression::StringLiteral(_) | Expression::NumberLiteral(_) | Expression::Select(_) => {
            false
        }
    }
}

fn named_args(named: &[NamedArgument]) -> Args {
    named
        .iter()
        .map(|argument| {
            let value = match &argument.value {
                Literal::String(literal) => Value::String(literal.value.clone()),
                Literal::Number(literal) => Value::Number(NumberValue::from_literal(literal)),
            };
            (argument.name.name.clone(), value)
        })
        .collect()
}

fn reference_name(id: &str, attribute: Option<&str>) -> String {
    match attribute {
        Some(attribute) => format!("{id}.{attribute}"),
        None => id.to_string(),
    }
}
