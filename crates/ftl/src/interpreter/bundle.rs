//! Per-locale message bundles.
//!
//! A [`Bundle`] owns the messages and terms of one locale, built by parsing
//! and merging FTL sources, plus the functions messages may call.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use bon::Builder;
use log::{debug, warn};

use crate::interpreter::context::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_PLACEABLES};
use crate::interpreter::{
    EntryTable, FunctionError, FunctionRegistry, LoadError, LoadWarning, ResolveError, Resolver,
};
use crate::parser::ast::{Entry, Message, Pattern, Resource, Term};
use crate::parser::{line_column, parse};
use crate::types::{Args, Value};

/// Messages, terms, and functions for one locale.
///
/// Adding sources is a write operation; once loading is done the bundle is
/// read-only and can be shared between threads for formatting.
///
/// # Example
///
/// ```
/// use ftl::{Bundle, args};
///
/// let mut bundle = Bundle::builder()
///     .locale("en-US")
///     .use_isolating(false)
///     .build();
///
/// bundle.add_source(r#"
/// -brand = Firefox
/// welcome = Welcome to { -brand }, { $user }!
/// "#).unwrap();
///
/// let (text, errors) = bundle.format("welcome", Some(&args! { "user" => "Ana" }));
/// assert_eq!(text, "Welcome to Firefox, Ana!");
/// assert!(errors.is_empty());
/// ```
#[derive(Debug, Builder)]
#[builder(on(String, into))]
pub struct Bundle {
    /// Locale identifier used for plural rules and number formatting.
    #[builder(default = "en".to_string())]
    locale: String,

    /// Wrap interpolated values in Unicode isolation marks.
    ///
    /// A pattern made of a single placeable is left unwrapped.
    #[builder(default = true)]
    use_isolating: bool,

    /// Maximum nesting of message and term references.
    #[builder(default = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Maximum placeables written while formatting one message.
    #[builder(default = DEFAULT_MAX_PLACEABLES)]
    max_placeables: usize,

    #[builder(skip)]
    entries: EntryTable,

    #[builder(skip)]
    functions: FunctionRegistry,
}

impl Default for Bundle {
    fn default() -> Self {
        Bundle::builder().build()
    }
}

impl Bundle {
    /// Create an empty bundle for `locale` with default settings.
    pub fn new(locale: impl Into<String>) -> Self {
        Bundle::builder().locale(locale.into()).build()
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Add the messages and terms of a parsed resource.
    ///
    /// Entries replace earlier ones with the same id (last write wins); each
    /// replacement is reported as a warning. Junk and comments are skipped.
    pub fn add_resource(&mut self, resource: Resource) -> Vec<LoadWarning> {
        let origin = format!("<{}>", self.locale);
        self.insert_entries(resource, &origin)
    }

    /// Parse FTL source text and add its entries.
    ///
    /// Unparseable entries are skipped and reported as warnings. A source
    /// that contains junk but no message or term at all is an error.
    pub fn add_source(&mut self, source: &str) -> Result<Vec<LoadWarning>, LoadError> {
        let origin = format!("<{}>", self.locale);
        self.load(source, &origin)
    }

    /// Read an FTL file and add its entries.
    ///
    /// # Example
    ///
    /// ```ignore
    /// bundle.add_file("locales/en-US/main.ftl")?;
    /// ```
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<LoadWarning>, LoadError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.load(&source, &path.display().to_string())
    }

    fn load(&mut self, source: &str, origin: &str) -> Result<Vec<LoadWarning>, LoadError> {
        let resource = parse(source);

        let has_entries = resource.messages().next().is_some() || resource.terms().next().is_some();
        if !has_entries && resource.junk().next().is_some() {
            return Err(LoadError::Syntax {
                origin: origin.to_string(),
                annotations: resource.annotations().cloned().collect(),
            });
        }

        let mut warnings = Vec::new();
        for annotation in resource.annotations() {
            let offset = annotation.span.map_or(0, |span| span.start);
            let (line, column) = line_column(source, offset);
            warn!(
                "{origin}:{line}:{column}: skipping junk: {}: {}",
                annotation.code, annotation.message
            );
            warnings.push(LoadWarning::Junk {
                origin: origin.to_string(),
                line,
                column,
                code: annotation.code.clone(),
                message: annotation.message.clone(),
            });
        }

        warnings.extend(self.insert_entries(resource, origin));
        Ok(warnings)
    }

    fn insert_entries(&mut self, resource: Resource, origin: &str) -> Vec<LoadWarning> {
        let mut warnings = Vec::new();
        for entry in resource.body.into_vec() {
            let replaced = match entry {
                Entry::Message(message) => {
                    let id = message.id.name.clone();
                    self.entries.insert_message(message).map(|_| id)
                }
                Entry::Term(term) => {
                    let id = format!("-{}", term.id.name);
                    self.entries.insert_term(term).map(|_| id)
                }
                Entry::Comment(_) | Entry::Junk(_) => None,
            };
            if let Some(id) = replaced {
                debug!("{origin}: '{id}' overrides an earlier definition");
                warnings.push(LoadWarning::Overridden {
                    origin: origin.to_string(),
                    id,
                });
            }
        }
        warnings
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn has_message(&self, id: &str) -> bool {
        self.entries.message(id).is_some()
    }

    /// All message ids, sorted.
    pub fn message_ids(&self) -> Vec<&str> {
        self.entries.message_ids()
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.entries.message(id)
    }

    /// Get a term by id, without the leading `-`.
    pub fn term(&self, id: &str) -> Option<&Term> {
        self.entries.term(id)
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    /// Format a message value.
    ///
    /// Always returns text; problems are listed in the returned errors.
    pub fn format(&self, id: &str, args: Option<&Args>) -> (String, Vec<ResolveError>) {
        self.resolver().resolve(id, None, args)
    }

    /// Format one attribute of a message.
    pub fn format_attribute(
        &self,
        id: &str,
        attribute: &str,
        args: Option<&Args>,
    ) -> (String, Vec<ResolveError>) {
        self.resolver().resolve(id, Some(attribute), args)
    }

    /// Format a pattern, typically one taken from [`Bundle::message`].
    pub fn format_pattern(
        &self,
        pattern: &Pattern,
        args: Option<&Args>,
    ) -> (String, Vec<ResolveError>) {
        self.resolver().resolve_pattern(pattern, args)
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::builder()
            .entries(&self.entries)
            .functions(&self.functions)
            .locale(self.locale.as_str())
            .use_isolating(self.use_isolating)
            .max_depth(self.max_depth)
            .max_placeables(self.max_placeables)
            .build()
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Register a function callable from messages as `NAME(...)`.
    ///
    /// Functions registered here shadow built-ins with the same name.
    ///
    /// # Example
    ///
    /// ```
    /// use ftl::{Bundle, Value};
    ///
    /// let mut bundle = Bundle::builder().use_isolating(false).build();
    /// bundle.add_function("SHOUT", |positional, _named, _locale| {
    ///     let text = positional.first().and_then(Value::as_string).unwrap_or_default();
    ///     Ok(Value::from(text.to_uppercase()))
    /// });
    /// bundle.add_source("greeting = { SHOUT(\"hi\") }\n").unwrap();
    ///
    /// assert_eq!(bundle.format("greeting", None).0, "HI");
    /// ```
    pub fn add_function<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&[Value], &Args, &str) -> Result<Value, FunctionError> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.functions.insert(name.clone(), Arc::new(function)).is_some() {
            debug!("function '{name}' replaced on bundle '{}'", self.locale);
        } else {
            debug!("function '{name}' registered on bundle '{}'", self.locale);
        }
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.has_function(name)
    }
}
