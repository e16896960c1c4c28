//! Error types for loading and resolving FTL messages.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use strsim::levenshtein;
use thiserror::Error;

use crate::parser::Annotation;

/// Errors that occur while loading FTL sources.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading an FTL file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source produced junk and nothing else.
    #[error("{origin}: no entries could be parsed ({} syntax error(s))", annotations.len())]
    Syntax {
        origin: String,
        annotations: Vec<Annotation>,
    },
}

impl LoadError {
    /// The taxonomy tag of this error, if it has one.
    ///
    /// I/O failures happen outside FTL and carry no tag.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            LoadError::Io { .. } => None,
            LoadError::Syntax { .. } => Some(ErrorKind::Syntax),
        }
    }
}

/// Non-fatal problems found while loading a source into a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadWarning {
    /// An entry could not be parsed and was skipped.
    #[error("{origin}:{line}:{column}: {code}: {message}")]
    Junk {
        origin: String,
        line: usize,
        column: usize,
        code: String,
        message: String,
    },

    /// An entry replaced one with the same id.
    #[error("{origin}: '{id}' overrides an earlier definition")]
    Overridden { origin: String, id: String },

    /// A resource was not available for a locale.
    #[error("resource '{resource_id}' not found for locale '{locale}'")]
    MissingResource { locale: String, resource_id: String },
}

/// The category of a runtime error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Unknown message, term, attribute, or variable.
    #[serde(rename = "ReferenceError")]
    Reference,
    /// Function failure, value that cannot be written, or a safety limit.
    #[serde(rename = "ResolutionError")]
    Resolution,
    /// A message or term refers back to itself.
    #[serde(rename = "CyclicReferenceError")]
    CyclicReference,
    /// A source that could not be parsed at all.
    #[serde(rename = "SyntaxError")]
    Syntax,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Reference => "ReferenceError",
            ErrorKind::Resolution => "ResolutionError",
            ErrorKind::CyclicReference => "CyclicReferenceError",
            ErrorKind::Syntax => "SyntaxError",
        };
        f.write_str(name)
    }
}

/// An error that occurred while resolving a message.
///
/// Resolution never stops at these: each one is recorded next to a fallback
/// string in the output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("unknown message '{id}'{}", did_you_mean(suggestions))]
    MessageNotFound { id: String, suggestions: Vec<String> },

    #[error("unknown term '-{id}'")]
    TermNotFound { id: String },

    #[error("unknown attribute '{attribute}' on '{id}'")]
    AttributeNotFound { id: String, attribute: String },

    #[error("unknown variable '${name}'")]
    VariableNotFound { name: String },

    #[error("message '{id}' has no value")]
    NoValue { id: String },

    #[error("cyclic reference to '{id}'")]
    CyclicReference { id: String },

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("function '{name}' failed: {source}")]
    Function {
        name: String,
        #[source]
        source: FunctionError,
    },

    #[error("value of type '{type_name}' cannot be written as text")]
    Uninterpolatable { type_name: String },

    #[error("select expression has no variants")]
    NoVariants,

    #[error("maximum reference depth of {max} exceeded")]
    DepthExceeded { max: usize },

    #[error("too many placeables (limit {max})")]
    TooManyPlaceables { max: usize },
}

impl ResolveError {
    /// The taxonomy tag of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::MessageNotFound { .. }
            | ResolveError::TermNotFound { .. }
            | ResolveError::AttributeNotFound { .. }
            | ResolveError::VariableNotFound { .. }
            | ResolveError::NoValue { .. } => ErrorKind::Reference,
            ResolveError::CyclicReference { .. } => ErrorKind::CyclicReference,
            ResolveError::UnknownFunction { .. }
            | ResolveError::Function { .. }
            | ResolveError::Uninterpolatable { .. }
            | ResolveError::NoVariants
            | ResolveError::DepthExceeded { .. }
            | ResolveError::TooManyPlaceables { .. } => ErrorKind::Resolution,
        }
    }
}

/// Serialized as `{ "kind": ..., "message": ... }`.
impl Serialize for ResolveError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResolveError", 2)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// An error returned by a function called from a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionError {
    #[error("expected {expected} positional argument(s), got {got}")]
    Arity { expected: usize, got: usize },

    #[error("positional argument {index} must be {expected}")]
    InvalidArgument { index: usize, expected: &'static str },

    #[error("invalid value '{value}' for option '{option}'")]
    InvalidOption { option: String, value: String },

    #[error("{0}")]
    Other(String),
}

fn did_you_mean(suggestions: &[String]) -> String {
    match suggestions {
        [] => String::new(),
        [only] => format!("; did you mean '{only}'?"),
        _ => format!("; did you mean one of: {}?", suggestions.join(", ")),
    }
}

/// Compute typo suggestions using Levenshtein distance.
///
/// - distance <= 1 for names of 3 chars or fewer
/// - distance <= 2 for longer names
/// - at most 3 suggestions, closest first
pub fn compute_suggestions<'a>(
    name: &str,
    available: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &str)> = available
        .into_iter()
        .filter_map(|candidate| {
            let distance = levenshtein(name, candidate);
            (distance > 0 && distance <= max_distance).then_some((distance, candidate))
        })
        .collect();

    suggestions.sort();
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
