//! FTL interpreter for formatting messages.
//!
//! This module turns parsed resources into formatted strings. A [`Bundle`]
//! holds the entries of one locale, a [`Resolver`] walks their patterns with
//! caller-supplied variables, and a [`Localization`] chains bundles so that
//! missing translations fall back to the next locale.

mod bundle;
mod context;
mod error;
mod fallback;
mod functions;
mod plural;
mod registry;
mod resolver;

pub use bundle::Bundle;
pub use context::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_PLACEABLES};
pub use error::{
    ErrorKind, FunctionError, LoadError, LoadWarning, ResolveError, compute_suggestions,
};
pub use fallback::{FileLoader, Localization, ResourceLoader};
pub use functions::{Function, FunctionRegistry, number};
pub use plural::{plural_category, plural_category_for};
pub use registry::EntryTable;
pub use resolver::Resolver;
