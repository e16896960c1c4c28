//! FTL parser, serializer and AST traversal.
//!
//! [`parse`] turns source text into a [`Resource`]. It never fails: entries
//! that cannot be parsed are kept as [`Junk`] with annotations, and parsing
//! resumes at the next entry. The AST is plain data and can be inspected
//! with [`visit::Visitor`], rewritten with [`visit::Transformer`], or written
//! back out with [`serialize`].

pub mod ast;
pub mod error;
mod pattern;
mod resource;
mod serializer;
mod token;
pub mod visit;

pub use ast::*;
pub use error::{ParseError, ParseErrorKind};
pub use pattern::MAX_NESTING;
pub use resource::{line_column, parse};
pub use serializer::{SerializeOptions, serialize, serialize_with_options};
