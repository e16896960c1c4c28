//! Parser, AST and resolver for the FTL localization message language.
//!
//! ```
//! use ftl::{Bundle, args};
//!
//! let mut bundle = Bundle::builder().use_isolating(false).build();
//! bundle.add_source(r#"
//! emails = { $count ->
//!     [one] one email
//!    *[other] { $count } emails
//! }
//! "#).unwrap();
//!
//! assert_eq!(bundle.format("emails", Some(&args! { "count" => 1 })).0, "one email");
//! assert_eq!(bundle.format("emails", Some(&args! { "count" => 2 })).0, "2 emails");
//! ```

pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    Bundle, EntryTable, ErrorKind, FileLoader, Function, FunctionError, FunctionRegistry,
    LoadError, LoadWarning, Localization, ResolveError, Resolver, ResourceLoader,
    compute_suggestions, plural_category,
};
pub use parser::{ParseError, Resource, parse, serialize};
pub use types::{Args, CustomValue, NumberValue, Value};

/// Creates an [`Args`] map from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, booleans, or strings directly.
///
/// # Example
///
/// ```
/// use ftl::{args, Value};
///
/// let a = args! { "count" => 3, "name" => "Alice" };
/// assert_eq!(a.len(), 2);
/// assert_eq!(a["count"], Value::from(3));
/// assert_eq!(a["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! args {
    {} => {
        $crate::Args::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Args::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
