//! Function registry for `NAME(...)` calls in messages.
//!
//! Built-in functions live in a process-wide table. Each bundle carries its
//! own overrides, which take precedence over the built-ins with the same name.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::interpreter::FunctionError;
use crate::types::{Args, NumberStyle, NumberValue, PluralType, Value};

/// Function signature.
///
/// Takes:
/// - `positional`: resolved positional arguments
/// - `named`: named arguments (always literals in source)
/// - `locale`: the bundle's locale identifier
///
/// Returns the result value or an error. Errors never abort resolution; the
/// call is replaced by a fallback string.
pub type Function =
    Arc<dyn Fn(&[Value], &Args, &str) -> Result<Value, FunctionError> + Send + Sync>;

static BUILTINS: LazyLock<HashMap<&'static str, Function>> = LazyLock::new(|| {
    let mut builtins: HashMap<&'static str, Function> = HashMap::new();
    builtins.insert("NUMBER", Arc::new(number));
    builtins
});

/// Registry for functions callable from messages.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    /// Functions registered on this bundle; shadow built-ins.
    overrides: HashMap<String, Function>,
}

impl FunctionRegistry {
    /// Create a registry with only the built-in functions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a function by name.
    ///
    /// Checks overrides first, then falls back to built-ins.
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.overrides.get(name).or_else(|| BUILTINS.get(name))
    }

    /// Register a function, returning the override it replaced.
    pub fn insert(&mut self, name: impl Into<String>, function: Function) -> Option<Function> {
        self.overrides.insert(name.into(), function)
    }

    /// Check if a function exists.
    pub fn has_function(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.overrides.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FunctionRegistry")
            .field("overrides", &names)
            .finish()
    }
}

/// `NUMBER(value, options...)`: a number with explicit formatting options.
///
/// Recognized options: `minimumFractionDigits`, `maximumFractionDigits`,
/// `minimumIntegerDigits`, `useGrouping` (on unless `"false"`), `style`
/// (`decimal`, `percent`), and `type` (`cardinal`, `ordinal`). Other options
/// are ignored.
pub fn number(positional: &[Value], named: &Args, _locale: &str) -> Result<Value, FunctionError> {
    let [value] = positional else {
        return Err(FunctionError::Arity {
            expected: 1,
            got: positional.len(),
        });
    };

    let mut number = match value {
        Value::Number(number) => *number,
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map(NumberValue::new)
            .map_err(|_| FunctionError::InvalidArgument {
                index: 0,
                expected: "a number",
            })?,
        Value::Bool(_) | Value::Custom(_) => {
            return Err(FunctionError::InvalidArgument {
                index: 0,
                expected: "a number",
            });
        }
    };

    let options = &mut number.options;
    if let Some(value) = named.get("minimumFractionDigits") {
        options.minimum_fraction_digits = Some(digits_option("minimumFractionDigits", value)?);
    }
    if let Some(value) = named.get("maximumFractionDigits") {
        options.maximum_fraction_digits = Some(digits_option("maximumFractionDigits", value)?);
    }
    if let Some(value) = named.get("minimumIntegerDigits") {
        options.minimum_integer_digits = Some(digits_option("minimumIntegerDigits", value)?);
    }
    options.use_grouping = match named.get("useGrouping") {
        None => true,
        Some(Value::Bool(grouping)) => *grouping,
        Some(Value::String(text)) => text != "false",
        Some(value @ (Value::Number(_) | Value::Custom(_))) => {
            return Err(invalid_option("useGrouping", value));
        }
    };
    if let Some(value) = named.get("style") {
        options.style = match value.as_string() {
            Some("decimal") => NumberStyle::Decimal,
            Some("percent") => NumberStyle::Percent,
            _ => return Err(invalid_option("style", value)),
        };
    }
    if let Some(value) = named.get("type") {
        options.plural_type = match value.as_string() {
            Some("cardinal") => PluralType::Cardinal,
            Some("ordinal") => PluralType::Ordinal,
            _ => return Err(invalid_option("type", value)),
        };
    }

    Ok(Value::Number(number))
}

/// Read a digit-count option: a whole number from 0 to 100.
fn digits_option(option: &str, value: &Value) -> Result<usize, FunctionError> {
    match value.as_number() {
        Some(number)
            if number.value.fract() == 0.0 && (0.0..=100.0).contains(&number.value) =>
        {
            Ok(number.value as usize)
        }
        _ => Err(invalid_option(option, value)),
    }
}

fn invalid_option(option: &str, value: &Value) -> FunctionError {
    FunctionError::InvalidOption {
        option: option.to_string(),
        value: value
            .format("en")
            .unwrap_or_else(|| value.type_name().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(pairs: &[(&str, Value)]) -> Args {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn number_applies_fraction_digits() {
        let result = number(
            &[Value::from(1.5)],
            &named(&[("minimumFractionDigits", Value::from(2))]),
            "en",
        )
        .unwrap();
        assert_eq!(result.format("en").unwrap(), "1.50");
    }

    #[test]
    fn number_parses_numeric_strings() {
        let result = number(&[Value::from(" 42 ")], &Args::new(), "en").unwrap();
        assert_eq!(result.as_number().unwrap().value, 42.0);
    }

    #[test]
    fn number_rejects_wrong_arity() {
        let error = number(&[], &Args::new(), "en").unwrap_err();
        assert_eq!(
            error,
            FunctionError::Arity {
                expected: 1,
                got: 0
            }
        );
    }

    #[test]
    fn number_rejects_unknown_style() {
        let error = number(
            &[Value::from(1)],
            &named(&[("style", Value::from("currency"))]),
            "en",
        )
        .unwrap_err();
        assert_eq!(error.to_string(), "invalid value 'currency' for option 'style'");
    }

    #[test]
    fn overrides_shadow_builtins() {
        let mut registry = FunctionRegistry::new();
        assert!(registry.has_function("NUMBER"));
        registry.insert(
            "NUMBER",
            Arc::new(|_: &[Value], _: &Args, _: &str| Ok(Value::from("custom"))),
        );
        let function = registry.get("NUMBER").unwrap();
        let result = function(&[Value::from(1)], &Args::new(), "en").unwrap();
        assert_eq!(result, Value::from("custom"));
    }
}
