//! Integration tests for NUMBER and custom functions.

use ftl::{Bundle, FunctionError, ResolveError, Value, args};

fn bundle(locale: &str, source: &str) -> Bundle {
    let mut bundle = Bundle::builder().locale(locale).use_isolating(false).build();
    bundle.add_source(source).unwrap();
    bundle
}

// =============================================================================
// NUMBER
// =============================================================================

#[test]
fn number_fraction_digits() {
    let bundle = bundle(
        "en",
        "min = { NUMBER($n, minimumFractionDigits: 2) }\nmax = { NUMBER($n, maximumFractionDigits: 1) }\n",
    );
    assert_eq!(bundle.format("min", Some(&args! { "n" => 3 })).0, "3.00");
    assert_eq!(bundle.format("max", Some(&args! { "n" => 5.4321 })).0, "5.4");
}

#[test]
fn number_grouping_is_on_by_default() {
    let bundle = bundle(
        "en",
        "grouped = { NUMBER($n) }\nplain = { NUMBER($n, useGrouping: \"false\") }\n",
    );
    let args = args! { "n" => 1234567 };
    assert_eq!(bundle.format("grouped", Some(&args)).0, "1,234,567");
    assert_eq!(bundle.format("plain", Some(&args)).0, "1234567");
}

#[test]
fn number_uses_locale_separators() {
    let bundle = bundle("de-DE", "n = { NUMBER($n) }\n");
    assert_eq!(bundle.format("n", Some(&args! { "n" => 1234567.5 })).0, "1.234.567,5");
}

#[test]
fn number_percent_style() {
    let bundle = bundle("en", "p = { NUMBER($ratio, style: \"percent\") }\n");
    assert_eq!(bundle.format("p", Some(&args! { "ratio" => 0.25 })).0, "25%");
}

#[test]
fn number_minimum_integer_digits() {
    let bundle = bundle("en", "t = { NUMBER($minutes, minimumIntegerDigits: 2) }\n");
    assert_eq!(bundle.format("t", Some(&args! { "minutes" => 7 })).0, "07");
}

#[test]
fn number_accepts_numeric_strings_and_literals() {
    let bundle = bundle("en", "s = { NUMBER(\"1500\") }\nl = { NUMBER(2.5, minimumFractionDigits: 3) }\n");
    assert_eq!(bundle.format("s", None).0, "1,500");
    assert_eq!(bundle.format("l", None).0, "2.500");
}

#[test]
fn number_options_drive_plural_selection() {
    let bundle = bundle(
        "en",
        "one = { NUMBER($n, minimumFractionDigits: 1) ->\n    [one] singular\n   *[other] plural\n}\nplace = { NUMBER($pos, type: \"ordinal\") ->\n    [one] { $pos }st\n    [two] { $pos }nd\n    [few] { $pos }rd\n   *[other] { $pos }th\n}\n",
    );
    assert_eq!(bundle.format("one", Some(&args! { "n" => 1 })).0, "plural");
    assert_eq!(bundle.format("place", Some(&args! { "pos" => 1 })).0, "1st");
    assert_eq!(bundle.format("place", Some(&args! { "pos" => 22 })).0, "22nd");
    assert_eq!(bundle.format("place", Some(&args! { "pos" => 13 })).0, "13th");
}

#[test]
fn number_errors_fall_back() {
    let bundle = bundle(
        "en",
        "arity = { NUMBER() }\ntext = { NUMBER(\"abc\") }\nstyle = { NUMBER(1, style: \"currency\") }\n",
    );

    let (text, errors) = bundle.format("arity", None);
    assert_eq!(text, "{NUMBER()}");
    assert_eq!(
        errors,
        [ResolveError::Function {
            name: "NUMBER".to_string(),
            source: FunctionError::Arity { expected: 1, got: 0 },
        }]
    );

    let (text, errors) = bundle.format("text", None);
    assert_eq!(text, "{NUMBER()}");
    assert_eq!(
        errors[0].to_string(),
        "function 'NUMBER' failed: positional argument 0 must be a number"
    );

    let (text, errors) = bundle.format("style", None);
    assert_eq!(text, "{NUMBER()}");
    assert_eq!(
        errors[0].to_string(),
        "function 'NUMBER' failed: invalid value 'currency' for option 'style'"
    );
}

#[test]
fn failed_argument_skips_the_call() {
    let bundle = bundle("en", "n = { NUMBER($missing) }\n");
    let (text, errors) = bundle.format("n", None);
    assert_eq!(text, "{NUMBER()}");
    assert_eq!(
        errors,
        [ResolveError::VariableNotFound {
            name: "missing".to_string()
        }]
    );
}

#[test]
fn unknown_function_falls_back() {
    let bundle = bundle("en", "x = { NOPE($x) }\n");
    let (text, errors) = bundle.format("x", Some(&args! { "x" => 1 }));
    assert_eq!(text, "{NOPE()}");
    assert_eq!(
        errors,
        [ResolveError::UnknownFunction {
            name: "NOPE".to_string()
        }]
    );
}

#[test]
fn failing_selector_function_uses_default_variant() {
    let bundle = bundle("en", "x = { NOPE() ->\n    [one] one\n   *[other] other\n}\n");
    let (text, errors) = bundle.format("x", None);
    assert_eq!(text, "other");
    assert_eq!(errors.len(), 1);
}

// =============================================================================
// Custom Functions
// =============================================================================

#[test]
fn custom_function_receives_arguments() {
    let mut bundle = bundle("fr", "x = { JOIN($a, \"b\", sep: \"-\") }\n");
    bundle.add_function("JOIN", |positional, named, locale| {
        let sep = named.get("sep").and_then(Value::as_string).unwrap_or(",");
        let parts: Vec<String> = positional
            .iter()
            .filter_map(|value| value.format(locale))
            .collect();
        Ok(Value::from(format!("{locale}:{}", parts.join(sep))))
    });
    assert!(bundle.has_function("JOIN"));
    assert_eq!(bundle.format("x", Some(&args! { "a" => 1.5 })).0, "fr:1,5-b");
}

#[test]
fn custom_function_errors_are_reported() {
    let mut bundle = bundle("en", "x = { FAIL() }\n");
    bundle.add_function("FAIL", |_, _, _| Err(FunctionError::Other("nope".to_string())));
    let (text, errors) = bundle.format("x", None);
    assert_eq!(text, "{FAIL()}");
    assert_eq!(errors[0].to_string(), "function 'FAIL' failed: nope");
}

#[test]
fn bundle_functions_shadow_builtins() {
    let mut bundle = bundle("en", "x = { NUMBER($n) }\n");
    bundle.add_function("NUMBER", |_, _, _| Ok(Value::from("overridden")));
    assert_eq!(bundle.format("x", Some(&args! { "n" => 1 })).0, "overridden");

    let other = self::bundle("en", "x = { NUMBER($n) }\n");
    assert_eq!(other.format("x", Some(&args! { "n" => 1 })).0, "1");
}
