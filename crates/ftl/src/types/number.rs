//! Numbers with formatting options.

use crate::parser::NumberLiteral;

/// Whether a number is written as a plain decimal or a percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberStyle {
    #[default]
    Decimal,
    /// The value is multiplied by 100 and followed by `%`.
    Percent,
}

/// Which CLDR plural rules select variants for a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PluralType {
    /// Quantities: "1 file", "2 files".
    #[default]
    Cardinal,
    /// Positions: "1st", "2nd".
    Ordinal,
}

/// Options controlling how a [`NumberValue`] is written and categorized.
///
/// These mirror the named options accepted by the `NUMBER` function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberOptions {
    pub minimum_fraction_digits: Option<usize>,
    pub maximum_fraction_digits: Option<usize>,
    pub minimum_integer_digits: Option<usize>,
    pub use_grouping: bool,
    pub style: NumberStyle,
    pub plural_type: PluralType,
}

/// A numeric runtime value.
///
/// Numbers written in FTL source keep the precision they were written with:
/// `1.0` is one with one fraction digit, which renders as `1.0` and selects
/// the `other` plural category in English.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberValue {
    pub value: f64,
    pub options: NumberOptions,
}

impl NumberValue {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            options: NumberOptions::default(),
        }
    }

    /// Create a number from a literal, keeping its visible fraction digits.
    pub fn from_literal(literal: &NumberLiteral) -> Self {
        let fraction_digits = literal
            .raw
            .split_once('.')
            .map_or(0, |(_, fraction)| fraction.len());
        Self {
            value: literal.value,
            options: NumberOptions {
                minimum_fraction_digits: (fraction_digits > 0).then_some(fraction_digits),
                ..NumberOptions::default()
            },
        }
    }

    /// Format this number for `locale`.
    ///
    /// Uses the locale's decimal separator. Digit grouping is applied only
    /// when [`NumberOptions::use_grouping`] is set.
    pub fn format(&self, locale: &str) -> String {
        if self.value.is_nan() {
            return "NaN".to_string();
        }
        if self.value.is_infinite() {
            let sign = if self.value < 0.0 { "-" } else { "" };
            return format!("{sign}∞");
        }

        let (decimal_separator, group_separator) = separators(locale);
        let plain = self.to_plain_string();
        let (sign, unsigned) = match plain.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", plain.as_str()),
        };
        let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        let mut output = String::from(sign);
        if self.options.use_grouping {
            output.push_str(&group_digits(integer, group_separator));
        } else {
            output.push_str(integer);
        }
        if !fraction.is_empty() {
            output.push(decimal_separator);
            output.push_str(fraction);
        }
        if self.options.style == NumberStyle::Percent {
            output.push('%');
        }
        output
    }

    /// The number as ASCII digits with `.` as separator and no grouping,
    /// after applying precision and style options.
    ///
    /// This is also the form plural rules see, so `1.0` stays distinct from
    /// `1`.
    pub fn to_plain_string(&self) -> String {
        let scaled = match self.options.style {
            NumberStyle::Decimal => self.value,
            NumberStyle::Percent => self.value * 100.0,
        };
        let magnitude = scaled.abs();

        let natural = magnitude.to_string();
        let natural_digits = natural.split_once('.').map_or(0, |(_, fraction)| fraction.len());
        let minimum = self.options.minimum_fraction_digits.unwrap_or(0);
        let maximum = self
            .options
            .maximum_fraction_digits
            .unwrap_or(natural_digits)
            .max(minimum);
        let digits = natural_digits.clamp(minimum, maximum);

        let rounded = format!("{magnitude:.digits$}");
        let (integer, fraction) = rounded.split_once('.').unwrap_or((&rounded, ""));

        let mut fraction = fraction.trim_end_matches('0').to_string();
        while fraction.len() < minimum {
            fraction.push('0');
        }

        let mut output = String::new();
        if scaled < 0.0 && (integer.bytes().any(|b| b != b'0') || !fraction.is_empty()) {
            output.push('-');
        }
        let minimum_integer = self.options.minimum_integer_digits.unwrap_or(1);
        for _ in integer.len()..minimum_integer {
            output.push('0');
        }
        output.push_str(integer);
        if !fraction.is_empty() {
            output.push('.');
            output.push_str(&fraction);
        }
        output
    }
}

impl From<f64> for NumberValue {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Insert `separator` between groups of three integer digits.
fn group_digits(integer: &str, separator: char) -> String {
    let mut output = String::new();
    for (index, digit) in integer.chars().enumerate() {
        let remaining = integer.len() - index;
        if index > 0 && remaining % 3 == 0 {
            output.push(separator);
        }
        output.push(digit);
    }
    output
}

/// Decimal and group separators for a locale's language.
fn separators(locale: &str) -> (char, char) {
    match language_of(locale) {
        "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "ro" | "el" | "vi" | "da" => (',', '.'),
        "fr" => (',', '\u{202f}'),
        "ru" | "uk" | "pl" | "cs" | "sk" | "sv" | "fi" | "nb" | "no" | "bg" | "hu" => {
            (',', '\u{a0}')
        }
        _ => ('.', ','),
    }
}

/// The language subtag of a locale identifier such as `en-US` or `pt_BR`.
pub(crate) fn language_of(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: f64, options: NumberOptions) -> NumberValue {
        NumberValue { value, options }
    }

    #[test]
    fn default_formatting_has_no_grouping() {
        assert_eq!(NumberValue::new(1234567.5).format("en"), "1234567.5");
        assert_eq!(NumberValue::new(1234567.5).format("de"), "1234567,5");
    }

    #[test]
    fn grouping_uses_locale_separator() {
        let options = NumberOptions {
            use_grouping: true,
            ..NumberOptions::default()
        };
        assert_eq!(number(1234567.0, options).format("en-US"), "1,234,567");
        assert_eq!(number(1234567.0, options).format("de"), "1.234.567");
        assert_eq!(number(123.0, options).format("en"), "123");
    }

    #[test]
    fn fraction_digit_bounds() {
        let options = NumberOptions {
            minimum_fraction_digits: Some(2),
            ..NumberOptions::default()
        };
        assert_eq!(number(3.0, options).to_plain_string(), "3.00");

        let options = NumberOptions {
            maximum_fraction_digits: Some(1),
            ..NumberOptions::default()
        };
        assert_eq!(number(5.4321, options).to_plain_string(), "5.4");
        assert_eq!(number(2.96, options).to_plain_string(), "3");
    }

    #[test]
    fn minimum_integer_digits_pads() {
        let options = NumberOptions {
            minimum_integer_digits: Some(3),
            ..NumberOptions::default()
        };
        assert_eq!(number(7.0, options).to_plain_string(), "007");
    }

    #[test]
    fn percent_style() {
        let options = NumberOptions {
            style: NumberStyle::Percent,
            ..NumberOptions::default()
        };
        assert_eq!(number(0.25, options).format("en"), "25%");
    }

    #[test]
    fn negative_numbers_keep_sign() {
        assert_eq!(NumberValue::new(-5.5).format("en"), "-5.5");
    }
}
