//! CLDR plural category resolution.
//!
//! Different languages have different plural rules: English has "one" and
//! "other", Russian has "one", "few", "many", and "other", and Arabic uses all
//! six categories: "zero", "one", "two", "few", "many", "other".
//!
//! Plural rules are cached per thread per language and rule type, so repeated
//! calls reuse the previously constructed `PluralRules`. Languages outside the
//! supported set use English rules.

use std::cell::RefCell;

use fixed_decimal::Decimal;
use icu_locale_core::Locale;
use icu_plurals::{PluralCategory, PluralOperands, PluralRules, PluralRulesPreferences};

use crate::types::{NumberValue, PluralType, language_of};

/// Supported language codes for plural rule resolution.
const SUPPORTED_LANGUAGES: &[&str] = &[
    "ar", "bn", "cs", "de", "el", "en", "es", "fa", "fr", "he", "hi", "id", "it", "ja", "ko", "nl",
    "pl", "pt", "ro", "ru", "sk", "sv", "th", "tr", "uk", "vi", "zh",
];

thread_local! {
    /// Per-thread cache of plural rules keyed by language code and rule type.
    /// `None` records a language whose rules could not be built.
    static PLURAL_RULES_CACHE: RefCell<Vec<(&'static str, PluralType, Option<PluralRules>)>> =
        const { RefCell::new(Vec::new()) };
}

/// Normalize a locale identifier to a supported static language code.
///
/// Returns `"en"` for unrecognized languages.
fn normalize_lang(locale: &str) -> &'static str {
    let lang = language_of(locale);
    SUPPORTED_LANGUAGES
        .iter()
        .find(|code| code.eq_ignore_ascii_case(lang))
        .copied()
        .unwrap_or("en")
}

fn build_rules(lang: &'static str, plural_type: PluralType) -> Option<PluralRules> {
    let locale = Locale::try_from_str(lang).ok()?;
    let prefs = PluralRulesPreferences::from(&locale);
    let rules = match plural_type {
        PluralType::Cardinal => PluralRules::try_new_cardinal(prefs),
        PluralType::Ordinal => PluralRules::try_new_ordinal(prefs),
    };
    rules.ok()
}

/// Translate a `PluralCategory` enum to its string representation.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

/// Get the CLDR plural category for a number in a given locale.
///
/// Returns one of: "zero", "one", "two", "few", "many", "other".
///
/// # Examples
///
/// ```
/// use ftl::plural_category;
///
/// // English: 1 = "one", everything else = "other"
/// assert_eq!(plural_category("en", 1.0), "one");
/// assert_eq!(plural_category("en-US", 2.0), "other");
///
/// // Russian: complex rules for "one", "few", "many", "other"
/// assert_eq!(plural_category("ru", 1.0), "one");
/// assert_eq!(plural_category("ru", 2.0), "few");
/// assert_eq!(plural_category("ru", 5.0), "many");
/// ```
pub fn plural_category(locale: &str, n: f64) -> &'static str {
    plural_category_for(locale, &NumberValue::new(n))
}

/// Get the plural category for a formatted number.
///
/// Visible fraction digits count: in English `1` is "one" but `1.0` is
/// "other". The number's [`PluralType`] picks cardinal or ordinal rules.
pub fn plural_category_for(locale: &str, number: &NumberValue) -> &'static str {
    let lang = normalize_lang(locale);
    let plural_type = number.options.plural_type;
    let plain = number.to_plain_string();
    let Ok(decimal) = Decimal::try_from_utf8(plain.as_bytes()) else {
        return simple_category(&plain);
    };
    let operands = PluralOperands::from(&decimal);

    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some((_, _, rules)) = cache
            .iter()
            .find(|(code, kind, _)| *code == lang && *kind == plural_type)
        {
            return categorize(rules.as_ref(), operands, &plain);
        }
        let rules = build_rules(lang, plural_type);
        let category = categorize(rules.as_ref(), operands, &plain);
        cache.push((lang, plural_type, rules));
        category
    })
}

fn categorize(rules: Option<&PluralRules>, operands: PluralOperands, plain: &str) -> &'static str {
    match rules {
        Some(rules) => category_str(rules.category_for(operands)),
        None => simple_category(plain),
    }
}

/// The two-category rule: exactly `1` is "one", everything else "other".
fn simple_category(plain: &str) -> &'static str {
    if plain == "1" { "one" } else { "other" }
}
