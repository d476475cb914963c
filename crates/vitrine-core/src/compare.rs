//! Field comparison policy.
//!
//! Field-keyed sorts compare two [`Value`]s using three tiers, checked in
//! order:
//!
//! 1. both strings: locale-aware comparison ([`locale_compare`])
//! 2. both numbers: numeric comparison (NaN compares equal)
//! 3. anything else: both sides are coerced with
//!    [`Value::to_display_string`] and compared locale-aware
//!
//! The third tier means a missing field sorts as the string `"undefined"` and
//! booleans sort as `"false"`/`"true"`. Consumers rely on that ordering, so it
//! is kept as is.

use std::cmp::Ordering;

use crate::value::Value;

/// Compares two field values with the three-tier policy.
pub fn compare_field_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => locale_compare(a, b),
        (Value::Number(a), Value::Number(b)) => a.compare(*b).unwrap_or(Ordering::Equal),
        _ => locale_compare(&a.to_display_string(), &b.to_display_string()),
    }
}

/// Locale-aware string comparison.
///
/// Approximates root-locale collation level by level:
///
/// - primary: accent-folded (`deunicode`), lowercased text, where whitespace
///   sorts before punctuation, punctuation before symbols, symbols before
///   digits and digits before letters
/// - secondary: at the first accent difference, the unaccented letter sorts first
/// - tertiary: at the first case difference, lowercase sorts first
/// - last resort: raw code-point order, so distinct strings never tie
///
/// ```
/// use std::cmp::Ordering;
/// use vitrine_core::locale_compare;
///
/// assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
/// assert_eq!(locale_compare("éclair", "eclairs"), Ordering::Less);
/// assert_eq!(locale_compare("a", "A"), Ordering::Less);
/// assert_eq!(locale_compare("Resume", "résumé"), Ordering::Less);
/// assert_eq!(locale_compare("~", "a"), Ordering::Less);
/// ```
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let key_a = CollationKey::new(a);
    let key_b = CollationKey::new(b);

    key_a
        .primary
        .cmp(&key_b.primary)
        .then_with(|| key_a.secondary.cmp(&key_b.secondary))
        .then_with(|| key_a.tertiary.cmp(&key_b.tertiary))
        .then_with(|| a.cmp(b))
}

/// ASCII punctuation in root collation order.
const PUNCTUATION: &str = "_-,;:!?.'\"()[]{}@*/\\&#%";
/// ASCII symbols in root collation order.
const SYMBOLS: &str = "`^+<=>|~$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Symbol,
    Digit,
    Letter,
}

struct CollationKey {
    primary: Vec<(CharClass, u32)>,
    /// One entry per source char: 0 when unaccented, else the accented char.
    secondary: Vec<u32>,
    /// One entry per source char: whether it is uppercase.
    tertiary: Vec<bool>,
}

impl CollationKey {
    fn new(s: &str) -> Self {
        let mut key = CollationKey {
            primary: Vec::with_capacity(s.len()),
            secondary: Vec::with_capacity(s.len()),
            tertiary: Vec::with_capacity(s.len()),
        };

        for c in s.chars() {
            match fold_char(c) {
                Some(base) => {
                    key.primary.extend(base.chars().flat_map(char::to_lowercase).map(weight));
                    key.secondary.push(c.to_lowercase().next().map_or(c as u32, |l| l as u32));
                }
                None => {
                    key.primary.extend(c.to_lowercase().map(weight));
                    key.secondary.push(0);
                }
            }
            key.tertiary.push(c.is_uppercase());
        }
        key
    }
}

/// The base-letter spelling of a non-ASCII char, if it has one.
fn fold_char(c: char) -> Option<&'static str> {
    if c.is_ascii() {
        None
    } else {
        deunicode::deunicode_char(c).filter(|base| !base.is_empty())
    }
}

fn weight(c: char) -> (CharClass, u32) {
    if c.is_whitespace() {
        (CharClass::Whitespace, c as u32)
    } else if let Some(rank) = PUNCTUATION.find(c) {
        (CharClass::Punctuation, rank as u32)
    } else if let Some(rank) = SYMBOLS.find(c) {
        (CharClass::Symbol, rank as u32)
    } else if c.is_numeric() {
        (CharClass::Digit, c as u32)
    } else if c.is_alphabetic() {
        (CharClass::Letter, c as u32)
    } else {
        (CharClass::Symbol, 0x80 + c as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;
    use serde_json::json;

    #[test]
    fn strings_compare_case_insensitively_first() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("Zebra", "apple"), Ordering::Greater);
    }

    #[test]
    fn lowercase_before_uppercase_on_tie() {
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("Abc", "abc"), Ordering::Greater);
    }

    #[test]
    fn accents_fold_to_base_letters() {
        assert_eq!(locale_compare("résumé", "resume"), Ordering::Greater);
        assert_eq!(locale_compare("résumé", "resumes"), Ordering::Less);
    }

    #[test]
    fn accents_outrank_case() {
        assert_eq!(locale_compare("Resume", "résumé"), Ordering::Less);
        assert_eq!(locale_compare("résumé", "Resume"), Ordering::Greater);
        assert_eq!(locale_compare("Résumé", "résumé"), Ordering::Greater);
        assert_eq!(locale_compare("cote", "côte"), Ordering::Less);
    }

    #[test]
    fn punctuation_and_symbols_sort_before_digits_and_letters() {
        assert_eq!(locale_compare("~", "a"), Ordering::Less);
        assert_eq!(locale_compare("{", "z"), Ordering::Less);
        assert_eq!(locale_compare("_", "0"), Ordering::Less);
        assert_eq!(locale_compare("9", "a"), Ordering::Less);
        assert_eq!(locale_compare(" ", "-"), Ordering::Less);
        // punctuation before symbols
        assert_eq!(locale_compare("!", "+"), Ordering::Less);
        assert_eq!(locale_compare("item-2", "item 2"), Ordering::Greater);
    }

    #[test]
    fn numbers_compare_numerically() {
        let a = Value::Number(Number::I64(9));
        let b = Value::Number(Number::F64(10.5));
        assert_eq!(compare_field_values(&a, &b), Ordering::Less);
    }

    #[test]
    fn nan_compares_equal() {
        let nan = Value::Number(Number::F64(f64::NAN));
        let one = Value::Number(Number::I64(1));
        assert_eq!(compare_field_values(&nan, &one), Ordering::Equal);
    }

    #[test]
    fn mixed_types_compare_as_strings() {
        // "10" vs "9" as strings
        let n = Value::Number(Number::I64(10));
        let s = Value::String("9");
        assert_eq!(compare_field_values(&n, &s), Ordering::Less);

        // "undefined" vs "null"
        assert_eq!(
            compare_field_values(&Value::Undefined, &Value::Null),
            Ordering::Greater
        );

        // "false" < "true"
        assert_eq!(
            compare_field_values(&Value::Bool(false), &Value::Bool(true)),
            Ordering::Less
        );
    }

    #[test]
    fn missing_field_sorts_as_undefined_string() {
        // "undefined" sorts after "apple" but before "zebra"
        let apple = Value::String("apple");
        let zebra = Value::String("zebra");
        let json_list = json!(["x"]);
        assert_eq!(
            compare_field_values(&Value::Undefined, &apple),
            Ordering::Greater
        );
        assert_eq!(
            compare_field_values(&Value::Undefined, &zebra),
            Ordering::Less
        );
        assert_eq!(
            compare_field_values(&Value::Nested(&json_list), &Value::String("x")),
            Ordering::Equal
        );
    }
}
