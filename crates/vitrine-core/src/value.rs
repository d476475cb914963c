//! Runtime value types for field access.
//!
//! The [`Value`] enum is what an [`Item`](crate::Item) hands back when the
//! pipeline asks for a named field. It covers the shapes a display record can
//! carry: strings, numbers, booleans, nested data, and the two "nothing"
//! states (`Null` for an explicit null, `Undefined` for a missing field).

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use serde_json::Value as JsonValue;

/// Runtime field value, borrowed from the source item.
///
/// # Example
///
/// ```
/// use vitrine_core::{Number, Value};
///
/// struct Product {
///     name: String,
///     price: f64,
/// }
///
/// fn field<'a>(p: &'a Product, key: &str) -> Value<'a> {
///     match key {
///         "name" => Value::String(&p.name),
///         "price" => Value::Number(Number::F64(p.price)),
///         _ => Value::Undefined,
///     }
/// }
///
/// let p = Product { name: "Lamp".into(), price: 20.0 };
/// assert_eq!(field(&p, "price").to_display_string(), "20");
/// assert_eq!(field(&p, "color").to_display_string(), "undefined");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Nested data: an array or an object.
    Nested(&'a JsonValue),
    /// Field present but explicitly null.
    Null,
    /// Field not present on the item.
    Undefined,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `String` value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if this is a `Number` value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` for `Null` and `Undefined`.
    pub fn is_nothing(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrows a JSON value as a field value.
    ///
    /// Scalars map onto their own variants; arrays and objects become
    /// [`Value::Nested`].
    pub fn from_json(value: &'a JsonValue) -> Value<'a> {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => Value::Number(Number::from(n)),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(_) | JsonValue::Object(_) => Value::Nested(value),
        }
    }

    /// Coerces the value to its string form.
    ///
    /// This is the form used by the mixed-type tier of field comparison and
    /// by the default cell text: `"undefined"`, `"null"`, `"true"`, numbers
    /// without a trailing `.0`, arrays joined with commas, and
    /// `"[object Object]"` for objects.
    pub fn to_display_string(&self) -> Cow<'a, str> {
        match self {
            Value::String(s) => Cow::Borrowed(s),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Bool(true) => Cow::Borrowed("true"),
            Value::Bool(false) => Cow::Borrowed("false"),
            Value::Nested(json) => {
                let mut out = String::new();
                coerce_json(json, &mut out);
                Cow::Owned(out)
            }
            Value::Null => Cow::Borrowed("null"),
            Value::Undefined => Cow::Borrowed("undefined"),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

fn coerce_json(value: &JsonValue, out: &mut String) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        JsonValue::Number(n) => out.push_str(&Number::from(n).to_string()),
        JsonValue::String(s) => out.push_str(s),
        JsonValue::Array(elements) => {
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // Array joins render null elements as empty strings.
                if !element.is_null() {
                    coerce_json(element, out);
                }
            }
        }
        JsonValue::Object(_) => out.push_str("[object Object]"),
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Comparisons between different numeric types go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) => write_f64(*n, f),
        }
    }
}

fn write_f64(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        // Covers -0.0 as well.
        f.write_str("0")
    } else if (1e-6..1e21).contains(&n.abs()) {
        write!(f, "{}", n)
    } else {
        // Exponent form with an explicit sign: 1e+21, 1.5e-7.
        let exponential = format!("{:e}", n);
        match exponential.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => {
                write!(f, "{}e+{}", mantissa, exp)
            }
            _ => f.write_str(&exponential),
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

macro_rules! number_from {
    ($variant:ident, $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )+
    };
}

number_from!(I64, i64: i8, i16, i32, i64, isize);
number_from!(U64, u64: u8, u16, u32, u64, usize);
number_from!(F64, f64: f32, f64);
