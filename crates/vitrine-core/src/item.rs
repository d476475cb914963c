//! The [`Item`] trait and the dynamic [`Record`] item.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{PipelineError, Result};
use crate::value::Value;

/// A record displayed by a table or grid.
///
/// Items are only ever borrowed by the pipeline. Filtering, sorting and
/// pagination reorder and slice references; nothing mutates the item.
///
/// This trait is typically derived with `#[derive(Item)]` from the
/// `vitrine-macros` crate, but can also be implemented by hand:
///
/// ```
/// use std::borrow::Cow;
/// use vitrine_core::{Item, Number, Value};
///
/// struct Employee {
///     id: u32,
///     name: String,
///     salary: u64,
/// }
///
/// impl Item for Employee {
///     fn item_id(&self) -> Cow<'_, str> {
///         Cow::Owned(self.id.to_string())
///     }
///
///     fn field(&self, key: &str) -> Value<'_> {
///         match key {
///             "id" => Value::Number(Number::from(self.id)),
///             "name" => Value::String(&self.name),
///             "salary" => Value::Number(Number::from(self.salary)),
///             _ => Value::Undefined,
///         }
///     }
/// }
/// ```
pub trait Item {
    /// Stable unique identifier, used as the row or card key.
    fn item_id(&self) -> Cow<'_, str>;

    /// Returns the value of a named field, or [`Value::Undefined`].
    fn field(&self, key: &str) -> Value<'_>;
}

impl<T: Item + ?Sized> Item for &T {
    fn item_id(&self) -> Cow<'_, str> {
        (**self).item_id()
    }

    fn field(&self, key: &str) -> Value<'_> {
        (**self).field(key)
    }
}

impl<T: Item + ?Sized> Item for Box<T> {
    fn item_id(&self) -> Cow<'_, str> {
        (**self).item_id()
    }

    fn field(&self, key: &str) -> Value<'_> {
        (**self).field(key)
    }
}

/// A schemaless item backed by a JSON object.
///
/// The object must carry an `"id"` entry holding a string or a number. All
/// entries, `id` included, are visible as fields.
///
/// ```
/// use vitrine_core::{Item, Record, Value};
///
/// let record = Record::new(7).with("name", "Desk").with("price", 120);
/// assert_eq!(record.item_id(), "7");
/// assert_eq!(record.field("name"), Value::String("Desk"));
/// assert!(record.field("missing").is_nothing());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, JsonValue>", into = "Map<String, JsonValue>")]
pub struct Record {
    fields: Map<String, JsonValue>,
}

impl Record {
    /// Creates a record holding only its id.
    pub fn new(id: impl Into<RecordId>) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), id.into().0);
        Record { fields }
    }

    /// Adds or replaces a field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a field in place.
    ///
    /// Replacing `id` with something other than a string or number is ignored.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        let key = key.into();
        let value = value.into();
        if key == "id" && !is_valid_id(&value) {
            return;
        }
        self.fields.insert(key, value);
    }

    /// Builds a record from a JSON value, which must be an object with an id.
    pub fn from_json(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(map) => Record::try_from(map),
            other => Err(PipelineError::InvalidItem(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parses a JSON array of records.
    pub fn list_from_json_str(json: &str) -> Result<Vec<Record>> {
        serde_json::from_str(json).map_err(|e| PipelineError::InvalidItem(e.to_string()))
    }

    /// Returns the raw JSON of a field.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }

    /// Returns all fields, `id` included.
    pub fn fields(&self) -> &Map<String, JsonValue> {
        &self.fields
    }
}

impl Item for Record {
    fn item_id(&self) -> Cow<'_, str> {
        match self.fields.get("id") {
            Some(JsonValue::String(s)) => Cow::Borrowed(s),
            Some(JsonValue::Number(n)) => Cow::Owned(n.to_string()),
            // Construction guarantees a string or numeric id.
            _ => Cow::Borrowed(""),
        }
    }

    fn field(&self, key: &str) -> Value<'_> {
        self.fields
            .get(key)
            .map(Value::from_json)
            .unwrap_or(Value::Undefined)
    }
}

impl TryFrom<Map<String, JsonValue>> for Record {
    type Error = PipelineError;

    fn try_from(fields: Map<String, JsonValue>) -> Result<Self> {
        match fields.get("id") {
            Some(id) if is_valid_id(id) => Ok(Record { fields }),
            Some(other) => Err(PipelineError::InvalidItem(format!(
                "id must be a string or a number, got {}",
                json_kind(other)
            ))),
            None => Err(PipelineError::InvalidItem("missing 'id' field".to_string())),
        }
    }
}

impl From<Record> for Map<String, JsonValue> {
    fn from(record: Record) -> Self {
        record.fields
    }
}

/// Identifier accepted by [`Record::new`]: a string or an integer.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordId(JsonValue);

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId(JsonValue::from(id))
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId(JsonValue::from(id))
    }
}

macro_rules! record_id_from_int {
    ($($t:ty),+) => {
        $(
            impl From<$t> for RecordId {
                fn from(id: $t) -> Self {
                    RecordId(JsonValue::from(id))
                }
            }
        )+
    };
}

record_id_from_int!(i32, i64, u32, u64, usize);

fn is_valid_id(value: &JsonValue) -> bool {
    matches!(value, JsonValue::String(_) | JsonValue::Number(_))
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;
    use serde_json::json;

    #[test]
    fn numeric_id_is_stringified() {
        let record = Record::new(42u32);
        assert_eq!(record.item_id(), "42");
        assert_eq!(record.field("id"), Value::Number(Number::I64(42)));
    }

    #[test]
    fn from_json_requires_object_with_id() {
        assert!(Record::from_json(json!({"id": "a", "x": 1})).is_ok());
        assert!(matches!(
            Record::from_json(json!({"x": 1})),
            Err(PipelineError::InvalidItem(_))
        ));
        assert!(matches!(
            Record::from_json(json!({"id": true})),
            Err(PipelineError::InvalidItem(_))
        ));
        assert!(matches!(
            Record::from_json(json!([1, 2])),
            Err(PipelineError::InvalidItem(_))
        ));
    }

    #[test]
    fn deserializes_list() {
        let records =
            Record::list_from_json_str(r#"[{"id": 1, "price": 30}, {"id": "b"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].field("price"), Value::Number(Number::I64(30)));
        assert_eq!(records[1].item_id(), "b");

        assert!(Record::list_from_json_str(r#"[{"price": 30}]"#).is_err());
    }

    #[test]
    fn invalid_id_replacement_is_ignored() {
        let record = Record::new("a").with("id", json!(null));
        assert_eq!(record.item_id(), "a");
    }

    #[test]
    fn nested_fields_are_exposed() {
        let record = Record::new(1).with("tags", json!(["a", "b"]));
        assert_eq!(record.field("tags").to_display_string(), "a,b");
    }
}
