//! Dynamic record

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use super::Row;
use super::Value;
use crate::error::FieldError;
use crate::placeholder::PLACEHOLDER_PREFIX;

/// A dynamic record: an identifier plus a map of named field values.
///
/// Records are the shape-agnostic row type: projections produce them and
/// placeholders are made of them. Typed rows can be used directly with the
/// engine through [`Row`] and [`Column`](super::Column) accessors instead.
///
/// Serialization round-trips only for JSON-native kinds. See [`Value`] for
/// what deserializing loses.
///
/// # Example
///
/// ```
/// use tabula_lib::model::Record;
///
/// let record = Record::new("prod-1")
///     .set("name", "Laptop")
///     .set("stock", 12i64);
///
/// assert_eq!(record.get_string("name").unwrap(), Some("Laptop"));
/// assert!(record.get_string("missing").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    /// The unique identifier of the record.
    pub(crate) id: String,

    /// The field values.
    #[serde(flatten)]
    pub(crate) fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates a new empty record with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Returns the record identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns `true` if this record was produced by the placeholder generator.
    pub fn is_placeholder(&self) -> bool {
        self.fields.is_empty() && self.id.starts_with(PLACEHOLDER_PREFIX)
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field value, or [`FieldError::Missing`] if the record has no such field.
    pub fn value(&self, field: &str) -> Result<&Value, FieldError> {
        self.fields.get(field).ok_or_else(|| FieldError::missing(field))
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.value(field)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.as_str())),
            other => Err(FieldError::type_mismatch(field, "string", other.type_name())),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.value(field)? {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(*b)),
            other => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.value(field)? {
            Value::Null => Ok(None),
            Value::Int(n) => Ok(Some(*n)),
            other => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets an f64 field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.value(field)? {
            Value::Null => Ok(None),
            Value::Float(n) => Ok(Some(*n)),
            Value::Int(n) => Ok(Some(*n as f64)), // Allow widening
            other => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a Decimal field value.
    pub fn get_decimal(&self, field: &str) -> Result<Option<Decimal>, FieldError> {
        match self.value(field)? {
            Value::Null => Ok(None),
            Value::Decimal(d) => Ok(Some(*d)),
            other => Err(FieldError::type_mismatch(field, "decimal", other.type_name())),
        }
    }

    /// Gets a DateTime field value.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.value(field)? {
            Value::Null => Ok(None),
            Value::DateTime(dt) => Ok(Some(*dt)),
            other => Err(FieldError::type_mismatch(field, "datetime", other.type_name())),
        }
    }
}

impl Row for Record {
    fn row_id(&self) -> String {
        self.id.clone()
    }
}
