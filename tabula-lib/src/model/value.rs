//! Value enum for dynamic field values

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A dynamic value read from a row through a column accessor.
///
/// Filters, global search and sorting all operate on `Value`s, which keeps the
/// engine independent of the concrete row type.
///
/// # Ordering
///
/// [`Value::compare`] defines the natural order used by `gt`/`gte`/`lt`/`lte`
/// filters. Numbers compare across `Int`, `Float` and `Decimal`; strings,
/// datetimes and GUIDs compare within their own kind. Booleans, `Null` and
/// mixed kinds have no natural order.
///
/// # Serialization
///
/// Serializing is lossless. Deserializing is untagged and so cannot tell a
/// decimal, GUID or datetime from text: they come back as `String` and
/// then order as strings. Build typed values in code (or through typed rows)
/// when their order matters.
///
/// # Example
///
/// ```
/// use tabula_lib::model::Value;
///
/// let name = Value::from("Laptop");
/// let stock = Value::from(12i64);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Present but empty.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Arbitrary precision decimal (prices, amounts).
    Decimal(Decimal),
    /// GUID/UUID value.
    Guid(Uuid),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
    /// Ordered list of values (tags, multi-select).
    List(Vec<Value>),
    /// Nested structured value.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for `Int`, `Float` and `Decimal`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Decimal(_))
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Decimal(_) => "decimal",
            Value::Guid(_) => "guid",
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Renders the value to the string form used for text matching.
    ///
    /// `Null` renders as the empty string. Lists and maps render their
    /// leaves separated by a single space, so nested values stay searchable.
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Decimal(d) => d.to_string(),
            Value::Guid(g) => g.hyphenated().to_string(),
            Value::DateTime(dt) => dt.to_rfc3339(),
            Value::List(items) => join_rendered(items.iter()),
            Value::Map(map) => join_rendered(map.values()),
        }
    }

    /// Compares two values by their natural order.
    ///
    /// Returns `None` when the pair has no natural order.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Decimal(b)) => Some(Decimal::from(*a).cmp(b)),
            (Value::Decimal(a), Value::Int(b)) => Some(a.cmp(&Decimal::from(*b))),
            (Value::Int(a), Value::Float(b)) => cmp_int_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => cmp_int_float(*b, *a).map(Ordering::reverse),
            (Value::Decimal(a), Value::Float(b)) => cmp_decimal_float(a, *b),
            (Value::Float(a), Value::Decimal(b)) => cmp_decimal_float(b, *a).map(Ordering::reverse),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            (Value::Guid(a), Value::Guid(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Equality used by `eq`/`neq`/`in`/`nin` filters.
    ///
    /// Numbers are equal across kinds when they compare equal. A string is
    /// equal to a scalar of another kind when it matches the scalar's rendered
    /// form, so `"42"` from a query string matches an `Int(42)` field.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (a, b) if a.is_numeric() && b.is_numeric() => a.compare(b) == Some(Ordering::Equal),
            (Value::String(s), other) | (other, Value::String(s)) if other.is_scalar() => {
                *s == other.render()
            }
            (a, b) => a == b,
        }
    }

    /// Total order used for sorting.
    ///
    /// Orderable pairs use [`Value::compare`]. `Null` is greater than every
    /// other value, so it sorts last ascending and first descending. Booleans
    /// order `false < true`. Anything else falls back to a fixed kind rank,
    /// then to the rendered string.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (a, b) => a.compare(b).unwrap_or_else(|| {
                a.kind_rank()
                    .cmp(&b.kind_rank())
                    .then_with(|| a.render().cmp(&b.render()))
            }),
        }
    }

    fn is_scalar(&self) -> bool {
        !matches!(self, Value::Null | Value::List(_) | Value::Map(_))
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Int(_) | Value::Float(_) | Value::Decimal(_) => 1,
            Value::String(_) => 2,
            Value::Guid(_) => 3,
            Value::DateTime(_) => 4,
            Value::List(_) => 5,
            Value::Map(_) => 6,
            Value::Null => 7,
        }
    }
}

/// Exact comparison of an integer with a float, without rounding the
/// integer to 53 bits.
fn cmp_int_float(a: i64, b: f64) -> Option<Ordering> {
    // 2^63 as f64; every finite float in [-2^63, 2^63) truncates to an i64.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if b.is_nan() {
        return None;
    }
    if b >= BOUND {
        return Some(Ordering::Less);
    }
    if b < -BOUND {
        return Some(Ordering::Greater);
    }
    let whole = b.trunc();
    match a.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(b - whole)),
        unequal => Some(unequal),
    }
}

fn cmp_decimal_float(a: &Decimal, b: f64) -> Option<Ordering> {
    match Decimal::from_f64(b) {
        Some(b) => Some(a.cmp(&b)),
        None => a.to_f64()?.partial_cmp(&b),
    }
}

fn join_rendered<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    values
        .map(Value::render)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::List(items.into_iter().map(Into::into).collect()),
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_compare_across_kinds() {
        assert_eq!(Value::Int(3).compare(&Value::Float(2.5)), Some(Ordering::Greater));
        assert_eq!(
            Value::Decimal(Decimal::new(1999, 2)).compare(&Value::Int(20)),
            Some(Ordering::Less)
        );
        assert!(Value::Int(2).loose_eq(&Value::Float(2.0)));
    }

    #[test]
    fn test_large_ints_compare_exactly_with_floats() {
        let two_pow_63 = Value::Float(9_223_372_036_854_775_808.0);
        assert_eq!(Value::Int(i64::MAX).compare(&two_pow_63), Some(Ordering::Less));
        assert_eq!(two_pow_63.compare(&Value::Int(i64::MAX - 1)), Some(Ordering::Greater));

        let two_pow_53 = Value::Float(9_007_199_254_740_992.0);
        assert_eq!(Value::Int(9_007_199_254_740_993).compare(&two_pow_53), Some(Ordering::Greater));
        assert_eq!(Value::Int(9_007_199_254_740_992).compare(&two_pow_53), Some(Ordering::Equal));
        assert_eq!(Value::Int(2).compare(&Value::Float(2.5)), Some(Ordering::Less));
        assert_eq!(Value::Int(-3).compare(&Value::Float(-2.5)), Some(Ordering::Less));
        assert_eq!(Value::Int(-2).compare(&Value::Float(-2.5)), Some(Ordering::Greater));
    }

    #[test]
    fn test_sort_cmp_is_consistent_near_float_precision() {
        let mut values = vec![
            Value::Int(i64::MAX),
            Value::Float(9_223_372_036_854_775_808.0),
            Value::Int(i64::MAX - 1),
            Value::Float(1.5),
            Value::Int(1),
        ];
        values.sort_by(Value::sort_cmp);
        assert_eq!(
            values,
            vec![
                Value::Int(1),
                Value::Float(1.5),
                Value::Int(i64::MAX - 1),
                Value::Int(i64::MAX),
                Value::Float(9_223_372_036_854_775_808.0),
            ]
        );
        for a in &values {
            for b in &values {
                assert_eq!(a.sort_cmp(b), b.sort_cmp(a).reverse());
            }
        }
    }

    #[test]
    fn test_deserialize_keeps_json_kinds_only() {
        let price = Value::Decimal(Decimal::new(9900, 2));
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"99.00\"");

        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Value::from("99.00"));

        let back: Value = serde_json::from_str("[1, 2.5, true, null]").unwrap();
        assert_eq!(
            back,
            Value::List(vec![Value::Int(1), Value::Float(2.5), Value::Bool(true), Value::Null])
        );
    }

    #[test]
    fn test_unorderable_pairs() {
        assert_eq!(Value::Bool(true).compare(&Value::Bool(false)), None);
        assert_eq!(Value::Null.compare(&Value::Int(1)), None);
        assert_eq!(Value::from("a").compare(&Value::Int(1)), None);
        assert_eq!(Value::Float(f64::NAN).compare(&Value::Float(1.0)), None);
    }

    #[test]
    fn test_string_matches_rendered_scalar() {
        assert!(Value::from("42").loose_eq(&Value::Int(42)));
        assert!(Value::Bool(true).loose_eq(&Value::from("true")));
        assert!(!Value::from("42").loose_eq(&Value::Int(41)));
    }

    #[test]
    fn test_render_nested() {
        let value = Value::from(serde_json::json!({
            "address": { "city": "Lisbon", "zip": null },
            "tags": ["new", "sale"],
        }));
        assert_eq!(value.render(), "Lisbon new sale");
    }

    #[test]
    fn test_sort_cmp_nulls_last() {
        assert_eq!(Value::Null.sort_cmp(&Value::Int(1)), Ordering::Greater);
        assert_eq!(Value::Int(1).sort_cmp(&Value::Null), Ordering::Less);
        assert_eq!(Value::Bool(false).sort_cmp(&Value::Bool(true)), Ordering::Less);
        assert_eq!(Value::Int(5).sort_cmp(&Value::from("a")), Ordering::Less);
    }
}
