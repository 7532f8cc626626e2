//! Column filter conditions.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::QueryError;
use crate::model::Value;

/// Comparison operator of a column filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Equality: `field == value`
    Eq,
    /// Not equal: `field != value`
    Neq,
    /// Greater than: `field > value`
    Gt,
    /// Greater than or equal: `field >= value`
    Gte,
    /// Less than: `field < value`
    Lt,
    /// Less than or equal: `field <= value`
    Lte,
    /// Case-insensitive substring match on the rendered value.
    Contains,
    /// Set membership.
    In,
    /// Set non-membership.
    Nin,
}

impl Operator {
    /// All operators, in declaration order.
    pub const ALL: [Operator; 9] = [
        Operator::Eq,
        Operator::Neq,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::Contains,
        Operator::In,
        Operator::Nin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Contains => "contains",
            Operator::In => "in",
            Operator::Nin => "nin",
        }
    }

    /// Returns `true` for operators that need a natural order (`gt`, `gte`, `lt`, `lte`).
    pub fn is_ordering(&self) -> bool {
        matches!(self, Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte)
    }

    /// Returns `true` for operators whose operand is a set (`in`, `nin`).
    pub fn takes_list(&self) -> bool {
        matches!(self, Operator::In | Operator::Nin)
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| QueryError::UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter condition on a single column.
///
/// Filters in a [`Query`](super::Query) are combined with logical AND.
///
/// # Example
///
/// ```
/// use tabula_lib::query::ColumnFilter;
///
/// let in_stock = ColumnFilter::gt("stock", 0i64);
/// let category = ColumnFilter::is_in("category", vec!["audio", "video"]);
/// let name = ColumnFilter::contains("name", "lap");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
}

impl ColumnFilter {
    /// Creates a filter with an explicit operator.
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Creates an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Eq, value)
    }

    /// Creates a not-equal filter.
    pub fn neq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Neq, value)
    }

    /// Creates a greater-than filter.
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Gt, value)
    }

    /// Creates a greater-than-or-equal filter.
    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Gte, value)
    }

    /// Creates a less-than filter.
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Lt, value)
    }

    /// Creates a less-than-or-equal filter.
    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Lte, value)
    }

    /// Creates a case-insensitive substring filter.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Operator::Contains, Value::String(value.into()))
    }

    /// Creates a set-membership filter.
    pub fn is_in<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self::new(field, Operator::In, list(values))
    }

    /// Creates a set-non-membership filter.
    pub fn not_in<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self::new(field, Operator::Nin, list(values))
    }

    /// Returns the operand as a set. A scalar operand is a set of one.
    pub fn operand_set(&self) -> &[Value] {
        match &self.value {
            Value::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }
}

fn list<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Value {
    Value::List(values.into_iter().map(Into::into).collect())
}
