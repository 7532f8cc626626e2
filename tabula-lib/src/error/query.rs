//! Query validation errors

/// Errors raised while constructing a [`Query`](crate::query::Query).
///
/// Every variant is an `InvalidQuery`: validation happens once, at the
/// boundary, so filtering and sorting never see a malformed request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Page numbers start at 1.
    #[error("Invalid page {0}: must be at least 1")]
    InvalidPage(i64),

    /// Page sizes start at 1.
    #[error("Invalid limit {0}: must be at least 1")]
    InvalidLimit(i64),

    /// The filter operator is not one of the supported operators.
    #[error("Unknown filter operator '{0}'")]
    UnknownOperator(String),

    /// The sort direction is neither `asc` nor `desc`.
    #[error("Unknown sort direction '{0}'")]
    UnknownDirection(String),

    /// A sort, filter, search or projection field does not match any column.
    #[error("Unknown field '{field}' in {context}")]
    UnknownField {
        field: String,
        context: &'static str,
    },

    /// The column exists but does not allow sorting.
    #[error("Field '{0}' is not sortable")]
    NotSortable(String),

    /// The column exists but does not allow filtering.
    #[error("Field '{0}' is not filterable")]
    NotFilterable(String),

    /// A raw query-string value could not be parsed.
    #[error("Malformed '{key}': {message}")]
    Malformed { key: String, message: String },
}

impl QueryError {
    /// Creates a new unknown field error.
    pub fn unknown_field(field: impl Into<String>, context: &'static str) -> Self {
        Self::UnknownField {
            field: field.into(),
            context,
        }
    }

    /// Creates a new malformed value error.
    pub fn malformed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            key: key.into(),
            message: message.into(),
        }
    }
}
