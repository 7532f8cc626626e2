//! Filter evaluation errors

use super::FieldError;
use crate::query::Operator;

/// Errors raised while evaluating a single filter against a single row.
///
/// These never abort a filter pass. The engine treats a row whose filter
/// cannot be evaluated as not matching.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// The filtered field could not be resolved on the row.
    #[error("Cannot evaluate filter: {0}")]
    FieldNotFound(#[from] FieldError),

    /// An ordering operator was applied to values without a natural order.
    #[error("Field '{field}': cannot apply '{operator}' to {left} and {right}")]
    UnorderableValue {
        field: String,
        operator: Operator,
        left: &'static str,
        right: &'static str,
    },
}

impl FilterError {
    /// Creates a new unorderable value error.
    pub fn unorderable(
        field: impl Into<String>,
        operator: Operator,
        left: &'static str,
        right: &'static str,
    ) -> Self {
        Self::UnorderableValue {
            field: field.into(),
            operator,
            left,
            right,
        }
    }
}
