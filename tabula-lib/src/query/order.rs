//! Ordering types.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::QueryError;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    /// Applies this direction to an ascending comparison.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for Direction {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            _ => Err(QueryError::UnknownDirection(s.to_string())),
        }
    }
}

/// One sort directive: a field and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub direction: Direction,
}

impl SortKey {
    /// Creates an ascending sort key.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort key.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

/// Specifies the ordering of query results.
///
/// Keys are applied in listed order: the first key has the highest priority
/// and later keys only break ties.
///
/// # Example
///
/// ```
/// use tabula_lib::query::OrderBy;
///
/// // Single field ordering
/// let order = OrderBy::desc("price");
///
/// // Multiple field ordering
/// let order = OrderBy::desc("price")
///     .then_asc("name");
/// assert_eq!(order.keys().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderBy {
    keys: Vec<SortKey>,
}

impl OrderBy {
    /// Creates an ascending order on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            keys: vec![SortKey::asc(field)],
        }
    }

    /// Creates a descending order on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            keys: vec![SortKey::desc(field)],
        }
    }

    /// Adds a secondary ascending order on a field.
    pub fn then_asc(mut self, field: impl Into<String>) -> Self {
        self.keys.push(SortKey::asc(field));
        self
    }

    /// Adds a secondary descending order on a field.
    pub fn then_desc(mut self, field: impl Into<String>) -> Self {
        self.keys.push(SortKey::desc(field));
        self
    }

    /// Returns the sort keys in priority order.
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn into_keys(self) -> Vec<SortKey> {
        self.keys
    }
}

impl From<OrderBy> for Vec<SortKey> {
    fn from(order: OrderBy) -> Self {
        order.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_apply() {
        assert_eq!(Direction::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Direction::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Direction::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("DESC".parse::<Direction>(), Ok(Direction::Desc));
        assert!(matches!(
            "up".parse::<Direction>(),
            Err(QueryError::UnknownDirection(_))
        ));
    }

    #[test]
    fn test_order_by() {
        let order = OrderBy::desc("price").then_asc("name");
        assert_eq!(
            order.into_keys(),
            vec![SortKey::desc("price"), SortKey::asc("name")]
        );
    }
}
