//! Filter engine: column filters and global search.

use std::cmp::Ordering;

use log::debug;
use log::trace;

use crate::error::FieldError;
use crate::error::FilterError;
use crate::model::Columns;
use crate::model::Row;
use crate::model::Value;
use crate::query::ColumnFilter;
use crate::query::Operator;
use crate::query::Query;

/// Evaluates one column filter against one row.
///
/// A filter on a field the column set does not know, or an accessor that
/// reports the field missing, yields [`FilterError::FieldNotFound`]. An
/// ordering operator on values without a natural order yields
/// [`FilterError::UnorderableValue`].
pub fn column_filter<R>(row: &R, columns: &Columns<R>, filter: &ColumnFilter) -> Result<bool, FilterError> {
    let column = columns
        .get(&filter.field)
        .ok_or_else(|| FieldError::missing(&filter.field))?;
    let value = column.value(row)?;

    let matched = match filter.operator {
        Operator::Eq => value.loose_eq(&filter.value),
        Operator::Neq => !value.loose_eq(&filter.value),
        Operator::Contains => contains_ignore_case(&value.render(), &filter.value.render()),
        Operator::In => in_set(&value, filter.operand_set()),
        Operator::Nin => !in_set(&value, filter.operand_set()),
        Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte => {
            let ordering = value.compare(&filter.value).ok_or_else(|| {
                FilterError::unorderable(
                    &filter.field,
                    filter.operator,
                    value.type_name(),
                    filter.value.type_name(),
                )
            })?;
            match filter.operator {
                Operator::Gt => ordering == Ordering::Greater,
                Operator::Gte => ordering != Ordering::Less,
                Operator::Lt => ordering == Ordering::Less,
                _ => ordering != Ordering::Greater,
            }
        }
    };
    Ok(matched)
}

/// Evaluates the free-text search against one row.
///
/// Matching is a case-insensitive substring test on each candidate field's
/// rendered value. With `search_fields` empty, every searchable column is a
/// candidate. Empty search text matches every row. The text is used as
/// given, whitespace included.
pub fn global_filter<R>(row: &R, columns: &Columns<R>, search: &str, search_fields: &[String]) -> bool {
    let needle = search.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let hit = |value: Result<Value, FieldError>| match value {
        Ok(value) => value.render().to_lowercase().contains(&needle),
        Err(e) => {
            trace!("Search skipped field: {}", e);
            false
        }
    };

    if search_fields.is_empty() {
        columns.searchable().any(|column| hit(column.value(row)))
    } else {
        search_fields
            .iter()
            .filter_map(|field| columns.get(field))
            .any(|column| hit(column.value(row)))
    }
}

/// Returns `true` if the row passes the query's search and every column filter.
///
/// A column filter that cannot be evaluated counts as a non-match for this
/// row only.
pub fn matches<R: Row>(row: &R, columns: &Columns<R>, query: &Query) -> bool {
    if !global_filter(row, columns, query.search(), query.search_fields()) {
        return false;
    }
    query.filters().iter().all(|filter| {
        column_filter(row, columns, filter).unwrap_or_else(|e| {
            debug!("Excluding row '{}': {}", row.row_id(), e);
            false
        })
    })
}

/// Reduces a collection to the rows that match the query, keeping input order.
pub fn apply_filters<'a, R: Row>(rows: &'a [R], columns: &Columns<R>, query: &Query) -> Vec<&'a R> {
    let filtered: Vec<&R> = rows.iter().filter(|row| matches(*row, columns, query)).collect();
    trace!("Filtered {} rows down to {}", rows.len(), filtered.len());
    filtered
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn in_set(value: &Value, set: &[Value]) -> bool {
    set.iter().any(|candidate| value.loose_eq(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;
    use crate::model::Record;

    fn columns() -> Columns<Record> {
        vec![
            Column::record_field("name", "Name"),
            Column::record_field("price", "Price"),
            Column::record_field("active", "Active"),
            Column::record_field("category", "Category"),
            Column::record_field("secret", "Secret").searchable(false),
        ]
        .into()
    }

    fn laptop() -> Record {
        Record::new("1")
            .set("name", "Laptop")
            .set("price", 1200i64)
            .set("active", true)
            .set("category", "computers")
            .set("secret", "hunter2")
    }

    #[test]
    fn test_equality_and_membership() {
        let cols = columns();
        let row = laptop();

        assert_eq!(column_filter(&row, &cols, &ColumnFilter::eq("price", 1200.0)), Ok(true));
        assert_eq!(column_filter(&row, &cols, &ColumnFilter::neq("name", "Laptop")), Ok(false));
        assert_eq!(
            column_filter(&row, &cols, &ColumnFilter::is_in("category", ["audio", "computers"])),
            Ok(true)
        );
        assert_eq!(
            column_filter(&row, &cols, &ColumnFilter::not_in("category", ["computers"])),
            Ok(false)
        );
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let cols = columns();
        assert_eq!(
            column_filter(&laptop(), &cols, &ColumnFilter::contains("name", "LAP")),
            Ok(true)
        );
        assert_eq!(
            column_filter(&laptop(), &cols, &ColumnFilter::contains("price", "20")),
            Ok(true)
        );
    }

    #[test]
    fn test_ordering_operators() {
        let cols = columns();
        let row = laptop();

        assert_eq!(column_filter(&row, &cols, &ColumnFilter::gt("price", 1000i64)), Ok(true));
        assert_eq!(column_filter(&row, &cols, &ColumnFilter::gte("price", 1200i64)), Ok(true));
        assert_eq!(column_filter(&row, &cols, &ColumnFilter::lt("price", 1200i64)), Ok(false));
        assert_eq!(column_filter(&row, &cols, &ColumnFilter::lte("price", 1200.5)), Ok(true));
    }

    #[test]
    fn test_unorderable_value() {
        let result = column_filter(&laptop(), &columns(), &ColumnFilter::gt("active", false));
        assert_eq!(
            result,
            Err(FilterError::unorderable("active", Operator::Gt, "bool", "bool"))
        );
    }

    #[test]
    fn test_field_not_found_differs_from_null() {
        let cols = columns();
        let row = Record::new("2").set("name", Value::Null);

        assert_eq!(column_filter(&row, &cols, &ColumnFilter::eq("name", Value::Null)), Ok(true));
        assert_eq!(
            column_filter(&row, &cols, &ColumnFilter::eq("price", 3i64)),
            Err(FilterError::FieldNotFound(FieldError::missing("price")))
        );
    }

    #[test]
    fn test_global_filter_scopes() {
        let cols = columns();
        let row = laptop();

        assert!(global_filter(&row, &cols, "", &[]));
        assert!(!global_filter(&row, &cols, "  ", &[]));
        assert!(!global_filter(&row, &cols, "lap ", &[]));
        let lamp = Record::new("9").set("name", "Desk Lamp");
        assert!(global_filter(&lamp, &cols, "desk ", &[]));
        assert!(global_filter(&row, &cols, "COMP", &[]));
        assert!(!global_filter(&row, &cols, "hunter", &[]));
        assert!(global_filter(&row, &cols, "hunter", &["secret".to_string()]));
        assert!(!global_filter(&row, &cols, "comp", &["name".to_string()]));
    }

    #[test]
    fn test_bad_row_is_excluded_not_fatal() {
        let cols = columns();
        let rows = vec![
            laptop(),
            Record::new("2").set("name", "Mouse").set("price", "n/a"),
            Record::new("3").set("name", "Desk").set("price", 300i64),
        ];
        let query = Query::builder()
            .filter(ColumnFilter::gt("price", 100i64))
            .build(&cols)
            .unwrap();

        let ids: Vec<&str> = apply_filters(&rows, &cols, &query).iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
