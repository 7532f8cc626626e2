//! Stable multi-key sorting.

use std::cmp::Ordering;

use log::trace;

use crate::model::Columns;
use crate::model::Value;
use crate::query::SortKey;

/// Sorts rows by the given keys, in place.
///
/// Rows compare by the first key; ties fall through to the next key; rows
/// still tied keep their input order. Each key's value is read once per row
/// before sorting. A field that cannot be read sorts as [`Value::Null`].
pub fn sort_rows<R>(rows: &mut Vec<&R>, columns: &Columns<R>, keys: &[SortKey]) {
    if keys.is_empty() || rows.len() < 2 {
        return;
    }

    let mut decorated: Vec<(Vec<Value>, &R)> = rows
        .drain(..)
        .map(|row| (sort_values(row, columns, keys), row))
        .collect();

    // `sort_by` is a stable merge sort.
    decorated.sort_by(|(a, _), (b, _)| compare_keys(a, b, keys));

    rows.extend(decorated.into_iter().map(|(_, row)| row));
    trace!("Sorted {} rows by {} keys", rows.len(), keys.len());
}

fn sort_values<R>(row: &R, columns: &Columns<R>, keys: &[SortKey]) -> Vec<Value> {
    keys.iter()
        .map(|key| {
            columns
                .get(&key.field)
                .and_then(|column| column.value(row).ok())
                .unwrap_or(Value::Null)
        })
        .collect()
}

fn compare_keys(a: &[Value], b: &[Value], keys: &[SortKey]) -> Ordering {
    a.iter()
        .zip(b)
        .zip(keys)
        .map(|((a, b), key)| key.direction.apply(a.sort_cmp(b)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;
    use crate::model::Record;

    fn columns() -> Columns<Record> {
        vec![
            Column::record_field("team", "Team"),
            Column::record_field("score", "Score"),
        ]
        .into()
    }

    fn ids(rows: &[&Record]) -> Vec<String> {
        rows.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_multi_key_priority() {
        let data = vec![
            Record::new("a").set("team", "red").set("score", 3i64),
            Record::new("b").set("team", "blue").set("score", 1i64),
            Record::new("c").set("team", "red").set("score", 9i64),
            Record::new("d").set("team", "blue").set("score", 5i64),
        ];
        let mut rows: Vec<&Record> = data.iter().collect();

        sort_rows(&mut rows, &columns(), &[SortKey::asc("team"), SortKey::desc("score")]);
        assert_eq!(ids(&rows), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let data: Vec<Record> = (0..50)
            .map(|i| Record::new(format!("r{}", i)).set("team", if i % 2 == 0 { "even" } else { "odd" }))
            .collect();
        let mut rows: Vec<&Record> = data.iter().collect();

        sort_rows(&mut rows, &columns(), &[SortKey::desc("team")]);

        let expected: Vec<String> = (0..50)
            .filter(|i| i % 2 == 1)
            .chain((0..50).filter(|i| i % 2 == 0))
            .map(|i| format!("r{}", i))
            .collect();
        assert_eq!(ids(&rows), expected);
    }

    #[test]
    fn test_nulls_and_missing_fields_sort_last() {
        let data = vec![
            Record::new("missing"),
            Record::new("null").set("score", Value::Null),
            Record::new("two").set("score", 2i64),
            Record::new("one").set("score", 1i64),
        ];
        let mut rows: Vec<&Record> = data.iter().collect();

        sort_rows(&mut rows, &columns(), &[SortKey::asc("score")]);
        assert_eq!(ids(&rows), vec!["one", "two", "missing", "null"]);
    }
}
