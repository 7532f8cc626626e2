//! The data-shaping pipeline: filter, sort, paginate.
//!
//! Every function here is pure. Nothing is cached and nothing is retained
//! between calls, so the same inputs always give the same page.
//!
//! # Example
//!
//! ```
//! use tabula_lib::engine;
//! use tabula_lib::model::{Column, Columns, Record};
//! use tabula_lib::query::{Query, SortKey};
//!
//! let columns: Columns<Record> = vec![Column::record_field("name", "Name")].into();
//! let rows = vec![
//!     Record::new("1").set("name", "Mouse"),
//!     Record::new("2").set("name", "Laptop"),
//! ];
//!
//! let query = Query::builder().sort(SortKey::asc("name")).build(&columns)?;
//! let page = engine::run(&rows, &columns, &query);
//!
//! assert_eq!(page.data()[0].id(), "2");
//! # Ok::<(), tabula_lib::error::QueryError>(())
//! ```

mod filter;
mod page;
mod sort;

use log::trace;

pub use filter::apply_filters;
pub use filter::column_filter;
pub use filter::global_filter;
pub use filter::matches;
pub use page::Page;
pub use page::paginate;
pub use page::total_pages;
pub use sort::sort_rows;

use crate::model::Columns;
use crate::model::Record;
use crate::model::Row;
use crate::query::Query;

/// Runs the pipeline and returns borrowed rows.
pub fn run_ref<'a, R: Row>(rows: &'a [R], columns: &Columns<R>, query: &Query) -> Page<&'a R> {
    let mut matched = apply_filters(rows, columns, query);
    sort_rows(&mut matched, columns, query.sort());
    let page = paginate(matched, query.page(), query.limit());
    trace!(
        "Page {}/{}: {} of {} rows",
        page.page(),
        page.total_pages(),
        page.len(),
        page.total()
    );
    page
}

/// Runs the pipeline and returns owned rows.
pub fn run<R: Row + Clone>(rows: &[R], columns: &Columns<R>, query: &Query) -> Page<R> {
    run_ref(rows, columns, query).cloned()
}

/// Builds a dynamic record holding the row id and the requested fields.
///
/// With `fields` empty every column is included. Fields whose accessor
/// reports them missing are left out of the record.
pub fn project_row<R: Row>(row: &R, columns: &Columns<R>, fields: &[String]) -> Record {
    let mut record = Record::new(row.row_id());
    for column in columns {
        if !fields.is_empty() && !fields.iter().any(|f| f == column.field()) {
            continue;
        }
        if let Ok(value) = column.value(row) {
            record.insert(column.field(), value);
        }
    }
    record
}

/// Projects every row; see [`project_row`].
pub fn project<R: Row>(rows: &[R], columns: &Columns<R>, fields: &[String]) -> Vec<Record> {
    rows.iter().map(|row| project_row(row, columns, fields)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;
    use crate::model::Value;
    use crate::query::ColumnFilter;
    use crate::query::SortKey;

    fn columns() -> Columns<Record> {
        vec![
            Column::record_field("name", "Name"),
            Column::record_field("price", "Price"),
        ]
        .into()
    }

    fn rows() -> Vec<Record> {
        vec![
            Record::new("1").set("name", "Laptop").set("price", 900i64),
            Record::new("2").set("name", "Mouse").set("price", 25i64),
            Record::new("3").set("name", "Lamp").set("price", 40i64),
            Record::new("4").set("name", "Laptop stand").set("price", 40i64),
        ]
    }

    #[test]
    fn test_pipeline_order() {
        let query = Query::builder()
            .search("la")
            .filter(ColumnFilter::lt("price", 500i64))
            .sort(SortKey::desc("price"))
            .limit(1)
            .build(&columns())
            .unwrap();

        let page = run(&rows(), &columns(), &query);
        assert_eq!(page.total(), 2);
        assert_eq!(page.total_pages(), 2);
        // Equal prices keep input order.
        assert_eq!(page.data()[0].id(), "3");

        let page = run(&rows(), &columns(), &query.next_page());
        assert_eq!(page.data()[0].id(), "4");
    }

    #[test]
    fn test_run_is_idempotent() {
        let data = rows();
        let query = Query::builder()
            .sort(SortKey::asc("name"))
            .build(&columns())
            .unwrap();
        assert_eq!(run(&data, &columns(), &query), run(&data, &columns(), &query));
    }

    #[test]
    fn test_project() {
        let projected = project(&rows()[..1], &columns(), &["price".to_string()]);
        assert_eq!(projected, vec![Record::new("1").set("price", 900i64)]);

        let all = project_row(&Record::new("9").set("name", Value::Null), &columns(), &[]);
        assert_eq!(all, Record::new("9").set("name", Value::Null));
    }
}
