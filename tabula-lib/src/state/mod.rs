//! View-owned table state.
//!
//! A [`TableState`] holds what the user has asked a table view to show:
//! sorting, column filters, column visibility, row selection, global search,
//! the pagination window and the row-detail expansion flag. Every transition
//! takes `&self` and returns a fresh state; no state value is ever changed
//! after it is created, so earlier snapshots stay usable (for undo, or for
//! comparing before/after).
//!
//! # Example
//!
//! ```
//! use tabula_lib::model::{Column, Columns, Record};
//! use tabula_lib::query::{ColumnFilter, SortKey};
//! use tabula_lib::state::TableState;
//!
//! let columns: Columns<Record> = vec![Column::record_field("name", "Name")].into();
//! let rows = vec![Record::new("1").set("name", "Laptop")];
//!
//! let state = TableState::default()
//!     .set_global_filter("lap")
//!     .set_sorting(vec![SortKey::asc("name")]);
//! let page = state.apply(&rows, &columns)?;
//! assert_eq!(page.total(), 1);
//!
//! let cleared = state.reset_filters();
//! assert_eq!(cleared.global_filter(), "");
//! assert_eq!(state.global_filter(), "lap");
//! # Ok::<(), tabula_lib::error::QueryError>(())
//! ```

mod pagination;

pub use pagination::PaginationState;

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::engine;
use crate::engine::Page;
use crate::error::QueryError;
use crate::model::Column;
use crate::model::Columns;
use crate::model::Row;
use crate::query::ColumnFilter;
use crate::query::Direction;
use crate::query::Query;
use crate::query::SortKey;

/// Immutable snapshot of a table view's state.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    sorting: Vec<SortKey>,
    column_filters: Vec<ColumnFilter>,
    /// Field name to visibility. Fields not listed are visible.
    column_visibility: BTreeMap<String, bool>,
    /// Selected row ids.
    row_selection: BTreeSet<String>,
    global_filter: String,
    is_expanded: bool,
    pagination: PaginationState,
}

impl TableState {
    /// Default state: no sort, no filters, all columns visible, nothing
    /// selected, empty search, collapsed, first page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default state with a given page size.
    pub fn with_page_size(page_size: usize) -> Result<Self, QueryError> {
        Ok(Self {
            pagination: PaginationState::first(page_size)?,
            ..Self::default()
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn sorting(&self) -> &[SortKey] {
        &self.sorting
    }

    pub fn column_filters(&self) -> &[ColumnFilter] {
        &self.column_filters
    }

    pub fn column_visibility(&self) -> &BTreeMap<String, bool> {
        &self.column_visibility
    }

    pub fn row_selection(&self) -> &BTreeSet<String> {
        &self.row_selection
    }

    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    /// Returns `true` unless the field was explicitly hidden.
    pub fn is_column_visible(&self, field: &str) -> bool {
        self.column_visibility.get(field).copied().unwrap_or(true)
    }

    /// Columns to render, in column order.
    pub fn visible_columns<'a, R>(&self, columns: &'a Columns<R>) -> Vec<&'a Column<R>> {
        columns
            .iter()
            .filter(|column| self.is_column_visible(column.field()))
            .collect()
    }

    pub fn is_row_selected(&self, id: &str) -> bool {
        self.row_selection.contains(id)
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    pub fn set_sorting(&self, sorting: Vec<SortKey>) -> Self {
        Self {
            sorting,
            ..self.clone()
        }
    }

    pub fn set_column_filters(&self, column_filters: Vec<ColumnFilter>) -> Self {
        Self {
            column_filters,
            ..self.clone()
        }
    }

    pub fn set_column_visibility(&self, column_visibility: BTreeMap<String, bool>) -> Self {
        Self {
            column_visibility,
            ..self.clone()
        }
    }

    pub fn set_row_selection(&self, row_selection: BTreeSet<String>) -> Self {
        Self {
            row_selection,
            ..self.clone()
        }
    }

    pub fn set_global_filter(&self, text: impl Into<String>) -> Self {
        Self {
            global_filter: text.into(),
            ..self.clone()
        }
    }

    /// Replaces the pagination window as given.
    ///
    /// The window is not checked against the data. A page index that ends
    /// up past the last page (for example after a filter change) resolves to
    /// an empty page when the state is applied.
    pub fn set_pagination(&self, pagination: PaginationState) -> Self {
        Self {
            pagination,
            ..self.clone()
        }
    }

    pub fn toggle_expanded(&self) -> Self {
        Self {
            is_expanded: !self.is_expanded,
            ..self.clone()
        }
    }

    /// Clears column filters and global search. Sorting, selection,
    /// visibility and pagination are kept.
    pub fn reset_filters(&self) -> Self {
        Self {
            column_filters: Vec::new(),
            global_filter: String::new(),
            ..self.clone()
        }
    }

    /// Cycles a column's sort through ascending, descending and unsorted.
    ///
    /// The toggled field becomes the only sort key.
    pub fn toggle_sort(&self, field: &str) -> Self {
        let current = self
            .sorting
            .iter()
            .find(|key| key.field == field)
            .map(|key| key.direction);
        let sorting = match current {
            None => vec![SortKey::asc(field)],
            Some(Direction::Asc) => vec![SortKey::desc(field)],
            Some(Direction::Desc) => Vec::new(),
        };
        self.set_sorting(sorting)
    }

    /// Selects the row if unselected, unselects it otherwise.
    pub fn toggle_row_selected(&self, id: &str) -> Self {
        let mut row_selection = self.row_selection.clone();
        if !row_selection.remove(id) {
            row_selection.insert(id.to_string());
        }
        self.set_row_selection(row_selection)
    }

    /// Adds the given rows to the selection.
    pub fn select_rows<R: Row>(&self, rows: &[R]) -> Self {
        let mut row_selection = self.row_selection.clone();
        row_selection.extend(rows.iter().map(|row| row.row_id()));
        self.set_row_selection(row_selection)
    }

    pub fn clear_selection(&self) -> Self {
        self.set_row_selection(BTreeSet::new())
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Builds the query this state stands for.
    ///
    /// Page indexes beyond what a query can address map to the last
    /// addressable page, which is empty for any real collection.
    pub fn to_query<R>(&self, columns: &Columns<R>) -> Result<Query, QueryError> {
        Query::builder()
            .page(i64::try_from(self.pagination.page_number()).unwrap_or(i64::MAX))
            .limit(i64::try_from(self.pagination.page_size()).unwrap_or(i64::MAX))
            .search(self.global_filter.clone())
            .sorts(self.sorting.iter().cloned())
            .filters(self.column_filters.iter().cloned())
            .build(columns)
    }

    /// Runs the pipeline for this state over a collection.
    pub fn apply<R: Row + Clone>(&self, rows: &[R], columns: &Columns<R>) -> Result<Page<R>, QueryError> {
        let query = self.to_query(columns)?;
        Ok(engine::run(rows, columns, &query))
    }
}
