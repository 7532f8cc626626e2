//! Placeholder rows for loading views.
//!
//! While a collection is still being fetched, a table view renders a fixed
//! number of empty rows so the layout does not jump when data arrives.
//! Placeholders never go through the filter/sort/paginate pipeline.

use crate::engine;
use crate::engine::Page;
use crate::error::QueryError;
use crate::model::Columns;
use crate::model::Record;
use crate::model::Row;
use crate::state::TableState;

/// Id prefix of placeholder records.
pub const PLACEHOLDER_PREFIX: &str = "skeleton-";

/// Generates `count` placeholder records with ids `skeleton-0`, `skeleton-1`, ...
///
/// Placeholder records carry no fields.
///
/// # Example
///
/// ```
/// use tabula_lib::placeholder::generate_placeholders;
///
/// let rows = generate_placeholders(3);
/// let ids: Vec<&str> = rows.iter().map(|r| r.id()).collect();
/// assert_eq!(ids, ["skeleton-0", "skeleton-1", "skeleton-2"]);
/// assert!(rows.iter().all(|r| r.fields().is_empty()));
/// ```
pub fn generate_placeholders(count: usize) -> Vec<Record> {
    (0..count)
        .map(|index| Record::new(format!("{}{}", PLACEHOLDER_PREFIX, index)))
        .collect()
}

/// What a table view renders: placeholders while loading, a page once loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum Rows<R> {
    /// Data is not available yet.
    Loading(Vec<Record>),
    /// Data is available and has been run through the pipeline.
    Loaded(Page<R>),
}

impl<R: Row + Clone> Rows<R> {
    /// Picks what to render for the current data and table state.
    ///
    /// `None` means the data is still pending: the pipeline is bypassed and
    /// `placeholder_count` placeholders are returned.
    pub fn resolve(
        data: Option<&[R]>,
        columns: &Columns<R>,
        state: &TableState,
        placeholder_count: usize,
    ) -> Result<Self, QueryError> {
        match data {
            None => Ok(Rows::Loading(generate_placeholders(placeholder_count))),
            Some(rows) => {
                let query = state.to_query(columns)?;
                Ok(Rows::Loaded(engine::run(rows, columns, &query)))
            }
        }
    }
}

impl<R> Rows<R> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Rows::Loading(_))
    }

    /// Number of rows to render.
    pub fn len(&self) -> usize {
        match self {
            Rows::Loading(placeholders) => placeholders.len(),
            Rows::Loaded(page) => page.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
