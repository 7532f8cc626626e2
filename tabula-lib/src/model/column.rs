//! Column descriptors and field accessors.

use std::fmt;
use std::sync::Arc;

use log::warn;

use super::Record;
use super::Value;
use crate::error::FieldError;

/// Reads one field from a row.
///
/// Returns `Err(FieldError::Missing)` when the row has no such field and
/// `Ok(Value::Null)` when the field is present but empty.
pub type Accessor<R> = Arc<dyn Fn(&R) -> Result<Value, FieldError> + Send + Sync>;

/// Column configuration.
///
/// A column names one field of a row, gives it a human label, says which
/// engine features it takes part in, and knows how to read the field's
/// value. All three flags default to `true`.
///
/// # Examples
///
/// ```
/// use tabula_lib::model::{Column, Record};
///
/// struct Product {
///     name: String,
///     stock: i64,
/// }
///
/// let name = Column::new("name", "Name", |p: &Product| p.name.clone().into());
/// let stock = Column::new("stock", "Stock", |p: &Product| p.stock.into()).searchable(false);
///
/// // Dynamic records resolve the field by name.
/// let email = Column::<Record>::record_field("email", "Email").sortable(false);
/// ```
pub struct Column<R> {
    field: String,
    label: String,
    searchable: bool,
    sortable: bool,
    filterable: bool,
    accessor: Accessor<R>,
}

impl<R> Column<R> {
    /// Create a column whose accessor always resolves.
    pub fn new<F>(field: impl Into<String>, label: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        Self::try_new(field, label, move |row| Ok(accessor(row)))
    }

    /// Create a column whose accessor may report a missing field.
    pub fn try_new<F>(field: impl Into<String>, label: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> Result<Value, FieldError> + Send + Sync + 'static,
    {
        Self {
            field: field.into(),
            label: label.into(),
            searchable: true,
            sortable: true,
            filterable: true,
            accessor: Arc::new(accessor),
        }
    }

    /// Set whether the column takes part in global search.
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Set whether the column may be used as a sort key.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set whether the column may carry a column filter.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    /// Read this column's value from a row.
    pub fn value(&self, row: &R) -> Result<Value, FieldError> {
        (self.accessor)(row)
    }
}

impl Column<Record> {
    /// Create a column that reads a named field of a [`Record`].
    pub fn record_field(field: impl Into<String>, label: impl Into<String>) -> Self {
        let field = field.into();
        let key = field.clone();
        Self::try_new(field, label, move |record: &Record| record.value(&key).cloned())
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            label: self.label.clone(),
            searchable: self.searchable,
            sortable: self.sortable,
            filterable: self.filterable,
            accessor: Arc::clone(&self.accessor),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("label", &self.label)
            .field("searchable", &self.searchable)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .finish_non_exhaustive()
    }
}

/// An ordered set of columns, unique by field name.
pub struct Columns<R> {
    columns: Vec<Column<R>>,
}

impl<R> Columns<R> {
    /// Create an empty column set.
    pub fn new() -> Self {
        Self { columns: Vec::new() }
    }

    /// Add a column. A column whose field name is already present is dropped.
    pub fn push(&mut self, column: Column<R>) {
        if self.get(column.field()).is_some() {
            warn!("Duplicate column '{}' ignored", column.field());
            return;
        }
        self.columns.push(column);
    }

    /// Add a column (builder pattern).
    pub fn with(mut self, column: Column<R>) -> Self {
        self.push(column);
        self
    }

    /// Find a column by field name.
    pub fn get(&self, field: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.field == field)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column<R>> {
        self.columns.iter()
    }

    /// Field names in column order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.field.as_str())
    }

    /// Columns that take part in global search.
    pub fn searchable(&self) -> impl Iterator<Item = &Column<R>> {
        self.columns.iter().filter(|c| c.searchable)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<R> Default for Columns<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for Columns<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R> fmt::Debug for Columns<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns.iter()).finish()
    }
}

impl<R> FromIterator<Column<R>> for Columns<R> {
    fn from_iter<I: IntoIterator<Item = Column<R>>>(iter: I) -> Self {
        let mut columns = Self::new();
        for column in iter {
            columns.push(column);
        }
        columns
    }
}

impl<R> From<Vec<Column<R>>> for Columns<R> {
    fn from(columns: Vec<Column<R>>) -> Self {
        columns.into_iter().collect()
    }
}

impl<'a, R> IntoIterator for &'a Columns<R> {
    type Item = &'a Column<R>;
    type IntoIter = std::slice::Iter<'a, Column<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_field_accessor() {
        let column = Column::<Record>::record_field("name", "Name");
        let record = Record::new("1").set("name", "Mouse").set("note", Value::Null);

        assert_eq!(column.value(&record), Ok(Value::from("Mouse")));

        let note = Column::<Record>::record_field("note", "Note");
        assert_eq!(note.value(&record), Ok(Value::Null));

        let missing = Column::<Record>::record_field("sku", "SKU");
        assert_eq!(missing.value(&record), Err(FieldError::missing("sku")));
    }

    #[test]
    fn test_duplicate_columns_keep_first() {
        let columns: Columns<Record> = vec![
            Column::record_field("name", "Name"),
            Column::record_field("name", "Other").sortable(false),
        ]
        .into();

        assert_eq!(columns.len(), 1);
        assert_eq!(columns.get("name").map(|c| c.label()), Some("Name"));
    }

    #[test]
    fn test_flags_default_on() {
        let column = Column::new("stock", "Stock", |r: &Record| r.get("stock").cloned().into())
            .searchable(false);
        assert!(!column.is_searchable());
        assert!(column.is_sortable());
        assert!(column.is_filterable());
    }
}
