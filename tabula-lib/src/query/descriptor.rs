//! Immutable query descriptor and its builder.

use serde::Serialize;

use super::ColumnFilter;
use super::OrderBy;
use super::SortKey;
use crate::error::QueryError;
use crate::model::Columns;

/// A validated, immutable list request.
///
/// Build one with [`Query::builder`]. A `Query` is never modified in place:
/// derived queries such as "same query, next page" are produced by the
/// `with_*` and `*_page` methods, which return a new value.
///
/// # Invariants
///
/// - `page >= 1` and `limit >= 1`
/// - every sort, filter, projection and search field names a known column
/// - sort keys name sortable columns, filters name filterable columns
///
/// # Example
///
/// ```
/// use tabula_lib::model::{Column, Columns, Record};
/// use tabula_lib::query::{ColumnFilter, OrderBy, Query};
///
/// let columns: Columns<Record> = vec![
///     Column::record_field("name", "Name"),
///     Column::record_field("price", "Price"),
/// ]
/// .into();
///
/// let query = Query::builder()
///     .page(2)
///     .limit(20)
///     .search("lap")
///     .order_by(OrderBy::desc("price").then_asc("name"))
///     .filter(ColumnFilter::gt("price", 100i64))
///     .build(&columns)?;
///
/// assert_eq!(query.next_page().page(), 3);
/// # Ok::<(), tabula_lib::error::QueryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    page: usize,
    limit: usize,
    search: String,
    sort: Vec<SortKey>,
    filters: Vec<ColumnFilter>,
    fields: Vec<String>,
    search_fields: Vec<String>,
}

impl Query {
    /// Creates a new query builder with page 1 and a page size of 10.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }

    /// One-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Page size.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Index of the first row of this page in the filtered, sorted collection.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Free-text search. Empty means no search.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Sort keys in priority order.
    pub fn sort(&self) -> &[SortKey] {
        &self.sort
    }

    /// Column filters, combined with AND.
    pub fn filters(&self) -> &[ColumnFilter] {
        &self.filters
    }

    /// Projected fields. Empty means all fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Fields tested by the global search. Empty means every searchable column.
    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    // =========================================================================
    // Copy-with-override
    // =========================================================================

    /// Returns the same query for another page.
    pub fn with_page(&self, page: usize) -> Result<Query, QueryError> {
        if page < 1 {
            return Err(QueryError::InvalidPage(page as i64));
        }
        Ok(Query {
            page,
            ..self.clone()
        })
    }

    /// Returns the same query with another page size.
    pub fn with_limit(&self, limit: usize) -> Result<Query, QueryError> {
        if limit < 1 {
            return Err(QueryError::InvalidLimit(limit as i64));
        }
        Ok(Query {
            limit,
            ..self.clone()
        })
    }

    /// Returns the same query with another search text, back on page 1.
    pub fn with_search(&self, search: impl Into<String>) -> Query {
        Query {
            search: search.into(),
            page: 1,
            ..self.clone()
        }
    }

    /// Returns the same query for the following page.
    pub fn next_page(&self) -> Query {
        Query {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }

    /// Returns the same query for the preceding page, never going below page 1.
    pub fn previous_page(&self) -> Query {
        Query {
            page: self.page.saturating_sub(1).max(1),
            ..self.clone()
        }
    }

    /// Returns a builder seeded with this query, for changes that need
    /// re-validation (sort keys, filters, projection).
    pub fn to_builder(&self) -> QueryBuilder {
        QueryBuilder {
            page: i64::try_from(self.page).unwrap_or(i64::MAX),
            limit: i64::try_from(self.limit).unwrap_or(i64::MAX),
            search: self.search.clone(),
            sort: self.sort.clone(),
            filters: self.filters.clone(),
            fields: self.fields.clone(),
            search_fields: self.search_fields.clone(),
        }
    }
}

/// Builder for constructing a [`Query`].
///
/// Nothing is checked until [`build`](QueryBuilder::build), which validates
/// the whole request against a column set.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    page: i64,
    limit: i64,
    search: String,
    sort: Vec<SortKey>,
    filters: Vec<ColumnFilter>,
    fields: Vec<String>,
    search_fields: Vec<String>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryBuilder {
    /// Creates a new builder with page 1 and a page size of 10.
    pub fn new() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: String::new(),
            sort: Vec::new(),
            filters: Vec::new(),
            fields: Vec::new(),
            search_fields: Vec::new(),
        }
    }

    /// Sets the one-based page number.
    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the free-text search.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Appends a sort key.
    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    /// Replaces the sort keys with an ordering.
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.sort = order.into_keys();
        self
    }

    /// Replaces the sort keys.
    pub fn sorts(mut self, keys: impl IntoIterator<Item = SortKey>) -> Self {
        self.sort = keys.into_iter().collect();
        self
    }

    /// Appends a column filter.
    pub fn filter(mut self, filter: ColumnFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Replaces the column filters.
    pub fn filters(mut self, filters: impl IntoIterator<Item = ColumnFilter>) -> Self {
        self.filters = filters.into_iter().collect();
        self
    }

    /// Sets the projected fields.
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Sets the projected fields from owned names.
    pub fn fields(mut self, fields: impl IntoIterator<Item = String>) -> Self {
        self.fields = fields.into_iter().collect();
        self
    }

    /// Restricts the global search to the given fields.
    pub fn search_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Validates the request against a column set and builds the query.
    pub fn build<R>(self, columns: &Columns<R>) -> Result<Query, QueryError> {
        if self.page < 1 {
            return Err(QueryError::InvalidPage(self.page));
        }
        if self.limit < 1 {
            return Err(QueryError::InvalidLimit(self.limit));
        }

        for key in &self.sort {
            let column = columns
                .get(&key.field)
                .ok_or_else(|| QueryError::unknown_field(&key.field, "sort"))?;
            if !column.is_sortable() {
                return Err(QueryError::NotSortable(key.field.clone()));
            }
        }

        for filter in &self.filters {
            let column = columns
                .get(&filter.field)
                .ok_or_else(|| QueryError::unknown_field(&filter.field, "filters"))?;
            if !column.is_filterable() {
                return Err(QueryError::NotFilterable(filter.field.clone()));
            }
        }

        ensure_known(columns, &self.fields, "fields")?;
        ensure_known(columns, &self.search_fields, "searchFields")?;

        Ok(Query {
            page: self.page as usize,
            limit: self.limit as usize,
            search: self.search,
            sort: self.sort,
            filters: self.filters,
            fields: self.fields,
            search_fields: self.search_fields,
        })
    }
}

fn ensure_known<R>(columns: &Columns<R>, fields: &[String], context: &'static str) -> Result<(), QueryError> {
    match fields.iter().find(|f| columns.get(f).is_none()) {
        Some(unknown) => Err(QueryError::unknown_field(unknown, context)),
        None => Ok(()),
    }
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
            Column::record_field("notes", "Notes").sortable(false).filterable(false),
        ]
        .into()
    }

    #[test]
    fn test_rejects_bad_window() {
        assert_eq!(
            Query::builder().page(0).build(&columns()),
            Err(QueryError::InvalidPage(0))
        );
        assert_eq!(
            Query::builder().limit(-5).build(&columns()),
            Err(QueryError::InvalidLimit(-5))
        );
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert_eq!(
            Query::builder().sort(SortKey::asc("sku")).build(&columns()),
            Err(QueryError::unknown_field("sku", "sort"))
        );
        assert_eq!(
            Query::builder()
                .filter(ColumnFilter::eq("sku", "x"))
                .build(&columns()),
            Err(QueryError::unknown_field("sku", "filters"))
        );
        assert_eq!(
            Query::builder().select(&["name", "sku"]).build(&columns()),
            Err(QueryError::unknown_field("sku", "fields"))
        );
        assert_eq!(
            Query::builder().search_fields(["sku"]).build(&columns()),
            Err(QueryError::unknown_field("sku", "searchFields"))
        );
    }

    #[test]
    fn test_rejects_disabled_features() {
        assert_eq!(
            Query::builder().sort(SortKey::desc("notes")).build(&columns()),
            Err(QueryError::NotSortable("notes".to_string()))
        );
        assert_eq!(
            Query::builder()
                .filter(ColumnFilter::contains("notes", "x"))
                .build(&columns()),
            Err(QueryError::NotFilterable("notes".to_string()))
        );
    }

    #[test]
    fn test_copy_with_override() {
        let query = Query::builder().page(2).limit(5).build(&columns()).unwrap();

        let next = query.next_page();
        assert_eq!(next.page(), 3);
        assert_eq!(query.page(), 2);

        assert_eq!(query.previous_page().previous_page().page(), 1);
        assert_eq!(query.with_page(0), Err(QueryError::InvalidPage(0)));
        assert_eq!(query.with_limit(0), Err(QueryError::InvalidLimit(0)));
        assert_eq!(query.with_search("lap").page(), 1);
        assert_eq!(query.offset(), 5);
    }

    #[test]
    fn test_to_builder_revalidates() {
        let query = Query::builder().build(&columns()).unwrap();
        let rebuilt = query
            .to_builder()
            .sort(SortKey::desc("price"))
            .build(&columns())
            .unwrap();
        assert_eq!(rebuilt.sort(), &[SortKey::desc("price")]);
        assert!(query.sort().is_empty());
    }
}
