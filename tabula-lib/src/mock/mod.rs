//! In-process mock backend.
//!
//! A [`Collection`] plays the role of a list endpoint: it takes a raw query
//! string, runs it through the engine and returns the JSON body a real
//! backend would send. It also offers the get/insert/remove handlers the
//! dashboard's mock API needs.
//!
//! # Example
//!
//! ```
//! use tabula_lib::mock::{fixtures, Collection};
//!
//! let products = Collection::new(fixtures::products(25, 42), fixtures::product_columns());
//! let body = products.list("page=3&limit=10")?;
//!
//! assert_eq!(body["data"].as_array().map(Vec::len), Some(5));
//! assert_eq!(body["totalPages"], 3);
//! # Ok::<(), tabula_lib::error::Error>(())
//! ```

pub mod fixtures;

use log::debug;
use serde::Serialize;

use crate::engine;
use crate::error::Result;
use crate::model::Columns;
use crate::model::Row;
use crate::query::QueryConfig;
use crate::query::QueryParams;

/// A mock list endpoint over an in-memory collection.
#[derive(Debug, Clone)]
pub struct Collection<R> {
    records: Vec<R>,
    columns: Columns<R>,
    config: QueryConfig,
}

impl<R: Row + Serialize> Collection<R> {
    /// Creates a collection with the default query config.
    pub fn new(records: Vec<R>, columns: Columns<R>) -> Self {
        Self {
            records,
            columns,
            config: QueryConfig::default(),
        }
    }

    /// Sets the query config (builder pattern).
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    /// Handles a list request.
    ///
    /// Returns the paginated result as JSON. With `fields` in the query, each
    /// row is projected to its id plus the requested fields.
    pub fn list(&self, query: &str) -> Result<serde_json::Value> {
        let params = QueryParams::parse(query, &self.config)?;
        let query = params.into_query(&self.columns, &self.config)?;
        debug!("List {:?}", query);

        let page = engine::run_ref(&self.records, &self.columns, &query);
        let body = if query.fields().is_empty() {
            serde_json::to_value(&page)?
        } else {
            let projected = page.map(|row| engine::project_row(row, &self.columns, query.fields()));
            serde_json::to_value(&projected)?
        };
        Ok(body)
    }

    /// Handles a get-by-id request.
    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.row_id() == id)
    }

    /// Inserts a record, replacing any record with the same id.
    ///
    /// Returns the replaced record.
    pub fn insert(&mut self, record: R) -> Option<R> {
        let id = record.row_id();
        match self.records.iter().position(|r| r.row_id() == id) {
            Some(index) => Some(std::mem::replace(&mut self.records[index], record)),
            None => {
                self.records.push(record);
                None
            }
        }
    }

    /// Removes a record by id.
    pub fn remove(&mut self, id: &str) -> Option<R> {
        let index = self.records.iter().position(|r| r.row_id() == id)?;
        Some(self.records.remove(index))
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn columns(&self) -> &Columns<R> {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
