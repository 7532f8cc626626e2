//! Query descriptors.
//!
//! A [`Query`] is an immutable description of one list request: free-text
//! search, column filters, sort keys, field projection and a pagination
//! window. Queries are validated against a [`Columns`](crate::model::Columns)
//! set when they are built, so the engine never sees an unknown field or an
//! out-of-range page size.
//!
//! # Shared Types
//!
//! - [`ColumnFilter`] / [`Operator`] - per-column filter conditions
//! - [`SortKey`] / [`OrderBy`] / [`Direction`] - multi-key ordering
//! - [`QueryParams`] - the raw, string-typed form parsed from a query string
//! - [`QueryConfig`] - defaults and limits applied at the query-string boundary

mod config;
mod descriptor;
mod filter;
mod order;
mod params;

pub use config::QueryConfig;
pub use descriptor::Query;
pub use descriptor::QueryBuilder;
pub use filter::ColumnFilter;
pub use filter::Operator;
pub use order::Direction;
pub use order::OrderBy;
pub use order::SortKey;
pub use params::QueryParams;
