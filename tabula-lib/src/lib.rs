//! Tabular data engine
//!
//! Filters, sorts, paginates and partially loads collections of rows for
//! admin-dashboard tables, independent of the row's shape.
//!
//! The pipeline is `rows + columns + query -> page`:
//!
//! - [`model`] - rows, dynamic [`model::Record`]s, values and column accessors
//! - [`query`] - immutable, validated [`query::Query`] descriptors
//! - [`engine`] - the pure filter, sort and paginate functions
//! - [`state`] - view-owned [`state::TableState`] and its transitions
//! - [`placeholder`] - placeholder rows for views whose data is still loading
//! - [`mock`] - an in-process list endpoint with seeded fixtures

pub mod engine;
pub mod error;
pub mod mock;
pub mod model;
pub mod placeholder;
pub mod query;
pub mod state;

pub use error::Error;
pub use error::Result;
