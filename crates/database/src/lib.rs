//! # Roomstat Database Crate
//!
//! This crate acts as a high-level, application-specific interface to the
//! PostgreSQL database that holds rooms and students.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the application sees typed
//!   records in and typed report rows out.
//! - **Single connection:** A run is sequential, so [`Database`] holds exactly
//!   one connection, acquired once and released once.
//! - **Store-side aggregation:** Grouping, averaging and rounding to
//!   `numeric(5,2)` are delegated to PostgreSQL.
//!
//! ## Public API
//!
//! - `connect` / `Database`: acquire and release the store handle.
//! - `schema`: the idempotent Schema Manager (`create_tables`, `add_indexes`).
//! - `DbRepository`: the Data Loader (`load`) and read-back helpers.
//! - `ReportEngine`: the four report queries.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod reports;
pub mod repository;
pub mod schema;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{Database, connect};
pub use error::DbError;
pub use reports::ReportEngine;
pub use repository::{DbRepository, LoadSummary};
pub use schema::{add_indexes, create_tables, ensure_schema};
