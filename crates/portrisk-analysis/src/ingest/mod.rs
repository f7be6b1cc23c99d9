//! Ingestion: validates the loader's table against an explicit schema once.
//!
//! After this boundary every row carries a typed `Dimension`, `Period`
//! and an optional bounded `LikertResponse`. Malformed rows are rejected
//! with a collected `IngestError`; a missing required column aborts.

pub mod header;
pub mod schema;
pub mod types;

pub use header::{parse_column_header, ColumnHeader};
pub use schema::parse_response;
pub use types::{RawTable, ResponseRow, ResponseTable};
