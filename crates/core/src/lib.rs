//! Tripkeep domain core.
//!
//! Pure ledger logic shared by the database and API crates: the error
//! taxonomy, strict date-time handling, input validation, pagination math,
//! and settlement aggregation. No I/O lives here.

pub mod datetime;
pub mod error;
pub mod pagination;
pub mod settlement;
pub mod types;
pub mod validate;
