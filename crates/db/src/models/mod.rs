//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request DTOs (camelCase) consumed by the API handlers
//! - Enriched row structs returned by join queries

pub mod activity;
pub mod member;
pub mod report;
pub mod trip;
pub mod user;
