//! Caller identity primitives.
//!
//! Token issuance belongs to the upstream identity provider; this module
//! only validates the HS256 bearer tokens it mints and extracts the caller's
//! user id from them.

pub mod jwt;
