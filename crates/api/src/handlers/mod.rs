//! Request handlers for the ledger.
//!
//! Each submodule provides async handler functions for one resource area.
//! Handlers validate input through `tripkeep_core`, delegate queries to the
//! repositories in `tripkeep_db`, own the transaction for every mutation
//! (authorization reads included), and map errors via [`crate::error::AppError`].

pub mod activity;
pub mod group;
pub mod member;
pub mod report;
