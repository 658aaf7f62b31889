//! User directory entity.
//!
//! The ledger consumes the user directory as an upstream collaborator; this
//! row holds the subset it needs. Temporary users are placeholder accounts
//! created with only a display name when a group is formed before everyone
//! has registered.

use serde::Serialize;
use sqlx::FromRow;
use tripkeep_core::types::{DbId, Timestamp};

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub is_online: bool,
    pub last_online_at: Option<Timestamp>,
    pub is_temporary: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
