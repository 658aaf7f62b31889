//! Trip (expense group) entity and request DTOs.

use serde::Deserialize;
use serde::Serialize;
use sqlx::FromRow;
use tripkeep_core::types::{DbId, Timestamp};

/// Group status while expenses are still being recorded.
pub const STATUS_ACTIVE: &str = "active";
/// Terminal group status; a finished group cannot be finished again.
pub const STATUS_DONE: &str = "done";

/// A trip row from the `trips` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Trip {
    pub id: DbId,
    pub name: String,
    pub group_chat_id: Option<DbId>,
    pub status: String,
    pub created_by: DbId,
    pub key_member_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert input for a new trip row.
#[derive(Debug, Clone)]
pub struct CreateTrip {
    pub name: String,
    pub group_chat_id: Option<DbId>,
    pub created_by: DbId,
    pub key_member_id: DbId,
}

/// Request body for `POST /group`.
///
/// `userIds` are validated for existence but not attached as members; only
/// `userNames` produce (temporary) member rows.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub user_ids: Vec<DbId>,
    #[serde(default)]
    pub user_names: Vec<String>,
    pub group_chat_id: Option<DbId>,
}

/// Request body for `PUT /group/{id}`. All fields optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub group_chat_id: Option<DbId>,
    pub status: Option<String>,
}

/// Request body for `PATCH /group/update-group/{groupId}` (rename only).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameGroupRequest {
    pub name: String,
}
