//! Trip membership entity and the advance/add-member request DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tripkeep_core::types::{DbId, Timestamp};

/// A membership row from the `trip_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TripMember {
    pub id: DbId,
    pub trip_id: DbId,
    pub user_id: DbId,
    pub advance: Option<f64>,
    pub created_at: Timestamp,
}

/// A membership row joined with its user's display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MemberWithUser {
    pub user_id: DbId,
    pub full_name: Option<String>,
    pub avatar: Option<String>,
    pub advance: Option<f64>,
}

/// One (trip, avatar) pair for the group listing's avatar strip.
#[derive(Debug, Clone, FromRow)]
pub struct MemberAvatar {
    pub trip_id: DbId,
    pub avatar: Option<String>,
}

/// Request body for `POST /group/add-member/{groupId}`.
///
/// Exactly one of `user_id` / `user_name` must resolve to an existing user.
/// Each attachment retroactively adds the listed senders to one of the
/// group's existing activities (never payers).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub user_id: Option<DbId>,
    pub user_name: Option<String>,
    #[serde(default)]
    pub group_activities: Vec<ActivityAttachment>,
}

/// One retroactive sender attachment inside an [`AddMemberRequest`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityAttachment {
    pub group_activity_id: DbId,
    #[serde(default)]
    pub senders: Vec<AttachmentSender>,
}

/// A sender to attach if not already present on the activity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentSender {
    pub user_id: DbId,
    pub amount: f64,
}

/// Request body for `PATCH /group/update-advance/{groupId}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdvanceRequest {
    #[serde(default)]
    pub user_update: Vec<AdvanceUpdate>,
}

/// One member's new advance inside an [`UpdateAdvanceRequest`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceUpdate {
    pub user_id: DbId,
    pub advance: f64,
}
