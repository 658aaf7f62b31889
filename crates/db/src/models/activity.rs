//! Spending activity entity, its payer/sender child rows, and request DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tripkeep_core::types::{DbId, Timestamp};

/// An activity row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub trip_id: DbId,
    pub name: String,
    pub total_amount: f64,
    pub is_balance: bool,
    pub note: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert input for a new activity row. `total_amount` is the sum of the
/// sender shares, computed by the caller before the insert.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub trip_id: DbId,
    pub name: String,
    pub total_amount: f64,
    pub is_balance: bool,
    pub note: Option<String>,
    pub created_by: DbId,
}

/// Update input applied to an existing activity row.
#[derive(Debug, Clone)]
pub struct ActivityPatch {
    pub name: String,
    pub total_amount: f64,
    pub is_balance: bool,
    pub note: Option<String>,
}

/// A payer or sender row joined with the user's display name, as returned
/// by the activity detail view.
#[derive(Debug, Clone, FromRow)]
pub struct ParticipantDetail {
    pub id: DbId,
    pub activity_id: DbId,
    pub user_id: DbId,
    pub user_name: Option<String>,
    pub amount: f64,
    pub created_at: Timestamp,
}

/// Request body for `POST /group/activity`.
///
/// The wire speaks in "groups"; the row it produces references the trip.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    pub group_id: DbId,
    pub name: String,
    pub is_balance: bool,
    pub note: Option<String>,
    #[serde(default)]
    pub payers: Vec<PayerInput>,
    #[serde(default)]
    pub senders: Vec<SenderInput>,
}

/// Request body for `PATCH /group/update-activity/{activityId}`.
///
/// `payers: None` (field absent or JSON null) deletes all existing payers
/// without recreating any; `senders` is always replaced wholesale.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityRequest {
    pub group_id: DbId,
    pub name: String,
    pub is_balance: bool,
    pub note: Option<String>,
    pub payers: Option<Vec<PayerInput>>,
    #[serde(default)]
    pub senders: Vec<SenderInput>,
}

/// One payer share in an activity request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerInput {
    pub user_id: DbId,
    pub payment_amount: f64,
}

/// One sender share in an activity request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderInput {
    pub user_id: DbId,
    pub amount: f64,
}
