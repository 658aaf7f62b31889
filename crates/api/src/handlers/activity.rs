//! Handlers for spending activities: create, update, detail.
//!
//! The stored `total_amount` is always derived from the sender rows, never
//! taken from the client, so the ledger stays consistent with its fan-out.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tripkeep_core::datetime::{format_response, DateRange};
use tripkeep_core::error::CoreError;
use tripkeep_core::settlement;
use tripkeep_core::types::DbId;
use tripkeep_core::validate::{
    parse_positive_id, validate_amount, validate_name, validate_note, validate_positive_id,
};
use tripkeep_db::models::activity::{
    Activity, ActivityPatch, CreateActivityRequest, NewActivity, ParticipantDetail,
    UpdateActivityRequest,
};
use tripkeep_db::repositories::{ActivityRepo, TripRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::DateWindowParams;
use crate::response::UserProfile;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Public fields of an activity, shared by create/update responses and the
/// group detail view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: DbId,
    pub group_id: DbId,
    pub name: String,
    pub total_amount: f64,
    pub is_balance: bool,
    pub note: Option<String>,
    pub created_by: DbId,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Activity> for ActivityResponse {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            group_id: activity.trip_id,
            name: activity.name.clone(),
            total_amount: activity.total_amount,
            is_balance: activity.is_balance,
            note: activity.note.clone(),
            created_by: activity.created_by,
            created_at: format_response(&activity.created_at),
            updated_at: format_response(&activity.updated_at),
        }
    }
}

/// One payer or sender row in the activity detail view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub id: DbId,
    pub group_activity_id: DbId,
    pub user_id: DbId,
    pub user_name: Option<String>,
    pub amount: f64,
    pub created_at: String,
}

impl From<ParticipantDetail> for ParticipantResponse {
    fn from(row: ParticipantDetail) -> Self {
        Self {
            id: row.id,
            group_activity_id: row.activity_id,
            user_id: row.user_id,
            user_name: row.user_name,
            amount: row.amount,
            created_at: format_response(&row.created_at),
        }
    }
}

/// Response for `GET /group/activity/detail/{activityId}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDetail {
    #[serde(flatten)]
    pub activity: ActivityResponse,
    pub user_created: Option<UserProfile>,
    pub payers: Vec<ParticipantResponse>,
    pub senders: Vec<ParticipantResponse>,
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn validate_payers(payers: &[tripkeep_db::models::activity::PayerInput]) -> AppResult<()> {
    for payer in payers {
        validate_positive_id(payer.user_id, "payers.userId")?;
        validate_amount(payer.payment_amount, "payers.paymentAmount")?;
    }
    Ok(())
}

fn validate_senders(senders: &[tripkeep_db::models::activity::SenderInput]) -> AppResult<()> {
    if senders.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "senders must contain at least one entry".to_string(),
        )));
    }
    for sender in senders {
        validate_positive_id(sender.user_id, "senders.userId")?;
        validate_amount(sender.amount, "senders.amount")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/group/activity
///
/// Key-member only. Writes the activity row and its payer/sender fan-out in
/// one transaction.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateActivityRequest>,
) -> AppResult<(StatusCode, Json<ActivityResponse>)> {
    validate_positive_id(input.group_id, "groupId")?;
    validate_name(&input.name, "name")?;
    validate_note(input.note.as_deref())?;
    validate_payers(&input.payers)?;
    validate_senders(&input.senders)?;

    let total_amount = settlement::total_amount(input.senders.iter().map(|s| s.amount));

    let mut tx = state.pool.begin().await?;

    let trip = TripRepo::find_by_id_tx(&mut tx, input.group_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Group",
            id: input.group_id,
        }))?;

    if trip.key_member_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the group's key member can record activities".to_string(),
        )));
    }

    let activity = ActivityRepo::create_tx(
        &mut tx,
        &NewActivity {
            trip_id: trip.id,
            name: input.name.clone(),
            total_amount,
            is_balance: input.is_balance,
            note: input.note.clone(),
            created_by: auth.user_id,
        },
    )
    .await?;

    ActivityRepo::insert_payers_tx(&mut tx, activity.id, &input.payers).await?;
    ActivityRepo::insert_senders_tx(&mut tx, activity.id, &input.senders, input.is_balance).await?;

    tx.commit().await?;

    tracing::info!(
        user_id = auth.user_id,
        group_id = trip.id,
        activity_id = activity.id,
        total_amount,
        "Activity created"
    );

    Ok((StatusCode::CREATED, Json(ActivityResponse::from(&activity))))
}

/// PATCH /api/v1/group/update-activity/{activityId}
///
/// Key-member only. Senders are always replaced wholesale; payers are
/// replaced when the field is present (`payers: null` clears them).
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<UpdateActivityRequest>,
) -> AppResult<Json<ActivityResponse>> {
    let activity_id = parse_positive_id(&raw_id, "activityId")?;
    validate_positive_id(input.group_id, "groupId")?;
    validate_name(&input.name, "name")?;
    validate_note(input.note.as_deref())?;
    if let Some(payers) = &input.payers {
        validate_payers(payers)?;
    }
    validate_senders(&input.senders)?;

    let total_amount = settlement::total_amount(input.senders.iter().map(|s| s.amount));

    let mut tx = state.pool.begin().await?;

    let existing = ActivityRepo::find_by_id_tx(&mut tx, activity_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id: activity_id,
        }))?;

    let trip = TripRepo::find_by_id_tx(&mut tx, input.group_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Group",
            id: input.group_id,
        }))?;

    // The addressed activity must belong to the group named in the body.
    if existing.trip_id != trip.id {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id: activity_id,
        }));
    }

    if trip.key_member_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the group's key member can edit activities".to_string(),
        )));
    }

    let activity = ActivityRepo::update_tx(
        &mut tx,
        activity_id,
        &ActivityPatch {
            name: input.name.clone(),
            total_amount,
            is_balance: input.is_balance,
            note: input.note.clone(),
        },
    )
    .await?;

    // An omitted payer list still clears the existing rows; only a
    // provided list recreates them.
    ActivityRepo::delete_payers_tx(&mut tx, activity_id).await?;
    if let Some(payers) = &input.payers {
        ActivityRepo::insert_payers_tx(&mut tx, activity_id, payers).await?;
    }

    ActivityRepo::delete_senders_tx(&mut tx, activity_id).await?;
    ActivityRepo::insert_senders_tx(&mut tx, activity_id, &input.senders, input.is_balance).await?;

    tx.commit().await?;

    tracing::info!(
        user_id = auth.user_id,
        group_id = trip.id,
        activity_id,
        total_amount,
        "Activity updated"
    );

    Ok(Json(ActivityResponse::from(&activity)))
}

/// GET /api/v1/group/activity/detail/{activityId}?startDate=&endDate=
///
/// The optional window filters payer and sender rows by their own creation
/// time; a window that matches nothing yields empty lists, not an error.
pub async fn detail(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(params): Query<DateWindowParams>,
) -> AppResult<Json<ActivityDetail>> {
    let activity_id = parse_positive_id(&raw_id, "activityId")?;
    let range = DateRange::parse(params.start_date.as_deref(), params.end_date.as_deref())?;

    let activity = ActivityRepo::find_by_id(&state.pool, activity_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id: activity_id,
        }))?;

    let user_created = UserRepo::find_by_id(&state.pool, activity.created_by)
        .await?
        .map(UserProfile::from);

    let payers = ActivityRepo::payer_details(&state.pool, activity_id, &range)
        .await?
        .into_iter()
        .map(ParticipantResponse::from)
        .collect();

    let senders = ActivityRepo::sender_details(&state.pool, activity_id, &range)
        .await?
        .into_iter()
        .map(ParticipantResponse::from)
        .collect();

    Ok(Json(ActivityDetail {
        activity: ActivityResponse::from(&activity),
        user_created,
        payers,
        senders,
    }))
}
