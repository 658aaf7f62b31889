//! Handlers for group membership: joining a member (optionally wiring them
//! into existing activities) and updating member advances.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tripkeep_core::datetime::format_response;
use tripkeep_core::error::CoreError;
use tripkeep_core::types::DbId;
use tripkeep_core::validate::{parse_positive_id, validate_amount, validate_name, validate_positive_id};
use tripkeep_db::models::member::{AddMemberRequest, UpdateAdvanceRequest};
use tripkeep_db::repositories::{ActivityRepo, MemberRepo, TripRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// One activity the new member was wired into.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedActivity {
    pub group_activity_id: DbId,
    pub name: String,
    pub total_amount: f64,
    pub is_balance: bool,
}

/// Response for `POST /group/add-member/{groupId}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedMember {
    pub group_id: DbId,
    pub user_id: DbId,
    pub user_name: Option<String>,
    pub processed_activities: Vec<ProcessedActivity>,
    pub added_at: String,
}

/// Response for `PATCH /group/update-advance/{groupId}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedAdvances {
    pub group_id: DbId,
    pub updated: Vec<DbId>,
    pub updated_at: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/group/add-member/{groupId}
///
/// Resolves the member from `userId` or `userName`, rejects duplicates, then
/// optionally attaches the member as a sender to existing activities.
/// Activity attachment is idempotent per user; stored totals are left
/// untouched.
pub async fn add_member(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<AddMemberRequest>,
) -> AppResult<(StatusCode, Json<AddedMember>)> {
    let group_id = parse_positive_id(&raw_id, "groupId")?;

    if input.user_id.is_none() && input.user_name.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "Either userId or userName must be provided".to_string(),
        )));
    }
    if let Some(user_id) = input.user_id {
        validate_positive_id(user_id, "userId")?;
    }
    if let Some(user_name) = &input.user_name {
        validate_name(user_name, "userName")?;
    }
    for attachment in &input.group_activities {
        validate_positive_id(attachment.group_activity_id, "groupActivities.groupActivityId")?;
        for sender in &attachment.senders {
            validate_positive_id(sender.user_id, "groupActivities.senders.userId")?;
            validate_amount(sender.amount, "groupActivities.senders.amount")?;
        }
    }

    let mut tx = state.pool.begin().await?;

    TripRepo::find_by_id_tx(&mut tx, group_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Group",
            id: group_id,
        }))?;

    // `userId` wins when both are supplied. Name lookup here never creates
    // a placeholder; that only happens in the create-group flow.
    let user = if let Some(user_id) = input.user_id {
        UserRepo::find_by_id_tx(&mut tx, user_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "User",
                id: user_id,
            }))?
    } else if let Some(user_name) = &input.user_name {
        UserRepo::find_by_full_name_tx(&mut tx, user_name)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NameNotFound {
                    entity: "User",
                    name: user_name.clone(),
                })
            })?
    } else {
        unreachable!("presence of userId or userName was checked above")
    };

    if MemberRepo::find_tx(&mut tx, group_id, user.id).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "User is already a member of this group".to_string(),
        )));
    }

    let membership = MemberRepo::add_tx(&mut tx, group_id, user.id).await?;

    let mut processed = Vec::with_capacity(input.group_activities.len());
    for attachment in &input.group_activities {
        let activity =
            ActivityRepo::find_in_trip_tx(&mut tx, attachment.group_activity_id, group_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Activity",
                    id: attachment.group_activity_id,
                }))?;

        for sender in &attachment.senders {
            if ActivityRepo::sender_exists_tx(&mut tx, activity.id, sender.user_id).await? {
                continue;
            }
            ActivityRepo::insert_sender_tx(
                &mut tx,
                activity.id,
                sender.user_id,
                sender.amount,
                activity.is_balance,
            )
            .await?;
        }

        processed.push(ProcessedActivity {
            group_activity_id: activity.id,
            name: activity.name,
            total_amount: activity.total_amount,
            is_balance: activity.is_balance,
        });
    }

    tx.commit().await?;

    tracing::info!(
        user_id = auth.user_id,
        group_id,
        member_user_id = user.id,
        attached_activities = processed.len(),
        "Member added to group"
    );

    Ok((
        StatusCode::CREATED,
        Json(AddedMember {
            group_id,
            user_id: user.id,
            user_name: Some(user.full_name),
            processed_activities: processed,
            added_at: format_response(&membership.created_at),
        }),
    ))
}

/// PATCH /api/v1/group/update-advance/{groupId}
///
/// Key-member only. Each entry targets one membership row; entries naming
/// users outside the group are skipped, but at least one must match.
pub async fn update_advance(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<UpdateAdvanceRequest>,
) -> AppResult<Json<UpdatedAdvances>> {
    let group_id = parse_positive_id(&raw_id, "groupId")?;

    if input.user_update.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Choose at least one member to update".to_string(),
        )));
    }
    for entry in &input.user_update {
        validate_positive_id(entry.user_id, "userUpdate.userId")?;
        validate_amount(entry.advance, "userUpdate.advance")?;
    }

    let mut tx = state.pool.begin().await?;

    let trip = TripRepo::find_by_id_tx(&mut tx, group_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Group",
            id: group_id,
        }))?;

    if trip.key_member_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the group's key member can update advances".to_string(),
        )));
    }

    let mut updated = Vec::with_capacity(input.user_update.len());
    for entry in &input.user_update {
        let matched =
            MemberRepo::update_advance_tx(&mut tx, group_id, entry.user_id, entry.advance).await?;
        if matched {
            updated.push(entry.user_id);
        } else {
            tracing::warn!(
                group_id,
                user_id = entry.user_id,
                "Advance update skipped: user is not a member of this group"
            );
        }
    }

    if updated.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No matching members in this group".to_string(),
        )));
    }

    tx.commit().await?;

    tracing::info!(
        user_id = auth.user_id,
        group_id,
        updated_count = updated.len(),
        "Member advances updated"
    );

    Ok(Json(UpdatedAdvances {
        group_id,
        updated,
        updated_at: format_response(&Utc::now()),
    }))
}
