//! Handlers for the group (trip) lifecycle: create, list, read, update,
//! rename, delete, finish.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tripkeep_core::datetime::format_response;
use tripkeep_core::error::CoreError;
use tripkeep_core::types::DbId;
use tripkeep_core::validate::{parse_positive_id, validate_name, validate_positive_id};
use tripkeep_db::models::trip::{
    CreateGroupRequest, CreateTrip, RenameGroupRequest, Trip, UpdateGroupRequest, STATUS_ACTIVE,
    STATUS_DONE,
};
use tripkeep_db::repositories::{ActivityRepo, MemberRepo, TripRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::activity::ActivityResponse;
use crate::middleware::auth::AuthUser;
use crate::query::GroupListParams;
use crate::response::{DataResponse, UserProfile};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Public fields shared by every group response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub id: DbId,
    pub name: String,
    pub group_chat_id: Option<DbId>,
    pub status: String,
    pub created_by: DbId,
    pub key_member_id: DbId,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Trip> for GroupSummary {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id,
            name: trip.name.clone(),
            group_chat_id: trip.group_chat_id,
            status: trip.status.clone(),
            created_by: trip.created_by,
            key_member_id: trip.key_member_id,
            created_at: format_response(&trip.created_at),
            updated_at: format_response(&trip.updated_at),
        }
    }
}

/// One row of `GET /group`: the summary plus the members' avatar strip.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupListItem {
    #[serde(flatten)]
    pub group: GroupSummary,
    pub avatar_url: Vec<Option<String>>,
}

/// Response for `GET /group/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    #[serde(flatten)]
    pub group: GroupSummary,
    pub creator: Option<UserProfile>,
}

/// One member entry in the group detail view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUserEntry {
    pub user_id: DbId,
    pub user_name: Option<String>,
    pub advance: Option<f64>,
    pub avatar: Option<String>,
}

/// Response for `GET /group/detail/{id}`: the group with its key member,
/// full member list, and full activity list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetail {
    #[serde(flatten)]
    pub group: GroupSummary,
    pub key_member: Option<UserProfile>,
    pub group_users: Vec<GroupUserEntry>,
    pub group_activities: Vec<ActivityResponse>,
}

/// One seeded member in the create-group response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroupMember {
    pub user_id: DbId,
    pub user_name: String,
}

/// Response for `POST /group`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedGroup {
    pub id: DbId,
    pub name: String,
    pub status: String,
    pub group_chat_id: Option<DbId>,
    pub created_by: DbId,
    pub members: Vec<NewGroupMember>,
    pub created_at: String,
}

/// Response for `PATCH /group/update-group/{groupId}` (rename).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenamedGroup {
    pub id: DbId,
    pub name: String,
    pub updated_at: String,
}

/// Response for `PATCH /group/finish-group/{groupId}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishedGroup {
    pub group_id: DbId,
    pub name: String,
    pub status: String,
    pub finished_at: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/group
///
/// Creates a group owned by the caller (creator and key member). Ids in
/// `userIds` must exist but are not attached; each `userName` becomes a
/// temporary placeholder user with a membership row.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateGroupRequest>,
) -> AppResult<(StatusCode, Json<CreatedGroup>)> {
    validate_name(&input.name, "name")?;
    for user_name in &input.user_names {
        validate_name(user_name, "userName")?;
    }
    for &user_id in &input.user_ids {
        validate_positive_id(user_id, "userId")?;
    }
    if let Some(chat_id) = input.group_chat_id {
        validate_positive_id(chat_id, "groupChatId")?;
    }

    let mut tx = state.pool.begin().await?;

    let missing = UserRepo::missing_ids_tx(&mut tx, &input.user_ids).await?;
    if let Some(&id) = missing.first() {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    let trip = TripRepo::create_tx(
        &mut tx,
        &CreateTrip {
            name: input.name.clone(),
            group_chat_id: input.group_chat_id,
            created_by: auth.user_id,
            key_member_id: auth.user_id,
        },
    )
    .await?;

    let mut members = Vec::with_capacity(input.user_names.len());
    for user_name in &input.user_names {
        let user = UserRepo::create_temporary_tx(&mut tx, user_name).await?;
        MemberRepo::add_tx(&mut tx, trip.id, user.id).await?;
        members.push(NewGroupMember {
            user_id: user.id,
            user_name: user.full_name,
        });
    }

    tx.commit().await?;

    tracing::info!(
        user_id = auth.user_id,
        group_id = trip.id,
        member_count = members.len(),
        "Group created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedGroup {
            id: trip.id,
            name: trip.name,
            status: trip.status,
            group_chat_id: trip.group_chat_id,
            created_by: trip.created_by,
            members,
            created_at: format_response(&trip.created_at),
        }),
    ))
}

/// GET /api/v1/group?keyword=&page=&per_page=
///
/// Keyword filters name/status; ordering is newest first. The declared
/// pagination parameters are accepted but the full set is returned.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<GroupListParams>,
) -> AppResult<Json<DataResponse<Vec<GroupListItem>>>> {
    let trips = TripRepo::list(&state.pool, params.keyword.as_deref()).await?;

    let trip_ids: Vec<DbId> = trips.iter().map(|t| t.id).collect();
    let mut avatars_by_trip: HashMap<DbId, Vec<Option<String>>> = HashMap::new();
    for row in MemberRepo::member_avatars(&state.pool, &trip_ids).await? {
        avatars_by_trip.entry(row.trip_id).or_default().push(row.avatar);
    }

    let items = trips
        .iter()
        .map(|trip| GroupListItem {
            group: GroupSummary::from(trip),
            avatar_url: avatars_by_trip.remove(&trip.id).unwrap_or_default(),
        })
        .collect();

    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/group/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<GroupResponse>> {
    let id = parse_positive_id(&raw_id, "groupId")?;

    let trip = TripRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Group", id }))?;

    let creator = UserRepo::find_by_id(&state.pool, trip.created_by)
        .await?
        .map(UserProfile::from);

    Ok(Json(GroupResponse {
        group: GroupSummary::from(&trip),
        creator,
    }))
}

/// GET /api/v1/group/detail/{id}
///
/// Nested member and activity lists are intentionally unpaginated.
pub async fn get_detail(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<GroupDetail>> {
    let id = parse_positive_id(&raw_id, "groupId")?;

    let trip = TripRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Group", id }))?;

    let key_member = UserRepo::find_by_id(&state.pool, trip.key_member_id)
        .await?
        .map(UserProfile::from);

    let group_users = MemberRepo::list_with_users(&state.pool, id)
        .await?
        .into_iter()
        .map(|member| GroupUserEntry {
            user_id: member.user_id,
            user_name: member.full_name,
            advance: member.advance,
            avatar: member.avatar,
        })
        .collect();

    let group_activities = ActivityRepo::list_for_trip(&state.pool, id)
        .await?
        .iter()
        .map(ActivityResponse::from)
        .collect();

    Ok(Json(GroupDetail {
        group: GroupSummary::from(&trip),
        key_member,
        group_users,
        group_activities,
    }))
}

/// PUT /api/v1/group/{id}
///
/// Generic partial update of the group row.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<UpdateGroupRequest>,
) -> AppResult<Json<GroupSummary>> {
    let id = parse_positive_id(&raw_id, "groupId")?;

    if let Some(name) = &input.name {
        validate_name(name, "name")?;
    }
    if let Some(chat_id) = input.group_chat_id {
        validate_positive_id(chat_id, "groupChatId")?;
    }
    if let Some(status) = &input.status {
        if status != STATUS_ACTIVE && status != STATUS_DONE {
            return Err(AppError::Core(CoreError::Validation(format!(
                "status must be one of: {STATUS_ACTIVE}, {STATUS_DONE}"
            ))));
        }
    }

    let trip = TripRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Group", id }))?;

    Ok(Json(GroupSummary::from(&trip)))
}

/// PATCH /api/v1/group/update-group/{groupId}
///
/// Rename only.
pub async fn rename(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<RenameGroupRequest>,
) -> AppResult<Json<RenamedGroup>> {
    let id = parse_positive_id(&raw_id, "groupId")?;
    validate_name(&input.name, "name")?;

    let trip = TripRepo::rename(&state.pool, id, &input.name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Group", id }))?;

    tracing::info!(group_id = id, "Group renamed");

    Ok(Json(RenamedGroup {
        id: trip.id,
        name: trip.name,
        updated_at: format_response(&trip.updated_at),
    }))
}

/// DELETE /api/v1/group/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_positive_id(&raw_id, "groupId")?;

    let deleted = TripRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(group_id = id, "Group deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Group", id }))
    }
}

/// PATCH /api/v1/group/finish-group/{groupId}
///
/// One-way transition to `done`; finishing an already-done group conflicts.
pub async fn finish(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<FinishedGroup>> {
    let id = parse_positive_id(&raw_id, "groupId")?;

    let mut tx = state.pool.begin().await?;

    let trip = TripRepo::find_by_id_tx(&mut tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Group", id }))?;

    if trip.status == STATUS_DONE {
        return Err(AppError::Core(CoreError::Conflict(
            "Group is already finished".to_string(),
        )));
    }

    let finished = TripRepo::finish_tx(&mut tx, id).await?;
    tx.commit().await?;

    tracing::info!(user_id = auth.user_id, group_id = id, "Group finished");

    Ok(Json(FinishedGroup {
        group_id: finished.id,
        name: finished.name,
        status: finished.status,
        finished_at: format_response(&finished.updated_at),
    }))
}
