pub mod group;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /group                                    list, create
/// /group/{id}                               get, update, delete
/// /group/detail/{id}                        full detail (members + activities)
/// /group/update-group/{group_id}            rename (PATCH)
/// /group/finish-group/{group_id}            finish (PATCH)
///
/// /group/activity                           create activity (POST, key member)
/// /group/activity/detail/{activity_id}      activity detail with fan-out
/// /group/update-activity/{activity_id}      update activity (PATCH, key member)
///
/// /group/add-member/{group_id}              add member (POST)
/// /group/update-advance/{group_id}          update advances (PATCH, key member)
///
/// /group/get-group-report/{group_id}        settlement report (paginated)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/group", group::router())
}
