//! Route definitions for the `/group` resource.
//!
//! Activities, membership, advances, and the settlement report are all
//! group-scoped, so their routes live here too.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{activity, group, member, report};
use crate::state::AppState;

/// Routes mounted at `/group`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /detail/{id}                       -> get_detail
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// PATCH  /update-group/{group_id}           -> rename
/// PATCH  /finish-group/{group_id}           -> finish
///
/// POST   /activity                          -> activity::create
/// GET    /activity/detail/{activity_id}     -> activity::detail
/// PATCH  /update-activity/{activity_id}     -> activity::update
///
/// POST   /add-member/{group_id}             -> member::add_member
/// PATCH  /update-advance/{group_id}         -> member::update_advance
///
/// GET    /get-group-report/{group_id}       -> report::group_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(group::list).post(group::create))
        .route("/detail/{id}", get(group::get_detail))
        .route(
            "/{id}",
            get(group::get_by_id)
                .put(group::update)
                .delete(group::delete),
        )
        .route("/update-group/{group_id}", patch(group::rename))
        .route("/finish-group/{group_id}", patch(group::finish))
        .route("/activity", post(activity::create))
        .route("/activity/detail/{activity_id}", get(activity::detail))
        .route("/update-activity/{activity_id}", patch(activity::update))
        .route("/add-member/{group_id}", post(member::add_member))
        .route("/update-advance/{group_id}", patch(member::update_advance))
        .route("/get-group-report/{group_id}", get(report::group_report))
}
