//! Handler for the per-member settlement report.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use tripkeep_core::datetime::DateRange;
use tripkeep_core::error::CoreError;
use tripkeep_core::pagination::PageBounds;
use tripkeep_core::settlement::{self, LedgerEntry};
use tripkeep_core::types::DbId;
use tripkeep_core::validate::parse_positive_id;
use tripkeep_db::repositories::{MemberRepo, ReportRepo, TripRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ReportParams;
use crate::response::UserProfile;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// One member's settlement line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLine {
    pub user: UserProfile,
    pub amount_spent: f64,
    pub amount_paid: f64,
}

/// Response for `GET /group/get-group-report/{groupId}`.
///
/// Pagination counts memberships, so `total` can exceed the number of lines
/// when a member's user record has been deleted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupReport {
    pub data: Vec<ReportLine>,
    pub total_page: i64,
    pub total: i64,
    pub current_page: i64,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// GET /api/v1/group/get-group-report/{groupId}?startDate=&endDate=&page=&per_page=
///
/// Members are paginated first, then spent/paid sums are aggregated for the
/// page. The optional window selects activities by their creation time.
pub async fn group_report(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<GroupReport>> {
    let group_id = parse_positive_id(&raw_id, "groupId")?;
    let range = DateRange::parse(params.start_date.as_deref(), params.end_date.as_deref())?;
    let bounds = PageBounds::clamp(params.page, params.per_page);

    TripRepo::find_by_id(&state.pool, group_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Group",
            id: group_id,
        }))?;

    let total = MemberRepo::count(&state.pool, group_id).await?;
    if total == 0 {
        return Ok(Json(GroupReport {
            data: Vec::new(),
            total_page: 0,
            total: 0,
            current_page: bounds.page,
        }));
    }

    let page_user_ids =
        MemberRepo::user_ids_page(&state.pool, group_id, bounds.per_page, bounds.offset()).await?;

    let spent: Vec<LedgerEntry> = ReportRepo::sender_entries(&state.pool, group_id, &range)
        .await?
        .into_iter()
        .map(LedgerEntry::from)
        .collect();
    let paid: Vec<LedgerEntry> = ReportRepo::payer_entries(&state.pool, group_id, &range)
        .await?
        .into_iter()
        .map(LedgerEntry::from)
        .collect();

    let balances = settlement::aggregate_balances(&page_user_ids, &spent, &paid);

    let users = UserRepo::find_by_ids(&state.pool, &page_user_ids).await?;
    let profile_for = |user_id: DbId| {
        users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .map(UserProfile::from)
    };

    // Memberships whose user row no longer exists stay in `total` but
    // produce no line.
    let data = balances
        .into_iter()
        .filter_map(|balance| {
            profile_for(balance.user_id).map(|user| ReportLine {
                user,
                amount_spent: balance.amount_spent,
                amount_paid: balance.amount_paid,
            })
        })
        .collect();

    Ok(Json(GroupReport {
        data,
        total_page: bounds.total_pages(total),
        total,
        current_page: bounds.page,
    }))
}
