//! Ledger rows feeding the settlement report.
//!
//! The report windows by the parent activity's created_at (which activities
//! count), unlike the activity detail view, which windows child rows by
//! their own timestamps.

use sqlx::PgPool;
use tripkeep_core::datetime::DateRange;
use tripkeep_core::types::DbId;

use crate::models::report::LedgerEntryRow;

/// Read-side queries for the settlement report.
pub struct ReportRepo;

impl ReportRepo {
    /// All sender (user, amount) rows across a trip's activities created
    /// within the window.
    pub async fn sender_entries(
        pool: &PgPool,
        trip_id: DbId,
        range: &DateRange,
    ) -> Result<Vec<LedgerEntryRow>, sqlx::Error> {
        sqlx::query_as::<_, LedgerEntryRow>(
            "SELECT s.user_id, s.amount
             FROM activity_senders s
             JOIN activities a ON a.id = s.activity_id
             WHERE a.trip_id = $1
               AND ($2::timestamptz IS NULL OR a.created_at >= $2)
               AND ($3::timestamptz IS NULL OR a.created_at <= $3)",
        )
        .bind(trip_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(pool)
        .await
    }

    /// All payer (user, payment_amount) rows across the same activity set.
    pub async fn payer_entries(
        pool: &PgPool,
        trip_id: DbId,
        range: &DateRange,
    ) -> Result<Vec<LedgerEntryRow>, sqlx::Error> {
        sqlx::query_as::<_, LedgerEntryRow>(
            "SELECT p.user_id, p.payment_amount AS amount
             FROM activity_payers p
             JOIN activities a ON a.id = p.activity_id
             WHERE a.trip_id = $1
               AND ($2::timestamptz IS NULL OR a.created_at >= $2)
               AND ($3::timestamptz IS NULL OR a.created_at <= $3)",
        )
        .bind(trip_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(pool)
        .await
    }
}
