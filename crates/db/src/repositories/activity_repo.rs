//! Repository for the `activities` table and its payer/sender child rows.

use sqlx::{PgPool, Postgres, Transaction};
use tripkeep_core::datetime::DateRange;
use tripkeep_core::types::DbId;

use crate::models::activity::{
    Activity, ActivityPatch, NewActivity, ParticipantDetail, PayerInput, SenderInput,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, trip_id, name, total_amount, is_balance, note, created_by, created_at, updated_at";

/// Spending activities with their payer/sender fan-out.
///
/// All mutations run against an open transaction: an activity and its child
/// rows are only ever written or replaced together.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert a new activity row.
    pub async fn create_tx(
        tx: &mut Transaction<'_, Postgres>,
        input: &NewActivity,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (trip_id, name, total_amount, is_balance, note, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(input.trip_id)
            .bind(&input.name)
            .bind(input.total_amount)
            .bind(input.is_balance)
            .bind(&input.note)
            .bind(input.created_by)
            .fetch_one(&mut **tx)
            .await
    }

    /// Apply a patch to an existing activity row.
    ///
    /// The caller verifies existence through the same transaction first.
    pub async fn update_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        input: &ActivityPatch,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "UPDATE activities SET
                name = $2,
                total_amount = $3,
                is_balance = $4,
                note = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.total_amount)
            .bind(input.is_balance)
            .bind(&input.note)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find an activity by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE id = $1");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an activity inside an open transaction.
    pub async fn find_by_id_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE id = $1");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find an activity only if it belongs to the given trip.
    pub async fn find_in_trip_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        trip_id: DbId,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE id = $1 AND trip_id = $2");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .bind(trip_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List a trip's activities, oldest first.
    pub async fn list_for_trip(pool: &PgPool, trip_id: DbId) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE trip_id = $1 ORDER BY id");
        sqlx::query_as::<_, Activity>(&query)
            .bind(trip_id)
            .fetch_all(pool)
            .await
    }

    /// Insert the payer rows for an activity.
    pub async fn insert_payers_tx(
        tx: &mut Transaction<'_, Postgres>,
        activity_id: DbId,
        payers: &[PayerInput],
    ) -> Result<(), sqlx::Error> {
        for payer in payers {
            sqlx::query(
                "INSERT INTO activity_payers (activity_id, user_id, payment_amount)
                 VALUES ($1, $2, $3)",
            )
            .bind(activity_id)
            .bind(payer.user_id)
            .bind(payer.payment_amount)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    /// Insert the sender rows for an activity. `is_balance` is inherited
    /// from the parent activity.
    pub async fn insert_senders_tx(
        tx: &mut Transaction<'_, Postgres>,
        activity_id: DbId,
        senders: &[SenderInput],
        is_balance: bool,
    ) -> Result<(), sqlx::Error> {
        for sender in senders {
            sqlx::query(
                "INSERT INTO activity_senders (activity_id, user_id, amount, is_balance)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(activity_id)
            .bind(sender.user_id)
            .bind(sender.amount)
            .bind(is_balance)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    /// Delete every payer row of an activity.
    pub async fn delete_payers_tx(
        tx: &mut Transaction<'_, Postgres>,
        activity_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activity_payers WHERE activity_id = $1")
            .bind(activity_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete every sender row of an activity.
    pub async fn delete_senders_tx(
        tx: &mut Transaction<'_, Postgres>,
        activity_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activity_senders WHERE activity_id = $1")
            .bind(activity_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Whether a user already has a sender row on an activity.
    pub async fn sender_exists_tx(
        tx: &mut Transaction<'_, Postgres>,
        activity_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM activity_senders WHERE activity_id = $1 AND user_id = $2 LIMIT 1",
        )
        .bind(activity_id)
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(found.is_some())
    }

    /// Insert a single sender row (retroactive add-member attachment).
    pub async fn insert_sender_tx(
        tx: &mut Transaction<'_, Postgres>,
        activity_id: DbId,
        user_id: DbId,
        amount: f64,
        is_balance: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO activity_senders (activity_id, user_id, amount, is_balance)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(activity_id)
        .bind(user_id)
        .bind(amount)
        .bind(is_balance)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// An activity's payer rows joined with user names, optionally windowed
    /// by the rows' own created_at (inclusive bounds).
    pub async fn payer_details(
        pool: &PgPool,
        activity_id: DbId,
        range: &DateRange,
    ) -> Result<Vec<ParticipantDetail>, sqlx::Error> {
        sqlx::query_as::<_, ParticipantDetail>(
            "SELECT ap.id, ap.activity_id, ap.user_id, u.full_name AS user_name,
                    ap.payment_amount AS amount, ap.created_at
             FROM activity_payers ap
             LEFT JOIN users u ON u.id = ap.user_id
             WHERE ap.activity_id = $1
               AND ($2::timestamptz IS NULL OR ap.created_at >= $2)
               AND ($3::timestamptz IS NULL OR ap.created_at <= $3)
             ORDER BY ap.id",
        )
        .bind(activity_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(pool)
        .await
    }

    /// An activity's sender rows joined with user names, windowed the same
    /// way as [`Self::payer_details`].
    pub async fn sender_details(
        pool: &PgPool,
        activity_id: DbId,
        range: &DateRange,
    ) -> Result<Vec<ParticipantDetail>, sqlx::Error> {
        sqlx::query_as::<_, ParticipantDetail>(
            "SELECT s.id, s.activity_id, s.user_id, u.full_name AS user_name,
                    s.amount, s.created_at
             FROM activity_senders s
             LEFT JOIN users u ON u.id = s.user_id
             WHERE s.activity_id = $1
               AND ($2::timestamptz IS NULL OR s.created_at >= $2)
               AND ($3::timestamptz IS NULL OR s.created_at <= $3)
             ORDER BY s.id",
        )
        .bind(activity_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(pool)
        .await
    }
}
