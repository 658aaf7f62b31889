//! Repository for the `trip_members` table.

use sqlx::{PgPool, Postgres, Transaction};
use tripkeep_core::types::DbId;

use crate::models::member::{MemberAvatar, MemberWithUser, TripMember};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, trip_id, user_id, advance, created_at";

/// Membership rows and per-member advances.
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a membership row with no advance yet.
    ///
    /// The `uq_trip_members_trip_user` constraint backstops duplicate
    /// membership if two requests race past the handler's existence check.
    pub async fn add_tx(
        tx: &mut Transaction<'_, Postgres>,
        trip_id: DbId,
        user_id: DbId,
    ) -> Result<TripMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO trip_members (trip_id, user_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TripMember>(&query)
            .bind(trip_id)
            .bind(user_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find the membership row for a (trip, user) pair.
    pub async fn find_tx(
        tx: &mut Transaction<'_, Postgres>,
        trip_id: DbId,
        user_id: DbId,
    ) -> Result<Option<TripMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trip_members WHERE trip_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, TripMember>(&query)
            .bind(trip_id)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List a trip's members joined with their user display fields, in
    /// join order (oldest membership first).
    pub async fn list_with_users(
        pool: &PgPool,
        trip_id: DbId,
    ) -> Result<Vec<MemberWithUser>, sqlx::Error> {
        sqlx::query_as::<_, MemberWithUser>(
            "SELECT tm.user_id, u.full_name, u.avatar, tm.advance
             FROM trip_members tm
             LEFT JOIN users u ON u.id = tm.user_id
             WHERE tm.trip_id = $1
             ORDER BY tm.id",
        )
        .bind(trip_id)
        .fetch_all(pool)
        .await
    }

    /// Fetch the member avatars for a set of trips in one round trip,
    /// for the listing's avatar strip.
    pub async fn member_avatars(
        pool: &PgPool,
        trip_ids: &[DbId],
    ) -> Result<Vec<MemberAvatar>, sqlx::Error> {
        if trip_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, MemberAvatar>(
            "SELECT tm.trip_id, u.avatar
             FROM trip_members tm
             LEFT JOIN users u ON u.id = tm.user_id
             WHERE tm.trip_id = ANY($1)
             ORDER BY tm.trip_id, tm.id",
        )
        .bind(trip_ids)
        .fetch_all(pool)
        .await
    }

    /// Set one member's advance. Returns `false` when the (trip, user)
    /// pair has no membership row.
    pub async fn update_advance_tx(
        tx: &mut Transaction<'_, Postgres>,
        trip_id: DbId,
        user_id: DbId,
        advance: f64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE trip_members SET advance = $3 WHERE trip_id = $1 AND user_id = $2",
        )
        .bind(trip_id)
        .bind(user_id)
        .bind(advance)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count a trip's members.
    pub async fn count(pool: &PgPool, trip_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM trip_members WHERE trip_id = $1")
            .bind(trip_id)
            .fetch_one(pool)
            .await
    }

    /// One page of a trip's member user IDs, oldest membership first.
    pub async fn user_ids_page(
        pool: &PgPool,
        trip_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM trip_members WHERE trip_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
        )
        .bind(trip_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}
