//! Repository for the `trips` table.

use sqlx::{PgPool, Postgres, Transaction};
use tripkeep_core::types::DbId;

use crate::models::trip::{CreateTrip, Trip, UpdateGroupRequest, STATUS_DONE};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, group_chat_id, status, created_by, key_member_id, created_at, updated_at";

/// CRUD and lifecycle transitions for trips.
pub struct TripRepo;

impl TripRepo {
    /// Insert a new trip inside an open transaction, returning the row.
    pub async fn create_tx(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateTrip,
    ) -> Result<Trip, sqlx::Error> {
        let query = format!(
            "INSERT INTO trips (name, group_chat_id, created_by, key_member_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trip>(&query)
            .bind(&input.name)
            .bind(input.group_chat_id)
            .bind(input.created_by)
            .bind(input.key_member_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a trip by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Trip>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trips WHERE id = $1");
        sqlx::query_as::<_, Trip>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a trip inside an open transaction.
    ///
    /// Mutating handlers read the trip through their own transaction so the
    /// key-member check and the writes it guards see the same row.
    pub async fn find_by_id_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<Trip>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trips WHERE id = $1");
        sqlx::query_as::<_, Trip>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List trips, newest first, optionally keyword-filtered on name/status.
    pub async fn list(pool: &PgPool, keyword: Option<&str>) -> Result<Vec<Trip>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trips
             WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR status ILIKE '%' || $1 || '%')
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Trip>(&query)
            .bind(keyword)
            .fetch_all(pool)
            .await
    }

    /// Update a trip. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGroupRequest,
    ) -> Result<Option<Trip>, sqlx::Error> {
        let query = format!(
            "UPDATE trips SET
                name = COALESCE($2, name),
                group_chat_id = COALESCE($3, group_chat_id),
                status = COALESCE($4, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trip>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.group_chat_id)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Rename a trip. Returns `None` if no row with the given `id` exists.
    pub async fn rename(pool: &PgPool, id: DbId, name: &str) -> Result<Option<Trip>, sqlx::Error> {
        let query = format!(
            "UPDATE trips SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trip>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Mark a trip as done inside an open transaction.
    ///
    /// The caller checks existence and the current status through the same
    /// transaction first; this is the final write.
    pub async fn finish_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Trip, sqlx::Error> {
        let query = format!(
            "UPDATE trips SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trip>(&query)
            .bind(id)
            .bind(STATUS_DONE)
            .fetch_one(&mut **tx)
            .await
    }

    /// Permanently delete a trip. Child rows cascade. Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
