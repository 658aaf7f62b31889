//! Repository for the `users` table (the ledger's slice of the directory).

use sqlx::{PgPool, Postgres, Transaction};
use tripkeep_core::types::DbId;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, email, phone, avatar, is_online, last_online_at, \
                       is_temporary, created_at, updated_at";

/// Lookups and temporary-user creation against the user directory.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by internal ID inside an open transaction.
    pub async fn find_by_id_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find the oldest user with the given display name.
    pub async fn find_by_full_name_tx(
        tx: &mut Transaction<'_, Postgres>,
        full_name: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE full_name = $1 ORDER BY id LIMIT 1");
        sqlx::query_as::<_, User>(&query)
            .bind(full_name)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch all users whose IDs are in `ids` (order unspecified).
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ANY($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Return the subset of `ids` that does not exist in the directory,
    /// preserving the caller's order.
    pub async fn missing_ids_tx(
        tx: &mut Transaction<'_, Postgres>,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let present: Vec<DbId> = sqlx::query_scalar("SELECT id FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&mut **tx)
            .await?;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !present.contains(id))
            .collect())
    }

    /// Insert a temporary placeholder user known only by display name.
    pub async fn create_temporary_tx(
        tx: &mut Transaction<'_, Postgres>,
        full_name: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (full_name, is_temporary) VALUES ($1, TRUE) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(full_name)
            .fetch_one(&mut **tx)
            .await
    }
}
