//! Shared response types for API handlers.
//!
//! List endpoints use a `{ "data": ... }` envelope via [`DataResponse`];
//! [`UserProfile`] is the user-directory decoration embedded in group
//! detail, activity detail, and report responses. All response DTOs
//! serialize camelCase with `YYYY-MM-DDTHH:MM:SS` timestamps.

use serde::Serialize;
use tripkeep_core::datetime::format_response;
use tripkeep_core::types::DbId;
use tripkeep_db::models::user::User;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Public profile fields of a user, as embedded in ledger responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: DbId,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub is_online: bool,
    pub last_online_at: Option<String>,
    pub created_at: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            avatar: user.avatar,
            is_online: user.is_online,
            last_online_at: user.last_online_at.as_ref().map(format_response),
            created_at: format_response(&user.created_at),
        }
    }
}
