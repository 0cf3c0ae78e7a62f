//! Stored refresh token records.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::ids::{RefreshTokenId, UserId};

/// One session's renewal capability.
///
/// The token column is unique. Rotation rewrites `token` and `expires_at`
/// in place; logout deletes the row.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub id: RefreshTokenId,
    pub user_id: UserId,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// A token stays usable up to and including its expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
