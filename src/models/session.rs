// src/models/session.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A login session. The token travels in the `session` cookie (or as a
/// bearer token) and resolves to a user until `expires_at`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Session {
  #[serde(skip_serializing)]
  pub token: Uuid,
  pub user_id: Uuid,
  pub created_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
}
