// src/models/payment.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A durable record of a payment attempt against an order total. The
/// simulated provider always succeeds, but the row is persisted regardless.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Payment {
  pub id: Uuid,
  pub user_id: Uuid,
  pub order_id: Uuid,
  pub amount_cents: i64,
  pub provider_ref: String,
  pub status: String,
  pub created_at: DateTime<Utc>,
}
