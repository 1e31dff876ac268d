// src/models/product.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A purchasable product. `stock` is decremented only by checkout, never by
/// cart mutation. Product names are unique within a category.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
  pub id: Uuid,
  pub category_id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub price_cents: i32,
  pub stock: i32,
  pub created_at: DateTime<Utc>,
}
