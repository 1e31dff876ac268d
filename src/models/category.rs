// src/models/category.rs

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Product grouping (Electronics, Books, ...). Names are unique.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
  pub id: Uuid,
  pub name: String,
}
