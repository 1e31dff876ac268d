// src/services/orders.rs

//! Order history, newest first, scoped to the requesting user.

use crate::errors::Result;
use crate::models::{Order, OrderItem};
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

/// An order together with its immutable line snapshots.
#[derive(Debug, serde::Serialize)]
pub struct OrderView {
  #[serde(flatten)]
  pub order: Order,
  pub items: Vec<OrderItem>,
}

#[instrument(name = "orders::history", skip(pool), fields(%user_id))]
pub async fn history(pool: &PgPool, user_id: Uuid) -> Result<Vec<OrderView>> {
  let orders: Vec<Order> = sqlx::query_as(
    "SELECT id, user_id, total_cents, created_at FROM orders \
     WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
  )
  .bind(user_id)
  .fetch_all(pool)
  .await?;

  if orders.is_empty() {
    return Ok(Vec::new());
  }

  // One query for all item rows instead of one per order.
  let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
  let items: Vec<OrderItem> = sqlx::query_as(
    "SELECT id, order_id, product_id, product_name, quantity, unit_price_cents \
     FROM order_items WHERE order_id = ANY($1)",
  )
  .bind(&order_ids)
  .fetch_all(pool)
  .await?;

  let mut by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
  for item in items {
    by_order.entry(item.order_id).or_default().push(item);
  }

  Ok(
    orders
      .into_iter()
      .map(|order| {
        let items = by_order.remove(&order.id).unwrap_or_default();
        OrderView { order, items }
      })
      .collect(),
  )
}
