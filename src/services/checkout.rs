// src/services/checkout.rs

//! The checkout engine: converts a cart into an order atomically.
//!
//! Everything — validation, order and snapshot inserts, stock decrements,
//! cart clearing and the payment record — happens inside one transaction.
//! Any failure rolls the whole unit back; a cart can never be half checked
//! out.

use crate::errors::{AppError, Result};
use crate::models::{Order, OrderItem, Payment};
use crate::services::cart::CartLine;
use crate::services::payment;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

/// One validated line of a prospective order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftLine {
  pub product_id: Uuid,
  pub product_name: String,
  pub quantity: i32,
  pub unit_price_cents: i32,
}

/// Validated totals and snapshot lines, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
  pub total_cents: i64,
  pub lines: Vec<DraftLine>,
}

#[derive(Debug, serde::Serialize)]
pub struct CheckoutReceipt {
  pub order: Order,
  pub items: Vec<OrderItem>,
  pub payment: Payment,
}

/// Validates the cart lines and computes the grand total from live prices.
/// Pure: all stock checks and arithmetic live here, so the write phase of
/// [`checkout`] only executes an already-validated plan.
pub fn draft_order(lines: &[CartLine]) -> Result<OrderDraft> {
  if lines.is_empty() {
    return Err(AppError::EmptyCart);
  }

  let mut total_cents: i64 = 0;
  let mut draft_lines = Vec::with_capacity(lines.len());
  for line in lines {
    if line.quantity > line.stock {
      return Err(AppError::InsufficientStock(line.product_name.clone()));
    }
    total_cents += i64::from(line.unit_price_cents) * i64::from(line.quantity);
    draft_lines.push(DraftLine {
      product_id: line.product_id,
      product_name: line.product_name.clone(),
      quantity: line.quantity,
      unit_price_cents: line.unit_price_cents,
    });
  }

  Ok(OrderDraft {
    total_cents,
    lines: draft_lines,
  })
}

/// Converts the user's cart into an order.
///
/// Within a single transaction:
/// 1. load the cart lines, locking the product rows;
/// 2. validate quantities against live stock and total up live prices;
/// 3. insert the order and its item snapshots;
/// 4. decrement stock (guarded, so a concurrent checkout cannot oversell);
/// 5. clear the cart's items (the cart row itself persists);
/// 6. capture the simulated payment and persist its record.
#[instrument(name = "checkout::checkout", skip(pool), fields(%user_id))]
pub async fn checkout(pool: &PgPool, user_id: Uuid) -> Result<CheckoutReceipt> {
  let mut tx = pool.begin().await?;

  let lines: Vec<CartLine> = sqlx::query_as(
    "SELECT ci.id AS item_id, ci.product_id, p.name AS product_name, \
       p.price_cents AS unit_price_cents, p.stock, ci.quantity \
     FROM cart_items ci \
     JOIN carts c ON c.id = ci.cart_id \
     JOIN products p ON p.id = ci.product_id \
     WHERE c.user_id = $1 \
     ORDER BY ci.added_at ASC, ci.id ASC \
     FOR UPDATE OF ci, p",
  )
  .bind(user_id)
  .fetch_all(&mut *tx)
  .await?;

  let draft = draft_order(&lines)?;

  let order: Order = sqlx::query_as(
    "INSERT INTO orders (id, user_id, total_cents) VALUES ($1, $2, $3) \
     RETURNING id, user_id, total_cents, created_at",
  )
  .bind(Uuid::new_v4())
  .bind(user_id)
  .bind(draft.total_cents)
  .fetch_one(&mut *tx)
  .await?;

  let mut items = Vec::with_capacity(draft.lines.len());
  for line in &draft.lines {
    let item: OrderItem = sqlx::query_as(
      "INSERT INTO order_items (id, order_id, product_id, product_name, quantity, unit_price_cents) \
       VALUES ($1, $2, $3, $4, $5, $6) \
       RETURNING id, order_id, product_id, product_name, quantity, unit_price_cents",
    )
    .bind(Uuid::new_v4())
    .bind(order.id)
    .bind(line.product_id)
    .bind(&line.product_name)
    .bind(line.quantity)
    .bind(line.unit_price_cents)
    .fetch_one(&mut *tx)
    .await?;
    items.push(item);

    // Guarded decrement: the WHERE clause refuses to take stock below zero
    // even if another transaction slipped in between load and update.
    let updated = sqlx::query("UPDATE products SET stock = stock - $1 WHERE id = $2 AND stock >= $1")
      .bind(line.quantity)
      .bind(line.product_id)
      .execute(&mut *tx)
      .await?;
    if updated.rows_affected() != 1 {
      return Err(AppError::InsufficientStock(line.product_name.clone()));
    }
  }

  sqlx::query("DELETE FROM cart_items ci USING carts c WHERE ci.cart_id = c.id AND c.user_id = $1")
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

  let receipt = payment::capture(user_id, order.id, draft.total_cents).await?;
  let payment: Payment = sqlx::query_as(
    "INSERT INTO payments (id, user_id, order_id, amount_cents, provider_ref, status) \
     VALUES ($1, $2, $3, $4, $5, $6) \
     RETURNING id, user_id, order_id, amount_cents, provider_ref, status, created_at",
  )
  .bind(Uuid::new_v4())
  .bind(user_id)
  .bind(order.id)
  .bind(receipt.amount_cents)
  .bind(&receipt.provider_ref)
  .bind(receipt.status)
  .fetch_one(&mut *tx)
  .await?;

  tx.commit().await?;

  info!(
    order_id = %order.id,
    total_cents = order.total_cents,
    line_count = items.len(),
    "Checkout committed."
  );
  Ok(CheckoutReceipt { order, items, payment })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cart_line(name: &str, price_cents: i32, quantity: i32, stock: i32) -> CartLine {
    CartLine {
      item_id: Uuid::new_v4(),
      product_id: Uuid::new_v4(),
      product_name: name.to_string(),
      unit_price_cents: price_cents,
      stock,
      quantity,
    }
  }

  #[test]
  fn empty_cart_cannot_be_drafted() {
    assert!(matches!(draft_order(&[]), Err(AppError::EmptyCart)));
  }

  #[test]
  fn draft_totals_and_snapshots_match_the_cart() {
    // Cart {A qty 2 @ $10, B qty 1 @ $5} -> total $25.00.
    let lines = vec![cart_line("Product A", 1_000, 2, 10), cart_line("Product B", 500, 1, 10)];
    let draft = draft_order(&lines).unwrap();

    assert_eq!(draft.total_cents, 2_500);
    assert_eq!(draft.lines.len(), 2);
    assert_eq!(draft.lines[0].product_name, "Product A");
    assert_eq!(draft.lines[0].quantity, 2);
    assert_eq!(draft.lines[0].unit_price_cents, 1_000);
    assert_eq!(draft.lines[1].product_name, "Product B");
    assert_eq!(draft.lines[1].quantity, 1);
    assert_eq!(draft.lines[1].unit_price_cents, 500);
  }

  #[test]
  fn one_over_stock_line_aborts_the_whole_draft() {
    let lines = vec![
      cart_line("Plenty", 1_000, 1, 10),
      cart_line("Scarce", 2_000, 5, 3),
      cart_line("Also Fine", 500, 2, 10),
    ];
    match draft_order(&lines) {
      Err(AppError::InsufficientStock(name)) => assert_eq!(name, "Scarce"),
      other => panic!("expected InsufficientStock, got {:?}", other.map(|d| d.total_cents)),
    }
  }

  #[test]
  fn quantity_exactly_at_stock_is_allowed() {
    let lines = vec![cart_line("Last Units", 750, 4, 4)];
    let draft = draft_order(&lines).unwrap();
    assert_eq!(draft.total_cents, 3_000);
  }
}
