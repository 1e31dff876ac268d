// src/services/cart.rs

//! Cart management: add/remove lines, quantity changes, and the fully-loaded
//! cart view. Stock is never mutated here; only checkout touches it.

use crate::errors::{AppError, Result};
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

/// A cart line joined with its product, as both the cart view and the
/// checkout engine consume it. `stock` and `unit_price_cents` are live
/// values, read in the same query as the quantity.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct CartLine {
  pub item_id: Uuid,
  pub product_id: Uuid,
  pub product_name: String,
  pub unit_price_cents: i32,
  pub stock: i32,
  pub quantity: i32,
}

#[derive(Debug, serde::Serialize)]
pub struct CartView {
  pub items: Vec<CartLine>,
  pub total_cents: i64,
}

/// Outcome of an add-to-cart request. Hitting the stock cap is a partial
/// success, not an error: the existing quantity is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
  Added { product_name: String },
  QuantityUpdated { product_name: String, quantity: i32 },
  StockLimitReached { product_name: String },
}

const CART_LINES_SQL: &str = "SELECT ci.id AS item_id, ci.product_id, p.name AS product_name, \
   p.price_cents AS unit_price_cents, p.stock, ci.quantity \
   FROM cart_items ci \
   JOIN carts c ON c.id = ci.cart_id \
   JOIN products p ON p.id = ci.product_id \
   WHERE c.user_id = $1 \
   ORDER BY ci.added_at ASC, ci.id ASC";

/// Sum of live price x quantity over the given lines.
pub fn cart_total(lines: &[CartLine]) -> i64 {
  lines
    .iter()
    .map(|line| i64::from(line.unit_price_cents) * i64::from(line.quantity))
    .sum()
}

/// The user's cart with a freshly computed total. An absent or empty cart
/// yields an empty view with total 0.
#[instrument(name = "cart::view", skip(pool), fields(%user_id))]
pub async fn view(pool: &PgPool, user_id: Uuid) -> Result<CartView> {
  let lines: Vec<CartLine> = sqlx::query_as(CART_LINES_SQL).bind(user_id).fetch_all(pool).await?;
  Ok(CartView {
    total_cents: cart_total(&lines),
    items: lines,
  })
}

/// Total quantity across the user's cart, for the badge.
pub async fn badge_count(pool: &PgPool, user_id: Uuid) -> Result<i64> {
  let count: i64 = sqlx::query_scalar(
    "SELECT COALESCE(SUM(ci.quantity), 0)::BIGINT \
     FROM cart_items ci JOIN carts c ON c.id = ci.cart_id \
     WHERE c.user_id = $1",
  )
  .bind(user_id)
  .fetch_one(pool)
  .await?;
  Ok(count)
}

/// Adds one unit of a product to the user's cart, creating the cart on
/// first use. An existing line accumulates quantity, capped at the
/// product's stock.
#[instrument(name = "cart::add_item", skip(pool), fields(%user_id, %product_id))]
pub async fn add_item(pool: &PgPool, user_id: Uuid, product_id: Uuid) -> Result<AddOutcome> {
  let mut tx = pool.begin().await?;

  let product: Option<(String, i32)> = sqlx::query_as("SELECT name, stock FROM products WHERE id = $1")
    .bind(product_id)
    .fetch_optional(&mut *tx)
    .await?;
  let (product_name, stock) = product.ok_or_else(|| AppError::NotFound(format!("Product {} not found.", product_id)))?;

  if stock < 1 {
    return Err(AppError::OutOfStock(product_name));
  }

  let cart_id = ensure_cart(&mut tx, user_id).await?;

  let existing: Option<(Uuid, i32)> =
    sqlx::query_as("SELECT id, quantity FROM cart_items WHERE cart_id = $1 AND product_id = $2")
      .bind(cart_id)
      .bind(product_id)
      .fetch_optional(&mut *tx)
      .await?;

  let outcome = match existing {
    Some((_, quantity)) if quantity >= stock => AddOutcome::StockLimitReached { product_name },
    Some((item_id, quantity)) => {
      sqlx::query("UPDATE cart_items SET quantity = quantity + 1 WHERE id = $1")
        .bind(item_id)
        .execute(&mut *tx)
        .await?;
      AddOutcome::QuantityUpdated {
        product_name,
        quantity: quantity + 1,
      }
    }
    None => {
      sqlx::query("INSERT INTO cart_items (id, cart_id, product_id, quantity) VALUES ($1, $2, $3, 1)")
        .bind(Uuid::new_v4())
        .bind(cart_id)
        .bind(product_id)
        .execute(&mut *tx)
        .await?;
      AddOutcome::Added { product_name }
    }
  };

  tx.commit().await?;
  debug!(?outcome, "Cart add completed.");
  Ok(outcome)
}

/// Removes a cart line after checking it belongs to the requesting user.
/// Returns the removed product's name for the notice text.
#[instrument(name = "cart::remove_item", skip(pool), fields(%user_id, %item_id))]
pub async fn remove_item(pool: &PgPool, user_id: Uuid, item_id: Uuid) -> Result<String> {
  let (owner_id, product_name) = load_item_owner(pool, item_id).await?;
  if owner_id != user_id {
    return Err(AppError::Unauthorized("This cart item belongs to another user.".to_string()));
  }

  sqlx::query("DELETE FROM cart_items WHERE id = $1")
    .bind(item_id)
    .execute(pool)
    .await?;
  Ok(product_name)
}

/// +1 on a cart line, silently capped at the product's stock.
#[instrument(name = "cart::increase_quantity", skip(pool), fields(%user_id, %item_id))]
pub async fn increase_quantity(pool: &PgPool, user_id: Uuid, item_id: Uuid) -> Result<()> {
  let (owner_id, _) = load_item_owner(pool, item_id).await?;
  if owner_id != user_id {
    return Err(AppError::Unauthorized("This cart item belongs to another user.".to_string()));
  }

  // No-op when already at the stock cap.
  sqlx::query(
    "UPDATE cart_items ci SET quantity = ci.quantity + 1 \
     FROM products p WHERE ci.id = $1 AND p.id = ci.product_id AND ci.quantity < p.stock",
  )
  .bind(item_id)
  .execute(pool)
  .await?;
  Ok(())
}

/// -1 on a cart line; the row is deleted instead of persisting quantity 0.
#[instrument(name = "cart::decrease_quantity", skip(pool), fields(%user_id, %item_id))]
pub async fn decrease_quantity(pool: &PgPool, user_id: Uuid, item_id: Uuid) -> Result<()> {
  let (owner_id, _) = load_item_owner(pool, item_id).await?;
  if owner_id != user_id {
    return Err(AppError::Unauthorized("This cart item belongs to another user.".to_string()));
  }

  let mut tx = pool.begin().await?;
  let quantity: Option<i32> = sqlx::query_scalar("SELECT quantity FROM cart_items WHERE id = $1 FOR UPDATE")
    .bind(item_id)
    .fetch_optional(&mut *tx)
    .await?;
  let quantity = match quantity {
    Some(quantity) => quantity,
    // Deleted by a concurrent request; nothing left to decrement.
    None => return Ok(()),
  };

  if quantity > 1 {
    sqlx::query("UPDATE cart_items SET quantity = quantity - 1 WHERE id = $1")
      .bind(item_id)
      .execute(&mut *tx)
      .await?;
  } else {
    sqlx::query("DELETE FROM cart_items WHERE id = $1")
      .bind(item_id)
      .execute(&mut *tx)
      .await?;
  }
  tx.commit().await?;
  Ok(())
}

async fn ensure_cart(tx: &mut sqlx::Transaction<'_, sqlx::Postgres>, user_id: Uuid) -> Result<Uuid> {
  if let Some(cart_id) = sqlx::query_scalar("SELECT id FROM carts WHERE user_id = $1")
    .bind(user_id)
    .fetch_optional(&mut **tx)
    .await?
  {
    return Ok(cart_id);
  }

  // A concurrent request may create the cart between the select and the
  // insert; the unique constraint makes the insert a no-op and the
  // re-select picks up the winner.
  sqlx::query("INSERT INTO carts (id, user_id) VALUES ($1, $2) ON CONFLICT (user_id) DO NOTHING")
    .bind(Uuid::new_v4())
    .bind(user_id)
    .execute(&mut **tx)
    .await?;

  let cart_id = sqlx::query_scalar("SELECT id FROM carts WHERE user_id = $1")
    .bind(user_id)
    .fetch_one(&mut **tx)
    .await?;
  Ok(cart_id)
}

async fn load_item_owner(pool: &PgPool, item_id: Uuid) -> Result<(Uuid, String)> {
  let row: Option<(Uuid, String)> = sqlx::query_as(
    "SELECT c.user_id, p.name \
     FROM cart_items ci \
     JOIN carts c ON c.id = ci.cart_id \
     JOIN products p ON p.id = ci.product_id \
     WHERE ci.id = $1",
  )
  .bind(item_id)
  .fetch_optional(pool)
  .await?;
  row.ok_or_else(|| AppError::NotFound(format!("Cart item {} not found.", item_id)))
}
