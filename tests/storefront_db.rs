// tests/storefront_db.rs

//! End-to-end properties of the cart/checkout/inventory flow, run against a
//! real PostgreSQL instance.
//!
//! Ignored by default so the suite passes on machines without a database;
//! point `DATABASE_URL` at a disposable Postgres and run:
//!
//! ```sh
//! cargo test -- --ignored
//! ```

use sqlx::PgPool;
use storefront::errors::AppError;
use storefront::services::cart::{self, AddOutcome};
use storefront::services::{checkout, orders};
use uuid::Uuid;

async fn insert_user(pool: &PgPool, email: &str) -> Uuid {
  let id = Uuid::new_v4();
  sqlx::query("INSERT INTO users (id, email, password_hash, display_name) VALUES ($1, $2, 'x', 'Test User')")
    .bind(id)
    .bind(email)
    .execute(pool)
    .await
    .unwrap();
  id
}

async fn insert_product(pool: &PgPool, name: &str, price_cents: i32, stock: i32) -> Uuid {
  let category_id: Option<Uuid> = sqlx::query_scalar("SELECT id FROM categories LIMIT 1")
    .fetch_optional(pool)
    .await
    .unwrap();
  let category_id = match category_id {
    Some(id) => id,
    None => {
      let id = Uuid::new_v4();
      sqlx::query("INSERT INTO categories (id, name) VALUES ($1, 'Test Category')")
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
      id
    }
  };

  let id = Uuid::new_v4();
  sqlx::query("INSERT INTO products (id, category_id, name, price_cents, stock) VALUES ($1, $2, $3, $4, $5)")
    .bind(id)
    .bind(category_id)
    .bind(name)
    .bind(price_cents)
    .bind(stock)
    .execute(pool)
    .await
    .unwrap();
  id
}

/// Arranges a cart with the given lines directly, bypassing the add-item cap
/// so tests can stage quantities beyond stock.
async fn insert_cart_with_lines(pool: &PgPool, user_id: Uuid, lines: &[(Uuid, i32)]) {
  let cart_id = Uuid::new_v4();
  sqlx::query("INSERT INTO carts (id, user_id) VALUES ($1, $2)")
    .bind(cart_id)
    .bind(user_id)
    .execute(pool)
    .await
    .unwrap();
  for (product_id, quantity) in lines {
    sqlx::query("INSERT INTO cart_items (id, cart_id, product_id, quantity) VALUES ($1, $2, $3, $4)")
      .bind(Uuid::new_v4())
      .bind(cart_id)
      .bind(product_id)
      .bind(quantity)
      .execute(pool)
      .await
      .unwrap();
  }
}

async fn product_stock(pool: &PgPool, product_id: Uuid) -> i32 {
  sqlx::query_scalar("SELECT stock FROM products WHERE id = $1")
    .bind(product_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn count(pool: &PgPool, sql: &str) -> i64 {
  sqlx::query_scalar(sql).fetch_one(pool).await.unwrap()
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at a disposable Postgres"]
async fn checkout_converts_the_cart_atomically(pool: PgPool) {
  let user_id = insert_user(&pool, "alice@example.com").await;
  let product_a = insert_product(&pool, "Product A", 1_000, 10).await;
  let product_b = insert_product(&pool, "Product B", 500, 8).await;
  insert_cart_with_lines(&pool, user_id, &[(product_a, 2), (product_b, 1)]).await;

  let receipt = checkout::checkout(&pool, user_id).await.unwrap();

  // {A qty 2 @ $10, B qty 1 @ $5} -> $25.00
  assert_eq!(receipt.order.total_cents, 2_500);
  assert_eq!(receipt.items.len(), 2);
  let a = receipt.items.iter().find(|i| i.product_id == product_a).unwrap();
  assert_eq!((a.quantity, a.unit_price_cents), (2, 1_000));
  let b = receipt.items.iter().find(|i| i.product_id == product_b).unwrap();
  assert_eq!((b.quantity, b.unit_price_cents), (1, 500));

  // Stock decremented by exactly the ordered quantities.
  assert_eq!(product_stock(&pool, product_a).await, 8);
  assert_eq!(product_stock(&pool, product_b).await, 7);

  // Cart is empty, but the cart row survives.
  let view = cart::view(&pool, user_id).await.unwrap();
  assert!(view.items.is_empty());
  assert_eq!(view.total_cents, 0);
  assert_eq!(count(&pool, "SELECT COUNT(*) FROM carts").await, 1);

  // Durable payment record for the grand total.
  assert_eq!(receipt.payment.amount_cents, 2_500);
  assert_eq!(receipt.payment.status, "success");
  assert_eq!(count(&pool, "SELECT COUNT(*) FROM payments").await, 1);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at a disposable Postgres"]
async fn order_snapshots_survive_price_edits(pool: PgPool) {
  let user_id = insert_user(&pool, "alice@example.com").await;
  let product_id = insert_product(&pool, "Novel Book", 1_999, 20).await;
  insert_cart_with_lines(&pool, user_id, &[(product_id, 3)]).await;

  checkout::checkout(&pool, user_id).await.unwrap();

  sqlx::query("UPDATE products SET price_cents = 9999 WHERE id = $1")
    .bind(product_id)
    .execute(&pool)
    .await
    .unwrap();

  let history = orders::history(&pool, user_id).await.unwrap();
  assert_eq!(history.len(), 1);
  assert_eq!(history[0].order.total_cents, 3 * 1_999);
  assert_eq!(history[0].items[0].unit_price_cents, 1_999);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at a disposable Postgres"]
async fn repeated_adds_accumulate_in_one_row_capped_at_stock(pool: PgPool) {
  let user_id = insert_user(&pool, "alice@example.com").await;
  let product_id = insert_product(&pool, "Scarce", 1_000, 2).await;

  let first = cart::add_item(&pool, user_id, product_id).await.unwrap();
  assert!(matches!(first, AddOutcome::Added { .. }));

  let second = cart::add_item(&pool, user_id, product_id).await.unwrap();
  assert!(matches!(second, AddOutcome::QuantityUpdated { quantity: 2, .. }));

  // At the cap: quantity is preserved, not increased.
  let third = cart::add_item(&pool, user_id, product_id).await.unwrap();
  assert!(matches!(third, AddOutcome::StockLimitReached { .. }));

  assert_eq!(count(&pool, "SELECT COUNT(*) FROM cart_items").await, 1);
  let view = cart::view(&pool, user_id).await.unwrap();
  assert_eq!(view.items[0].quantity, 2);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at a disposable Postgres"]
async fn over_stock_checkout_writes_nothing(pool: PgPool) {
  let user_id = insert_user(&pool, "alice@example.com").await;
  let fine = insert_product(&pool, "Fine", 1_000, 10).await;
  let scarce = insert_product(&pool, "Scarce", 2_000, 3).await;
  insert_cart_with_lines(&pool, user_id, &[(fine, 1), (scarce, 5)]).await;

  match checkout::checkout(&pool, user_id).await {
    Err(AppError::InsufficientStock(name)) => assert_eq!(name, "Scarce"),
    other => panic!("expected InsufficientStock, got {:?}", other.is_ok()),
  }

  // No order, no snapshots, no payment, no stock mutation, cart untouched.
  assert_eq!(count(&pool, "SELECT COUNT(*) FROM orders").await, 0);
  assert_eq!(count(&pool, "SELECT COUNT(*) FROM order_items").await, 0);
  assert_eq!(count(&pool, "SELECT COUNT(*) FROM payments").await, 0);
  assert_eq!(product_stock(&pool, fine).await, 10);
  assert_eq!(product_stock(&pool, scarce).await, 3);
  assert_eq!(count(&pool, "SELECT COUNT(*) FROM cart_items").await, 2);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at a disposable Postgres"]
async fn adding_an_out_of_stock_product_fails(pool: PgPool) {
  let user_id = insert_user(&pool, "alice@example.com").await;
  let product_id = insert_product(&pool, "Product C", 1_000, 0).await;

  match cart::add_item(&pool, user_id, product_id).await {
    Err(AppError::OutOfStock(name)) => assert_eq!(name, "Product C"),
    other => panic!("expected OutOfStock, got {:?}", other.is_ok()),
  }
  assert_eq!(count(&pool, "SELECT COUNT(*) FROM cart_items").await, 0);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at a disposable Postgres"]
async fn checkout_of_an_empty_or_absent_cart_is_rejected(pool: PgPool) {
  let user_id = insert_user(&pool, "alice@example.com").await;

  // No cart at all.
  assert!(matches!(checkout::checkout(&pool, user_id).await, Err(AppError::EmptyCart)));

  // A cart with zero items.
  insert_cart_with_lines(&pool, user_id, &[]).await;
  assert!(matches!(checkout::checkout(&pool, user_id).await, Err(AppError::EmptyCart)));
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at a disposable Postgres"]
async fn cart_items_cannot_be_touched_across_users(pool: PgPool) {
  let alice = insert_user(&pool, "alice@example.com").await;
  let mallory = insert_user(&pool, "mallory@example.com").await;
  let product_id = insert_product(&pool, "Widget", 1_000, 5).await;

  cart::add_item(&pool, alice, product_id).await.unwrap();
  let view = cart::view(&pool, alice).await.unwrap();
  let item_id = view.items[0].item_id;

  assert!(matches!(
    cart::remove_item(&pool, mallory, item_id).await,
    Err(AppError::Unauthorized(_))
  ));
  assert!(matches!(
    cart::increase_quantity(&pool, mallory, item_id).await,
    Err(AppError::Unauthorized(_))
  ));
  assert_eq!(count(&pool, "SELECT COUNT(*) FROM cart_items").await, 1);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at a disposable Postgres"]
async fn quantity_changes_cap_at_stock_and_delete_at_zero(pool: PgPool) {
  let user_id = insert_user(&pool, "alice@example.com").await;
  let product_id = insert_product(&pool, "Widget", 1_000, 2).await;

  cart::add_item(&pool, user_id, product_id).await.unwrap();
  let item_id = cart::view(&pool, user_id).await.unwrap().items[0].item_id;

  // 1 -> 2, then a no-op at the cap.
  cart::increase_quantity(&pool, user_id, item_id).await.unwrap();
  cart::increase_quantity(&pool, user_id, item_id).await.unwrap();
  assert_eq!(cart::view(&pool, user_id).await.unwrap().items[0].quantity, 2);

  // 2 -> 1 -> row deleted instead of a zero-quantity line.
  cart::decrease_quantity(&pool, user_id, item_id).await.unwrap();
  cart::decrease_quantity(&pool, user_id, item_id).await.unwrap();
  assert!(cart::view(&pool, user_id).await.unwrap().items.is_empty());
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at a disposable Postgres"]
async fn order_history_is_newest_first_and_per_user(pool: PgPool) {
  let alice = insert_user(&pool, "alice@example.com").await;
  let bob = insert_user(&pool, "bob@example.com").await;
  let product_id = insert_product(&pool, "Widget", 1_000, 50).await;

  insert_cart_with_lines(&pool, alice, &[(product_id, 1)]).await;
  let first = checkout::checkout(&pool, alice).await.unwrap();

  sqlx::query("INSERT INTO cart_items (id, cart_id, product_id, quantity) SELECT $1, c.id, $2, 2 FROM carts c WHERE c.user_id = $3")
    .bind(Uuid::new_v4())
    .bind(product_id)
    .bind(alice)
    .execute(&pool)
    .await
    .unwrap();
  let second = checkout::checkout(&pool, alice).await.unwrap();

  let history = orders::history(&pool, alice).await.unwrap();
  assert_eq!(history.len(), 2);
  assert_eq!(history[0].order.id, second.order.id);
  assert_eq!(history[1].order.id, first.order.id);

  assert!(orders::history(&pool, bob).await.unwrap().is_empty());
}
