// src/db/seed.rs

//! Demo data for local development: ten categories, ten products and a pair
//! of demo accounts. Skipped entirely when the catalog is already populated.

use crate::errors::Result;
use crate::services::auth;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

const CATEGORIES: [&str; 10] = [
  "Electronics",
  "Books",
  "Clothing",
  "Footwear",
  "Audio",
  "Kitchen",
  "Travel",
  "Sports",
  "Toys",
  "Accessories",
];

// (name, price in cents, stock, description, category)
const PRODUCTS: [(&str, i32, i32, &str, &str); 10] = [
  ("Smartphone", 29_999, 10, "Latest model", "Electronics"),
  ("Laptop", 89_999, 5, "High performance", "Electronics"),
  ("Novel Book", 1_999, 20, "Bestseller", "Books"),
  ("T-Shirt", 999, 50, "Cotton T-shirt", "Clothing"),
  ("Jeans", 3_999, 25, "Denim jeans", "Clothing"),
  ("Football", 2_999, 15, "Soccer ball", "Sports"),
  ("Headphones", 5_999, 30, "Audio gear", "Audio"),
  ("Sneakers", 6_999, 20, "Comfortable footwear", "Footwear"),
  ("Blender", 4_999, 10, "Kitchen appliance", "Kitchen"),
  ("Travel Bag", 7_999, 12, "Durable bag", "Travel"),
];

const DEMO_USERS: [(&str, &str, &str); 2] = [
  ("alice@example.com", "Alice", "pass123"),
  ("bob@example.com", "Bob", "pass123"),
];

pub async fn seed_demo_data(pool: &PgPool) -> Result<()> {
  let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products").fetch_one(pool).await?;
  if existing > 0 {
    tracing::info!("Database already contains products; skipping seed.");
    return Ok(());
  }

  let mut tx = pool.begin().await?;

  let mut category_ids: HashMap<&str, Uuid> = HashMap::new();
  for name in CATEGORIES {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO categories (id, name) VALUES ($1, $2)")
      .bind(id)
      .bind(name)
      .execute(&mut *tx)
      .await?;
    category_ids.insert(name, id);
  }

  for (name, price_cents, stock, description, category) in PRODUCTS {
    sqlx::query(
      "INSERT INTO products (id, category_id, name, description, price_cents, stock) \
       VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(Uuid::new_v4())
    .bind(category_ids[category])
    .bind(name)
    .bind(description)
    .bind(price_cents)
    .bind(stock)
    .execute(&mut *tx)
    .await?;
  }

  for (email, display_name, password) in DEMO_USERS {
    let password_hash = auth::hash_password(password)?;
    sqlx::query(
      "INSERT INTO users (id, email, password_hash, display_name) VALUES ($1, $2, $3, $4) \
       ON CONFLICT (email) DO NOTHING",
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(display_name)
    .execute(&mut *tx)
    .await?;
  }

  tx.commit().await?;
  tracing::info!(
    categories = CATEGORIES.len(),
    products = PRODUCTS.len(),
    users = DEMO_USERS.len(),
    "Seeded demo data."
  );
  Ok(())
}
