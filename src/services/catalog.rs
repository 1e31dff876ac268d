// src/services/catalog.rs

//! Catalog listing with category filter, sorting and fixed-size pagination.

use crate::errors::Result;
use crate::models::{Category, Product};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

/// Fixed page size of the catalog listing.
pub const PAGE_SIZE: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  #[default]
  NameAsc,
  NameDesc,
  PriceAsc,
  PriceDesc,
}

impl SortOrder {
  /// Parses a query-string value; anything unrecognized falls back to
  /// `name_asc`.
  pub fn parse(raw: Option<&str>) -> Self {
    match raw {
      Some("name_desc") => SortOrder::NameDesc,
      Some("price_asc") => SortOrder::PriceAsc,
      Some("price_desc") => SortOrder::PriceDesc,
      _ => SortOrder::NameAsc,
    }
  }

  /// ORDER BY clause for this sort. `id` is the tie-breaker so pages are
  /// stable across requests.
  fn order_clause(self) -> &'static str {
    match self {
      SortOrder::NameAsc => "name ASC, id ASC",
      SortOrder::NameDesc => "name DESC, id ASC",
      SortOrder::PriceAsc => "price_cents ASC, id ASC",
      SortOrder::PriceDesc => "price_cents DESC, id ASC",
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub struct ProductFilter {
  pub category_id: Option<Uuid>,
  pub sort: SortOrder,
  /// 1-indexed. Page 0, negative pages and pages past the end all yield an
  /// empty item list rather than an error.
  pub page: i64,
}

#[derive(Debug, serde::Serialize)]
pub struct ProductPage {
  pub products: Vec<Product>,
  pub categories: Vec<Category>,
  pub page: i64,
  pub total_pages: i64,
  pub total_products: i64,
}

/// `ceil(count / page_size)`, or 0 when nothing matches.
pub fn total_pages(count: i64, page_size: i64) -> i64 {
  if count <= 0 {
    0
  } else {
    (count + page_size - 1) / page_size
  }
}

/// Row offset of a 1-indexed page, or `None` for pages before the first.
pub fn page_offset(page: i64, page_size: i64) -> Option<i64> {
  if page < 1 {
    None
  } else {
    Some((page - 1) * page_size)
  }
}

#[instrument(name = "catalog::list_products", skip(pool))]
pub async fn list_products(pool: &PgPool, filter: &ProductFilter) -> Result<ProductPage> {
  let total_products: i64 = match filter.category_id {
    Some(category_id) => {
      sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = $1")
        .bind(category_id)
        .fetch_one(pool)
        .await?
    }
    None => sqlx::query_scalar("SELECT COUNT(*) FROM products").fetch_one(pool).await?,
  };

  let products: Vec<Product> = match page_offset(filter.page, PAGE_SIZE) {
    None => Vec::new(),
    Some(offset) => {
      let columns = "id, category_id, name, description, price_cents, stock, created_at";
      // The ORDER BY fragment comes from a fixed enum, never from user input.
      match filter.category_id {
        Some(category_id) => {
          let sql = format!(
            "SELECT {} FROM products WHERE category_id = $1 ORDER BY {} LIMIT $2 OFFSET $3",
            columns,
            filter.sort.order_clause()
          );
          sqlx::query_as(&sql)
            .bind(category_id)
            .bind(PAGE_SIZE)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
          let sql = format!(
            "SELECT {} FROM products ORDER BY {} LIMIT $1 OFFSET $2",
            columns,
            filter.sort.order_clause()
          );
          sqlx::query_as(&sql).bind(PAGE_SIZE).bind(offset).fetch_all(pool).await?
        }
      }
    }
  };

  let categories: Vec<Category> = sqlx::query_as("SELECT id, name FROM categories ORDER BY name ASC")
    .fetch_all(pool)
    .await?;

  Ok(ProductPage {
    products,
    categories,
    page: filter.page,
    total_pages: total_pages(total_products, PAGE_SIZE),
    total_products,
  })
}
