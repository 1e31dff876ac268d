// src/web/handlers/catalog.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::Result;
use crate::services::catalog::{self, ProductFilter, SortOrder};
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct CatalogQuery {
  pub category: Option<Uuid>,
  pub sort: Option<String>,
  pub page: Option<i64>,
}

/// Catalog listing with optional category filter, sort order and page.
#[instrument(name = "handler::home", skip(app_state, query))]
pub async fn home(app_state: web::Data<AppState>, query: web::Query<CatalogQuery>) -> Result<HttpResponse> {
  let filter = ProductFilter {
    category_id: query.category,
    sort: SortOrder::parse(query.sort.as_deref()),
    page: query.page.unwrap_or(1),
  };
  let page = catalog::list_products(&app_state.db_pool, &filter).await?;
  Ok(HttpResponse::Ok().json(page))
}
