// src/web/handlers/checkout.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::errors::{AppError, Result};
use crate::services::{cart, checkout};
use crate::state::AppState;
use crate::web::current_user::CurrentUser;
use crate::web::notice::Notice;

/// GET /checkout — the order summary the user confirms before purchase.
#[instrument(name = "handler::checkout_summary", skip(app_state, user), fields(user_id = %user.id))]
pub async fn checkout_summary(app_state: web::Data<AppState>, user: CurrentUser) -> Result<HttpResponse> {
  let view = cart::view(&app_state.db_pool, user.id).await?;
  if view.items.is_empty() {
    return Err(AppError::EmptyCart);
  }
  Ok(HttpResponse::Ok().json(json!({ "summary": view })))
}

/// POST /checkout — executes the atomic cart-to-order conversion.
#[instrument(name = "handler::place_order", skip(app_state, user), fields(user_id = %user.id))]
pub async fn place_order(app_state: web::Data<AppState>, user: CurrentUser) -> Result<HttpResponse> {
  let receipt = checkout::checkout(&app_state.db_pool, user.id).await?;
  app_state.badge_cache.invalidate(user.id);

  Ok(HttpResponse::Created().json(json!({
    "notice": Notice::success("Order placed successfully!"),
    "receipt": receipt,
  })))
}
