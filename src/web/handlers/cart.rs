// src/web/handlers/cart.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::Result;
use crate::services::cart::{self, AddOutcome};
use crate::state::AppState;
use crate::web::current_user::CurrentUser;
use crate::web::notice::Notice;

#[instrument(name = "handler::view_cart", skip(app_state, user), fields(user_id = %user.id))]
pub async fn view_cart(app_state: web::Data<AppState>, user: CurrentUser) -> Result<HttpResponse> {
  let view = cart::view(&app_state.db_pool, user.id).await?;
  if view.items.is_empty() {
    return Ok(HttpResponse::Ok().json(json!({
      "notice": Notice::info("Your cart is empty"),
      "cart": view,
    })));
  }
  Ok(HttpResponse::Ok().json(json!({ "cart": view })))
}

/// Badge count, served from the TTL cache when fresh.
#[instrument(name = "handler::cart_count", skip(app_state, user), fields(user_id = %user.id))]
pub async fn cart_count(app_state: web::Data<AppState>, user: CurrentUser) -> Result<HttpResponse> {
  let count = match app_state.badge_cache.get(user.id) {
    Some(count) => count,
    None => {
      let count = cart::badge_count(&app_state.db_pool, user.id).await?;
      app_state.badge_cache.put(user.id, count);
      count
    }
  };
  Ok(HttpResponse::Ok().json(json!({ "cart_count": count })))
}

#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, user, path),
  fields(user_id = %user.id, product_id = %path.as_ref())
)]
pub async fn add_to_cart(
  app_state: web::Data<AppState>,
  user: CurrentUser,
  path: web::Path<Uuid>,
) -> Result<HttpResponse> {
  let product_id = path.into_inner();
  let outcome = cart::add_item(&app_state.db_pool, user.id, product_id).await?;
  app_state.badge_cache.invalidate(user.id);

  let notice = match &outcome {
    AddOutcome::Added { product_name } => Notice::success(format!("{} added to cart", product_name)),
    AddOutcome::QuantityUpdated { product_name, .. } => {
      Notice::success(format!("{} quantity updated in cart", product_name))
    }
    AddOutcome::StockLimitReached { .. } => Notice::warning("No more stock available"),
  };

  let cart = cart::view(&app_state.db_pool, user.id).await?;
  Ok(HttpResponse::Ok().json(json!({ "notice": notice, "cart": cart })))
}

#[instrument(
  name = "handler::remove_from_cart",
  skip(app_state, user, path),
  fields(user_id = %user.id, item_id = %path.as_ref())
)]
pub async fn remove_from_cart(
  app_state: web::Data<AppState>,
  user: CurrentUser,
  path: web::Path<Uuid>,
) -> Result<HttpResponse> {
  let item_id = path.into_inner();
  let product_name = cart::remove_item(&app_state.db_pool, user.id, item_id).await?;
  app_state.badge_cache.invalidate(user.id);

  let cart = cart::view(&app_state.db_pool, user.id).await?;
  Ok(HttpResponse::Ok().json(json!({
    "notice": Notice::info(format!("{} removed from cart", product_name)),
    "cart": cart,
  })))
}

#[instrument(
  name = "handler::increase_quantity",
  skip(app_state, user, path),
  fields(user_id = %user.id, item_id = %path.as_ref())
)]
pub async fn increase_quantity(
  app_state: web::Data<AppState>,
  user: CurrentUser,
  path: web::Path<Uuid>,
) -> Result<HttpResponse> {
  cart::increase_quantity(&app_state.db_pool, user.id, path.into_inner()).await?;
  app_state.badge_cache.invalidate(user.id);

  let cart = cart::view(&app_state.db_pool, user.id).await?;
  Ok(HttpResponse::Ok().json(json!({ "cart": cart })))
}

#[instrument(
  name = "handler::decrease_quantity",
  skip(app_state, user, path),
  fields(user_id = %user.id, item_id = %path.as_ref())
)]
pub async fn decrease_quantity(
  app_state: web::Data<AppState>,
  user: CurrentUser,
  path: web::Path<Uuid>,
) -> Result<HttpResponse> {
  cart::decrease_quantity(&app_state.db_pool, user.id, path.into_inner()).await?;
  app_state.badge_cache.invalidate(user.id);

  let cart = cart::view(&app_state.db_pool, user.id).await?;
  Ok(HttpResponse::Ok().json(json!({ "cart": cart })))
}
