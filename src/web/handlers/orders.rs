// src/web/handlers/orders.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::errors::Result;
use crate::services::orders;
use crate::state::AppState;
use crate::web::current_user::CurrentUser;

/// GET /orders — the authenticated user's order history, newest first.
#[instrument(name = "handler::order_history", skip(app_state, user), fields(user_id = %user.id))]
pub async fn order_history(app_state: web::Data<AppState>, user: CurrentUser) -> Result<HttpResponse> {
  let orders = orders::history(&app_state.db_pool, user.id).await?;
  Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}
