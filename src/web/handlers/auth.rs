// src/web/handlers/auth.rs

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::Result;
use crate::services::auth;
use crate::state::AppState;
use crate::web::current_user::{session_token, SESSION_COOKIE};
use crate::web::notice::Notice;

#[derive(Deserialize, Debug)]
pub struct SignUpPayload {
  pub email: String,
  pub display_name: String,
  pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginPayload {
  pub email: String,
  pub password: String,
}

fn session_cookie(token: Uuid) -> Cookie<'static> {
  Cookie::build(SESSION_COOKIE, token.to_string())
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .finish()
}

pub async fn login_form() -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "form": { "action": "/auth/login", "method": "POST", "fields": ["email", "password"] }
  }))
}

pub async fn sign_up_form() -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "form": { "action": "/auth/sign-up", "method": "POST", "fields": ["email", "display_name", "password"] }
  }))
}

#[instrument(name = "handler::sign_up", skip(app_state, payload), fields(email = %payload.email))]
pub async fn sign_up(app_state: web::Data<AppState>, payload: web::Json<SignUpPayload>) -> Result<HttpResponse> {
  let user = auth::register(&app_state.db_pool, &payload.email, &payload.display_name, &payload.password).await?;
  // Sign the new user straight in; no separate login needed after sign-up.
  let session = auth::open_session(&app_state.db_pool, user.id, app_state.config.session_ttl_hours).await?;

  Ok(HttpResponse::Created().cookie(session_cookie(session.token)).json(json!({
    "notice": Notice::success(format!("Welcome, {}! Your account is ready.", user.display_name)),
    "user": user,
  })))
}

#[instrument(name = "handler::login", skip(app_state, payload), fields(email = %payload.email))]
pub async fn login(app_state: web::Data<AppState>, payload: web::Json<LoginPayload>) -> Result<HttpResponse> {
  let user = auth::login(&app_state.db_pool, &payload.email, &payload.password).await?;
  let session = auth::open_session(&app_state.db_pool, user.id, app_state.config.session_ttl_hours).await?;

  Ok(HttpResponse::Ok().cookie(session_cookie(session.token)).json(json!({
    "notice": Notice::success(format!("Welcome back, {}!", user.display_name)),
    "user": user,
  })))
}

#[instrument(name = "handler::logout", skip(app_state, req))]
pub async fn logout(app_state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
  if let Some(token) = session_token(&req) {
    auth::revoke_session(&app_state.db_pool, token).await?;
  }

  let mut expired = session_cookie(Uuid::nil());
  expired.make_removal();
  Ok(HttpResponse::Ok().cookie(expired).json(json!({
    "notice": Notice::info("You have been signed out."),
  })))
}
