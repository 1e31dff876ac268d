// src/web/current_user.rs

//! Authenticated-user extractor. Resolves the session token from the
//! `session` cookie (or an `Authorization: Bearer` header) against the
//! sessions table; handlers that take a [`CurrentUser`] argument reject
//! unauthenticated requests with a 401.

use crate::errors::AppError;
use crate::services::auth;
use crate::state::AppState;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone)]
pub struct CurrentUser {
  pub id: Uuid,
  pub email: String,
  pub display_name: String,
}

impl FromRequest for CurrentUser {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let req = req.clone();
    Box::pin(async move {
      let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("AppState missing from request.".to_string()))?;
      let token =
        session_token(&req).ok_or_else(|| AppError::Auth("Please sign in to continue.".to_string()))?;
      let user = auth::resolve_session(&state.db_pool, token).await?;
      Ok(CurrentUser {
        id: user.id,
        email: user.email,
        display_name: user.display_name,
      })
    })
  }
}

/// The session token carried by the request, if any.
pub fn session_token(req: &HttpRequest) -> Option<Uuid> {
  if let Some(cookie) = req.cookie(SESSION_COOKIE) {
    if let Ok(token) = Uuid::parse_str(cookie.value()) {
      return Some(token);
    }
  }

  let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
  let token = header.strip_prefix("Bearer ")?;
  Uuid::parse_str(token.trim()).ok()
}
