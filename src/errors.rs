// src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  /// Cross-user access attempt, e.g. mutating a cart item that belongs to
  /// somebody else's cart.
  #[error("Unauthorized: {0}")]
  Unauthorized(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Your cart is empty")]
  EmptyCart,

  #[error("{0} is out of stock")]
  OutOfStock(String),

  #[error("Insufficient stock for {0}")]
  InsufficientStock(String),

  #[error("Payment Processing Error: {0}")]
  Payment(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    if err.is::<sqlx::Error>() {
      match err.downcast::<sqlx::Error>() {
        Ok(sqlx_err) => return AppError::Sqlx(sqlx_err),
        Err(err) => return AppError::Internal(err.to_string()),
      }
    }
    AppError::Internal(err.to_string())
  }
}

impl AppError {
  /// Notice level rendered alongside the error message, mirroring the
  /// success/info/warning/error feedback on regular responses.
  fn notice_level(&self) -> &'static str {
    match self {
      AppError::EmptyCart => "info",
      _ => "error",
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::Unauthorized(_) => StatusCode::FORBIDDEN,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::EmptyCart | AppError::OutOfStock(_) | AppError::InsufficientStock(_) => StatusCode::CONFLICT,
      AppError::Payment(_) => StatusCode::PAYMENT_REQUIRED,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      // Storage and configuration failures surface as a generic 500 body;
      // details stay in the logs.
      AppError::Sqlx(_) => HttpResponse::InternalServerError()
        .json(json!({"notice": {"level": "error", "message": "Database operation failed"}})),
      AppError::Config(_) | AppError::Internal(_) => HttpResponse::InternalServerError()
        .json(json!({"notice": {"level": "error", "message": "An internal error occurred"}})),
      _ => HttpResponse::build(self.status_code()).json(json!({
        "notice": {"level": self.notice_level(), "message": self.to_string()}
      })),
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
