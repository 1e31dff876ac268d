// src/services/auth.rs

//! Credential handling and login sessions: argon2 password hashing, user
//! registration, sign-in, and the session rows backing the `session` cookie.

use crate::errors::{AppError, Result};
use crate::models::{Session, User};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

const MIN_PASSWORD_LEN: usize = 8;

/// Hashes a plain-text password with Argon2 and a random salt.
#[instrument(name = "auth::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String> {
  if password.is_empty() {
    return Err(AppError::Validation("Password cannot be empty.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verifies a plain-text password against a stored Argon2 hash. Returns
/// `Ok(false)` on a mismatch; only malformed hashes or argon2 failures
/// surface as errors.
#[instrument(name = "auth::verify_password", skip_all, err(Display))]
pub fn verify_password(stored_hash: &str, provided_password: &str) -> Result<bool> {
  if stored_hash.is_empty() || provided_password.is_empty() {
    return Err(AppError::Auth("Invalid credentials.".to_string()));
  }

  let parsed_hash =
    PasswordHash::new(stored_hash).map_err(|e| AppError::Internal(format!("Invalid stored password hash: {}", e)))?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => Ok(false),
    Err(e) => Err(AppError::Internal(format!("Password verification failed: {}", e))),
  }
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
  if email.is_empty() || !email.contains('@') {
    return Err(AppError::Validation("A valid email is required.".to_string()));
  }
  if password.len() < MIN_PASSWORD_LEN {
    return Err(AppError::Validation(format!(
      "Password must be at least {} characters.",
      MIN_PASSWORD_LEN
    )));
  }
  Ok(())
}

/// Registers a new user. The email must not be taken; the password is
/// hashed before it ever reaches the database.
#[instrument(name = "auth::register", skip(pool, password), fields(%email))]
pub async fn register(pool: &PgPool, email: &str, display_name: &str, password: &str) -> Result<User> {
  validate_credentials(email, password)?;
  if display_name.trim().is_empty() {
    return Err(AppError::Validation("A display name is required.".to_string()));
  }

  let taken: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
    .bind(email)
    .fetch_optional(pool)
    .await?;
  if taken.is_some() {
    warn!("Registration attempt with an already-registered email.");
    return Err(AppError::Validation("This email is already registered.".to_string()));
  }

  let password_hash = hash_password(password)?;
  let user: User = sqlx::query_as(
    "INSERT INTO users (id, email, password_hash, display_name) VALUES ($1, $2, $3, $4) \
     RETURNING id, email, password_hash, display_name, created_at",
  )
  .bind(Uuid::new_v4())
  .bind(email)
  .bind(password_hash)
  .bind(display_name.trim())
  .fetch_one(pool)
  .await?;

  debug!(user_id = %user.id, "User registered.");
  Ok(user)
}

/// Authenticates by email and password. The failure message does not reveal
/// whether the email exists.
#[instrument(name = "auth::login", skip(pool, password), fields(%email))]
pub async fn login(pool: &PgPool, email: &str, password: &str) -> Result<User> {
  let user: Option<User> = sqlx::query_as(
    "SELECT id, email, password_hash, display_name, created_at FROM users WHERE email = $1",
  )
  .bind(email)
  .fetch_optional(pool)
  .await?;

  let user = match user {
    Some(user) => user,
    None => {
      warn!("Login attempt for unknown email.");
      return Err(AppError::Auth("Invalid email or password.".to_string()));
    }
  };

  if !verify_password(&user.password_hash, password)? {
    warn!(user_id = %user.id, "Login attempt with wrong password.");
    return Err(AppError::Auth("Invalid email or password.".to_string()));
  }

  debug!(user_id = %user.id, "Login verified.");
  Ok(user)
}

/// Opens a session for an authenticated user and returns the row whose
/// token goes into the cookie.
#[instrument(name = "auth::open_session", skip(pool), fields(%user_id))]
pub async fn open_session(pool: &PgPool, user_id: Uuid, ttl_hours: i64) -> Result<Session> {
  let expires_at = Utc::now() + Duration::hours(ttl_hours);
  let session: Session = sqlx::query_as(
    "INSERT INTO sessions (token, user_id, expires_at) VALUES ($1, $2, $3) \
     RETURNING token, user_id, created_at, expires_at",
  )
  .bind(Uuid::new_v4())
  .bind(user_id)
  .bind(expires_at)
  .fetch_one(pool)
  .await?;
  Ok(session)
}

/// Resolves a session token to its user, rejecting expired sessions.
pub async fn resolve_session(pool: &PgPool, token: Uuid) -> Result<User> {
  let user: Option<User> = sqlx::query_as(
    "SELECT u.id, u.email, u.password_hash, u.display_name, u.created_at \
     FROM sessions s JOIN users u ON u.id = s.user_id \
     WHERE s.token = $1 AND s.expires_at > now()",
  )
  .bind(token)
  .fetch_optional(pool)
  .await?;
  user.ok_or_else(|| AppError::Auth("Please sign in to continue.".to_string()))
}

/// Deletes the session row; an already-gone token is not an error.
#[instrument(name = "auth::revoke_session", skip(pool))]
pub async fn revoke_session(pool: &PgPool, token: Uuid) -> Result<()> {
  sqlx::query("DELETE FROM sessions WHERE token = $1")
    .bind(token)
    .execute(pool)
    .await?;
  Ok(())
}
