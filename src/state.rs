// src/state.rs

use crate::cache::BadgeCache;
use crate::config::AppConfig;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
  pub db_pool: PgPool,
  pub config: Arc<AppConfig>,
  pub badge_cache: BadgeCache,
}

impl AppState {
  pub fn new(db_pool: PgPool, config: Arc<AppConfig>) -> Self {
    let badge_cache = BadgeCache::new(Duration::from_secs(config.cart_badge_ttl_secs));
    Self {
      db_pool,
      config,
      badge_cache,
    }
  }
}
