// src/cache.rs

//! In-process TTL cache for the cart badge count.
//!
//! The badge is displayed on every page, so its count is recomputed at most
//! once per TTL per user. Every cart mutation and every checkout invalidates
//! the owning user's entry.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Clone)]
pub struct BadgeCache {
  inner: Arc<RwLock<HashMap<Uuid, BadgeEntry>>>,
  ttl: Duration,
}

#[derive(Debug, Clone, Copy)]
struct BadgeEntry {
  count: i64,
  stored_at: Instant,
}

impl BadgeCache {
  pub fn new(ttl: Duration) -> Self {
    Self {
      inner: Arc::new(RwLock::new(HashMap::new())),
      ttl,
    }
  }

  /// Returns the cached count, or `None` when absent or past its TTL.
  pub fn get(&self, user_id: Uuid) -> Option<i64> {
    let map = self.inner.read();
    let entry = map.get(&user_id)?;
    if entry.stored_at.elapsed() >= self.ttl {
      return None;
    }
    Some(entry.count)
  }

  pub fn put(&self, user_id: Uuid, count: i64) {
    self.inner.write().insert(
      user_id,
      BadgeEntry {
        count,
        stored_at: Instant::now(),
      },
    );
  }

  pub fn invalidate(&self, user_id: Uuid) {
    self.inner.write().remove(&user_id);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fresh_entry_is_served() {
    let cache = BadgeCache::new(Duration::from_secs(60));
    let user = Uuid::new_v4();
    cache.put(user, 3);
    assert_eq!(cache.get(user), Some(3));
  }

  #[test]
  fn missing_entry_misses() {
    let cache = BadgeCache::new(Duration::from_secs(60));
    assert_eq!(cache.get(Uuid::new_v4()), None);
  }

  #[test]
  fn expired_entry_misses() {
    let cache = BadgeCache::new(Duration::from_secs(0));
    let user = Uuid::new_v4();
    cache.put(user, 7);
    assert_eq!(cache.get(user), None);
  }

  #[test]
  fn invalidation_evicts() {
    let cache = BadgeCache::new(Duration::from_secs(60));
    let user = Uuid::new_v4();
    cache.put(user, 2);
    cache.invalidate(user);
    assert_eq!(cache.get(user), None);
  }
}
