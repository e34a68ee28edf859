//! In-process cache adapter
//!
//! Entries live until they expire or are forgotten; there is no capacity
//! based eviction, so a cached setting is never dropped behind the store's
//! back.

use async_trait::async_trait;
use lru::LruCache;
use std::time::{Duration, Instant};

use setting_types::cache_adapter::CacheAdapter;

use crate::prelude::*;

#[derive(Debug, Clone)]
struct CacheEntry {
	value: serde_json::Value,
	/// `None` for entries cached forever
	expires_at: Option<Instant>,
}

impl CacheEntry {
	fn is_expired(&self, now: Instant) -> bool {
		self.expires_at.is_some_and(|at| now >= at)
	}
}

#[derive(Debug)]
pub struct MemoryCache {
	entries: parking_lot::RwLock<LruCache<String, CacheEntry>>,
}

impl MemoryCache {
	pub fn new() -> Self {
		Self { entries: parking_lot::RwLock::new(LruCache::unbounded()) }
	}

	/// Number of stored entries, expired ones included until next access
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	pub fn contains(&self, key: &str) -> bool {
		let now = Instant::now();
		self.entries.read().peek(key).is_some_and(|entry| !entry.is_expired(now))
	}

	/// Drop every entry
	pub fn clear(&self) {
		self.entries.write().clear();
	}
}

impl Default for MemoryCache {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl CacheAdapter for MemoryCache {
	async fn get(&self, key: &str) -> StResult<Option<serde_json::Value>> {
		let now = Instant::now();
		let mut entries = self.entries.write();

		let expired = match entries.get(key) {
			Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
			Some(_) => true,
			None => false,
		};
		if expired {
			debug!("Cache entry expired: {}", key);
			entries.pop(key);
		}
		Ok(None)
	}

	async fn put(
		&self,
		key: &str,
		value: serde_json::Value,
		ttl: Option<Duration>,
	) -> StResult<()> {
		// A lifetime past the clock's range never expires
		let expires_at = ttl.and_then(|ttl| Instant::now().checked_add(ttl));
		self.entries.write().put(key.to_string(), CacheEntry { value, expires_at });
		Ok(())
	}

	async fn forget(&self, key: &str) -> StResult<()> {
		self.entries.write().pop(key);
		Ok(())
	}
}


// vim: ts=4
