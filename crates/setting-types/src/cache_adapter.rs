//! Cache adapter trait
//!
//! The store layers its get-or-compute logic on top of these three
//! primitives, so a backend only has to provide plain key/value access.

use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

use crate::prelude::*;

#[async_trait]
pub trait CacheAdapter: Debug + Send + Sync {
	/// Fetch a live entry
	async fn get(&self, key: &str) -> StResult<Option<serde_json::Value>>;

	/// Store an entry. `ttl = None` keeps it until it is forgotten.
	async fn put(&self, key: &str, value: serde_json::Value, ttl: Option<Duration>)
	-> StResult<()>;

	/// Drop an entry if present
	async fn forget(&self, key: &str) -> StResult<()>;
}

// vim: ts=4
