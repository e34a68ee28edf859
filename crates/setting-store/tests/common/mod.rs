//! Common test utilities and helpers
//!
//! In-memory persistence adapter with call counters, and store builders.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use setting_store::{MemoryCache, SettingStore};
use setting_types::cache_adapter::CacheAdapter;
use setting_types::error::StResult;
use setting_types::setting_adapter::SettingAdapter;
use setting_types::types::{SettingRecord, format_datetime};

#[derive(Debug, Default)]
pub struct CountingAdapter {
	rows: parking_lot::Mutex<Vec<SettingRecord>>,
	pub reads: AtomicUsize,
	pub lists: AtomicUsize,
	pub upserts: AtomicUsize,
}

impl CountingAdapter {
	pub fn reads(&self) -> usize {
		self.reads.load(Ordering::SeqCst)
	}

	pub fn row_count(&self, group: &str, key: &str) -> usize {
		self.rows.lock().iter().filter(|r| &*r.group == group && &*r.key == key).count()
	}

	/// Insert a row bypassing the store, e.g. to simulate another writer
	pub fn insert_raw(&self, group: &str, key: &str, value: &str, updated_at: &str) {
		self.rows.lock().push(SettingRecord {
			group: group.into(),
			key: key.into(),
			value: Some(value.into()),
			created_at: Some(updated_at.into()),
			updated_at: Some(updated_at.into()),
		});
	}
}

#[async_trait]
impl SettingAdapter for CountingAdapter {
	async fn read_setting(&self, group: &str, key: &str) -> StResult<Option<Box<str>>> {
		self.reads.fetch_add(1, Ordering::SeqCst);
		Ok(self
			.rows
			.lock()
			.iter()
			.find(|r| &*r.group == group && &*r.key == key)
			.and_then(|r| r.value.clone()))
	}

	async fn list_group(&self, group: &str) -> StResult<Vec<SettingRecord>> {
		self.lists.fetch_add(1, Ordering::SeqCst);
		Ok(self.rows.lock().iter().filter(|r| &*r.group == group).cloned().collect())
	}

	async fn upsert_setting(
		&self,
		group: &str,
		key: &str,
		value: &str,
		at: NaiveDateTime,
	) -> StResult<()> {
		self.upserts.fetch_add(1, Ordering::SeqCst);
		let at: Box<str> = format_datetime(&at).into();
		let mut rows = self.rows.lock();
		if let Some(row) = rows.iter_mut().find(|r| &*r.group == group && &*r.key == key) {
			row.value = Some(value.into());
			row.updated_at = Some(at);
		} else {
			rows.push(SettingRecord {
				group: group.into(),
				key: key.into(),
				value: Some(value.into()),
				created_at: Some(at.clone()),
				updated_at: Some(at),
			});
		}
		Ok(())
	}

	async fn group_last_updated_at(&self, group: &str) -> StResult<Option<Box<str>>> {
		Ok(self
			.rows
			.lock()
			.iter()
			.filter(|r| &*r.group == group)
			.filter_map(|r| r.updated_at.clone())
			.max())
	}
}

/// Memory cache remembering the lifetime of every `put`
#[derive(Debug, Default)]
pub struct RecordingCache {
	inner: MemoryCache,
	ttls: parking_lot::Mutex<Vec<Option<Duration>>>,
}

impl RecordingCache {
	pub fn ttls(&self) -> Vec<Option<Duration>> {
		self.ttls.lock().clone()
	}
}

#[async_trait]
impl CacheAdapter for RecordingCache {
	async fn get(&self, key: &str) -> StResult<Option<serde_json::Value>> {
		self.inner.get(key).await
	}

	async fn put(
		&self,
		key: &str,
		value: serde_json::Value,
		ttl: Option<Duration>,
	) -> StResult<()> {
		self.ttls.lock().push(ttl);
		self.inner.put(key, value, ttl).await
	}

	async fn forget(&self, key: &str) -> StResult<()> {
		self.inner.forget(key).await
	}
}

/// Route store logs to the test output, filtered by `RUST_LOG`
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

pub fn create_test_store(ttl: Option<i64>) -> (SettingStore, Arc<CountingAdapter>, Arc<MemoryCache>) {
	init_tracing();
	let adapter = Arc::new(CountingAdapter::default());
	let cache = Arc::new(MemoryCache::new());
	let store = SettingStore::builder()
		.adapter(adapter.clone())
		.cache(cache.clone())
		.cache_ttl(ttl)
		.build()
		.expect("Failed to build store");
	(store, adapter, cache)
}

pub fn create_recording_store(
	ttl: Option<i64>,
) -> (SettingStore, Arc<CountingAdapter>, Arc<RecordingCache>) {
	init_tracing();
	let adapter = Arc::new(CountingAdapter::default());
	let cache = Arc::new(RecordingCache::default());
	let store = SettingStore::builder()
		.adapter(adapter.clone())
		.cache(cache.clone())
		.cache_ttl(ttl)
		.build()
		.expect("Failed to build store");
	(store, adapter, cache)
}

// vim: ts=4
