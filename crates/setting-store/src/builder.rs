//! Store builder

use std::sync::Arc;

use setting_types::cache_adapter::CacheAdapter;
use setting_types::config::SettingsConfig;
use setting_types::setting_adapter::SettingAdapter;

use crate::cache::MemoryCache;
use crate::prelude::*;
use crate::store::SettingStore;

/// Assembles a [`SettingStore`] from a configuration and its adapters
///
/// The persistence adapter is required. Without an explicit cache adapter
/// an in-process [`MemoryCache`] is used.
#[derive(Default)]
pub struct SettingStoreBuilder {
	config: SettingsConfig,
	adapter: Option<Arc<dyn SettingAdapter>>,
	cache: Option<Arc<dyn CacheAdapter>>,
}

impl SettingStoreBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	// Config
	pub fn config(&mut self, config: SettingsConfig) -> &mut Self {
		self.config = config;
		self
	}
	pub fn cache_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
		self.config.cache.prefix = prefix.into();
		self
	}
	/// Cache lifetime in minutes, `None` or `<= 0` for forever
	pub fn cache_ttl(&mut self, minutes: Option<i64>) -> &mut Self {
		self.config.cache.ttl = minutes;
		self
	}
	pub fn timezone(&mut self, timezone: impl Into<String>) -> &mut Self {
		self.config.timezone = timezone.into();
		self
	}

	// Adapters
	pub fn adapter(&mut self, adapter: Arc<dyn SettingAdapter>) -> &mut Self {
		self.adapter = Some(adapter);
		self
	}
	pub fn cache(&mut self, cache: Arc<dyn CacheAdapter>) -> &mut Self {
		self.cache = Some(cache);
		self
	}

	pub fn build(&self) -> StResult<SettingStore> {
		let adapter = self
			.adapter
			.clone()
			.ok_or_else(|| Error::Internal("setting adapter not set".into()))?;
		let cache = self.cache.clone().unwrap_or_else(|| Arc::new(MemoryCache::new()));

		let store = SettingStore::new(adapter, cache, self.config.clone())?;
		debug!(
			"Setting store ready (prefix: {}, ttl: {:?}, timezone: {})",
			self.config.cache.prefix,
			self.config.cache_ttl(),
			self.config.timezone
		);
		Ok(store)
	}
}

// vim: ts=4
