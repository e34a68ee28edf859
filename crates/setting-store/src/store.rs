//! Setting store with cache-through reads and upsert writes

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt::Write as _;
use std::future::Future;
use std::sync::Arc;

use setting_types::cache_adapter::CacheAdapter;
use setting_types::config::{DEFAULT_TIMEZONE, SettingsConfig};
use setting_types::setting_adapter::SettingAdapter;
use setting_types::types::parse_datetime;
use setting_types::utils::{data_get, replace_recursive};

use crate::builder::SettingStoreBuilder;
use crate::key::SettingKey;
use crate::prelude::*;

/// Default rendering of [`SettingStore::get_group_last_updated_at`],
/// e.g. "March 9, 2024, 7:05 am"
pub const DEFAULT_LAST_UPDATED_FORMAT: &str = "%B %-d, %Y, %-I:%M %P";

/// Settings store - main interface for reading and writing settings
///
/// Reads go through the cache one `(group, setting)` pair at a time, so a
/// write only invalidates the entry of the setting it touches.
#[derive(Debug)]
pub struct SettingStore {
	adapter: Arc<dyn SettingAdapter>,
	cache: Arc<dyn CacheAdapter>,
	config: SettingsConfig,
	timezone: Tz,
}

impl SettingStore {
	pub fn new(
		adapter: Arc<dyn SettingAdapter>,
		cache: Arc<dyn CacheAdapter>,
		config: SettingsConfig,
	) -> StResult<Self> {
		let timezone = config.timezone.parse::<Tz>().map_err(|_| {
			Error::ConfigError(format!("Unknown timezone '{}'", config.timezone))
		})?;
		Ok(Self { adapter, cache, config, timezone })
	}

	pub fn builder() -> SettingStoreBuilder {
		SettingStoreBuilder::new()
	}

	pub fn config(&self) -> &SettingsConfig {
		&self.config
	}

	/// Read a setting, falling back to `default` when it is missing or null
	pub async fn get(&self, key: &str, default: impl Into<Value>) -> StResult<Value> {
		Ok(self.get_opt(key).await?.unwrap_or_else(|| default.into()))
	}

	/// Read a setting, `None` when it is missing or null
	pub async fn get_opt(&self, key: &str) -> StResult<Option<Value>> {
		let key = SettingKey::parse(key)?;
		let cache_key = self.cache_key(key.group, key.setting);

		let data =
			self.remember(&cache_key, || self.fetch_setting(key.group, key.setting)).await?;

		Ok(data_get(&data, &key.lookup_path()).filter(|value| !value.is_null()).cloned())
	}

	/// Typed read. A stored value of the wrong shape is an error.
	pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> StResult<Option<T>> {
		match self.get_opt(key).await? {
			Some(value) => serde_json::from_value(value).map(Some).map_err(|err| {
				Error::ValidationError(format!("Setting '{}' has unexpected type: {}", key, err))
			}),
			None => Ok(None),
		}
	}

	/// Replace the whole value of `group.setting`
	///
	/// Anything after the setting segment is ignored: nested fields cannot be
	/// written individually.
	pub async fn set<V: Serialize + ?Sized>(&self, key: &str, value: &V) -> StResult<()> {
		let key = SettingKey::parse(key)?;
		if let Some(sub_key) = key.sub_key {
			debug!("Ignoring sub key '{}' on write of {}.{}", sub_key, key.group, key.setting);
		}
		self.store_setting(key.group, key.setting, value).await
	}

	/// Persist every entry of `state` into `group`
	pub async fn set_group(&self, group: &str, state: &Map<String, Value>) -> StResult<()> {
		if group.is_empty() {
			return Err(Error::ValidationError("Setting group cannot be empty".into()));
		}
		for (setting, value) in state {
			if setting.is_empty() {
				return Err(Error::ValidationError(format!(
					"Empty setting name in group '{}'",
					group
				)));
			}
			self.store_setting(group, setting, value).await?;
		}
		Ok(())
	}

	/// Drop the cached entry of `group.setting`
	pub async fn forget(&self, key: &str) -> StResult<()> {
		let key = SettingKey::parse(key)?;
		self.cache.forget(&self.cache_key(key.group, key.setting)).await
	}

	/// All settings of a group, decoded. Not cached.
	pub async fn get_group(&self, group: &str) -> StResult<Map<String, Value>> {
		let mut settings = Map::new();
		for record in self.adapter.list_group(group).await? {
			let value = record.value.as_deref().map_or(Value::Null, |raw| {
				decode_value(raw, group, &record.key)
			});
			settings.insert(record.key.into_string(), value);
		}
		Ok(settings)
	}

	/// Persisted group values merged over `defaults`, persisted values winning
	pub async fn get_group_with_defaults(
		&self,
		group: &str,
		defaults: Map<String, Value>,
	) -> StResult<Map<String, Value>> {
		let mut merged = Value::Object(defaults);
		replace_recursive(&mut merged, Value::Object(self.get_group(group).await?));

		match merged {
			Value::Object(map) => Ok(map),
			_ => Ok(Map::new()),
		}
	}

	/// Most recent write time of a group rendered in `timezone`
	///
	/// `format` uses strftime syntax. Returns `None` for an empty group and
	/// whenever the timestamp cannot be parsed, converted or formatted.
	pub async fn get_group_last_updated_at(
		&self,
		group: &str,
		format: &str,
		timezone: Option<&str>,
	) -> StResult<Option<String>> {
		let Some(raw) = self.adapter.group_last_updated_at(group).await? else {
			return Ok(None);
		};
		if raw.trim().is_empty() {
			return Ok(None);
		}
		Ok(self.render_timestamp(&raw, format, timezone.unwrap_or(DEFAULT_TIMEZONE)))
	}

	// Internals
	//***********
	fn cache_key(&self, group: &str, setting: &str) -> String {
		format!("{}.{}.{}", self.config.cache.prefix, group, setting)
	}

	/// Get-or-compute against the cache, forever or with the configured TTL
	async fn remember<F, Fut>(&self, cache_key: &str, compute: F) -> StResult<Value>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = StResult<Value>>,
	{
		if let Some(value) = self.cache.get(cache_key).await? {
			debug!("Setting cache hit: {}", cache_key);
			return Ok(value);
		}

		debug!("Setting cache miss: {}", cache_key);
		let value = compute().await?;
		self.cache.put(cache_key, value.clone(), self.config.cache_ttl()).await?;
		Ok(value)
	}

	/// `{setting: value}` for an existing row, `{}` otherwise
	async fn fetch_setting(&self, group: &str, setting: &str) -> StResult<Value> {
		let mut data = Map::new();
		if let Some(raw) = self.adapter.read_setting(group, setting).await? {
			data.insert(setting.to_string(), decode_value(&raw, group, setting));
		}
		Ok(Value::Object(data))
	}

	async fn store_setting<V: Serialize + ?Sized>(
		&self,
		group: &str,
		setting: &str,
		value: &V,
	) -> StResult<()> {
		self.cache.forget(&self.cache_key(group, setting)).await?;

		let encoded = serde_json::to_string(value).map_err(Error::Serialization)?;
		self.adapter.upsert_setting(group, setting, &encoded, self.now()).await?;

		info!("Setting '{}.{}' updated", group, setting);
		Ok(())
	}

	/// Current wall-clock time in the application timezone
	fn now(&self) -> NaiveDateTime {
		Utc::now().with_timezone(&self.timezone).naive_local()
	}

	fn render_timestamp(&self, raw: &str, format: &str, timezone: &str) -> Option<String> {
		let Some(naive) = parse_datetime(raw) else {
			debug!("Unparsable timestamp '{}'", raw);
			return None;
		};
		let Ok(target) = timezone.parse::<Tz>() else {
			debug!("Unknown timezone '{}'", timezone);
			return None;
		};
		let local = self.timezone.from_local_datetime(&naive).earliest()?;

		let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
		if items.iter().any(|item| matches!(item, Item::Error)) {
			debug!("Invalid timestamp format '{}'", format);
			return None;
		}

		let mut out = String::new();
		write!(out, "{}", local.with_timezone(&target).format_with_items(items.iter())).ok()?;
		Some(out)
	}
}

fn decode_value(raw: &str, group: &str, setting: &str) -> Value {
	serde_json::from_str(raw).unwrap_or_else(|err| {
		warn!("Undecodable value for setting '{}.{}': {}", group, setting, err);
		Value::Null
	})
}

// vim: ts=4
