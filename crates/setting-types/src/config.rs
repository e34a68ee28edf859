//! Settings store configuration
//!
//! Mirrors the package configuration file:
//!
//! ```yaml
//! table_name: settings
//! timezone: UTC
//! cache:
//!   prefix: settings
//!   ttl: null   # minutes, null or <= 0 caches forever
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::prelude::*;

pub const DEFAULT_TABLE_NAME: &str = "settings";
pub const DEFAULT_CACHE_PREFIX: &str = "settings";
pub const DEFAULT_TIMEZONE: &str = "UTC";

pub const ENV_TABLE_NAME: &str = "SETTINGS_TABLE_NAME";
pub const ENV_CACHE_PREFIX: &str = "SETTINGS_CACHE_PREFIX";
pub const ENV_CACHE_TTL: &str = "SETTINGS_CACHE_TTL";
pub const ENV_TIMEZONE: &str = "SETTINGS_TIMEZONE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
	pub prefix: String,
	/// Minutes; `None` or a non-positive value means forever
	pub ttl: Option<i64>,
}

impl Default for CacheConfig {
	fn default() -> Self {
		Self { prefix: DEFAULT_CACHE_PREFIX.to_string(), ttl: None }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
	pub table_name: String,
	/// Timezone the stored timestamps are written in
	pub timezone: String,
	pub cache: CacheConfig,
}

impl Default for SettingsConfig {
	fn default() -> Self {
		Self {
			table_name: DEFAULT_TABLE_NAME.to_string(),
			timezone: DEFAULT_TIMEZONE.to_string(),
			cache: CacheConfig::default(),
		}
	}
}

impl SettingsConfig {
	pub fn from_yaml_str(yaml: &str) -> StResult<Self> {
		if yaml.trim().is_empty() {
			return Ok(Self::default());
		}
		Ok(serde_yaml::from_str(yaml)?)
	}

	pub fn load(path: impl AsRef<Path>) -> StResult<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|err| {
			Error::ConfigError(format!("cannot read {}: {}", path.display(), err))
		})?;
		debug!("Loaded settings config from {}", path.display());
		Self::from_yaml_str(&content)
	}

	/// Override fields from the process environment
	pub fn apply_env(&mut self) -> StResult<()> {
		self.apply_env_with(|name| std::env::var(name).ok())
	}

	/// Override fields from an arbitrary variable lookup
	pub fn apply_env_with<F>(&mut self, lookup: F) -> StResult<()>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(table_name) = lookup(ENV_TABLE_NAME) {
			self.table_name = table_name;
		}
		if let Some(prefix) = lookup(ENV_CACHE_PREFIX) {
			self.cache.prefix = prefix;
		}
		if let Some(ttl) = lookup(ENV_CACHE_TTL) {
			let ttl = ttl.trim();
			self.cache.ttl = if ttl.is_empty() || ttl.eq_ignore_ascii_case("null") {
				None
			} else {
				Some(ttl.parse().map_err(|_| {
					Error::ConfigError(format!("{} must be an integer, got '{}'", ENV_CACHE_TTL, ttl))
				})?)
			};
		}
		if let Some(timezone) = lookup(ENV_TIMEZONE) {
			self.timezone = timezone;
		}
		Ok(())
	}

	/// Cache lifetime, `None` meaning forever
	pub fn cache_ttl(&self) -> Option<Duration> {
		match self.cache.ttl {
			Some(minutes) if minutes > 0 => Some(
				minutes.unsigned_abs().checked_mul(60).map_or(Duration::MAX, Duration::from_secs),
			),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	#[test]
	fn test_defaults() {
		let config = SettingsConfig::default();
		assert_eq!(config.table_name, "settings");
		assert_eq!(config.timezone, "UTC");
		assert_eq!(config.cache.prefix, "settings");
		assert_eq!(config.cache.ttl, None);
		assert_eq!(config.cache_ttl(), None);
	}

	#[test]
	fn test_yaml_partial() {
		let config = SettingsConfig::from_yaml_str("cache:\n  ttl: 15\n").unwrap();
		assert_eq!(config.table_name, "settings");
		assert_eq!(config.cache.prefix, "settings");
		assert_eq!(config.cache_ttl(), Some(Duration::from_secs(900)));
	}

	#[test]
	fn test_yaml_empty_is_default() {
		assert_eq!(SettingsConfig::from_yaml_str("").unwrap(), SettingsConfig::default());
	}

	#[test]
	fn test_yaml_invalid() {
		let res = SettingsConfig::from_yaml_str("cache: [1, 2");
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_non_positive_ttl_is_forever() {
		let mut config = SettingsConfig::default();
		config.cache.ttl = Some(0);
		assert_eq!(config.cache_ttl(), None);
		config.cache.ttl = Some(-5);
		assert_eq!(config.cache_ttl(), None);
	}

	#[test]
	fn test_huge_ttl_saturates() {
		let mut config = SettingsConfig::default();
		config.cache.ttl = Some(i64::MAX);
		assert_eq!(config.cache_ttl(), Some(Duration::MAX));
	}

	#[test]
	fn test_env_overrides() {
		let vars: HashMap<&str, &str> = HashMap::from([
			(ENV_TABLE_NAME, "app_settings"),
			(ENV_CACHE_PREFIX, "cfg"),
			(ENV_CACHE_TTL, "2"),
			(ENV_TIMEZONE, "Europe/Budapest"),
		]);
		let mut config = SettingsConfig::default();
		config.apply_env_with(|name| vars.get(name).map(|v| (*v).to_string())).unwrap();

		assert_eq!(config.table_name, "app_settings");
		assert_eq!(config.cache.prefix, "cfg");
		assert_eq!(config.cache_ttl(), Some(Duration::from_secs(120)));
		assert_eq!(config.timezone, "Europe/Budapest");
	}

	#[test]
	fn test_env_bad_ttl() {
		let mut config = SettingsConfig::default();
		let res = config.apply_env_with(|name| (name == ENV_CACHE_TTL).then(|| "soon".to_string()));
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_load_file() {
		let dir = tempfile::TempDir::new().unwrap();
		let path = dir.path().join("settings.yaml");
		std::fs::write(&path, "table_name: prefs\ncache:\n  prefix: p\n").unwrap();

		let config = SettingsConfig::load(&path).unwrap();
		assert_eq!(config.table_name, "prefs");
		assert_eq!(config.cache.prefix, "p");

		assert!(SettingsConfig::load(dir.path().join("missing.yaml")).is_err());
	}
}

// vim: ts=4
