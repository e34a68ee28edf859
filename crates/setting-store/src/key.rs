//! Dotted key parsing

use crate::prelude::*;

/// A parsed `group.setting[.sub.path]` key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingKey<'a> {
	pub group: &'a str,
	pub setting: &'a str,
	/// Everything after the setting segment. `Some("")` for a trailing dot,
	/// which addresses a missing child.
	pub sub_key: Option<&'a str>,
}

impl<'a> SettingKey<'a> {
	pub fn parse(key: &'a str) -> StResult<Self> {
		let mut parts = key.splitn(3, '.');
		let group = parts.next().unwrap_or_default();
		let setting = parts.next().unwrap_or_default();
		let sub_key = parts.next();

		if group.is_empty() {
			return Err(Error::ValidationError(format!("Setting key '{}' has no group", key)));
		}
		if setting.is_empty() {
			return Err(Error::ValidationError(format!(
				"Setting key '{}' has no setting name (expected 'group.setting')",
				key
			)));
		}

		Ok(Self { group, setting, sub_key })
	}

	/// Path into the cached `{setting: value}` map
	pub fn lookup_path(&self) -> String {
		match self.sub_key {
			Some(sub_key) => format!("{}.{}", self.setting, sub_key),
			None => self.setting.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_simple() {
		let key = SettingKey::parse("general.brand_name").unwrap();
		assert_eq!(key.group, "general");
		assert_eq!(key.setting, "brand_name");
		assert_eq!(key.sub_key, None);
		assert_eq!(key.lookup_path(), "brand_name");
	}

	#[test]
	fn test_parse_sub_key() {
		let key = SettingKey::parse("mail.smtp.auth.user").unwrap();
		assert_eq!(key.group, "mail");
		assert_eq!(key.setting, "smtp");
		assert_eq!(key.sub_key, Some("auth.user"));
		assert_eq!(key.lookup_path(), "smtp.auth.user");
	}

	#[test]
	fn test_parse_trailing_dot() {
		let key = SettingKey::parse("general.limits.").unwrap();
		assert_eq!(key.setting, "limits");
		assert_eq!(key.sub_key, Some(""));
		assert_eq!(key.lookup_path(), "limits.");
	}

	#[test]
	fn test_parse_rejects_incomplete() {
		assert!(SettingKey::parse("general").is_err());
		assert!(SettingKey::parse("general.").is_err());
		assert!(SettingKey::parse(".brand_name").is_err());
		assert!(SettingKey::parse("").is_err());
	}
}

// vim: ts=4
