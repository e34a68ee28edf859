//! Persistence adapter trait for the settings table

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::fmt::Debug;

use crate::prelude::*;

/// Storage backend of the settings store
///
/// Values cross this boundary as raw JSON text. Implementations must keep at
/// most one row per `(group, key)` and must not cache.
#[async_trait]
pub trait SettingAdapter: Debug + Send + Sync {
	/// Read the raw JSON value of one setting, `None` if there is no row
	async fn read_setting(&self, group: &str, key: &str) -> StResult<Option<Box<str>>>;

	/// List every row of a group in retrieval order
	async fn list_group(&self, group: &str) -> StResult<Vec<SettingRecord>>;

	/// Insert or replace the value of `(group, key)`
	///
	/// `at` is the write time in the application timezone. A new row gets it
	/// as both `created_at` and `updated_at`; an existing row only updates
	/// `value` and `updated_at`.
	async fn upsert_setting(
		&self,
		group: &str,
		key: &str,
		value: &str,
		at: NaiveDateTime,
	) -> StResult<()>;

	/// Latest `updated_at` of a group as stored, `None` if the group is empty
	async fn group_last_updated_at(&self, group: &str) -> StResult<Option<Box<str>>>;
}

// vim: ts=4
