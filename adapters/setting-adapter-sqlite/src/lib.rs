//! SQLite persistence adapter for the settings store
//!
//! Stores settings in a single table (default name `settings`) with a
//! composite primary key on `(group, key)`. The table is created on start-up.

#![forbid(unsafe_code)]

mod schema;
mod setting;
mod utils;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use setting_types::config::DEFAULT_TABLE_NAME;
use setting_types::prelude::*;
use setting_types::setting_adapter::SettingAdapter;

#[derive(Debug)]
pub struct SettingAdapterSqlite {
	db: SqlitePool,
	table: Box<str>,
}

impl SettingAdapterSqlite {
	/// Open (or create) the database file at `path` using the default table
	pub async fn new(path: impl AsRef<Path>) -> StResult<Self> {
		Self::with_table(path, DEFAULT_TABLE_NAME).await
	}

	/// Open (or create) the database file at `path` storing settings in `table`
	pub async fn with_table(path: impl AsRef<Path>, table: &str) -> StResult<Self> {
		utils::validate_table_name(table)?;

		if let Some(parent) = path.as_ref().parent() {
			if !parent.as_os_str().is_empty() {
				tokio::fs::create_dir_all(parent).await?;
			}
		}

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| warn!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db, table)
			.await
			.inspect_err(|err| warn!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		info!("Settings table '{}' ready at {}", table, path.as_ref().display());
		Ok(Self { db, table: table.into() })
	}

	pub fn table_name(&self) -> &str {
		&self.table
	}
}

#[async_trait]
impl SettingAdapter for SettingAdapterSqlite {
	async fn read_setting(&self, group: &str, key: &str) -> StResult<Option<Box<str>>> {
		setting::read(&self.db, &self.table, group, key).await
	}

	async fn list_group(&self, group: &str) -> StResult<Vec<SettingRecord>> {
		setting::list(&self.db, &self.table, group).await
	}

	async fn upsert_setting(
		&self,
		group: &str,
		key: &str,
		value: &str,
		at: NaiveDateTime,
	) -> StResult<()> {
		setting::upsert(&self.db, &self.table, group, key, value, at).await
	}

	async fn group_last_updated_at(&self, group: &str) -> StResult<Option<Box<str>>> {
		setting::last_updated_at(&self.db, &self.table, group).await
	}
}

// vim: ts=4
