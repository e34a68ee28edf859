//! Settings table access
//!
//! Values are stored as JSON text, one row per `(group, key)`.

use chrono::NaiveDateTime;
use sqlx::{Row, SqlitePool};

use setting_types::prelude::*;
use setting_types::types::format_datetime;

use crate::utils::inspect;

/// Read the raw value of a single setting
pub(crate) async fn read(
	db: &SqlitePool,
	table: &str,
	group: &str,
	key: &str,
) -> StResult<Option<Box<str>>> {
	let row = sqlx::query(&format!(
		"SELECT value FROM \"{table}\" WHERE \"group\" = ?1 AND \"key\" = ?2"
	))
	.bind(group)
	.bind(key)
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	match row {
		Some(row) => {
			let value: Option<String> =
				row.try_get("value").inspect_err(inspect).map_err(|_| Error::DbError)?;
			Ok(value.map(String::into_boxed_str))
		}
		None => Ok(None),
	}
}

/// List all rows of a group in insertion order
pub(crate) async fn list(
	db: &SqlitePool,
	table: &str,
	group: &str,
) -> StResult<Vec<SettingRecord>> {
	let rows = sqlx::query(&format!(
		"SELECT \"group\", \"key\", value, created_at, updated_at FROM \"{table}\"
		WHERE \"group\" = ?1 ORDER BY rowid"
	))
	.bind(group)
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	rows.iter()
		.map(|row| -> Result<SettingRecord, sqlx::Error> {
			Ok(SettingRecord {
				group: row.try_get::<String, _>("group")?.into(),
				key: row.try_get::<String, _>("key")?.into(),
				value: row.try_get::<Option<String>, _>("value")?.map(Into::into),
				created_at: row.try_get::<Option<String>, _>("created_at")?.map(Into::into),
				updated_at: row.try_get::<Option<String>, _>("updated_at")?.map(Into::into),
			})
		})
		.collect::<Result<Vec<_>, _>>()
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)
}

/// Insert a setting or replace its value
///
/// `created_at` is only written for new rows.
pub(crate) async fn upsert(
	db: &SqlitePool,
	table: &str,
	group: &str,
	key: &str,
	value: &str,
	at: NaiveDateTime,
) -> StResult<()> {
	sqlx::query(&format!(
		"INSERT INTO \"{table}\" (\"group\", \"key\", value, created_at, updated_at)
		VALUES (?1, ?2, ?3, ?4, ?4)
		ON CONFLICT(\"group\", \"key\") DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"
	))
	.bind(group)
	.bind(key)
	.bind(value)
	.bind(format_datetime(&at))
	.execute(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	Ok(())
}

/// Latest `updated_at` of a group
pub(crate) async fn last_updated_at(
	db: &SqlitePool,
	table: &str,
	group: &str,
) -> StResult<Option<Box<str>>> {
	let row = sqlx::query(&format!(
		"SELECT MAX(updated_at) AS updated_at FROM \"{table}\" WHERE \"group\" = ?1"
	))
	.bind(group)
	.fetch_one(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	let updated_at: Option<String> =
		row.try_get("updated_at").inspect_err(inspect).map_err(|_| Error::DbError)?;
	Ok(updated_at.map(String::into_boxed_str))
}

// vim: ts=4
