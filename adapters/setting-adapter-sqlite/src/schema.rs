//! Database schema initialization
//!
//! Creates the settings table and its indexes if they do not exist yet.

use sqlx::SqlitePool;

/// Initialize the settings table under the given (validated) name
pub(crate) async fn init_db(db: &SqlitePool, table: &str) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	sqlx::query(&format!(
		"CREATE TABLE IF NOT EXISTS \"{table}\" (
		\"group\" text NOT NULL,
		\"key\" text NOT NULL,
		value text,
		created_at text,
		updated_at text,
		PRIMARY KEY(\"group\", \"key\")
	)"
	))
	.execute(&mut *tx)
	.await?;

	sqlx::query(&format!(
		"CREATE INDEX IF NOT EXISTS \"idx_{table}_group_updated\" ON \"{table}\"(\"group\", updated_at)"
	))
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;
	Ok(())
}

// vim: ts=4
