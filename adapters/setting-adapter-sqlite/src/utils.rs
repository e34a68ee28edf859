//! Utility functions for database operations

use setting_types::prelude::*;

/// Log database errors
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Check that a configured table name is a plain SQL identifier
///
/// The name is spliced into statements, so only ASCII letters, digits and
/// underscores are allowed, not starting with a digit.
pub(crate) fn validate_table_name(name: &str) -> StResult<()> {
	let mut chars = name.chars();
	let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

	if valid {
		Ok(())
	} else {
		Err(Error::ValidationError(format!("Invalid settings table name '{}'", name)))
	}
}


// vim: ts=4
