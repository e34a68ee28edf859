//! Error type shared by the store and its adapters

use std::fmt;

pub type StResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	DbError,
	/// A value could not be encoded as JSON
	Serialization(serde_json::Error),
	ValidationError(String),
	ConfigError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::DbError => write!(f, "database error"),
			Error::Serialization(err) => write!(f, "Unable to serialize value to JSON: {}", err),
			Error::ValidationError(msg) => write!(f, "Validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "Internal error: {}", msg),
			Error::Io(err) => write!(f, "I/O error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Serialization(err) => Some(err),
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_yaml::Error> for Error {
	fn from(err: serde_yaml::Error) -> Self {
		Self::ConfigError(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::error::Error as _;

	#[test]
	fn test_serialization_error_keeps_cause() {
		let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		let err = Error::Serialization(cause);

		assert!(err.to_string().starts_with("Unable to serialize value to JSON"));
		assert!(err.source().is_some());
	}

	#[test]
	fn test_plain_variants_have_no_source() {
		assert!(Error::NotFound.source().is_none());
		assert!(Error::DbError.source().is_none());
		assert_eq!(Error::ValidationError("bad key".into()).to_string(), "Validation error: bad key");
	}
}

// vim: ts=4
