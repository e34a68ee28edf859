//! Common types used throughout the settings store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Wall-clock format of the `created_at` / `updated_at` columns
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One persisted row of the settings table
///
/// `value` is the raw JSON text as stored; decoding is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingRecord {
	pub group: Box<str>,
	pub key: Box<str>,
	pub value: Option<Box<str>>,
	#[serde(rename = "createdAt")]
	pub created_at: Option<Box<str>>,
	#[serde(rename = "updatedAt")]
	pub updated_at: Option<Box<str>>,
}

/// Render a timestamp the way it is written to the settings table
pub fn format_datetime(at: &NaiveDateTime) -> String {
	at.format(DATETIME_FORMAT).to_string()
}

/// Parse a timestamp read back from the settings table
///
/// Accepts the canonical column format, an optional fractional part, and
/// the ISO `T` separator some drivers produce.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
	let s = s.trim();
	NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
		.or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
		.or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
		.ok()
}


// vim: ts=4
