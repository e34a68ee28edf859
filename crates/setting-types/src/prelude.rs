pub use crate::error::{Error, StResult};
pub use crate::types::SettingRecord;

pub use tracing::{debug, debug_span, error, info, info_span, warn};

// vim: ts=4
