pub use setting_types::prelude::*;

// vim: ts=4
