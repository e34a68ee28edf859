//! Grouped, dot-addressed settings store.
//!
//! Settings are addressed as `group.setting[.sub.path]`. Values are stored
//! as JSON, one row per `(group, setting)`, behind a per-setting cache:
//!
//! - **Store** (`store.rs`): [`SettingStore`] reads, writes and group queries
//! - **Builder** (`builder.rs`): wiring of configuration and adapters
//! - **Cache** (`cache.rs`): in-process [`MemoryCache`] adapter
//! - **Key** (`key.rs`): dotted key parsing

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod cache;
pub mod key;
pub mod prelude;
pub mod store;

pub use builder::SettingStoreBuilder;
pub use cache::MemoryCache;
pub use key::SettingKey;
pub use store::{DEFAULT_LAST_UPDATED_FORMAT, SettingStore};

// vim: ts=4
