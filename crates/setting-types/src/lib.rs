//! Shared types, adapter traits, and core utilities for the settings store.
//!
//! This crate contains the foundational types that are shared between the
//! store crate and all adapter implementations, so adapters never need to
//! depend on the store itself.

#![forbid(unsafe_code)]

pub mod cache_adapter;
pub mod config;
pub mod error;
pub mod prelude;
pub mod setting_adapter;
pub mod types;
pub mod utils;

// vim: ts=4
