//! Client settings
//!
//! Explicit configuration for the HTTP transport, loaded from a YAML file
//! when one is present.

mod models;
mod store;

pub use models::{HttpConfig, K2hr3Settings, Settings};
pub use store::SettingsStore;
