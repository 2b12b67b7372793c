//! Utils - Formatting and Config Persistence

pub mod config_store;
pub mod format;
