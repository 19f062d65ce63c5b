//! rembees-config
//!
//! Persistent preferences that sit outside the finance store: where data
//! lives, first-run behaviour, and logging defaults.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
