//! # Repository Module
//!
//! ```text
//! CLI command
//!      │  db.settings().load_overrides()
//!      ▼
//! SettingsRepository
//! ├── get / set / remove         single key
//! ├── load_overrides             every key, lists decoded
//! ├── save_overrides             every key, one transaction
//! ├── reset                      delete everything
//! └── last_saved_at
//!      │
//!      ▼
//! settings_overrides table
//! ```
//!
//! - [`settings::SettingsRepository`] - admin override store

pub mod settings;
