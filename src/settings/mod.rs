//! Settings management for minic.
//!
//! Provides TOML-based configuration at `~/.minic/settings.toml` with a
//! versioned schema, environment variable interpolation, and a theme
//! preference cell layered on top.

#[cfg(feature = "tauri")]
pub mod commands;
pub mod loader;
pub mod schema;
pub mod theme;

pub use loader::{get_with_env_fallback, settings_path, SettingsManager};
pub use schema::MinicSettings;
pub use theme::{Theme, ThemeService};
