//! Settings schema definitions for minic configuration.
//!
//! All settings structs use `#[serde(default)]` to allow partial
//! configuration files. Missing fields are filled with sensible defaults.

use serde::{Deserialize, Serialize};

/// Root settings structure for minic.
///
/// Loaded from `~/.minic/settings.toml` with environment variable
/// interpolation support. Version field enables future migrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinicSettings {
    /// Schema version for migrations
    pub version: u32,

    /// Compile service configuration
    pub service: ServiceSettings,

    /// User interface preferences
    pub ui: UiSettings,

    /// Editor widget configuration
    pub editor: EditorSettings,

    /// Advanced/debug settings
    pub advanced: AdvancedSettings,
}

/// Compile service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Base URL of the compile/analyze service (supports $ENV_VAR syntax)
    pub endpoint: String,
}

/// User interface preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Theme: "dark" | "light"
    pub theme: String,
}

/// Editor widget configuration, handed through to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Font size in pixels
    pub font_size: u32,

    /// Show the minimap
    pub minimap: bool,

    /// Show line numbers
    pub line_numbers: bool,
}

/// Advanced/debug settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSettings {
    /// Log level: "error" | "warn" | "info" | "debug" | "trace"
    pub log_level: String,
}

// =============================================================================
// Default implementations
// =============================================================================

impl Default for MinicSettings {
    fn default() -> Self {
        Self {
            version: 1,
            service: ServiceSettings::default(),
            ui: UiSettings::default(),
            editor: EditorSettings::default(),
            advanced: AdvancedSettings::default(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000".to_string(),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            font_size: 14,
            minimap: false,
            line_numbers: true,
        }
    }
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
