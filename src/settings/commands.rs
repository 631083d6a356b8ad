//! Tauri commands for settings and theme management.

use tauri::State;

use crate::error::{MinicError, Result};
use crate::runtime::RuntimeEvent;
use crate::state::AppState;

use super::schema::MinicSettings;
use super::theme::Theme;

/// Get all settings.
#[tauri::command]
pub async fn get_settings(state: State<'_, AppState>) -> Result<MinicSettings> {
    Ok(state.settings_manager.get().await)
}

/// Update settings (replaces entire settings object and persists).
#[tauri::command]
pub async fn update_settings(
    state: State<'_, AppState>,
    settings: MinicSettings,
) -> Result<()> {
    state
        .settings_manager
        .update(settings)
        .await
        .map_err(|e| MinicError::Settings(e.to_string()))
}

/// Get a specific setting by dot-notation key (e.g., "service.endpoint").
#[tauri::command]
pub async fn get_setting(
    state: State<'_, AppState>,
    key: String,
) -> Result<serde_json::Value> {
    state
        .settings_manager
        .get_value(&key)
        .await
        .map_err(|e| MinicError::Settings(e.to_string()))
}

/// Set a specific setting by dot-notation key.
#[tauri::command]
pub async fn set_setting(
    state: State<'_, AppState>,
    key: String,
    value: serde_json::Value,
) -> Result<()> {
    state
        .settings_manager
        .set_value(&key, value)
        .await
        .map_err(|e| MinicError::Settings(e.to_string()))
}

/// Reset all settings to defaults.
#[tauri::command]
pub async fn reset_settings(state: State<'_, AppState>) -> Result<()> {
    state
        .settings_manager
        .reset()
        .await
        .map_err(|e| MinicError::Settings(e.to_string()))
}

/// Reload settings from disk, discarding unsaved in-memory changes.
#[tauri::command]
pub async fn reload_settings(state: State<'_, AppState>) -> Result<MinicSettings> {
    state
        .settings_manager
        .reload()
        .await
        .map_err(|e| MinicError::Settings(e.to_string()))?;
    Ok(state.settings_manager.get().await)
}

/// Get the settings file path (for display in the UI).
#[tauri::command]
pub async fn get_settings_path(state: State<'_, AppState>) -> Result<String> {
    Ok(state.settings_manager.path().display().to_string())
}

/// Get the current theme.
#[tauri::command]
pub async fn get_theme(state: State<'_, AppState>) -> Result<Theme> {
    Ok(state.theme.current())
}

/// Set the theme and broadcast the change to the frontend.
#[tauri::command]
pub async fn set_theme(state: State<'_, AppState>, theme: Theme) -> Result<()> {
    state.theme.set(theme).await.map_err(|e| MinicError::Settings(e.to_string()))?;
    notify_theme_changed(&state, theme);
    Ok(())
}

/// Toggle between light and dark, returning the new theme.
#[tauri::command]
pub async fn toggle_theme(state: State<'_, AppState>) -> Result<Theme> {
    let theme = state.theme.toggle().await.map_err(|e| MinicError::Settings(e.to_string()))?;
    notify_theme_changed(&state, theme);
    Ok(theme)
}

fn notify_theme_changed(state: &State<'_, AppState>, theme: Theme) {
    let event = RuntimeEvent::Custom {
        name: "theme-changed".to_string(),
        payload: serde_json::json!({ "theme": theme }),
    };
    if let Err(err) = state.runtime.emit(event) {
        tracing::debug!("dropping theme-changed event: {err}");
    }
}
