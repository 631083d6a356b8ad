//! Theme preference cell.
//!
//! Holds the current editor theme in memory, persists changes through the
//! settings manager, and broadcasts updates over a watch channel so every
//! consumer sees the same value.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::loader::SettingsManager;

/// Editor color theme. Exactly two values; anything unrecognized in the
/// settings file falls back to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// The opposite theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(()),
        }
    }
}

/// Shared theme state backed by the settings file.
pub struct ThemeService {
    manager: Arc<SettingsManager>,
    tx: watch::Sender<Theme>,
}

impl ThemeService {
    /// Seed the service from the persisted `ui.theme` value.
    pub async fn new(manager: Arc<SettingsManager>) -> Self {
        let initial = manager
            .get()
            .await
            .ui
            .theme
            .parse()
            .unwrap_or_default();
        let (tx, _rx) = watch::channel(initial);

        Self { manager, tx }
    }

    /// Current theme.
    pub fn current(&self) -> Theme {
        *self.tx.borrow()
    }

    /// Subscribe to theme changes.
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.tx.subscribe()
    }

    /// Set the theme, persisting it and notifying subscribers.
    pub async fn set(&self, theme: Theme) -> Result<()> {
        let mut settings = self.manager.get().await;
        settings.ui.theme = theme.as_str().to_string();
        self.manager.update(settings).await?;

        self.tx.send_replace(theme);
        tracing::debug!(theme = %theme, "Theme updated");
        Ok(())
    }

    /// Flip between light and dark, returning the new theme.
    pub async fn toggle(&self) -> Result<Theme> {
        let next = self.current().toggled();
        self.set(next).await?;
        Ok(next)
    }
}
