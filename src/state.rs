use std::sync::Arc;

use anyhow::{Context, Result};

use crate::compile::CompileClient;
use crate::runtime::MinicRuntime;
use crate::session::{SessionStore, WorkflowController};
use crate::settings::{SettingsManager, ThemeService};

/// Shared application state behind every front end.
///
/// The Tauri shell manages one of these; the CLI owns one directly. Both go
/// through the same controller, so the workflow semantics do not depend on
/// which front end is driving.
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub controller: Arc<WorkflowController>,
    pub settings_manager: Arc<SettingsManager>,
    pub theme: Arc<ThemeService>,
    pub runtime: Arc<dyn MinicRuntime>,
}

impl AppState {
    /// Wire up settings, the session store, and the workflow controller.
    ///
    /// `endpoint_override` takes precedence over the persisted
    /// `service.endpoint` setting.
    pub async fn initialize(
        runtime: Arc<dyn MinicRuntime>,
        endpoint_override: Option<String>,
    ) -> Result<Self> {
        let settings_manager = Arc::new(
            SettingsManager::new()
                .await
                .context("Failed to initialize settings manager")?,
        );

        if let Err(e) = settings_manager.ensure_settings_file().await {
            tracing::warn!("Failed to create settings template: {}", e);
        }

        let settings = settings_manager.get().await;
        let endpoint = endpoint_override.unwrap_or(settings.service.endpoint);

        let client = CompileClient::new(&endpoint)
            .with_context(|| format!("Invalid compile service endpoint '{endpoint}'"))?;

        let theme = Arc::new(ThemeService::new(settings_manager.clone()).await);

        let store = Arc::new(SessionStore::new());
        let controller = Arc::new(WorkflowController::new(
            store.clone(),
            client,
            runtime.clone(),
        ));

        Ok(Self {
            store,
            controller,
            settings_manager,
            theme,
            runtime,
        })
    }
}
