//! CLI bootstrap - Initialize the shared application stack for CLI usage.
//!
//! This module provides `CliContext` which initializes the same services
//! as the Tauri GUI application, ensuring feature parity between CLI and GUI.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::runtime::{CliRuntime, MinicRuntime, RuntimeEvent};
use crate::settings::get_with_env_fallback;
use crate::state::AppState;

use super::args::Args;

/// Context for CLI execution.
///
/// This wraps the shared `AppState` but is owned rather than managed by
/// Tauri, plus the receiving end of the runtime event channel.
pub struct CliContext {
    /// Shared application state (store, controller, settings, theme)
    pub state: AppState,

    /// Event receiver for output handling
    pub event_rx: mpsc::UnboundedReceiver<RuntimeEvent>,

    /// Command-line arguments
    pub args: Args,
}

impl CliContext {
    /// Graceful shutdown.
    pub async fn shutdown(self) -> Result<()> {
        self.state.controller.teardown().await;

        if let Err(e) = self.state.runtime.shutdown().await {
            tracing::warn!("Runtime shutdown error: {}", e);
        }

        Ok(())
    }
}

/// Initialize the CLI context with all services.
///
/// This is the main entry point for CLI initialization, mirroring what
/// happens in the Tauri app's setup hook.
pub async fn initialize(args: &Args) -> Result<CliContext> {
    // Initialize logging based on verbosity
    let log_level = if args.verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("minic={}", log_level).parse()?),
        )
        .try_init();

    // Create event channel and CLI runtime
    let (event_tx, event_rx) = mpsc::unbounded_channel::<RuntimeEvent>();
    let runtime: Arc<dyn MinicRuntime> = Arc::new(CliRuntime::new(event_tx));

    // Endpoint priority: --endpoint flag > MINIC_SERVICE_URL > settings
    let endpoint_override = get_with_env_fallback(&args.endpoint, &["MINIC_SERVICE_URL"], None);

    let state = AppState::initialize(runtime, endpoint_override).await?;

    if args.verbose {
        eprintln!(
            "[cli] Settings file: {}",
            state.settings_manager.path().display()
        );
        eprintln!("[cli] Interactive: {}", state.runtime.is_interactive());
    }

    Ok(CliContext {
        state,
        event_rx,
        args: args.clone(),
    })
}
