// Runtime abstraction for CLI vs Tauri environments
//
// The `tauri` and `cli` features are mutually exclusive. Each provides a
// different implementation of the MinicRuntime trait for their respective
// environments.

// Compile-time guard: ensure tauri and cli features are mutually exclusive
#[cfg(all(feature = "tauri", feature = "cli"))]
compile_error!("Features 'tauri' and 'cli' are mutually exclusive. Use --features tauri OR --features cli, not both.");

use std::any::Any;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::session::SessionEvent;

#[cfg(feature = "cli")]
mod cli;
#[cfg(feature = "tauri")]
mod tauri;

#[cfg(feature = "cli")]
pub use cli::CliRuntime;
#[cfg(feature = "tauri")]
pub use tauri::TauriRuntime;

/// Runtime-specific errors
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Failed to emit event: {0}")]
    EmitFailed(String),

    #[error("Event receiver closed")]
    ReceiverClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Events that can be emitted to the frontend/CLI
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum RuntimeEvent {
    /// Compile session event
    Session(Box<SessionEvent>),

    /// Generic extensibility (theme changes, settings reloads)
    Custom {
        name: String,
        payload: serde_json::Value,
    },
}

/// Runtime abstraction for Tauri vs CLI vs other environments
///
/// This trait decouples the workflow controller from the delivery of its
/// state updates: the Tauri runtime forwards events to the webview, the CLI
/// runtime feeds them into the output loop, and tests capture them on a
/// channel.
///
/// # Object Safety
/// This trait is object-safe and intended to be used as
/// `Arc<dyn MinicRuntime>`.
#[async_trait]
pub trait MinicRuntime: Send + Sync + 'static {
    /// Emit an event to the frontend/output
    ///
    /// # Errors
    /// Returns `RuntimeError::EmitFailed` if the event cannot be delivered
    /// (e.g., receiver dropped).
    fn emit(&self, event: RuntimeEvent) -> Result<(), RuntimeError>;

    /// Whether a user is present to interact with
    fn is_interactive(&self) -> bool;

    /// Release runtime resources on shutdown
    async fn shutdown(&self) -> Result<(), RuntimeError>;

    /// Downcast support for runtime-specific access
    fn as_any(&self) -> &dyn Any;
}
