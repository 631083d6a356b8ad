use std::any::Any;

use async_trait::async_trait;
use tauri::{AppHandle, Emitter};

use super::{MinicRuntime, RuntimeError, RuntimeEvent};

pub struct TauriRuntime {
    app_handle: AppHandle,
}

impl TauriRuntime {
    pub fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

#[async_trait]
impl MinicRuntime for TauriRuntime {
    fn emit(&self, event: RuntimeEvent) -> Result<(), RuntimeError> {
        match &event {
            RuntimeEvent::Session(session_event) => {
                // Session events go to the session-event channel
                self.app_handle
                    .emit("session-event", session_event)
                    .map_err(|e| RuntimeError::EmitFailed(e.to_string()))?;
            }
            RuntimeEvent::Custom { name, payload } => {
                // Custom events use the specified name
                self.app_handle
                    .emit(name, payload)
                    .map_err(|e| RuntimeError::EmitFailed(e.to_string()))?;
            }
        }
        Ok(())
    }

    fn is_interactive(&self) -> bool {
        true // Tauri always has UI
    }

    async fn shutdown(&self) -> Result<(), RuntimeError> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
