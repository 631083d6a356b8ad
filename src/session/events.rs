use serde::Serialize;

use super::status::CompileStatus;
use super::store::SessionSnapshot;

/// Session events for the frontend.
///
/// Every controlled transition of the session store emits a `StateChanged`
/// carrying a full snapshot; the UI re-renders from the store rather than
/// patching individual panes.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A run was submitted to the compile service.
    RunStarted { request_id: String },

    /// The service responded and the result was applied.
    RunCompleted {
        request_id: String,
        status: CompileStatus,
        duration_ms: u64,
    },

    /// The service could not be reached; the failure was converted to state.
    RunFailed {
        request_id: String,
        message: String,
    },

    /// The offered correction replaced the source buffer.
    CorrectionApplied,

    /// The store changed; render from this snapshot.
    StateChanged { snapshot: SessionSnapshot },
}
