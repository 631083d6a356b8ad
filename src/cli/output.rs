//! CLI output handling - Event receiver loop.
//!
//! Receives events from the workflow controller via the runtime channel and
//! renders them based on output mode (terminal, JSON, or quiet).

use std::io::{self, Write};

use anyhow::Result;
use tokio::sync::mpsc;

use crate::runtime::RuntimeEvent;
use crate::session::{CompileStatus, SessionEvent};

/// Run the event loop until the in-flight run settles.
///
/// Consumes the event receiver and processes events until it sees a
/// `RunCompleted` or `RunFailed` event, returning the final status. Returns
/// `None` if the channel closes without a terminal event.
pub async fn run_event_loop(
    mut event_rx: mpsc::UnboundedReceiver<RuntimeEvent>,
    json_mode: bool,
    quiet_mode: bool,
) -> Result<Option<CompileStatus>> {
    while let Some(event) = event_rx.recv().await {
        match event {
            RuntimeEvent::Session(session_event) => {
                if let Some(status) = handle_session_event(&session_event, json_mode, quiet_mode)? {
                    return Ok(Some(status));
                }
            }
            RuntimeEvent::Custom { name, payload } => {
                if json_mode {
                    let json = serde_json::json!({
                        "type": "custom",
                        "name": name,
                        "payload": payload
                    });
                    println!("{}", json);
                }
            }
        }
    }

    Ok(None)
}

/// Handle a session event, returning the final status when the run settles.
fn handle_session_event(
    event: &SessionEvent,
    json_mode: bool,
    quiet_mode: bool,
) -> Result<Option<CompileStatus>> {
    if json_mode {
        // JSON mode: output each event as a JSON line
        println!("{}", serde_json::to_string(event)?);
        io::stdout().flush()?;
    }

    match event {
        SessionEvent::RunStarted { request_id } => {
            if !json_mode && !quiet_mode {
                eprintln!("[run] submitted ({})", request_id);
            }
            Ok(None)
        }
        SessionEvent::RunCompleted {
            status,
            duration_ms,
            ..
        } => {
            if !json_mode && !quiet_mode {
                eprintln!("[run] {} in {}ms", status.label(), duration_ms);
            }
            Ok(Some(*status))
        }
        SessionEvent::RunFailed { message, .. } => {
            if !json_mode {
                eprintln!("Error: {}", message);
            }
            Ok(Some(CompileStatus::Error))
        }
        SessionEvent::CorrectionApplied => {
            if !json_mode && !quiet_mode {
                eprintln!("[fix] correction applied to source buffer");
            }
            Ok(None)
        }
        SessionEvent::StateChanged { .. } => Ok(None),
    }
}
