//! Workflow controller: drives one edit-run-review-accept cycle.
//!
//! The controller owns the sequencing around the session store: it guards
//! against re-entrant runs, submits the source to the compile service,
//! interprets the response (or its failure) into a [`RunOutcome`], and
//! exposes the accept-correction action. Every failure path terminates in a
//! well-defined, re-runnable session state - nothing is thrown past `run()`.

use std::sync::Arc;
use std::time::Instant;

use similar::TextDiff;

use crate::compile::{CompileClient, CompileResponse, CompileServiceError};
use crate::runtime::{MinicRuntime, RuntimeEvent};

use super::events::SessionEvent;
use super::status::CompileStatus;
use super::store::{self, RunOutcome, SessionStore};

pub struct WorkflowController {
    store: Arc<SessionStore>,
    client: CompileClient,
    runtime: Arc<dyn MinicRuntime>,
}

impl WorkflowController {
    pub fn new(
        store: Arc<SessionStore>,
        client: CompileClient,
        runtime: Arc<dyn MinicRuntime>,
    ) -> Self {
        Self {
            store,
            client,
            runtime,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Submit the current source buffer to the compile service and apply the
    /// result. Silent no-op when a run is already in flight or the session
    /// has been torn down.
    ///
    /// The single suspension point is the await around the network call; the
    /// result (or the converted transport failure) lands in the store unless
    /// the session was torn down in the meantime.
    pub async fn run(&self) {
        let Some((seq, source)) = self.store.begin_run().await else {
            tracing::debug!("run ignored: request already in flight or session torn down");
            return;
        };

        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(request_id = %request_id, seq, "submitting source to compile service");
        self.emit(SessionEvent::RunStarted {
            request_id: request_id.clone(),
        });
        self.emit_state().await;

        let started = Instant::now();
        let result = self.client.compile(&source).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                let status = CompileStatus::from_wire(response.status.as_deref());
                let applied = self
                    .store
                    .settle(seq, |current| success_outcome(response, current))
                    .await;
                if !applied {
                    tracing::debug!(request_id = %request_id, "discarding stale compile result");
                    return;
                }

                tracing::info!(request_id = %request_id, ?status, duration_ms, "run completed");
                self.emit(SessionEvent::RunCompleted {
                    request_id,
                    status,
                    duration_ms,
                });
            }
            Err(err) => {
                let message = err.to_string();
                let applied = self
                    .store
                    .settle(seq, |_| failure_outcome(&err, self.client.endpoint().as_str()))
                    .await;
                if !applied {
                    tracing::debug!(request_id = %request_id, "discarding stale transport failure");
                    return;
                }

                tracing::warn!(request_id = %request_id, error = %message, "compile service unreachable");
                self.emit(SessionEvent::RunFailed {
                    request_id,
                    message,
                });
            }
        }
        self.emit_state().await;
    }

    /// Replace the source buffer with the offered correction.
    ///
    /// Silent no-op when no real suggestion is on offer (the displayed text
    /// is a placeholder or the "no corrections needed" affirmation). Returns
    /// whether the correction was applied. Does not trigger a run.
    pub async fn accept_correction(&self) -> bool {
        if !self.store.apply_correction().await {
            tracing::debug!("accept_correction ignored: no real suggestion on offer");
            return false;
        }

        tracing::info!("correction accepted into source buffer");
        self.emit(SessionEvent::CorrectionApplied);
        self.emit_state().await;
        true
    }

    /// Tear the session down. Any in-flight result is discarded on arrival.
    pub async fn teardown(&self) {
        self.store.teardown().await;
        tracing::debug!("session torn down");
    }

    fn emit(&self, event: SessionEvent) {
        if let Err(err) = self.runtime.emit(RuntimeEvent::Session(Box::new(event))) {
            tracing::debug!("dropping session event: {err}");
        }
    }

    async fn emit_state(&self) {
        let snapshot = self.store.snapshot().await;
        self.emit(SessionEvent::StateChanged { snapshot });
    }
}

/// Interpret a 2xx response against the source buffer current at arrival.
///
/// Missing or empty output fields fall back to their fixed placeholders,
/// each independently of the others. The correction policy compares trimmed
/// texts: a non-empty suggestion that differs from the current buffer is
/// offered; otherwise the pane shows the affirmation (on success) or the
/// no-correction placeholder.
fn success_outcome(response: CompileResponse, current_source: &str) -> RunOutcome {
    let status = CompileStatus::from_wire(response.status.as_deref());

    let corrected = response
        .corrected_code
        .as_deref()
        .map(str::trim)
        .unwrap_or("");

    let (correction_offered, corrected_display, correction_diff) =
        if !corrected.is_empty() && corrected != current_source.trim() {
            let diff = TextDiff::from_lines(current_source, corrected)
                .unified_diff()
                .header("current", "suggested")
                .to_string();
            (true, corrected.to_string(), Some(diff))
        } else if status.is_success() {
            (false, store::NO_CORRECTION_NEEDED.to_string(), None)
        } else {
            (false, store::NO_CORRECTION_AVAILABLE.to_string(), None)
        };

    RunOutcome {
        compiler_output: field_or(response.compiler_output, store::NO_COMPILER_OUTPUT),
        program_output: field_or(response.program_output, store::NO_PROGRAM_OUTPUT),
        critique: field_or(response.llm_feedback, store::NO_FEEDBACK),
        corrected_display,
        correction_diff,
        correction_offered,
        status,
    }
}

/// Convert a transport/protocol failure into session state.
fn failure_outcome(err: &CompileServiceError, endpoint: &str) -> RunOutcome {
    RunOutcome {
        compiler_output: format!(
            "Connection error: {err}\n\nMake sure the compile service is running at {endpoint}"
        ),
        program_output: String::new(),
        critique: store::SERVICE_UNREACHABLE.to_string(),
        corrected_display: String::new(),
        correction_diff: None,
        correction_offered: false,
        status: CompileStatus::Error,
    }
}

fn field_or(value: Option<String>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => placeholder.to_string(),
    }
}
