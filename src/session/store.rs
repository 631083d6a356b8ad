//! Session State Store.
//!
//! Holds the current source buffer, the three result panes, the classified
//! status, and the in-flight bookkeeping for one compile/analyze session.
//! All mutation beyond direct source edits goes through the controlled
//! transitions below, which the `WorkflowController` drives.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use super::status::CompileStatus;

/// Sample program every new session starts with.
pub const DEFAULT_SOURCE: &str = "#include <stdio.h>\nint main() {\n  printf(\"Hello, World!\\n\");\n  return 0;\n}";

/// Transient pane texts while a run is in flight.
pub const COMPILING: &str = "Compiling...";
pub const AWAITING_COMPILATION: &str = "Waiting for compilation...";
pub const ANALYZING: &str = "Analyzing code...";

/// Fallback pane texts for absent or empty response fields.
pub const NO_COMPILER_OUTPUT: &str = "// No compiler output";
pub const NO_PROGRAM_OUTPUT: &str = "// No program output";
pub const NO_FEEDBACK: &str = "// No feedback available";

/// Corrected-code pane texts when no real suggestion is on offer.
pub const NO_CORRECTION_AVAILABLE: &str = "// No corrected code available";
pub const NO_CORRECTION_NEEDED: &str = "No corrections needed - code is already correct.";

/// Critique texts for the two non-response transitions.
pub const SERVICE_UNREACHABLE: &str = "Unable to reach the compile service";
pub const CORRECTION_APPLIED: &str =
    "Code replaced. Run again to verify the corrected version.";

/// The settled result of one attempt, as applied to the store.
///
/// Built by the workflow controller for both the success and the
/// transport-failure path; the store applies it atomically.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub compiler_output: String,
    pub program_output: String,
    pub critique: String,
    pub corrected_display: String,
    pub correction_diff: Option<String>,
    pub correction_offered: bool,
    pub status: CompileStatus,
}

/// Read-only view of the session for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub source: String,
    pub compiler_output: String,
    pub program_output: String,
    pub critique: String,
    pub corrected_code: String,
    pub correction_diff: Option<String>,
    pub correction_offered: bool,
    pub status: CompileStatus,
    pub status_label: &'static str,
    pub running: bool,
    pub last_run_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct SessionData {
    source: String,
    compiler_output: String,
    program_output: String,
    critique: String,
    corrected_display: String,
    correction_diff: Option<String>,
    correction_offered: bool,
    status: CompileStatus,
    running: bool,
    /// Sequence number of the most recently issued request.
    issued_seq: u64,
    /// Cleared on teardown; a dead store discards late-arriving results.
    live: bool,
    last_run_at: Option<DateTime<Utc>>,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            compiler_output: String::new(),
            program_output: String::new(),
            critique: String::new(),
            corrected_display: String::new(),
            correction_diff: None,
            correction_offered: false,
            status: CompileStatus::Unknown,
            running: false,
            issued_seq: 0,
            live: true,
            last_run_at: None,
        }
    }
}

/// Shared session state for one editor session.
///
/// Created once per session with the sample program; destroyed with it.
/// Nothing is persisted across restarts.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<SessionData>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current source buffer.
    pub async fn source(&self) -> String {
        self.inner.read().await.source.clone()
    }

    /// Replace the source buffer wholesale.
    ///
    /// Direct edits are allowed at any time, including while a run is in
    /// flight. They do not touch the last result or the status; the pending
    /// request's eventual result still applies to whatever buffer is current
    /// at arrival time.
    pub async fn set_source(&self, source: String) {
        self.inner.write().await.source = source;
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let data = self.inner.read().await;
        SessionSnapshot {
            source: data.source.clone(),
            compiler_output: data.compiler_output.clone(),
            program_output: data.program_output.clone(),
            critique: data.critique.clone(),
            corrected_code: data.corrected_display.clone(),
            correction_diff: data.correction_diff.clone(),
            correction_offered: data.correction_offered,
            status: data.status,
            status_label: data.status.label(),
            running: data.running,
            last_run_at: data.last_run_at,
        }
    }

    pub async fn is_running(&self) -> bool {
        self.inner.read().await.running
    }

    /// Begin a run, returning the request sequence number and the source to
    /// submit. Returns `None` when a run is already in flight or the session
    /// has been torn down - the caller must treat that as a silent no-op.
    pub(crate) async fn begin_run(&self) -> Option<(u64, String)> {
        let mut data = self.inner.write().await;
        if data.running || !data.live {
            return None;
        }

        data.running = true;
        data.issued_seq += 1;
        data.status = CompileStatus::Unknown;
        data.correction_offered = false;
        data.compiler_output = COMPILING.to_string();
        data.program_output = AWAITING_COMPILATION.to_string();
        data.critique = ANALYZING.to_string();
        data.corrected_display.clear();
        data.correction_diff = None;

        Some((data.issued_seq, data.source.clone()))
    }

    /// Settle the run identified by `seq`.
    ///
    /// The outcome is produced by the caller's closure from the source buffer
    /// as it stands at arrival time, so the correction comparison and the
    /// application happen under one lock. Returns `false` when the result is
    /// discarded: the session was torn down, or `seq` is not the most
    /// recently issued request.
    pub(crate) async fn settle<F>(&self, seq: u64, outcome: F) -> bool
    where
        F: FnOnce(&str) -> RunOutcome,
    {
        let mut data = self.inner.write().await;
        if !data.live || seq != data.issued_seq || !data.running {
            return false;
        }

        let outcome = outcome(&data.source);
        data.compiler_output = outcome.compiler_output;
        data.program_output = outcome.program_output;
        data.critique = outcome.critique;
        data.corrected_display = outcome.corrected_display;
        data.correction_diff = outcome.correction_diff;
        data.correction_offered = outcome.correction_offered;
        data.status = outcome.status;
        data.running = false;
        data.last_run_at = Some(Utc::now());
        true
    }

    /// Replace the source with the offered correction.
    ///
    /// Silent no-op unless a real suggestion is currently offered. On
    /// success the panes are cleared, the critique carries the fixed
    /// "run again" message, and the status resets to `Unknown`. Does not
    /// trigger a run.
    pub(crate) async fn apply_correction(&self) -> bool {
        let mut data = self.inner.write().await;
        if !data.correction_offered
            || data.corrected_display.is_empty()
            || data.corrected_display == NO_CORRECTION_AVAILABLE
            || data.corrected_display == NO_CORRECTION_NEEDED
        {
            return false;
        }

        data.source = std::mem::take(&mut data.corrected_display);
        data.correction_offered = false;
        data.correction_diff = None;
        data.compiler_output.clear();
        data.program_output.clear();
        data.critique = CORRECTION_APPLIED.to_string();
        data.status = CompileStatus::Unknown;
        true
    }

    /// Mark the session as torn down. Any still-pending result is discarded
    /// on arrival instead of being applied to a stale store.
    pub async fn teardown(&self) {
        self.inner.write().await.live = false;
    }
}
