//! Classification of a compile/analyze attempt.
//!
//! The compile service reports its result as a free-form string. We decode it
//! into a closed set of variants with an explicit fallback arm instead of
//! carrying the remote string through the rest of the system.

use serde::{Deserialize, Serialize};

/// Outcome classification for one compile/analyze attempt.
///
/// `Unknown` is both the initial state of a session and the fallback for any
/// unrecognized or missing status string. `Error` covers transport failures
/// as well as the service's own generic error tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompileStatus {
    Success,
    SyntaxError,
    SemanticError,
    RuntimeError,
    Error,
    #[default]
    Unknown,
}

impl CompileStatus {
    /// Decode the wire status string from the compile service.
    ///
    /// The service reports `"success" | "syntax" | "semantic" | "runtime" |
    /// "error"`. Anything else, including an absent field, degrades to
    /// `Unknown` - the taxonomy is closed.
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw {
            Some("success") => Self::Success,
            Some("syntax") => Self::SyntaxError,
            Some("semantic") => Self::SemanticError,
            Some("runtime") => Self::RuntimeError,
            Some("error") => Self::Error,
            _ => Self::Unknown,
        }
    }

    /// Human-readable badge label for UI display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::SyntaxError => "Syntax Error",
            Self::SemanticError => "Semantic Error",
            Self::RuntimeError => "Runtime Error",
            Self::Error => "Error",
            Self::Unknown => "Ready",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}
