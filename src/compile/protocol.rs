//! Wire types for the compile service.
//!
//! The service accepts `POST /compile` with a JSON body and answers with a
//! JSON object in which every field is optional. Absent fields are normal;
//! the workflow controller substitutes placeholder texts for them.

use serde::{Deserialize, Serialize};

/// Request body for `POST /compile`.
#[derive(Debug, Clone, Serialize)]
pub struct CompileRequest<'a> {
    pub source_code: &'a str,
}

/// Response body from the compile service.
///
/// Unknown fields are ignored; missing fields deserialize to `None`. The
/// `status` string is decoded separately through the closed taxonomy in
/// [`crate::session::CompileStatus`], never passed through verbatim.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompileResponse {
    pub compiler_output: Option<String>,
    pub program_output: Option<String>,
    pub llm_feedback: Option<String>,
    pub corrected_code: Option<String>,
    pub status: Option<String>,
}
