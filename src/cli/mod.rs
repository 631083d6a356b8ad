//! CLI module for headless compile runs.
//!
//! This module provides a command-line interface that uses the same
//! workflow controller as the Tauri GUI application, enabling automated
//! grading, scripting, and CI usage.
//!
//! # Architecture
//!
//! The CLI uses the `MinicRuntime` abstraction to share code with the
//! Tauri application. Instead of emitting events to the frontend via
//! Tauri's event system, the CLI runtime sends events through a channel
//! that is consumed by the output handler.
//!
//! ```text
//! +--------------------+     +-------------+     +---------------+
//! | WorkflowController | --> | CliRuntime  | --> | output.rs     |
//! | (shared logic)     |     | (emit())    |     | (print/JSON)  |
//! +--------------------+     +-------------+     +---------------+
//! ```

mod args;
mod bootstrap;
mod output;
mod runner;

pub use args::Args;
pub use bootstrap::{initialize, CliContext};
pub use output::run_event_loop;
pub use runner::execute_once;
