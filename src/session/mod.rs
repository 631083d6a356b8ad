//! Compile/analyze session core.
//!
//! `store` holds the session state, `controller` drives the run cycle and
//! the accept-correction action, `status` is the closed result taxonomy,
//! and `events` carries state updates to the frontend.

#[cfg(feature = "tauri")]
pub mod commands;
pub mod controller;
pub mod events;
pub mod status;
pub mod store;

#[cfg(feature = "tauri")]
pub use commands::*;
pub use controller::WorkflowController;
pub use events::SessionEvent;
pub use status::CompileStatus;
pub use store::{RunOutcome, SessionSnapshot, SessionStore};
