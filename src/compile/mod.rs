//! Boundary to the remote compile/analyze service.

pub mod client;
pub mod protocol;

pub use client::{CompileClient, CompileServiceError};
pub use protocol::{CompileRequest, CompileResponse};
