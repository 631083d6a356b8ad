use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MinicError {
    #[error("Compile service error: {0}")]
    Service(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Implement Serialize for Tauri
impl Serialize for MinicError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

// Convert to Tauri-compatible result
pub type Result<T> = std::result::Result<T, MinicError>;
