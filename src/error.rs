//! Error types for shareon operations.
//!
//! Binding itself never fails; these cover the surfaces around it.

use thiserror::Error;

/// Errors that can occur while loading, rendering or reporting a document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[cfg(feature = "cli")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
