//! Error types for kbgauge.
//!
//! Scoring and truncation are total functions and never fail; these errors
//! only surface where external data is parsed (snapshots, catalogs) or
//! configuration is read.

use thiserror::Error;

/// The top-level error type for kbgauge operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid snapshot: {0}")]
    Snapshot(String),

    #[error("Invalid field catalog: {0}")]
    Catalog(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_error_displays_reason() {
        let err = Error::Snapshot("missing id".into());
        assert!(err.to_string().contains("missing id"));
    }

    #[test]
    fn serde_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: Error = parse.unwrap_err().into();
        assert!(err.to_string().starts_with("Serialization error"));
    }
}
