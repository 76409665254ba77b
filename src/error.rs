//! Error types for outline extraction.
//!
//! Classification itself never fails. Errors come from the edges of the
//! pipeline: span ingestion, configuration loading and batch I/O.

/// Result type alias for outline extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around outline extraction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A span violates the data model (bad font size, page, or position)
    #[error("Invalid span at index {index}: {reason}")]
    InvalidSpan {
        /// Position of the span in the ingested sequence
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// The span collaborator could not produce spans for a document
    #[error("Ingestion failed: {0}")]
    Ingestion(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_span_error() {
        let err = Error::InvalidSpan {
            index: 7,
            reason: "font size must be positive".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("index 7"));
        assert!(msg.contains("font size must be positive"));
    }

    #[test]
    fn test_ingestion_error() {
        let err = Error::Ingestion("truncated file".to_string());
        assert_eq!(format!("{}", err), "Ingestion failed: truncated file");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse.into();
        assert!(format!("{}", err).starts_with("JSON error"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
