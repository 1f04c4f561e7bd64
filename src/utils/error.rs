// src/utils/error.rs
use thiserror::Error;

// Errors raised while downloading source pages
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Remote site refused the request, rate limit likely exceeded")]
    RateLimited,

    #[error("Page not found: {0}")]
    NotFound(String),
}

// Errors that cost us one document (or one structured payload), never the batch
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Could not parse document '{document}': {reason}")]
    DocumentParse { document: String, reason: String },

    #[error("Malformed structured data: {0}")]
    MalformedStructuredData(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fetching failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_parse_message_names_document() {
        let err = ExtractError::DocumentParse {
            document: "page3.html".to_string(),
            reason: "invalid UTF-8".to_string(),
        };
        assert_eq!(err.to_string(), "Could not parse document 'page3.html': invalid UTF-8");
    }

    #[test]
    fn test_app_error_wraps_storage_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let app: AppError = StorageError::from(io).into();
        assert!(matches!(app, AppError::Storage(StorageError::IoError(_))));
    }
}
