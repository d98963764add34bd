//! Conversion implementations for error types

use super::types::{Error, ErrorCategory};
use crate::constants::codes;
use std::io::ErrorKind;

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        let (code, category) = match error.kind() {
            ErrorKind::PermissionDenied => (codes::PERMISSION_DENIED, ErrorCategory::Permission),
            ErrorKind::TimedOut => (codes::TIMEOUT_ERROR, ErrorCategory::Timeout),
            _ => (codes::FILESYSTEM_ERROR, ErrorCategory::Filesystem),
        };
        Error::new(code, category, error.to_string()).with_context("io_kind", error.kind())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::new(
            codes::SERIALIZATION_FAILED,
            ErrorCategory::Validation,
            error.to_string(),
        )
        .with_context("line", error.line())
        .with_context("column", error.column())
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(error: tokio::time::error::Elapsed) -> Self {
        Error::new(codes::TIMEOUT_ERROR, ErrorCategory::Timeout, error.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(error: anyhow::Error) -> Self {
        Error::unknown(format!("An internal error occurred: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_permission_maps_to_permission() {
        let error = Error::from(std::io::Error::new(ErrorKind::PermissionDenied, "nope"));
        assert_eq!(error.category(), ErrorCategory::Permission);
        assert_eq!(error.code(), codes::PERMISSION_DENIED);
    }

    #[test]
    fn test_io_not_found_maps_to_filesystem() {
        let error = Error::file_system(
            "/tmp/missing",
            "read snapshot",
            std::io::Error::new(ErrorKind::NotFound, "missing"),
        );
        assert_eq!(error.category(), ErrorCategory::Filesystem);
        assert_eq!(error.context_value("path"), Some("/tmp/missing"));
        assert_eq!(error.context_value("operation"), Some("read snapshot"));
    }

    #[test]
    fn test_json_error_is_validation() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let error = Error::from(json_err);
        assert_eq!(error.category(), ErrorCategory::Validation);
        assert_eq!(error.code(), codes::SERIALIZATION_FAILED);
    }
}
