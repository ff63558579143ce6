//! Wiki error types
//!
//! Every failure a request can hit maps to one HTTP status, and the error's
//! `Display` text is what the client sees in the response body.

use hyper::StatusCode;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WikiError {
    /// Request path does not match `/(view|edit|save)/<alphanumeric>`
    #[error("invalid Page title")]
    InvalidTitle,

    /// Page file could not be read or written
    #[error("{op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template compilation or execution failed
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// Submitted form body could not be collected
    #[error("malformed form body: {0}")]
    Form(String),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },
}

impl WikiError {
    /// Build a closure mapping an `io::Error` on `path` into `WikiError::Io`
    pub fn io<'a>(op: &'static str, path: &'a Path) -> impl FnOnce(std::io::Error) -> Self + 'a {
        move |source| Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    /// HTTP status this error is surfaced as
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidTitle | Self::Form(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Io { .. } | Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_title_text() {
        assert_eq!(WikiError::InvalidTitle.to_string(), "invalid Page title");
        assert_eq!(WikiError::InvalidTitle.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_io_error_names_file() {
        let path = Path::new("pages/Front.txt");
        let err = WikiError::io("open", path)(std::io::Error::from(
            std::io::ErrorKind::PermissionDenied,
        ));
        let text = err.to_string();
        assert!(text.starts_with("open pages/Front.txt: "), "got: {text}");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_payload_too_large_status() {
        let err = WikiError::PayloadTooLarge { limit: 16 };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.to_string(), "request body exceeds 16 bytes");
    }
}
