use std::fmt;

use crate::r3::HttpMethod;

/// Custom error type for K2HR3 operations
#[derive(Debug)]
pub enum R3Error {
    /// Invalid base URL or settings
    Config(String),
    /// Invalid argument passed to a request builder or setter
    Validation(String),
    /// Argument of the wrong JSON type
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        actual: String,
    },
    /// The request object defines no operation for this method
    Unsupported { method: HttpMethod, basepath: String },
    /// HTTP request failed
    Http(reqwest::Error),
    /// Temporary failures outlasted the retry budget
    RetriesExhausted {
        attempts: u32,
        source: reqwest::Error,
    },
    /// API returned an error response
    Api { status: u16, message: String },
    /// JSON parsing error
    Json(String),
    /// File I/O error
    Io(String),
}

impl fmt::Display for R3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            R3Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            R3Error::Validation(msg) => write!(f, "Validation error: {}", msg),
            R3Error::TypeMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "Validation error: {} must be {}, not {}",
                field, expected, actual
            ),
            R3Error::Unsupported { method, basepath } => {
                write!(f, "{} is not supported by the '{}' API", method, basepath)
            }
            R3Error::Http(e) => write!(f, "HTTP request failed: {}", e),
            R3Error::RetriesExhausted { attempts, source } => write!(
                f,
                "HTTP request failed after {} attempts: {}",
                attempts, source
            ),
            R3Error::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            R3Error::Json(msg) => write!(f, "JSON error: {}", msg),
            R3Error::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for R3Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            R3Error::Http(e) => Some(e),
            R3Error::RetriesExhausted { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for R3Error {
    fn from(err: reqwest::Error) -> Self {
        R3Error::Http(err)
    }
}

impl From<serde_json::Error> for R3Error {
    fn from(err: serde_json::Error) -> Self {
        R3Error::Json(err.to_string())
    }
}

impl From<serde_yml::Error> for R3Error {
    fn from(err: serde_yml::Error) -> Self {
        R3Error::Config(err.to_string())
    }
}

impl From<std::io::Error> for R3Error {
    fn from(err: std::io::Error) -> Self {
        R3Error::Io(err.to_string())
    }
}

/// Result type alias for K2HR3 operations
pub type Result<T> = std::result::Result<T, R3Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = R3Error::Config("scheme should be http or https".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("scheme"));
    }

    #[test]
    fn test_api_error_display() {
        let err = R3Error::Api {
            status: 404,
            message: "Not found".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not found"));
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = R3Error::TypeMismatch {
            field: "keys",
            expected: "object",
            actual: "array".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("keys"));
        assert!(msg.contains("object"));
        assert!(msg.contains("array"));
    }

    #[test]
    fn test_unsupported_display() {
        let err = R3Error::Unsupported {
            method: HttpMethod::Head,
            basepath: "userdata".to_string(),
        };
        assert!(err.to_string().contains("HEAD"));
        assert!(err.to_string().contains("userdata"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<R3Error>();
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: R3Error = json_err.into();
        match err {
            R3Error::Json(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected R3Error::Json"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: R3Error = io_err.into();
        match err {
            R3Error::Io(msg) => assert!(msg.contains("file not found")),
            _ => panic!("Expected R3Error::Io"),
        }
    }

    #[test]
    fn test_error_source_none_for_validation() {
        use std::error::Error;
        let err = R3Error::Validation("data too big".to_string());
        assert!(err.source().is_none());
    }
}
