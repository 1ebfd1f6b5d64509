//! Settings data models

use serde::{Deserialize, Serialize};

use crate::config::{api, http};

/// Top-level client settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// K2HR3 API endpoint
    pub k2hr3: K2hr3Settings,
    /// Transport behaviour
    pub http: HttpConfig,
}

/// Where the K2HR3 API lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct K2hr3Settings {
    /// Base url, e.g. `http://127.0.0.1:18080`
    pub api_url: String,
    /// Version path segment prepended to every request path
    pub api_version: String,
}

impl Default for K2hr3Settings {
    fn default() -> Self {
        Self {
            api_url: api::DEFAULT_URL.to_string(),
            api_version: api::DEFAULT_VERSION.to_string(),
        }
    }
}

/// Timeouts and retry policy of [`crate::r3::K2hr3Http`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout
    pub timeout_seconds: u64,
    /// Sleep between two attempts after a temporary failure
    pub retry_interval_seconds: u64,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Accept invalid certificates on https endpoints
    pub allow_self_signed_cert: bool,
    /// Re-issue retried requests as GET regardless of the original method
    pub retry_with_get: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: http::TIMEOUT_SECONDS,
            retry_interval_seconds: http::RETRY_INTERVAL_SECONDS,
            max_retries: http::MAX_RETRIES,
            allow_self_signed_cert: http::ALLOW_SELF_SIGNED_CERT,
            retry_with_get: false,
        }
    }
}
