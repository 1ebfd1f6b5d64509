/// Configuration constants for the K2HR3 API
pub mod api {
    /// Default API version path segment
    pub const DEFAULT_VERSION: &str = "v1";

    /// Default K2HR3 API endpoint
    pub const DEFAULT_URL: &str = "http://127.0.0.1:18080";

    /// Authentication header understood by the K2HR3 API
    pub const AUTH_HEADER: &str = "x-auth-token";

    /// Prefix of a scoped user token in the auth header
    pub const SCOPED_TOKEN_PREFIX: &str = "U=";

    /// Prefix of a role token in the auth header
    pub const ROLE_TOKEN_PREFIX: &str = "R=";

    /// JSON content type
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// Binary content type used by the userdata and extdata APIs
    pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";

    /// User agent the userdata API expects
    pub const USERDATA_USER_AGENT: &str = "Cloud-Init 0.7.9";
}

/// Configuration constants for the HTTP transport
pub mod http {
    /// User agent sent unless the request overrides it
    pub const USER_AGENT: &str = "K2hr3Http";

    /// Default socket timeout
    pub const TIMEOUT_SECONDS: u64 = 30;

    /// Default sleep between retries
    pub const RETRY_INTERVAL_SECONDS: u64 = 60;

    /// Default number of retries after a temporary failure
    pub const MAX_RETRIES: u32 = 3;

    /// Accept self-signed certificates on https endpoints by default
    pub const ALLOW_SELF_SIGNED_CERT: bool = true;
}

/// Configuration constants for the resource API
pub mod resource {
    /// Maximum size of resource data loaded from a file
    pub const MAX_DATA_LENGTH: usize = 1024 * 8;

    /// Placeholder replaced by the cluster name in resource data files
    pub const CLUSTER_NAME_PLACEHOLDER: &str = "__TROVE_K2HDKC_CLUSTER_NAME__";

    /// Placeholder replaced by the tenant name in resource data files
    pub const TENANT_NAME_PLACEHOLDER: &str = "__TROVE_K2HDKC_TENANT_NAME__";
}

/// Configuration constants for the settings file
pub mod settings {
    /// Environment variable pointing at an explicit settings file
    pub const ENV_VAR: &str = "K2HR3CLIENT_CONFIG";

    /// Settings file name looked up in the working directory
    pub const FILE_NAME: &str = "k2hr3client.yaml";

    /// Settings file name looked up in the home directory
    pub const HOME_FILE_NAME: &str = ".k2hr3client.yaml";

    /// System-wide settings file
    pub const SYSTEM_FILE_PATH: &str = "/etc/antpickax/k2hr3client.yaml";
}
