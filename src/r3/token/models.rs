//! Token data models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Operations of the user token API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOperation {
    Create,
    Show,
    Validate,
}

/// Body of `POST /v1/user/tokens`
#[derive(Serialize, Debug)]
pub(crate) struct TokenRequest<'a> {
    pub auth: TokenAuth<'a>,
}

#[derive(Serialize, Debug)]
pub(crate) struct TokenAuth<'a> {
    #[serde(rename = "tenantName")]
    pub tenant_name: &'a str,
    #[serde(rename = "passwordCredentials", skip_serializing_if = "Option::is_none")]
    pub password_credentials: Option<PasswordCredentials<'a>>,
}

#[derive(Serialize, Debug)]
pub(crate) struct PasswordCredentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response carrying a freshly issued token
#[derive(Deserialize, Debug)]
pub(crate) struct TokenResponse {
    pub token: Option<String>,
}

/// One entry of a role token list
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RoleTokenInfo {
    pub registerpath: Option<String>,
    /// Remaining fields (date, expire, user, hostname, ip, port, cuk, ...)
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// Response of `GET /v1/role/token/list/{role}?expand=true`
#[derive(Deserialize, Debug)]
pub(crate) struct RoleTokenListResponse {
    #[serde(default)]
    pub tokens: BTreeMap<String, RoleTokenInfo>,
}
