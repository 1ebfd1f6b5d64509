//! Token API requests

use serde_json::json;

use crate::error::{R3Error, Result};
use crate::r3::models::{AuthToken, Frozen, HttpMethod};
use crate::r3::traits::{url_params, ApiBase, K2hr3Api};

use super::models::{
    PasswordCredentials, RoleTokenInfo, RoleTokenListResponse, TokenAuth, TokenOperation,
    TokenRequest, TokenResponse,
};

/// User token request (`user/tokens`).
///
/// Exchanges an IaaS (OpenStack) token or user credentials for a K2HR3
/// token scoped to `project`.
#[derive(Debug, Clone)]
pub struct Token {
    base: ApiBase,
    operation: Option<TokenOperation>,
    project: Frozen<String>,
    iaas_token: Frozen<String>,
    user: Option<String>,
    password: Option<String>,
}

impl Token {
    /// Token request authenticated by an IaaS token
    pub fn new(project: &str, iaas_token: &str) -> Self {
        let headers = AuthToken::Scoped(iaas_token.to_string()).json_headers();
        Self {
            base: ApiBase::new("user/tokens").with_headers(headers),
            operation: None,
            project: Frozen::from(project.to_string()),
            iaas_token: Frozen::from(iaas_token.to_string()),
            user: None,
            password: None,
        }
    }

    /// Token request authenticated by the credentials passed to [`Token::create`]
    pub fn with_credentials(project: &str) -> Self {
        Self {
            base: ApiBase::new("user/tokens").with_headers(AuthToken::None.json_headers()),
            operation: None,
            project: Frozen::from(project.to_string()),
            iaas_token: Frozen::empty(),
            user: None,
            password: None,
        }
    }

    pub fn project(&self) -> &str {
        self.project.or_empty()
    }

    pub fn iaas_token(&self) -> Option<&str> {
        self.iaas_token.as_deref()
    }

    /// Create a token (POST or PUT)
    pub fn create(&mut self, user: Option<&str>, password: Option<&str>) -> &mut Self {
        self.operation = Some(TokenOperation::Create);
        self.user = user.map(str::to_string);
        self.password = password.map(str::to_string);
        self
    }

    /// Show token details (GET)
    pub fn show(&mut self) -> &mut Self {
        self.operation = Some(TokenOperation::Show);
        self
    }

    /// Validate the token (HEAD)
    pub fn validate(&mut self) -> &mut Self {
        self.operation = Some(TokenOperation::Validate);
        self
    }

    /// The K2HR3 token issued by a successful create
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self.base.response_as::<TokenResponse>()?.token)
    }

    /// User and password, when both are non-empty
    fn credentials(&self) -> Option<(&str, &str)> {
        match (self.user.as_deref(), self.password.as_deref()) {
            (Some(user), Some(password)) if !user.is_empty() && !password.is_empty() => {
                Some((user, password))
            }
            _ => None,
        }
    }
}

impl K2hr3Api for Token {
    fn base(&self) -> &ApiBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApiBase {
        &mut self.base
    }

    fn api_path(&mut self, method: HttpMethod) -> Option<String> {
        match (method, self.operation?) {
            (HttpMethod::Post, TokenOperation::Create) => {
                let credentials = self
                    .credentials()
                    .map(|(username, password)| (username.to_owned(), password.to_owned()));
                let body = TokenRequest {
                    auth: TokenAuth {
                        tenant_name: self.project.or_empty(),
                        password_credentials: credentials
                            .as_ref()
                            .map(|(username, password)| PasswordCredentials { username, password }),
                    },
                };
                self.base.set_json_body(&body);
                Some(self.base.path())
            }
            (HttpMethod::Put, TokenOperation::Create) => {
                let params = match self.credentials() {
                    Some((user, password)) => url_params([
                        ("user", json!(user)),
                        ("password", json!(password)),
                        ("tenantname", json!(self.project.or_empty())),
                    ]),
                    None => url_params([("tenantname", json!(self.project.or_empty()))]),
                };
                self.base.set_urlparams(params);
                Some(self.base.path())
            }
            (HttpMethod::Get, TokenOperation::Show) | (HttpMethod::Head, TokenOperation::Validate) => {
                Some(self.base.path())
            }
            _ => None,
        }
    }
}

/// Role token request (`role/token/{role}`)
#[derive(Debug, Clone)]
pub struct RoleToken {
    base: ApiBase,
    role: Frozen<String>,
    expire: Frozen<i64>,
}

impl RoleToken {
    /// Request a role token for `role` valid for `expire` seconds (0 means the server default)
    pub fn new(r3token: &str, role: &str, expire: i64) -> Self {
        let headers = AuthToken::Scoped(r3token.to_string()).json_headers();
        Self {
            base: ApiBase::new("role/token")
                .with_headers(headers)
                .with_urlparams(url_params([("expire", json!(expire))])),
            role: Frozen::from(role.to_string()),
            expire: Frozen::from(expire),
        }
    }

    pub fn role(&self) -> &str {
        self.role.or_empty()
    }

    pub fn expire(&self) -> Option<i64> {
        self.expire.get().copied()
    }

    /// The role token issued by a successful GET
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self.base.response_as::<TokenResponse>()?.token)
    }
}

impl K2hr3Api for RoleToken {
    fn base(&self) -> &ApiBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApiBase {
        &mut self.base
    }

    fn api_path(&mut self, method: HttpMethod) -> Option<String> {
        match method {
            HttpMethod::Get => Some(self.base.path_with(self.role.or_empty())),
            _ => None,
        }
    }
}

/// Role token list request (`role/token/list/{role}`)
#[derive(Debug, Clone)]
pub struct RoleTokenList {
    base: ApiBase,
    role: Frozen<String>,
    expand: Frozen<bool>,
}

impl RoleTokenList {
    pub fn new(r3token: &str, role: &str, expand: bool) -> Self {
        let headers = AuthToken::Scoped(r3token.to_string()).json_headers();
        Self {
            base: ApiBase::new("role/token/list")
                .with_headers(headers)
                .with_urlparams(url_params([("expand", json!(expand))])),
            role: Frozen::from(role.to_string()),
            expand: Frozen::from(expand),
        }
    }

    pub fn role(&self) -> &str {
        self.role.or_empty()
    }

    pub fn expand(&self) -> bool {
        self.expand.get().copied().unwrap_or(false)
    }

    /// Every role token in the list, keyed by token
    pub fn tokens(&self) -> Result<Vec<(String, RoleTokenInfo)>> {
        Ok(self
            .base
            .response_as::<RoleTokenListResponse>()?
            .tokens
            .into_iter()
            .collect())
    }

    /// Register path of `roletoken`, from an expanded list
    pub fn registerpath(&self, roletoken: &str) -> Result<String> {
        self.base
            .response_as::<RoleTokenListResponse>()?
            .tokens
            .remove(roletoken)
            .and_then(|info| info.registerpath)
            .ok_or_else(|| {
                R3Error::Validation(format!("no registerpath for role token {}", roletoken))
            })
    }
}

impl K2hr3Api for RoleTokenList {
    fn base(&self) -> &ApiBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApiBase {
        &mut self.base
    }

    fn api_path(&mut self, method: HttpMethod) -> Option<String> {
        match method {
            HttpMethod::Get => Some(self.base.path_with(self.role.or_empty())),
            _ => None,
        }
    }
}
