//! OpenStack identity (Keystone v3) helper
//!
//! K2HR3 unscoped tokens are created from an OpenStack token scoped to a
//! project. [`scoped_token`] obtains one with a user password.

use log::{debug, error};
use reqwest::blocking::Client;
use serde::Serialize;

use crate::config::api;
use crate::error::{R3Error, Result};

const USER_AGENT: &str = "k2hr3client";
const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";
const DEFAULT_DOMAIN_NAME: &str = "Default";
const DEFAULT_DOMAIN_ID: &str = "default";

#[derive(Serialize, Debug)]
struct AuthRequest<'a> {
    auth: Auth<'a>,
}

#[derive(Serialize, Debug)]
struct Auth<'a> {
    identity: Identity<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<Scope<'a>>,
}

#[derive(Serialize, Debug)]
struct Identity<'a> {
    methods: [&'static str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<PasswordMethod<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<TokenMethod<'a>>,
}

#[derive(Serialize, Debug)]
struct PasswordMethod<'a> {
    user: User<'a>,
}

#[derive(Serialize, Debug)]
struct User<'a> {
    name: &'a str,
    domain: DomainName,
    password: &'a str,
}

#[derive(Serialize, Debug)]
struct DomainName {
    name: &'static str,
}

#[derive(Serialize, Debug)]
struct TokenMethod<'a> {
    id: &'a str,
}

#[derive(Serialize, Debug)]
struct Scope<'a> {
    project: Project<'a>,
}

#[derive(Serialize, Debug)]
struct Project<'a> {
    domain: DomainId,
    name: &'a str,
}

#[derive(Serialize, Debug)]
struct DomainId {
    id: &'static str,
}

fn password_auth<'a>(user: &'a str, password: &'a str) -> AuthRequest<'a> {
    AuthRequest {
        auth: Auth {
            identity: Identity {
                methods: ["password"],
                password: Some(PasswordMethod {
                    user: User {
                        name: user,
                        domain: DomainName {
                            name: DEFAULT_DOMAIN_NAME,
                        },
                        password,
                    },
                }),
                token: None,
            },
            scope: None,
        },
    }
}

fn token_auth<'a>(token: &'a str, project: &'a str) -> AuthRequest<'a> {
    AuthRequest {
        auth: Auth {
            identity: Identity {
                methods: ["token"],
                password: None,
                token: Some(TokenMethod { id: token }),
            },
            scope: Some(Scope {
                project: Project {
                    domain: DomainId {
                        id: DEFAULT_DOMAIN_ID,
                    },
                    name: project,
                },
            }),
        },
    }
}

/// POST an auth document and return the issued subject token
fn issue(client: &Client, identity_url: &str, request: &AuthRequest) -> Result<Option<String>> {
    debug!("POST {}", identity_url);
    let response = client
        .post(identity_url)
        .header("User-Agent", USER_AGENT)
        .header("Content-Type", api::CONTENT_TYPE_JSON)
        .json(request)
        .send()?;

    let status = response.status();
    if !status.is_success() {
        error!("identity request failed: {} {}", status, identity_url);
        let message = response
            .text()
            .ok()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());
        return Err(R3Error::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response
        .headers()
        .get(SUBJECT_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string))
}

/// Get an OpenStack token scoped to `project`.
///
/// Returns `Ok(None)` when the identity server does not issue a token.
pub fn scoped_token(
    identity_url: &str,
    user: &str,
    password: &str,
    project: &str,
) -> Result<Option<String>> {
    let client = Client::new();
    let Some(unscoped) = issue(&client, identity_url, &password_auth(user, password))? else {
        return Ok(None);
    };
    issue(&client, identity_url, &token_auth(&unscoped, project))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r3::testing::{json_body, MockApi};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn identity_url(mock: &MockApi) -> String {
        format!("{}/identity/v3/auth/tokens", mock.uri())
    }

    #[test]
    fn test_scoped_token() {
        let mock = MockApi::start();
        mock.mount(
            Mock::given(method("POST"))
                .and(path("/identity/v3/auth/tokens"))
                .and(body_partial_json(json!({"auth": {"identity": {"methods": ["password"]}}})))
                .respond_with(ResponseTemplate::new(201).insert_header("X-Subject-Token", "unscoped")),
        );
        mock.mount(
            Mock::given(method("POST"))
                .and(path("/identity/v3/auth/tokens"))
                .and(body_partial_json(json!({"auth": {"identity": {"methods": ["token"]}}})))
                .respond_with(ResponseTemplate::new(201).insert_header("X-Subject-Token", "scoped")),
        );

        let token = scoped_token(&identity_url(&mock), "admin", "secret", "demo").unwrap();
        assert_eq!(token.as_deref(), Some("scoped"));

        let requests = mock.received();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].headers.get("user-agent").unwrap(), "k2hr3client");
        assert_eq!(
            json_body(&requests[0]),
            json!({"auth": {"identity": {
                "methods": ["password"],
                "password": {"user": {
                    "name": "admin",
                    "domain": {"name": "Default"},
                    "password": "secret"
                }}
            }}})
        );
        assert_eq!(
            json_body(&requests[1]),
            json!({"auth": {
                "identity": {"methods": ["token"], "token": {"id": "unscoped"}},
                "scope": {"project": {"domain": {"id": "default"}, "name": "demo"}}
            }})
        );
    }

    #[test]
    fn test_missing_token_header() {
        let mock = MockApi::start();
        mock.mount(
            Mock::given(method("POST"))
                .and(path("/identity/v3/auth/tokens"))
                .respond_with(ResponseTemplate::new(201)),
        );

        let token = scoped_token(&identity_url(&mock), "admin", "secret", "demo").unwrap();
        assert_eq!(token, None);
        assert_eq!(mock.received().len(), 1);
    }

    #[test]
    fn test_rejected_credentials() {
        let mock = MockApi::start();
        mock.mount(
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized")),
        );

        match scoped_token(&identity_url(&mock), "admin", "wrong", "demo") {
            Err(R3Error::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "unauthorized");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
