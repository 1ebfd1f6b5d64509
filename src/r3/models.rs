//! Shared data models: HTTP methods, headers, write-once cells and responses

use log::debug;
use std::fmt;

use crate::config::api;
use crate::error::{R3Error, Result};

/// Query parameters of a request, kept as a flat JSON object
pub type UrlParams = serde_json::Map<String, serde_json::Value>;

/// HTTP methods used by the K2HR3 API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A cell that keeps the first value written to it.
///
/// Later writes are ignored without an error, so a request object cannot be
/// silently re-targeted by a second builder call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frozen<T>(Option<T>);

impl<T> Default for Frozen<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> Frozen<T> {
    pub const fn empty() -> Self {
        Self(None)
    }

    /// Store `value` unless a value is already present.
    /// Returns true if the value was stored.
    pub fn set(&mut self, value: T) -> bool {
        if self.0.is_some() {
            debug!("ignoring write to an already set field");
            return false;
        }
        self.0 = Some(value);
        true
    }

    /// Store `value` if it is `Some` and the cell is still empty
    pub fn set_opt(&mut self, value: Option<T>) -> bool {
        match value {
            Some(v) => self.set(v),
            None => false,
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl Frozen<String> {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// The stored string, or "" when unset
    pub fn or_empty(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }
}

impl<T> From<T> for Frozen<T> {
    fn from(value: T) -> Self {
        Self(Some(value))
    }
}

/// Ordered string multimap with case-insensitive names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Set a header, replacing every existing value with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.0.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.0.push((name, value.into()));
    }

    /// Add a header value, keeping existing values with the same name
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All values for `name`, in insertion order
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Overlay `other` on top of these headers; `other` wins on conflicts
    pub fn merge(&mut self, other: &Headers) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.insert(k, v);
        }
        headers
    }
}

impl From<&reqwest::header::HeaderMap> for Headers {
    fn from(map: &reqwest::header::HeaderMap) -> Self {
        let mut headers = Headers::new();
        for (name, value) in map {
            headers.append(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
        headers
    }
}

/// Credential presented to the K2HR3 API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthToken {
    /// Token scoped to a tenant, sent as `U=<token>`
    Scoped(String),
    /// Role token, sent as `R=<token>`
    Role(String),
    /// No credential; the auth header is omitted
    None,
}

impl AuthToken {
    /// Value of the `x-auth-token` header, if any
    pub fn header_value(&self) -> Option<String> {
        match self {
            AuthToken::Scoped(token) => Some(format!("{}{}", api::SCOPED_TOKEN_PREFIX, token)),
            AuthToken::Role(token) => Some(format!("{}{}", api::ROLE_TOKEN_PREFIX, token)),
            AuthToken::None => None,
        }
    }

    pub fn is_scoped(&self) -> bool {
        matches!(self, AuthToken::Scoped(_))
    }

    /// Standard JSON request headers carrying this credential
    pub fn json_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type", api::CONTENT_TYPE_JSON);
        if let Some(value) = self.header_value() {
            headers.insert(api::AUTH_HEADER, value);
        }
        headers
    }
}

impl From<Option<String>> for AuthToken {
    fn from(token: Option<String>) -> Self {
        match token {
            Some(t) if !t.is_empty() => AuthToken::Scoped(t),
            _ => AuthToken::None,
        }
    }
}

/// The response of one completed K2HR3 API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    code: u16,
    url: String,
    headers: Headers,
    body: Option<String>,
}

impl ApiResponse {
    /// Build a response record.
    ///
    /// The status code must be positive, and the url and headers non-empty.
    pub fn new(code: u16, url: &str, headers: Headers, body: Option<String>) -> Result<Self> {
        if code == 0 {
            return Err(R3Error::Validation(
                "status code should not be empty".to_string(),
            ));
        }
        if url.is_empty() {
            return Err(R3Error::Validation("url should not be empty".to_string()));
        }
        if headers.is_empty() {
            return Err(R3Error::Validation(
                "headers should not be empty".to_string(),
            ));
        }
        Ok(Self {
            code,
            url: url.to_string(),
            headers,
            body,
        })
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<serde_json::Value> {
        let body = self
            .body
            .as_deref()
            .ok_or_else(|| R3Error::Json("response has no body".to_string()))?;
        Ok(serde_json::from_str(body)?)
    }

    /// Deserialize the body into `T`
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        let body = self
            .body
            .as_deref()
            .ok_or_else(|| R3Error::Json("response has no body".to_string()))?;
        Ok(serde_json::from_str(body)?)
    }
}

/// Name of a JSON value's type, for validation messages
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
