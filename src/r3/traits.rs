//! Common traits for K2HR3 API requests

use log::{error, info};
use serde_json::Value;

use crate::config::api;
use crate::error::{R3Error, Result};
use crate::r3::models::{ApiResponse, Frozen, Headers, HttpMethod, UrlParams};
use crate::settings::K2hr3Settings;

/// State shared by every K2HR3 API request
///
/// `basepath` and `version` may be reassigned; headers, body, url params
/// and the response keep the first value written to them.
#[derive(Debug, Clone, Default)]
pub struct ApiBase {
    basepath: String,
    version: String,
    headers: Frozen<Headers>,
    body: Frozen<String>,
    urlparams: Frozen<UrlParams>,
    response: Frozen<ApiResponse>,
}

impl ApiBase {
    pub fn new(basepath: &str) -> Self {
        Self {
            basepath: basepath.to_string(),
            version: api::DEFAULT_VERSION.to_string(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers.set(headers);
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body.set(body);
        self
    }

    pub fn with_urlparams(mut self, params: UrlParams) -> Self {
        self.urlparams.set(params);
        self
    }

    pub fn basepath(&self) -> &str {
        &self.basepath
    }

    pub fn set_basepath(&mut self, basepath: &str) {
        if basepath != self.basepath {
            info!("basepath has changed");
        }
        self.basepath = basepath.to_string();
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn set_version(&mut self, version: &str) {
        self.version = version.to_string();
    }

    pub fn headers(&self) -> Option<&Headers> {
        self.headers.get()
    }

    pub fn set_headers(&mut self, headers: Headers) {
        self.headers.set(headers);
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn set_body(&mut self, body: String) {
        self.body.set(body);
    }

    pub fn urlparams(&self) -> Option<&UrlParams> {
        self.urlparams.get()
    }

    pub fn set_urlparams(&mut self, params: UrlParams) {
        self.urlparams.set(params);
    }

    /// Serialize `body` as the pending JSON request body
    pub fn set_json_body<T: serde::Serialize>(&mut self, body: &T) {
        match serde_json::to_string(body) {
            Ok(json) => self.set_body(json),
            Err(e) => error!("could not serialize request body: {}", e),
        }
    }

    pub fn response(&self) -> Option<&ApiResponse> {
        self.response.get()
    }

    /// Deserialize the attached response body into `T`
    pub fn response_as<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        self.response()
            .ok_or_else(|| R3Error::Json(format!("no response from {}", self.basepath)))?
            .parse()
    }

    /// `{version}/{basepath}`
    pub fn path(&self) -> String {
        format!("{}/{}", self.version, self.basepath)
    }

    /// `{version}/{basepath}/{suffix}`
    pub fn path_with(&self, suffix: &str) -> String {
        format!("{}/{}/{}", self.version, self.basepath, suffix)
    }
}

/// Build url params from key/value pairs, preserving their order
pub fn url_params<I, K>(pairs: I) -> UrlParams
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Common trait for all K2HR3 API requests
///
/// Implementors own an [`ApiBase`] and decide, per HTTP method and active
/// operation, which path to call and which body or url params to send.
pub trait K2hr3Api {
    /// Shared request state
    fn base(&self) -> &ApiBase;

    /// Mutable shared request state
    fn base_mut(&mut self) -> &mut ApiBase;

    /// Path (without scheme and host) of the request for `method`.
    ///
    /// Fills the pending body or url params as a side effect. Returns
    /// `None` when the active operation does not support `method`.
    fn api_path(&mut self, method: HttpMethod) -> Option<String>;

    fn basepath(&self) -> &str {
        self.base().basepath()
    }

    fn version(&self) -> &str {
        self.base().version()
    }

    fn headers(&self) -> Option<&Headers> {
        self.base().headers()
    }

    fn body(&self) -> Option<&str> {
        self.base().body()
    }

    fn urlparams(&self) -> Option<&UrlParams> {
        self.base().urlparams()
    }

    fn response(&self) -> Option<&ApiResponse> {
        self.base().response()
    }

    /// Send this request to the api version configured in `settings`
    fn use_settings(&mut self, settings: &K2hr3Settings) -> &mut Self
    where
        Self: Sized,
    {
        self.base_mut().set_version(&settings.api_version);
        self
    }

    /// Attach the response of a completed call.
    ///
    /// Only the first response is kept; later calls leave it unchanged.
    fn set_response(
        &mut self,
        code: u16,
        url: &str,
        headers: Headers,
        body: Option<String>,
    ) -> Result<()> {
        let response = ApiResponse::new(code, url, headers, body)?;
        self.base_mut().response.set(response);
        Ok(())
    }
}
