//! Extdata API requests (`extdata/{api}/{register}`)

use crate::config::api;
use crate::r3::models::{Headers, HttpMethod};
use crate::r3::traits::{ApiBase, K2hr3Api};

/// Extdata request
///
/// Fetches a template registered under `api` for the host identified by
/// `register`. The server picks the template by user agent.
#[derive(Debug, Clone)]
pub struct Extdata {
    base: ApiBase,
    extapi: String,
    register: String,
    acquire: bool,
}

impl Extdata {
    pub fn new(extapi: &str, register: &str, user_agent: &str) -> Self {
        let headers: Headers = [
            ("Content-Type", api::CONTENT_TYPE_OCTET_STREAM),
            ("User-Agent", user_agent),
        ]
        .into_iter()
        .collect();
        Self {
            base: ApiBase::new("extdata").with_headers(headers),
            extapi: extapi.to_string(),
            register: register.to_string(),
            acquire: false,
        }
    }

    /// Download the template (GET)
    pub fn acquires_template(&mut self) -> &mut Self {
        self.acquire = true;
        self
    }
}

impl K2hr3Api for Extdata {
    fn base(&self) -> &ApiBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApiBase {
        &mut self.base
    }

    fn api_path(&mut self, method: HttpMethod) -> Option<String> {
        match method {
            HttpMethod::Get if self.acquire => Some(
                self.base
                    .path_with(&format!("{}/{}", self.extapi, self.register)),
            ),
            _ => None,
        }
    }
}
