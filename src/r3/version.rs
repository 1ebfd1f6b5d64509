//! Version API requests

use crate::r3::models::{AuthToken, HttpMethod};
use crate::r3::traits::{ApiBase, K2hr3Api};
use crate::settings::K2hr3Settings;

/// Version request
///
/// `name` replaces the version segment, so an empty name asks the server
/// root for the list of versions and `v1` asks for the v1 endpoints.
#[derive(Debug, Clone)]
pub struct Version {
    base: ApiBase,
    get: bool,
}

impl Version {
    pub fn new(name: &str) -> Self {
        Self {
            base: ApiBase::new("")
                .with_version(name)
                .with_headers(AuthToken::None.json_headers()),
            get: false,
        }
    }

    pub fn get(&mut self) -> &mut Self {
        self.get = true;
        self
    }
}

impl K2hr3Api for Version {
    fn base(&self) -> &ApiBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApiBase {
        &mut self.base
    }

    /// The name is the version; configured settings do not replace it
    fn use_settings(&mut self, _settings: &K2hr3Settings) -> &mut Self {
        self
    }

    fn api_path(&mut self, method: HttpMethod) -> Option<String> {
        match method {
            HttpMethod::Get if self.get => Some(self.base.version().to_string()),
            _ => None,
        }
    }
}
