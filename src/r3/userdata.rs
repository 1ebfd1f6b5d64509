//! Userdata API requests (`userdata/{path}`)

use crate::config::api;
use crate::r3::models::{Headers, HttpMethod};
use crate::r3::traits::{ApiBase, K2hr3Api};

/// Userdata request, fetched the way cloud-init does
#[derive(Debug, Clone)]
pub struct Userdata {
    base: ApiBase,
    userdatapath: String,
    provide: bool,
}

impl Userdata {
    pub fn new(userdatapath: &str) -> Self {
        let headers: Headers = [
            ("Content-Type", api::CONTENT_TYPE_OCTET_STREAM),
            ("User-Agent", api::USERDATA_USER_AGENT),
        ]
        .into_iter()
        .collect();
        Self {
            base: ApiBase::new("userdata").with_headers(headers),
            userdatapath: userdatapath.to_string(),
            provide: false,
        }
    }

    /// Download the userdata script (GET)
    pub fn provides_userdata_script(&mut self) -> &mut Self {
        self.provide = true;
        self
    }
}

impl K2hr3Api for Userdata {
    fn base(&self) -> &ApiBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApiBase {
        &mut self.base
    }

    fn api_path(&mut self, method: HttpMethod) -> Option<String> {
        match method {
            HttpMethod::Get if self.provide => Some(self.base.path_with(&self.userdatapath)),
            _ => None,
        }
    }
}
