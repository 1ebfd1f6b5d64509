//! List API requests (`list/{service}`)

use serde_json::json;

use crate::r3::models::{AuthToken, HttpMethod};
use crate::r3::traits::{url_params, ApiBase, K2hr3Api};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOperation {
    Get,
    Validate,
}

/// List request for the resources of a service
#[derive(Debug, Clone)]
pub struct List {
    base: ApiBase,
    service: String,
    operation: Option<ListOperation>,
    expand: bool,
}

impl List {
    pub fn new(r3token: &str, service: &str) -> Self {
        let headers = AuthToken::Scoped(r3token.to_string()).json_headers();
        Self {
            base: ApiBase::new("list").with_headers(headers),
            service: service.to_string(),
            operation: None,
            expand: false,
        }
    }

    pub fn get(&mut self, expand: bool) -> &mut Self {
        self.operation = Some(ListOperation::Get);
        self.expand = expand;
        self
    }

    /// Check the list exists (HEAD)
    pub fn validate(&mut self) -> &mut Self {
        self.operation = Some(ListOperation::Validate);
        self
    }
}

impl K2hr3Api for List {
    fn base(&self) -> &ApiBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApiBase {
        &mut self.base
    }

    fn api_path(&mut self, method: HttpMethod) -> Option<String> {
        match (method, self.operation?) {
            (HttpMethod::Get, ListOperation::Get) => {
                self.base
                    .set_urlparams(url_params([("expand", json!(self.expand))]));
                Some(self.base.path_with(&self.service))
            }
            (HttpMethod::Head, ListOperation::Validate) => Some(self.base.path_with(&self.service)),
            _ => None,
        }
    }
}
