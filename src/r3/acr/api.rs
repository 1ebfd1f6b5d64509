//! ACR API requests

use serde_json::{json, Value};

use crate::r3::models::{AuthToken, Frozen, HttpMethod, UrlParams};
use crate::r3::traits::{url_params, ApiBase, K2hr3Api};

use super::models::{AcrOperation, AcrQuery, AddAcrMember};

/// ACR request (`acr/{service}`)
#[derive(Debug, Clone)]
pub struct Acr {
    base: ApiBase,
    service: Frozen<String>,
    operation: Option<AcrOperation>,
    tenant: Option<String>,
    query: AcrQuery,
}

impl Acr {
    pub fn new(r3token: &str, service: &str) -> Self {
        let headers = AuthToken::Scoped(r3token.to_string()).json_headers();
        Self {
            base: ApiBase::new("acr").with_headers(headers),
            service: Frozen::from(service.to_string()),
            operation: None,
            tenant: None,
            query: AcrQuery::default(),
        }
    }

    pub fn service(&self) -> &str {
        self.service.or_empty()
    }

    /// Give `tenant` access to the service (POST or PUT)
    pub fn add_member(&mut self, tenant: &str) -> &mut Self {
        self.operation = Some(AcrOperation::AddMember);
        self.tenant = Some(tenant.to_string());
        self
    }

    /// Show the credentials of the service (GET)
    pub fn show_credential_details(&mut self) -> &mut Self {
        self.operation = Some(AcrOperation::ShowCredentialDetails);
        self
    }

    /// List resources the described client host may use (GET)
    pub fn get_available_resources(&mut self, query: AcrQuery) -> &mut Self {
        self.operation = Some(AcrOperation::GetAvailableResources);
        self.query = query;
        self
    }

    /// Revoke the access of `tenant` (DELETE)
    pub fn delete_member(&mut self, tenant: &str) -> &mut Self {
        self.operation = Some(AcrOperation::DeleteMember);
        self.tenant = Some(tenant.to_string());
        self
    }

    fn query_params(&self) -> UrlParams {
        match serde_json::to_value(&self.query) {
            Ok(Value::Object(map)) => map,
            _ => UrlParams::new(),
        }
    }
}

impl K2hr3Api for Acr {
    fn base(&self) -> &ApiBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApiBase {
        &mut self.base
    }

    fn api_path(&mut self, method: HttpMethod) -> Option<String> {
        let path = self.base.path_with(self.service.or_empty());
        match (method, self.operation?) {
            (HttpMethod::Post, AcrOperation::AddMember) => {
                self.base.set_json_body(&AddAcrMember {
                    tenant: self.tenant.as_deref(),
                });
                Some(path)
            }
            (HttpMethod::Put, AcrOperation::AddMember)
            | (HttpMethod::Delete, AcrOperation::DeleteMember) => {
                self.base
                    .set_urlparams(url_params([("tenant", json!(self.tenant))]));
                Some(path)
            }
            (HttpMethod::Get, AcrOperation::ShowCredentialDetails) => Some(path),
            (HttpMethod::Get, AcrOperation::GetAvailableResources) => {
                let params = self.query_params();
                self.base.set_urlparams(params);
                Some(path)
            }
            _ => None,
        }
    }
}
