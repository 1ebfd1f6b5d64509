//! Service API requests

use serde_json::json;

use crate::r3::models::{AuthToken, Frozen, HttpMethod};
use crate::r3::traits::{url_params, ApiBase, K2hr3Api};

use super::models::{AddServiceMember, CreateService, ModifyService, ServiceOperation};

/// Service request (`service[/{name}]`)
#[derive(Debug, Clone)]
pub struct Service {
    base: ApiBase,
    name: Frozen<String>,
    operation: Option<ServiceOperation>,
    verify: Option<String>,
    tenant: Option<String>,
    clear_tenant: bool,
}

impl Service {
    pub fn new(r3token: &str, name: &str) -> Self {
        let headers = AuthToken::Scoped(r3token.to_string()).json_headers();
        Self {
            base: ApiBase::new("service").with_headers(headers),
            name: Frozen::from(name.to_string()),
            operation: None,
            verify: None,
            tenant: None,
            clear_tenant: false,
        }
    }

    pub fn name(&self) -> &str {
        self.name.or_empty()
    }

    /// Create the service with its verify url (POST or PUT)
    pub fn create(&mut self, verify: &str) -> &mut Self {
        self.operation = Some(ServiceOperation::Create);
        self.verify = Some(verify.to_string());
        self
    }

    /// Allow `tenant` to use the service (POST or PUT)
    pub fn add_member(&mut self, tenant: &str, clear_tenant: bool) -> &mut Self {
        self.operation = Some(ServiceOperation::AddMember);
        self.tenant = Some(tenant.to_string());
        self.clear_tenant = clear_tenant;
        self
    }

    /// Replace the verify url (POST or PUT)
    pub fn modify(&mut self, verify: &str) -> &mut Self {
        self.operation = Some(ServiceOperation::Modify);
        self.verify = Some(verify.to_string());
        self
    }

    pub fn get(&mut self) -> &mut Self {
        self.operation = Some(ServiceOperation::Get);
        self
    }

    /// Check the service exists, optionally for `tenant` (HEAD)
    pub fn validate(&mut self, tenant: Option<&str>) -> &mut Self {
        self.operation = Some(ServiceOperation::Validate);
        self.tenant = tenant.map(str::to_string);
        self
    }

    pub fn delete(&mut self) -> &mut Self {
        self.operation = Some(ServiceOperation::Delete);
        self
    }

    /// Remove `tenant` from the service members (DELETE)
    pub fn delete_tenant(&mut self, tenant: &str) -> &mut Self {
        self.operation = Some(ServiceOperation::DeleteTenant);
        self.tenant = Some(tenant.to_string());
        self
    }
}

impl K2hr3Api for Service {
    fn base(&self) -> &ApiBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApiBase {
        &mut self.base
    }

    fn api_path(&mut self, method: HttpMethod) -> Option<String> {
        let name = self.name.or_empty();
        match (method, self.operation?) {
            (HttpMethod::Post, ServiceOperation::Create) => {
                self.base.set_json_body(&CreateService {
                    name,
                    verify: self.verify.as_deref(),
                });
                Some(self.base.path())
            }
            (HttpMethod::Put, ServiceOperation::Create) => {
                self.base.set_urlparams(url_params([
                    ("name", json!(name)),
                    ("verify", json!(self.verify)),
                ]));
                Some(self.base.path())
            }
            (HttpMethod::Post, ServiceOperation::AddMember) => {
                self.base.set_json_body(&AddServiceMember {
                    tenant: self.tenant.as_deref(),
                    clear_tenant: self.clear_tenant,
                });
                Some(self.base.path_with(name))
            }
            (HttpMethod::Put, ServiceOperation::AddMember) => {
                self.base.set_urlparams(url_params([
                    ("tenant", json!(self.tenant)),
                    ("clear_tenant", json!(self.clear_tenant)),
                ]));
                Some(self.base.path_with(name))
            }
            (HttpMethod::Post, ServiceOperation::Modify) => {
                self.base.set_json_body(&ModifyService {
                    verify: self.verify.as_deref(),
                });
                Some(self.base.path_with(name))
            }
            (HttpMethod::Put, ServiceOperation::Modify) => {
                self.base
                    .set_urlparams(url_params([("verify", json!(self.verify))]));
                Some(self.base.path_with(name))
            }
            (HttpMethod::Get, ServiceOperation::Get) | (HttpMethod::Delete, ServiceOperation::Delete) => {
                Some(self.base.path_with(name))
            }
            (HttpMethod::Head, ServiceOperation::Validate)
            | (HttpMethod::Delete, ServiceOperation::DeleteTenant) => {
                if self.tenant.is_some() {
                    self.base
                        .set_urlparams(url_params([("tenant", json!(self.tenant))]));
                }
                Some(self.base.path_with(name))
            }
            _ => None,
        }
    }
}
