//! Tenant API requests

use serde_json::json;

use crate::r3::models::{AuthToken, Frozen, HttpMethod};
use crate::r3::traits::{url_params, ApiBase, K2hr3Api};

use super::models::{CreateTenant, TenantOperation, TenantRequest, UpdateTenant};

/// Tenant request (`tenant`)
#[derive(Debug, Clone)]
pub struct Tenant {
    base: ApiBase,
    r3token: Frozen<String>,
    operation: Option<TenantOperation>,
    name: Option<String>,
    id: Option<i64>,
    users: Option<Vec<String>>,
    desc: Option<String>,
    display: Option<String>,
    expand: bool,
}

impl Tenant {
    pub fn new(r3token: &str) -> Self {
        let headers = AuthToken::Scoped(r3token.to_string()).json_headers();
        Self {
            base: ApiBase::new("tenant").with_headers(headers),
            r3token: Frozen::from(r3token.to_string()),
            operation: None,
            name: None,
            id: None,
            users: None,
            desc: None,
            display: None,
            expand: false,
        }
    }

    pub fn r3token(&self) -> &str {
        self.r3token.or_empty()
    }

    /// Create a tenant (POST or PUT)
    pub fn create(
        &mut self,
        name: &str,
        users: Option<Vec<String>>,
        desc: Option<&str>,
        display: Option<&str>,
    ) -> &mut Self {
        self.operation = Some(TenantOperation::Create);
        self.name = Some(name.to_string());
        self.users = users;
        self.desc = desc.map(str::to_string);
        self.display = display.map(str::to_string);
        self
    }

    /// Update users, description or display name of a tenant (POST or PUT)
    pub fn modify(
        &mut self,
        name: &str,
        id: i64,
        users: Option<Vec<String>>,
        desc: Option<&str>,
        display: Option<&str>,
    ) -> &mut Self {
        self.operation = Some(TenantOperation::Modify);
        self.name = Some(name.to_string());
        self.id = Some(id);
        self.users = users;
        self.desc = desc.map(str::to_string);
        self.display = display.map(str::to_string);
        self
    }

    /// List tenants (GET)
    pub fn get_tenant_list(&mut self, expand: bool) -> &mut Self {
        self.operation = Some(TenantOperation::List);
        self.expand = expand;
        self
    }

    /// Get one tenant (GET)
    pub fn get(&mut self, name: &str) -> &mut Self {
        self.operation = Some(TenantOperation::Get);
        self.name = Some(name.to_string());
        self
    }

    /// Check a tenant exists (HEAD)
    pub fn validate(&mut self, name: &str) -> &mut Self {
        self.operation = Some(TenantOperation::Validate);
        self.name = Some(name.to_string());
        self
    }

    /// Delete a tenant (DELETE)
    pub fn delete(&mut self, name: &str, id: i64) -> &mut Self {
        self.operation = Some(TenantOperation::Delete);
        self.name = Some(name.to_string());
        self.id = Some(id);
        self
    }

    /// Remove the calling user from a tenant (DELETE)
    pub fn delete_user(&mut self, name: &str, id: i64) -> &mut Self {
        self.operation = Some(TenantOperation::DeleteUser);
        self.name = Some(name.to_string());
        self.id = Some(id);
        self
    }
}

impl K2hr3Api for Tenant {
    fn base(&self) -> &ApiBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApiBase {
        &mut self.base
    }

    fn api_path(&mut self, method: HttpMethod) -> Option<String> {
        let name = self.name.as_deref().unwrap_or("");
        match (method, self.operation?) {
            (HttpMethod::Post, TenantOperation::Create) => {
                self.base.set_json_body(&TenantRequest {
                    tenant: CreateTenant {
                        name,
                        desc: self.desc.as_deref(),
                        display: self.display.as_deref(),
                        users: self.users.as_deref(),
                    },
                });
                Some(self.base.path())
            }
            (HttpMethod::Post, TenantOperation::Modify) => {
                self.base.set_json_body(&TenantRequest {
                    tenant: UpdateTenant {
                        id: self.id,
                        desc: self.desc.as_deref(),
                        display: self.display.as_deref(),
                        users: self.users.as_deref(),
                    },
                });
                Some(self.base.path_with(name))
            }
            (HttpMethod::Put, TenantOperation::Create) => {
                self.base.set_urlparams(url_params([
                    ("name", json!(name)),
                    ("users", json!(self.users)),
                    ("desc", json!(self.desc)),
                    ("display", json!(self.display)),
                ]));
                Some(self.base.path())
            }
            (HttpMethod::Put, TenantOperation::Modify) => {
                self.base.set_urlparams(url_params([
                    ("id", json!(self.id)),
                    ("users", json!(self.users)),
                    ("desc", json!(self.desc)),
                    ("display", json!(self.display)),
                ]));
                Some(self.base.path_with(name))
            }
            (HttpMethod::Get, TenantOperation::List) => {
                self.base
                    .set_urlparams(url_params([("expand", json!(self.expand))]));
                Some(self.base.path())
            }
            (HttpMethod::Get, TenantOperation::Get)
            | (HttpMethod::Head, TenantOperation::Validate) => Some(self.base.path_with(name)),
            (HttpMethod::Delete, TenantOperation::Delete) => {
                self.base.set_urlparams(url_params([
                    ("tenant", json!(name)),
                    ("id", json!(self.id)),
                ]));
                Some(self.base.path())
            }
            (HttpMethod::Delete, TenantOperation::DeleteUser) => {
                self.base.set_urlparams(url_params([("id", json!(self.id))]));
                Some(self.base.path_with(name))
            }
            _ => None,
        }
    }
}
