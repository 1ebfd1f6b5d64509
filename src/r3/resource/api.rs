//! Resource API requests

use serde_json::{json, Value};

use crate::error::{R3Error, Result};
use crate::r3::models::{json_type_name, AuthToken, Frozen, HttpMethod};
use crate::r3::traits::{url_params, ApiBase, K2hr3Api};

use super::models::{
    CreateResource, CreateResourceWithNoToken, CreateResourceWithRoleToken, ResourceData,
    ResourceOperation, ResourceRequest,
};

/// Resource request (`resource[/{path}]`).
///
/// The credential decides how the resource is addressed: scoped token
/// requests create under the tenant, role token and tokenless requests
/// name the resource by path.
#[derive(Debug, Clone)]
pub struct Resource {
    base: ApiBase,
    token: AuthToken,
    resource_path: Frozen<String>,
    operation: Option<ResourceOperation>,
    name: Option<String>,
    data_type: Option<String>,
    data: Option<String>,
    keys: Option<Value>,
    alias: Option<Vec<String>>,
    expand: bool,
    service: Option<String>,
    port: Option<u16>,
    cuk: Option<String>,
    role: Option<String>,
}

/// `keys` must be a JSON object when given
fn check_keys(keys: &Option<Value>) -> Result<()> {
    match keys {
        None | Some(Value::Object(_)) => Ok(()),
        Some(other) => Err(R3Error::TypeMismatch {
            field: "keys",
            expected: "object",
            actual: json_type_name(other).to_string(),
        }),
    }
}

impl Resource {
    pub fn new(token: AuthToken, resource_path: Option<&str>) -> Self {
        let headers = token.json_headers();
        let mut resource_path_cell = Frozen::empty();
        resource_path_cell.set_opt(resource_path.map(str::to_string));
        Self {
            base: ApiBase::new("resource").with_headers(headers),
            token,
            resource_path: resource_path_cell,
            operation: None,
            name: None,
            data_type: None,
            data: None,
            keys: None,
            alias: None,
            expand: false,
            service: None,
            port: None,
            cuk: None,
            role: None,
        }
    }

    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    pub fn resource_path(&self) -> Option<&str> {
        self.resource_path.as_deref()
    }

    /// Create a resource (POST or PUT)
    ///
    /// File data is loaded here, so an oversized file fails before any request is sent.
    pub fn create_conf_resource(
        &mut self,
        name: &str,
        data_type: &str,
        data: ResourceData,
        keys: Option<Value>,
        alias: Option<Vec<String>>,
    ) -> Result<&mut Self> {
        check_keys(&keys)?;
        let data = data.load()?;
        self.operation = Some(ResourceOperation::CreateConf);
        self.name = Some(name.to_string());
        self.data_type = Some(data_type.to_string());
        self.data = Some(data);
        self.keys = keys;
        self.alias = alias;
        Ok(self)
    }

    /// Create a resource under `resource_path` with a role token (POST)
    pub fn create_with_roletoken(
        &mut self,
        data_type: &str,
        data: ResourceData,
        keys: Option<Value>,
    ) -> Result<&mut Self> {
        check_keys(&keys)?;
        let data = data.load()?;
        self.operation = Some(ResourceOperation::CreateWithRoleToken);
        self.data_type = Some(data_type.to_string());
        self.data = Some(data);
        self.keys = keys;
        Ok(self)
    }

    /// Create a resource under `resource_path` identified by host port and cuk (POST)
    pub fn create_with_notoken(
        &mut self,
        port: u16,
        cuk: &str,
        role: &str,
        data_type: &str,
        data: ResourceData,
        keys: Option<Value>,
    ) -> Result<&mut Self> {
        check_keys(&keys)?;
        let data = data.load()?;
        self.operation = Some(ResourceOperation::CreateWithNoToken);
        self.port = Some(port);
        self.cuk = Some(cuk.to_string());
        self.role = Some(role.to_string());
        self.data_type = Some(data_type.to_string());
        self.data = Some(data);
        self.keys = keys;
        Ok(self)
    }

    /// Get the resource (GET)
    pub fn get(&mut self, expand: bool, service: Option<&str>) -> &mut Self {
        self.operation = Some(ResourceOperation::Get);
        self.expand = expand;
        self.service = service.map(str::to_string);
        self
    }

    /// Get the resource with a role token (GET)
    pub fn get_with_roletoken(
        &mut self,
        data_type: &str,
        keys: Option<Value>,
        service: Option<&str>,
    ) -> Result<&mut Self> {
        check_keys(&keys)?;
        self.operation = Some(ResourceOperation::GetWithRoleToken);
        self.data_type = Some(data_type.to_string());
        self.keys = keys;
        self.service = service.map(str::to_string);
        Ok(self)
    }

    /// Check the resource exists (HEAD)
    pub fn validate(
        &mut self,
        data_type: &str,
        keys: Option<Value>,
        service: Option<&str>,
    ) -> Result<&mut Self> {
        check_keys(&keys)?;
        self.operation = Some(ResourceOperation::Validate);
        self.data_type = Some(data_type.to_string());
        self.keys = keys;
        self.service = service.map(str::to_string);
        Ok(self)
    }

    /// Check the resource exists for a host identified by port and cuk (HEAD)
    pub fn validate_with_notoken(
        &mut self,
        port: u16,
        cuk: &str,
        role: &str,
        data_type: &str,
        keys: Option<Value>,
        service: Option<&str>,
    ) -> Result<&mut Self> {
        check_keys(&keys)?;
        self.operation = Some(ResourceOperation::ValidateWithNoToken);
        self.port = Some(port);
        self.cuk = Some(cuk.to_string());
        self.role = Some(role.to_string());
        self.data_type = Some(data_type.to_string());
        self.keys = keys;
        self.service = service.map(str::to_string);
        Ok(self)
    }

    /// Delete the resource, or some of its keys and aliases (DELETE)
    pub fn delete_with_scopedtoken(
        &mut self,
        data_type: &str,
        keys: Option<Value>,
        alias: Option<Vec<String>>,
    ) -> Result<&mut Self> {
        check_keys(&keys)?;
        self.operation = Some(ResourceOperation::DeleteWithScopedToken);
        self.data_type = Some(data_type.to_string());
        self.keys = keys;
        self.alias = alias;
        Ok(self)
    }

    pub fn delete_with_roletoken(
        &mut self,
        data_type: &str,
        keys: Option<Value>,
    ) -> Result<&mut Self> {
        check_keys(&keys)?;
        self.operation = Some(ResourceOperation::DeleteWithRoleToken);
        self.data_type = Some(data_type.to_string());
        self.keys = keys;
        Ok(self)
    }

    pub fn delete_with_notoken(
        &mut self,
        port: u16,
        cuk: &str,
        role: &str,
        data_type: &str,
        keys: Option<Value>,
    ) -> Result<&mut Self> {
        check_keys(&keys)?;
        self.operation = Some(ResourceOperation::DeleteWithNoToken);
        self.port = Some(port);
        self.cuk = Some(cuk.to_string());
        self.role = Some(role.to_string());
        self.data_type = Some(data_type.to_string());
        self.keys = keys;
        Ok(self)
    }

    fn resource_url(&self) -> String {
        self.base.path_with(self.resource_path.or_empty())
    }
}

impl K2hr3Api for Resource {
    fn base(&self) -> &ApiBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApiBase {
        &mut self.base
    }

    fn api_path(&mut self, method: HttpMethod) -> Option<String> {
        use ResourceOperation as Op;

        let data_type = self.data_type.as_deref();
        match (method, self.operation?) {
            (HttpMethod::Post, Op::CreateConf) => {
                self.base.set_json_body(&ResourceRequest {
                    resource: CreateResource {
                        name: self.name.as_deref(),
                        data_type,
                        data: self.data.as_deref(),
                        keys: self.keys.as_ref(),
                        alias: self.alias.as_deref(),
                    },
                });
                if self.token.is_scoped() {
                    Some(self.base.path())
                } else {
                    Some(self.resource_url())
                }
            }
            (HttpMethod::Put, Op::CreateConf) => {
                self.base.set_urlparams(url_params([
                    ("name", json!(self.name)),
                    ("type", json!(data_type)),
                    ("data", json!(self.data)),
                    ("keys", json!(self.keys)),
                    ("alias", json!(self.alias)),
                ]));
                if self.token.is_scoped() {
                    Some(self.base.path())
                } else {
                    Some(self.resource_url())
                }
            }
            (HttpMethod::Post, Op::CreateWithRoleToken) => {
                self.base.set_json_body(&ResourceRequest {
                    resource: CreateResourceWithRoleToken {
                        data_type,
                        data: self.data.as_deref(),
                        keys: self.keys.as_ref(),
                    },
                });
                Some(self.resource_url())
            }
            (HttpMethod::Post, Op::CreateWithNoToken) => {
                self.base.set_json_body(&ResourceRequest {
                    resource: CreateResourceWithNoToken {
                        port: self.port,
                        cuk: self.cuk.as_deref(),
                        role: self.role.as_deref(),
                        data_type,
                        data: self.data.as_deref(),
                        keys: self.keys.as_ref(),
                    },
                });
                Some(self.resource_url())
            }
            (HttpMethod::Get, Op::Get) => {
                self.base.set_urlparams(url_params([
                    ("expand", json!(self.expand)),
                    ("service", json!(self.service)),
                ]));
                Some(self.resource_url())
            }
            (HttpMethod::Get, Op::GetWithRoleToken) | (HttpMethod::Head, Op::Validate) => {
                self.base.set_urlparams(url_params([
                    ("type", json!(data_type)),
                    ("keys", json!(self.keys)),
                    ("service", json!(self.service)),
                ]));
                Some(self.resource_url())
            }
            (HttpMethod::Head, Op::ValidateWithNoToken) => {
                self.base.set_urlparams(url_params([
                    ("port", json!(self.port)),
                    ("cuk", json!(self.cuk)),
                    ("role", json!(self.role)),
                    ("type", json!(data_type)),
                    ("keys", json!(self.keys)),
                    ("service", json!(self.service)),
                ]));
                Some(self.resource_url())
            }
            (HttpMethod::Delete, Op::DeleteWithScopedToken) => {
                self.base.set_urlparams(url_params([
                    ("type", json!(data_type)),
                    ("keynames", json!(self.keys)),
                    ("alias", json!(self.alias)),
                ]));
                Some(self.resource_url())
            }
            (HttpMethod::Delete, Op::DeleteWithRoleToken) => {
                self.base.set_urlparams(url_params([
                    ("type", json!(data_type)),
                    ("keynames", json!(self.keys)),
                ]));
                Some(self.resource_url())
            }
            (HttpMethod::Delete, Op::DeleteWithNoToken) => {
                self.base.set_urlparams(url_params([
                    ("port", json!(self.port)),
                    ("cuk", json!(self.cuk)),
                    ("role", json!(self.role)),
                    ("type", json!(data_type)),
                    ("keynames", json!(self.keys)),
                ]));
                Some(self.resource_url())
            }
            _ => None,
        }
    }
}
