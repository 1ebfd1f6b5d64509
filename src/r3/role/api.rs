//! Role API requests

use serde_json::json;

use crate::r3::models::{AuthToken, HttpMethod};
use crate::r3::traits::{url_params, ApiBase, K2hr3Api};

use super::models::{
    AddMemberRequest, CreateRole, RoleHost, RoleOperation, RoleRequest, RoleTokenMember,
    RoleTokenMemberRequest,
};

/// Role request (`role[/{name}]`)
#[derive(Debug, Clone)]
pub struct Role {
    base: ApiBase,
    operation: Option<RoleOperation>,
    name: String,
    policies: Vec<String>,
    alias: Vec<String>,
    hosts: Vec<RoleHost>,
    clear_hostname: bool,
    clear_ips: bool,
    // member fields of add_member_with_roletoken and the delete operations
    member: RoleHost,
    expand: bool,
    role_token: String,
}

impl Role {
    pub fn new(token: AuthToken) -> Self {
        Self {
            base: ApiBase::new("role").with_headers(token.json_headers()),
            operation: None,
            name: String::new(),
            policies: Vec::new(),
            alias: Vec::new(),
            hosts: Vec::new(),
            clear_hostname: false,
            clear_ips: false,
            member: RoleHost::default(),
            expand: true,
            role_token: String::new(),
        }
    }

    /// Create a role (POST or PUT)
    pub fn create(&mut self, name: &str, policies: Vec<String>, alias: Vec<String>) -> &mut Self {
        self.operation = Some(RoleOperation::Create);
        self.name = name.to_string();
        self.policies = policies;
        self.alias = alias;
        self
    }

    /// Add one host to a role (POST or PUT)
    pub fn add_member(
        &mut self,
        name: &str,
        host: RoleHost,
        clear_hostname: bool,
        clear_ips: bool,
    ) -> &mut Self {
        self.operation = Some(RoleOperation::AddMember);
        self.name = name.to_string();
        self.hosts = vec![host];
        self.clear_hostname = clear_hostname;
        self.clear_ips = clear_ips;
        self
    }

    /// Add several hosts to a role (POST)
    pub fn add_members(
        &mut self,
        name: &str,
        hosts: Vec<RoleHost>,
        clear_hostname: bool,
        clear_ips: bool,
    ) -> &mut Self {
        self.operation = Some(RoleOperation::AddMembers);
        self.name = name.to_string();
        self.hosts = hosts;
        self.clear_hostname = clear_hostname;
        self.clear_ips = clear_ips;
        self
    }

    /// Register the calling host with a role token (POST or PUT)
    #[allow(clippy::too_many_arguments)]
    pub fn add_member_with_roletoken(
        &mut self,
        name: &str,
        port: Option<u16>,
        cuk: Option<&str>,
        extra: Option<&str>,
        tag: Option<&str>,
        inboundip: Option<&str>,
        outboundip: Option<&str>,
    ) -> &mut Self {
        self.operation = Some(RoleOperation::AddMemberWithRoleToken);
        self.name = name.to_string();
        self.member = RoleHost {
            host: None,
            port,
            cuk: cuk.map(str::to_string),
            extra: extra.map(str::to_string),
            tag: tag.map(str::to_string),
            inboundip: inboundip.map(str::to_string),
            outboundip: outboundip.map(str::to_string),
        };
        self
    }

    /// Show role details (GET)
    pub fn get(&mut self, name: &str, expand: bool) -> &mut Self {
        self.operation = Some(RoleOperation::Get);
        self.name = name.to_string();
        self.expand = expand;
        self
    }

    /// List the role tokens of a role (GET)
    pub fn get_token_list(&mut self, name: &str, expand: bool) -> &mut Self {
        self.operation = Some(RoleOperation::GetTokenList);
        self.name = name.to_string();
        self.expand = expand;
        self
    }

    /// Check a role exists (HEAD)
    pub fn validate_role(&mut self, name: &str) -> &mut Self {
        self.operation = Some(RoleOperation::Validate);
        self.name = name.to_string();
        self
    }

    /// Delete a role (DELETE)
    pub fn delete(&mut self, name: &str) -> &mut Self {
        self.operation = Some(RoleOperation::Delete);
        self.name = name.to_string();
        self
    }

    /// Remove a host from a role (DELETE)
    pub fn delete_member(&mut self, name: &str, host: &str, port: Option<u16>, cuk: Option<&str>) -> &mut Self {
        self.operation = Some(RoleOperation::DeleteMember);
        self.name = name.to_string();
        self.member = RoleHost {
            port,
            cuk: cuk.map(str::to_string),
            ..RoleHost::new(host)
        };
        self
    }

    /// Remove the host identified by `cuk` from every role (DELETE)
    pub fn delete_member_wo_roletoken(&mut self, cuk: &str) -> &mut Self {
        self.operation = Some(RoleOperation::DeleteMemberWithoutRoleToken);
        self.member = RoleHost {
            cuk: Some(cuk.to_string()),
            ..Default::default()
        };
        self
    }

    /// Revoke the role token of a host (DELETE)
    pub fn delete_roletoken(&mut self, name: &str, port: Option<u16>, cuk: Option<&str>) -> &mut Self {
        self.operation = Some(RoleOperation::DeleteRoleToken);
        self.name = name.to_string();
        self.member = RoleHost {
            port,
            cuk: cuk.map(str::to_string),
            ..Default::default()
        };
        self
    }

    /// Revoke a role token by its value (DELETE)
    pub fn delete_roletoken_with_string(&mut self, role_token: &str) -> &mut Self {
        self.operation = Some(RoleOperation::DeleteRoleTokenWithString);
        self.role_token = role_token.to_string();
        self
    }
}

impl K2hr3Api for Role {
    fn base(&self) -> &ApiBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApiBase {
        &mut self.base
    }

    fn api_path(&mut self, method: HttpMethod) -> Option<String> {
        use RoleOperation as Op;

        let member = &self.member;
        match (method, self.operation?) {
            (HttpMethod::Post, Op::Create) => {
                self.base.set_json_body(&RoleRequest {
                    role: CreateRole {
                        name: &self.name,
                        policies: &self.policies,
                        alias: &self.alias,
                    },
                });
                Some(self.base.path())
            }
            (HttpMethod::Put, Op::Create) => {
                self.base.set_urlparams(url_params([
                    ("name", json!(self.name)),
                    ("policies", json!(self.policies)),
                    ("alias", json!(self.alias)),
                ]));
                Some(self.base.path())
            }
            (HttpMethod::Post, Op::AddMember) => {
                let host = self.hosts.first()?;
                self.base.set_json_body(&AddMemberRequest {
                    host,
                    clear_hostname: self.clear_hostname,
                    clear_ips: self.clear_ips,
                });
                Some(self.base.path_with(&self.name))
            }
            (HttpMethod::Post, Op::AddMembers) => {
                self.base.set_json_body(&AddMemberRequest {
                    host: &self.hosts,
                    clear_hostname: self.clear_hostname,
                    clear_ips: self.clear_ips,
                });
                Some(self.base.path_with(&self.name))
            }
            (HttpMethod::Put, Op::AddMember) => {
                let host = self.hosts.first()?;
                self.base.set_urlparams(url_params([
                    ("host", json!(host.host)),
                    ("port", json!(host.port)),
                    ("cuk", json!(host.cuk)),
                    ("extra", json!(host.extra)),
                    ("tag", json!(host.tag)),
                    ("inboundip", json!(host.inboundip)),
                    ("outboundip", json!(host.outboundip)),
                    ("clear_hostname", json!(self.clear_hostname)),
                    ("clear_ips", json!(self.clear_ips)),
                ]));
                Some(self.base.path_with(&self.name))
            }
            (HttpMethod::Post, Op::AddMemberWithRoleToken) => {
                self.base.set_json_body(&RoleTokenMemberRequest {
                    host: RoleTokenMember {
                        port: member.port,
                        cuk: member.cuk.as_deref(),
                        extra: member.extra.as_deref(),
                        tag: member.tag.as_deref(),
                        inboundip: member.inboundip.as_deref(),
                        outboundip: member.outboundip.as_deref(),
                    },
                });
                Some(self.base.path_with(&self.name))
            }
            (HttpMethod::Put, Op::AddMemberWithRoleToken) => {
                self.base.set_urlparams(url_params([
                    ("port", json!(member.port)),
                    ("cuk", json!(member.cuk)),
                    ("extra", json!(member.extra)),
                    ("tag", json!(member.tag)),
                    ("inboundip", json!(member.inboundip)),
                    ("outboundip", json!(member.outboundip)),
                ]));
                Some(self.base.path_with(&self.name))
            }
            (HttpMethod::Get, Op::Get) => {
                self.base
                    .set_urlparams(url_params([("expand", json!(self.expand))]));
                Some(self.base.path_with(&self.name))
            }
            (HttpMethod::Get, Op::GetTokenList) => {
                self.base
                    .set_urlparams(url_params([("expand", json!(self.expand))]));
                Some(self.base.path_with(&format!("token/list/{}", self.name)))
            }
            (HttpMethod::Head, Op::Validate) | (HttpMethod::Delete, Op::Delete) => {
                Some(self.base.path_with(&self.name))
            }
            (HttpMethod::Delete, Op::DeleteMember) => {
                self.base.set_urlparams(url_params([
                    ("host", json!(member.host)),
                    ("port", json!(member.port)),
                    ("cuk", json!(member.cuk)),
                ]));
                Some(self.base.path_with(&self.name))
            }
            (HttpMethod::Delete, Op::DeleteMemberWithoutRoleToken) => {
                self.base
                    .set_urlparams(url_params([("cuk", json!(member.cuk))]));
                Some(self.base.path())
            }
            (HttpMethod::Delete, Op::DeleteRoleToken) => {
                self.base.set_urlparams(url_params([
                    ("port", json!(member.port)),
                    ("cuk", json!(member.cuk)),
                ]));
                Some(self.base.path_with(&self.name))
            }
            (HttpMethod::Delete, Op::DeleteRoleTokenWithString) => {
                Some(self.base.path_with(&format!("token/{}", self.role_token)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r3::testing::{json_body, query_pairs, MockApi};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    const POLICY: &str = "yrn:yahoo:::demo:policy:p1";

    #[test]
    fn test_create_post_body() {
        let mock = MockApi::start();
        mock.mount(
            Mock::given(method("POST"))
                .and(path("/v1/role"))
                .and(header("x-auth-token", "U=t"))
                .respond_with(ResponseTemplate::new(201).set_body_json(json!({"result": true}))),
        );

        let mut http = mock.http();
        let mut role = Role::new(AuthToken::Scoped("t".to_string()));
        assert!(http.post(role.create("r1", vec![POLICY.to_string()], vec![])));

        let request = mock.only_request();
        assert_eq!(request.url.path(), "/v1/role");
        assert_eq!(
            String::from_utf8(request.body.clone()).unwrap(),
            format!(r#"{{"role":{{"name":"r1","policies":["{}"],"alias":[]}}}}"#, POLICY)
        );
        assert_eq!(role.response().unwrap().code(), 201);
    }

    #[test]
    fn test_create_put_params() {
        let mut role = Role::new(AuthToken::Scoped("t".to_string()));
        role.create("r1", vec![POLICY.to_string()], vec![]);
        assert_eq!(role.api_path(HttpMethod::Put), Some("v1/role".to_string()));
        let params = role.urlparams().unwrap();
        assert_eq!(params["policies"], json!([POLICY]));
        assert_eq!(params["alias"], json!([]));
    }

    #[test]
    fn test_add_member_post_body() {
        let mock = MockApi::start();
        mock.mount(
            Mock::given(method("POST"))
                .and(path("/v1/role/r1"))
                .respond_with(ResponseTemplate::new(201)),
        );

        let mut http = mock.http();
        let mut role = Role::new(AuthToken::Scoped("t".to_string()));
        let host = RoleHost {
            port: Some(8020),
            cuk: Some("cuk1".to_string()),
            ..RoleHost::new("10.0.0.1")
        };
        assert!(http.post(role.add_member("r1", host, true, false)));

        assert_eq!(
            json_body(&mock.only_request()),
            json!({"host": {"host": "10.0.0.1", "port": 8020, "cuk": "cuk1",
                "extra": null, "tag": null, "inboundip": null, "outboundip": null},
                "clear_hostname": true, "clear_ips": false})
        );
    }

    #[test]
    fn test_add_members_is_post_only() {
        let mut role = Role::new(AuthToken::Scoped("t".to_string()));
        role.add_members(
            "r1",
            vec![RoleHost::new("h1"), RoleHost::new("h2")],
            false,
            false,
        );
        assert_eq!(role.api_path(HttpMethod::Put), None);
        assert_eq!(role.api_path(HttpMethod::Post), Some("v1/role/r1".to_string()));
        let body: serde_json::Value = serde_json::from_str(role.body().unwrap()).unwrap();
        assert_eq!(body["host"].as_array().unwrap().len(), 2);
        assert_eq!(body["host"][1]["host"], "h2");
    }

    #[test]
    fn test_add_member_with_roletoken() {
        let mock = MockApi::start();
        mock.mount(
            Mock::given(method("PUT"))
                .and(path("/v1/role/r1"))
                .and(header("x-auth-token", "R=roletoken"))
                .respond_with(ResponseTemplate::new(201)),
        );

        let mut http = mock.http();
        let mut role = Role::new(AuthToken::Role("roletoken".to_string()));
        assert!(http.put(role.add_member_with_roletoken(
            "r1",
            Some(8020),
            Some("cuk1"),
            None,
            Some("tag1"),
            None,
            None,
        )));

        let pairs = query_pairs(&mock.only_request());
        let expected: Vec<(String, String)> = [("port", "8020"), ("cuk", "cuk1"), ("tag", "tag1")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_add_member_with_roletoken_body_has_no_host() {
        let mut role = Role::new(AuthToken::Role("rt".to_string()));
        role.add_member_with_roletoken("r1", Some(1), None, None, None, None, None);
        role.api_path(HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(role.body().unwrap()).unwrap();
        assert!(body["host"].get("host").is_none());
        assert_eq!(body["host"]["port"], 1);
    }

    #[test]
    fn test_get_and_token_list_paths() {
        let mut role = Role::new(AuthToken::Scoped("t".to_string()));
        role.get("r1", true);
        assert_eq!(role.api_path(HttpMethod::Get), Some("v1/role/r1".to_string()));
        assert_eq!(role.urlparams().unwrap()["expand"], json!(true));

        let mut role = Role::new(AuthToken::Scoped("t".to_string()));
        role.get_token_list("r1", false);
        assert_eq!(
            role.api_path(HttpMethod::Get),
            Some("v1/role/token/list/r1".to_string())
        );
        assert_eq!(role.urlparams().unwrap()["expand"], json!(false));
    }

    #[test]
    fn test_validate_and_delete_paths() {
        let mut role = Role::new(AuthToken::Scoped("t".to_string()));
        role.validate_role("r1");
        assert_eq!(role.api_path(HttpMethod::Head), Some("v1/role/r1".to_string()));
        assert_eq!(role.api_path(HttpMethod::Delete), None);
        role.delete("r1");
        assert_eq!(role.api_path(HttpMethod::Delete), Some("v1/role/r1".to_string()));
    }

    #[test]
    fn test_delete_member_params() {
        let mock = MockApi::start();
        mock.mount(
            Mock::given(method("DELETE"))
                .and(path("/v1/role/r1"))
                .respond_with(ResponseTemplate::new(204)),
        );

        let mut http = mock.http();
        let mut role = Role::new(AuthToken::Scoped("t".to_string()));
        assert!(http.delete(role.delete_member("r1", "10.0.0.1", Some(8020), Some("cuk1"))));
        assert_eq!(
            mock.only_request().url.query(),
            Some("host=10.0.0.1&port=8020&cuk=cuk1")
        );
    }

    #[test]
    fn test_delete_member_wo_roletoken() {
        let mut role = Role::new(AuthToken::None);
        role.delete_member_wo_roletoken("cuk1");
        assert_eq!(role.api_path(HttpMethod::Delete), Some("v1/role".to_string()));
        assert_eq!(role.urlparams().unwrap()["cuk"], "cuk1");
        assert!(!role.headers().unwrap().contains("x-auth-token"));
    }

    #[test]
    fn test_delete_roletoken_paths() {
        let mut role = Role::new(AuthToken::Scoped("t".to_string()));
        role.delete_roletoken("r1", Some(8020), None);
        assert_eq!(role.api_path(HttpMethod::Delete), Some("v1/role/r1".to_string()));
        assert_eq!(role.urlparams().unwrap()["port"], 8020);

        let mut role = Role::new(AuthToken::Scoped("t".to_string()));
        role.delete_roletoken_with_string("abcdef");
        assert_eq!(
            role.api_path(HttpMethod::Delete),
            Some("v1/role/token/abcdef".to_string())
        );
    }
}
