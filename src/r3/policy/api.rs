//! Policy API requests

use serde_json::json;

use crate::r3::models::{AuthToken, HttpMethod};
use crate::r3::traits::{url_params, ApiBase, K2hr3Api};

use super::models::{CreatePolicy, PolicyEffect, PolicyOperation, PolicyRequest};

/// Policy request (`policy[/{name}]`)
#[derive(Debug, Clone)]
pub struct Policy {
    base: ApiBase,
    operation: Option<PolicyOperation>,
    name: String,
    effect: Option<PolicyEffect>,
    actions: Option<Vec<String>>,
    resources: Option<Vec<String>>,
    condition: Option<String>,
    alias: Option<Vec<String>>,
    service: Option<String>,
    tenant: Option<String>,
    // single resource and action checked by validate
    resource: Option<String>,
    action: Option<String>,
}

impl Policy {
    /// Policy request, authenticated when `r3token` is given
    pub fn new(r3token: Option<&str>) -> Self {
        let token = AuthToken::from(r3token.map(str::to_string));
        Self {
            base: ApiBase::new("policy").with_headers(token.json_headers()),
            operation: None,
            name: String::new(),
            effect: None,
            actions: None,
            resources: None,
            condition: None,
            alias: None,
            service: None,
            tenant: None,
            resource: None,
            action: None,
        }
    }

    /// Create a policy (POST or PUT)
    pub fn create(
        &mut self,
        name: &str,
        effect: PolicyEffect,
        actions: Option<Vec<String>>,
        resources: Option<Vec<String>>,
        condition: Option<&str>,
        alias: Option<Vec<String>>,
    ) -> &mut Self {
        self.operation = Some(PolicyOperation::Create);
        self.name = name.to_string();
        self.effect = Some(effect);
        self.actions = actions;
        self.resources = resources;
        self.condition = condition.map(str::to_string);
        self.alias = alias;
        self
    }

    /// Get a policy by name or full yrn (GET)
    pub fn get(&mut self, name: &str, service: Option<&str>) -> &mut Self {
        self.operation = Some(PolicyOperation::Get);
        self.name = name.to_string();
        self.service = service.map(str::to_string);
        self
    }

    /// Check whether `tenant` may perform `action` on `resource` (HEAD)
    pub fn validate(
        &mut self,
        name: &str,
        tenant: &str,
        resource: &str,
        action: &str,
        service: Option<&str>,
    ) -> &mut Self {
        self.operation = Some(PolicyOperation::Validate);
        self.name = name.to_string();
        self.tenant = Some(tenant.to_string());
        self.resource = Some(resource.to_string());
        self.action = Some(action.to_string());
        self.service = service.map(str::to_string);
        self
    }

    /// Delete a policy (DELETE)
    pub fn delete(&mut self, name: &str) -> &mut Self {
        self.operation = Some(PolicyOperation::Delete);
        self.name = name.to_string();
        self
    }
}

impl K2hr3Api for Policy {
    fn base(&self) -> &ApiBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ApiBase {
        &mut self.base
    }

    fn api_path(&mut self, method: HttpMethod) -> Option<String> {
        match (method, self.operation?) {
            (HttpMethod::Post, PolicyOperation::Create) => {
                self.base.set_json_body(&PolicyRequest {
                    policy: CreatePolicy {
                        name: &self.name,
                        effect: self.effect,
                        action: self.actions.as_deref(),
                        resource: self.resources.as_deref(),
                        condition: self.condition.as_deref(),
                        alias: self.alias.as_deref(),
                    },
                });
                Some(self.base.path())
            }
            (HttpMethod::Put, PolicyOperation::Create) => {
                self.base.set_urlparams(url_params([
                    ("name", json!(self.name)),
                    ("effect", json!(self.effect)),
                    ("action", json!(self.actions)),
                    ("resource", json!(self.resources)),
                    ("condition", json!(self.condition)),
                    ("alias", json!(self.alias)),
                ]));
                Some(self.base.path())
            }
            (HttpMethod::Get, PolicyOperation::Get) => {
                self.base
                    .set_urlparams(url_params([("service", json!(self.service))]));
                Some(self.base.path_with(&self.name))
            }
            (HttpMethod::Head, PolicyOperation::Validate) => {
                self.base.set_urlparams(url_params([
                    ("tenant", json!(self.tenant)),
                    ("resource", json!(self.resource)),
                    ("action", json!(self.action)),
                    ("service", json!(self.service)),
                ]));
                Some(self.base.path_with(&self.name))
            }
            (HttpMethod::Delete, PolicyOperation::Delete) => Some(self.base.path_with(&self.name)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r3::testing::{json_body, query_pairs, MockApi};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    const RESOURCE: &str = "yrn:yahoo:::demo:resource:test_resource";

    #[test]
    fn test_create_post_body() {
        let mock = MockApi::start();
        mock.mount(
            Mock::given(method("POST"))
                .and(path("/v1/policy"))
                .respond_with(ResponseTemplate::new(201).set_body_json(json!({"result": true}))),
        );

        let mut http = mock.http();
        let mut policy = Policy::new(Some("token"));
        assert!(http.post(policy.create(
            "test_policy",
            PolicyEffect::Allow,
            Some(vec!["yrn:yahoo::::action:read".to_string()]),
            Some(vec![RESOURCE.to_string()]),
            None,
            Some(vec![]),
        )));

        let request = mock.only_request();
        assert_eq!(request.headers.get("x-auth-token").unwrap(), "U=token");
        assert_eq!(
            json_body(&request),
            json!({"policy": {
                "name": "test_policy",
                "effect": "allow",
                "action": ["yrn:yahoo::::action:read"],
                "resource": [RESOURCE],
                "condition": null,
                "alias": []
            }})
        );
    }

    #[test]
    fn test_create_put_params() {
        let mut policy = Policy::new(Some("token"));
        policy.create("p", PolicyEffect::Deny, None, None, Some("cond"), None);
        assert_eq!(policy.api_path(HttpMethod::Put), Some("v1/policy".to_string()));
        let params = policy.urlparams().unwrap();
        assert_eq!(params["effect"], "deny");
        assert_eq!(params["condition"], "cond");
    }

    #[test]
    fn test_get_path_and_service() {
        let mut policy = Policy::new(Some("token"));
        policy.get("test_policy", Some("svc"));
        assert_eq!(
            policy.api_path(HttpMethod::Get),
            Some("v1/policy/test_policy".to_string())
        );
        assert_eq!(policy.urlparams().unwrap()["service"], "svc");
    }

    #[test]
    fn test_validate_without_token() {
        let mock = MockApi::start();
        mock.mount(
            Mock::given(method("HEAD"))
                .and(path("/v1/policy/yrn:yahoo:::demo:policy:p"))
                .respond_with(ResponseTemplate::new(204)),
        );

        let mut http = mock.http();
        let mut policy = Policy::new(None);
        assert!(http.head(policy.validate(
            "yrn:yahoo:::demo:policy:p",
            "demo",
            RESOURCE,
            "yrn:yahoo::::action:read",
            None,
        )));

        let request = mock.only_request();
        assert!(request.headers.get("x-auth-token").is_none());
        let keys: Vec<String> = query_pairs(&request).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["tenant", "resource", "action"]);
    }

    #[test]
    fn test_delete_path() {
        let mut policy = Policy::new(Some(""));
        assert!(!policy.headers().unwrap().contains("x-auth-token"));
        policy.delete("test_policy");
        assert_eq!(
            policy.api_path(HttpMethod::Delete),
            Some("v1/policy/test_policy".to_string())
        );
        assert_eq!(policy.api_path(HttpMethod::Post), None);
    }
}
