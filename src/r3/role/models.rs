//! Role data models

use serde::{Deserialize, Serialize};

/// Operations of the role API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleOperation {
    Create,
    AddMember,
    AddMembers,
    AddMemberWithRoleToken,
    Get,
    GetTokenList,
    Validate,
    Delete,
    DeleteMember,
    DeleteMemberWithoutRoleToken,
    DeleteRoleToken,
    DeleteRoleTokenWithString,
}

/// A host registered as a role member
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleHost {
    /// Hostname or ip address
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Container unique key
    pub cuk: Option<String>,
    pub extra: Option<String>,
    pub tag: Option<String>,
    pub inboundip: Option<String>,
    pub outboundip: Option<String>,
}

impl RoleHost {
    pub fn new(host: &str) -> Self {
        Self {
            host: Some(host.to_string()),
            ..Default::default()
        }
    }
}

/// Body of `POST /v1/role`
#[derive(Serialize, Debug)]
pub(crate) struct RoleRequest<'a> {
    pub role: CreateRole<'a>,
}

#[derive(Serialize, Debug)]
pub(crate) struct CreateRole<'a> {
    pub name: &'a str,
    pub policies: &'a [String],
    pub alias: &'a [String],
}

/// Body of `POST /v1/role/{name}`; `host` is one host or a list of them
#[derive(Serialize, Debug)]
pub(crate) struct AddMemberRequest<'a, H: Serialize> {
    pub host: &'a H,
    pub clear_hostname: bool,
    pub clear_ips: bool,
}

/// Body of `POST /v1/role/{name}` sent with a role token
#[derive(Serialize, Debug)]
pub(crate) struct RoleTokenMemberRequest<'a> {
    pub host: RoleTokenMember<'a>,
}

#[derive(Serialize, Debug)]
pub(crate) struct RoleTokenMember<'a> {
    pub port: Option<u16>,
    pub cuk: Option<&'a str>,
    pub extra: Option<&'a str>,
    pub tag: Option<&'a str>,
    pub inboundip: Option<&'a str>,
    pub outboundip: Option<&'a str>,
}
