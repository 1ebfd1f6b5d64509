//! Tenant data models

use serde::Serialize;

/// Operations of the tenant API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantOperation {
    Create,
    Modify,
    List,
    Get,
    Validate,
    Delete,
    DeleteUser,
}

/// `{"tenant": ...}` envelope of tenant request bodies
#[derive(Serialize, Debug)]
pub(crate) struct TenantRequest<T> {
    pub tenant: T,
}

#[derive(Serialize, Debug)]
pub(crate) struct CreateTenant<'a> {
    pub name: &'a str,
    pub desc: Option<&'a str>,
    pub display: Option<&'a str>,
    pub users: Option<&'a [String]>,
}

#[derive(Serialize, Debug)]
pub(crate) struct UpdateTenant<'a> {
    pub id: Option<i64>,
    pub desc: Option<&'a str>,
    pub display: Option<&'a str>,
    pub users: Option<&'a [String]>,
}
