//! Service data models

use serde::Serialize;

/// Operations of the service API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceOperation {
    Create,
    AddMember,
    Modify,
    Get,
    Validate,
    Delete,
    DeleteTenant,
}

#[derive(Serialize, Debug)]
pub(crate) struct CreateService<'a> {
    pub name: &'a str,
    pub verify: Option<&'a str>,
}

#[derive(Serialize, Debug)]
pub(crate) struct AddServiceMember<'a> {
    pub tenant: Option<&'a str>,
    pub clear_tenant: bool,
}

#[derive(Serialize, Debug)]
pub(crate) struct ModifyService<'a> {
    pub verify: Option<&'a str>,
}
