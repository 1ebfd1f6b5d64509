//! ACR data models

use serde::Serialize;

/// Operations of the ACR API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcrOperation {
    AddMember,
    ShowCredentialDetails,
    GetAvailableResources,
    DeleteMember,
}

/// Client and service host identity used to look up available resources.
///
/// `c*` fields describe the client host, `s*` fields the service host.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AcrQuery {
    pub cip: Option<String>,
    pub cport: Option<u16>,
    pub crole: Option<String>,
    pub ccuk: Option<String>,
    pub sport: Option<u16>,
    pub srole: Option<String>,
    pub scuk: Option<String>,
}

#[derive(Serialize, Debug)]
pub(crate) struct AddAcrMember<'a> {
    pub tenant: Option<&'a str>,
}
