//! Policy data models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operations of the policy API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyOperation {
    Create,
    Get,
    Validate,
    Delete,
}

/// Whether a policy grants or refuses its actions
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PolicyEffect {
    Allow,
    Deny,
}

impl fmt::Display for PolicyEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyEffect::Allow => write!(f, "allow"),
            PolicyEffect::Deny => write!(f, "deny"),
        }
    }
}

/// Body of `POST /v1/policy`
#[derive(Serialize, Debug)]
pub(crate) struct PolicyRequest<'a> {
    pub policy: CreatePolicy<'a>,
}

#[derive(Serialize, Debug)]
pub(crate) struct CreatePolicy<'a> {
    pub name: &'a str,
    pub effect: Option<PolicyEffect>,
    pub action: Option<&'a [String]>,
    pub resource: Option<&'a [String]>,
    pub condition: Option<&'a str>,
    pub alias: Option<&'a [String]>,
}
