//! K2HR3 API client module
//!
//! Each request type builds the path, body and url params of one K2HR3 API
//! call; [`K2hr3Http`] sends it and attaches the response.

mod client;
pub mod acr;
pub mod extdata;
pub mod identity;
pub mod list;
pub mod models;
pub mod policy;
pub mod resource;
pub mod role;
pub mod service;
pub mod tenant;
#[cfg(test)]
pub(crate) mod testing;
pub mod token;
pub mod traits;
pub mod userdata;
pub mod version;

pub use acr::{Acr, AcrOperation, AcrQuery};
pub use client::K2hr3Http;
pub use extdata::Extdata;
pub use identity::scoped_token;
pub use list::{List, ListOperation};
pub use models::{ApiResponse, AuthToken, Frozen, Headers, HttpMethod, UrlParams};
pub use policy::{Policy, PolicyEffect, PolicyOperation};
pub use resource::{load_resource_file, Resource, ResourceData, ResourceOperation};
pub use role::{Role, RoleHost, RoleOperation};
pub use service::{Service, ServiceOperation};
pub use tenant::{Tenant, TenantOperation};
pub use token::{RoleToken, RoleTokenInfo, RoleTokenList, Token, TokenOperation};
pub use traits::{url_params, ApiBase, K2hr3Api};
pub use userdata::Userdata;
pub use version::Version;
