//! k2hr3client - blocking client for the K2HR3 REST API
//!
//! K2HR3 is a role based access control system. This crate builds and sends
//! its API requests: tokens, tenants, resources, policies, roles, services,
//! ACRs, extdata, userdata, lists and versions.
//!
//! # Example
//!
//! ```no_run
//! use k2hr3client::{K2hr3Http, Token};
//!
//! # fn main() -> k2hr3client::Result<()> {
//! let mut http = K2hr3Http::new("http://127.0.0.1:18080")?;
//! let mut token = Token::new("demo", "openstack_token");
//! if http.post(token.create(None, None)) {
//!     println!("{:?}", token.token()?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod r3;
pub mod settings;

pub use error::{R3Error, Result};
pub use r3::{
    scoped_token, url_params, Acr, AcrQuery, ApiBase, ApiResponse, AuthToken, Extdata, Headers,
    HttpMethod, K2hr3Api, K2hr3Http, List, Policy, PolicyEffect, Resource, ResourceData, Role,
    RoleHost, RoleToken, RoleTokenList, Service, Tenant, Token, Userdata, Version,
};
pub use settings::{HttpConfig, K2hr3Settings, Settings, SettingsStore};
