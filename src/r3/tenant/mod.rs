//! Tenant module - create, modify, list and delete K2HR3 tenants

mod api;
mod models;

pub use api::Tenant;
pub use models::TenantOperation;
