//! Service module - K2HR3 services and their member tenants

mod api;
mod models;

pub use api::Service;
pub use models::ServiceOperation;
