//! ACR module - service access for tenants and their hosts

mod api;
mod models;

pub use api::Acr;
pub use models::{AcrOperation, AcrQuery};
