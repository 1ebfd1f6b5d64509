//! Role module - K2HR3 roles, their members and role tokens

mod api;
mod models;

pub use api::Role;
pub use models::{RoleHost, RoleOperation};
