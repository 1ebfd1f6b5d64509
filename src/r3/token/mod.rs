//! Token module - user tokens, role tokens and role token lists

mod api;
mod models;

pub use api::{RoleToken, RoleTokenList, Token};
pub use models::{RoleTokenInfo, TokenOperation};
