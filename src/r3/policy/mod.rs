//! Policy module - K2HR3 access policies

mod api;
mod models;

pub use api::Policy;
pub use models::{PolicyEffect, PolicyOperation};
