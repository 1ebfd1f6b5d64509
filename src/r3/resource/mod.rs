//! Resource module - K2HR3 resources and their data

mod api;
mod models;

pub use api::Resource;
pub use models::{load_resource_file, ResourceData, ResourceOperation};
