//! Resource data models

use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::config::resource as resource_config;
use crate::error::{R3Error, Result};

/// Operations of the resource API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOperation {
    CreateConf,
    CreateWithRoleToken,
    CreateWithNoToken,
    Get,
    GetWithRoleToken,
    Validate,
    ValidateWithNoToken,
    DeleteWithScopedToken,
    DeleteWithRoleToken,
    DeleteWithNoToken,
}

/// Where the data of a new resource comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceData {
    /// Data passed as is
    Inline(String),
    /// Template file whose cluster and tenant placeholders are substituted
    File {
        path: PathBuf,
        tenant: String,
        cluster_name: String,
    },
}

impl ResourceData {
    /// Resolve to the text sent as resource data
    pub fn load(&self) -> Result<String> {
        match self {
            ResourceData::Inline(data) => Ok(data.clone()),
            ResourceData::File {
                path,
                tenant,
                cluster_name,
            } => load_resource_file(path, tenant, cluster_name),
        }
    }
}

impl From<&str> for ResourceData {
    fn from(data: &str) -> Self {
        ResourceData::Inline(data.to_string())
    }
}

impl From<String> for ResourceData {
    fn from(data: String) -> Self {
        ResourceData::Inline(data)
    }
}

/// Read a resource template, substituting the cluster and tenant placeholders.
///
/// Fails if the substituted text grows beyond 8 KiB.
pub fn load_resource_file(path: &Path, tenant: &str, cluster_name: &str) -> Result<String> {
    if !path.exists() {
        return Err(R3Error::Validation(format!(
            "path must exist, not {}",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(R3Error::Validation(format!(
            "path must be a regular file, not {}",
            path.display()
        )));
    }

    let mut reader = BufReader::new(File::open(path)?);
    let mut data = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let substituted = line
            .replace(resource_config::CLUSTER_NAME_PLACEHOLDER, cluster_name)
            .replace(resource_config::TENANT_NAME_PLACEHOLDER, tenant);
        if data.len() + substituted.len() > resource_config::MAX_DATA_LENGTH {
            return Err(R3Error::Validation(format!(
                "data too big, {} exceeds {} bytes",
                path.display(),
                resource_config::MAX_DATA_LENGTH
            )));
        }
        data.push_str(&substituted);
    }
    debug!("loaded {} bytes of resource data from {}", data.len(), path.display());
    Ok(data)
}

/// `{"resource": ...}` envelope of resource request bodies
#[derive(Serialize, Debug)]
pub(crate) struct ResourceRequest<T> {
    pub resource: T,
}

#[derive(Serialize, Debug)]
pub(crate) struct CreateResource<'a> {
    pub name: Option<&'a str>,
    #[serde(rename = "type")]
    pub data_type: Option<&'a str>,
    pub data: Option<&'a str>,
    pub keys: Option<&'a Value>,
    pub alias: Option<&'a [String]>,
}

#[derive(Serialize, Debug)]
pub(crate) struct CreateResourceWithRoleToken<'a> {
    #[serde(rename = "type")]
    pub data_type: Option<&'a str>,
    pub data: Option<&'a str>,
    pub keys: Option<&'a Value>,
}

#[derive(Serialize, Debug)]
pub(crate) struct CreateResourceWithNoToken<'a> {
    pub port: Option<u16>,
    pub cuk: Option<&'a str>,
    pub role: Option<&'a str>,
    #[serde(rename = "type")]
    pub data_type: Option<&'a str>,
    pub data: Option<&'a str>,
    pub keys: Option<&'a Value>,
}
