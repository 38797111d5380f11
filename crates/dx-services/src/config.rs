//! Data-plane client configuration
//!
//! Read from TOML, with environment overrides for the values that differ
//! per deployment.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::{ServiceError, ServiceResult};

pub const ENV_DATA_PLANE_URL: &str = "DX_DATA_PLANE_URL";
pub const ENV_ENV_ID: &str = "DX_ENV_ID";

/// Where and how to reach the data-plane service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPlaneConfig {
    /// Base URL of the data plane, e.g. `http://localhost:3457`
    pub base_url: String,
    /// Environment the dashboard is attached to
    pub env_id: String,
    /// Suffix of the `Darx-Dev-Host` header, after the env id
    pub dev_host_suffix: String,
    /// Rows per page when browsing a table
    pub page_size: u32,
    pub request_timeout_secs: u64,
}

impl Default for DataPlaneConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3457".to_string(),
            env_id: String::new(),
            dev_host_suffix: "darx.sh".to_string(),
            page_size: 100,
            request_timeout_secs: 30,
        }
    }
}

impl DataPlaneConfig {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse data plane config")
    }

    /// Load from a TOML file, then apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_DATA_PLANE_URL).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(url = %url, "data plane url overridden from environment");
            self.base_url = url;
        }
        if let Some(env_id) = lookup(ENV_ENV_ID).filter(|v| !v.trim().is_empty()) {
            self.env_id = env_id;
        }
    }

    pub fn validate(&self) -> ServiceResult<()> {
        if self.env_id.trim().is_empty() {
            return Err(ServiceError::Configuration("env_id is empty".to_string()));
        }
        if self.page_size == 0 {
            return Err(ServiceError::Configuration(
                "page_size must be positive".to_string(),
            ));
        }
        self.base_url()?;
        Ok(())
    }

    /// Parsed base URL; only http(s) is accepted
    pub fn base_url(&self) -> ServiceResult<Url> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ServiceError::Configuration(format!("invalid base_url {:?}: {}", self.base_url, e))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ServiceError::Configuration(format!(
                "unsupported base_url scheme {:?}",
                scheme
            ))),
        }
    }

    /// Value of the `Darx-Dev-Host` header
    pub fn dev_host(&self) -> String {
        format!("{}.{}", self.env_id, self.dev_host_suffix)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
