// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::api::endpoint;
use crate::infra::errors::DashboardError;
use crate::infra::paths;

/// Environment variable overriding the configured base URL (the `--api-url` flag still wins).
pub const API_URL_ENV: &str = "ONTODASH_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Explicit API base URL. Wins over `origin`.
    pub base_url: Option<String>,
    /// Origin the dashboard is served from. A non-local origin maps to `{origin}/api`.
    pub origin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Metrics auto-refresh while the metrics tab is open (0 = off).
    pub metrics_refresh_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            metrics_refresh_secs: 30,
        }
    }
}

/// Denominators of the reasoner metric slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub class_total: u64,
    pub individual_total: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            class_total: 47,
            individual_total: 10,
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| DashboardError::Config(format!("{}: {e}", path.display())))?;
        Ok(config)
    }

    /// Resolve the API base URL once for the session.
    ///
    /// Priority: `override_url` (CLI flag or `ONTODASH_API_URL`), then
    /// `[api] base_url`, then `[api] origin`, then the local dev address.
    pub fn resolve_base_url(&self, override_url: Option<&str>) -> anyhow::Result<String> {
        let env_url = std::env::var(API_URL_ENV).ok();
        let explicit = override_url
            .map(str::to_string)
            .or(env_url)
            .or_else(|| self.api.base_url.clone());

        let resolved = match explicit {
            Some(url) => endpoint::normalize(&url)?,
            None => endpoint::resolve_from_origin(self.api.origin.as_deref())?,
        };
        tracing::debug!(base_url = %resolved, "API base URL resolved");
        Ok(resolved)
    }
}
