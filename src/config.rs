//! Application configuration.
//!
//! Loaded once at bootstrap from a TOML file, with environment
//! variables taking precedence so deployments can override the file
//! without editing it.
//!
//! ## Environment variables
//!
//! - `FORERUNNER_PROJECT`: project name, used for logging context.
//! - `FORERUNNER_PATH_ROOT`: prefix stripped from incoming request
//!   paths before routing (for applications served under a sub-path).

use anyhow::Context as _;
use serde::Deserialize;
use std::env;
use std::path::Path;
use tracing::info;

fn default_project() -> String {
    "app".to_string()
}

/// Process-wide configuration consumed by the front controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Project name, for logging context.
    #[serde(default = "default_project")]
    pub project: String,
    /// Path prefix stripped from request paths before routing.
    #[serde(default)]
    pub path_root: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            project: default_project(),
            path_root: String::new(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("failed to parse config TOML")
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&raw)?;
        info!(
            project = %config.project,
            path_root = %config.path_root,
            file = %path.display(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Apply environment variable overrides on top of this config.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(project) = env::var("FORERUNNER_PROJECT") {
            self.project = project;
        }
        if let Ok(path_root) = env::var("FORERUNNER_PATH_ROOT") {
            self.path_root = path_root;
        }
        self
    }
}
