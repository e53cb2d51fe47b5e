//! Tool configuration for clientgen.
//!
//! This module defines the `GeneratorConfig` struct: where the generator jar
//! lives, how to launch it, which local endpoints the discovery probe talks to
//! and the defaults offered at the prompts. It can be loaded from a YAML file,
//! created programmatically, or left at its built-in defaults.
//!
//! # Examples
//!
//! ```no_run
//! use clientgen_core::config::GeneratorConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> clientgen_core::Result<()> {
//! // Defaults, tweaked in code
//! let mut config = GeneratorConfig::default();
//! config.fail_fast = true;
//!
//! // Or resolved from the usual locations
//! let config = GeneratorConfig::load(None, ".").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

/// File name looked up in the host project root
pub const PROJECT_CONFIG_FILE: &str = ".clientgen.yaml";

/// Configuration for a clientgen run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Java executable used to launch the generator jar
    pub java: String,

    /// Path to the swagger-codegen CLI jar
    pub jar: PathBuf,

    /// Optional custom generator templates, passed as `-t`
    pub templates_dir: Option<PathBuf>,

    /// Base URL of the service registry probed for health
    pub registry_url: Url,

    /// Base URL of the gateway publishing swagger resources
    pub gateway_url: Url,

    /// Spec location offered by default at the prompt
    pub default_spec: String,

    /// Client name offered by default at the prompt
    pub default_client_name: String,

    /// Key of the client store inside `.yo-rc.json`
    pub store_namespace: String,

    /// Abort the remaining plan on the first failed generator run
    pub fail_fast: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            java: "java".to_string(),
            jar: PathBuf::from("jar/swagger-codegen-cli.jar"),
            templates_dir: None,
            registry_url: DEFAULT_REGISTRY_URL.clone(),
            gateway_url: DEFAULT_GATEWAY_URL.clone(),
            default_spec: "http://petstore.swagger.io/v2/swagger.json".to_string(),
            default_client_name: "petstore".to_string(),
            store_namespace: "clientgen".to_string(),
            fail_fast: false,
        }
    }
}

static DEFAULT_REGISTRY_URL: Lazy<Url> =
    Lazy::new(|| Url::parse("http://localhost:8761").expect("registry url is valid"));

static DEFAULT_GATEWAY_URL: Lazy<Url> =
    Lazy::new(|| Url::parse("http://localhost:8080").expect("gateway url is valid"));

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await.map_err(|e| {
            crate::Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit file must exist. Otherwise `<project>/.clientgen.yaml` and
    /// then `~/.clientgen/config.yaml` are tried, falling back to defaults.
    pub async fn load(explicit: Option<&Path>, project_dir: impl AsRef<Path>) -> crate::Result<Self> {
        if let Some(path) = explicit {
            log::debug!("Loading configuration from {}", path.display());
            return Self::from_file(path).await;
        }

        let mut candidates = vec![project_dir.as_ref().join(PROJECT_CONFIG_FILE)];
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".clientgen").join("config.yaml"));
        }

        for candidate in candidates {
            if fs::try_exists(&candidate).await.unwrap_or(false) {
                log::debug!("Loading configuration from {}", candidate.display());
                return Self::from_file(&candidate).await;
            }
        }

        log::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }
}
