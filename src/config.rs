//! Connection configuration.
//!
//! Settings resolve in layers: built-in defaults, then an optional TOML
//! file, then `FERMWATCH_*` environment variables. CLI flags are applied
//! on top by the binary.

use std::path::Path;

use anyhow::{bail, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// InfluxDB connection settings.
///
/// Scoped to the source that uses them; nothing here is process-global.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InfluxConfig {
    /// Server URL.
    pub url: String,
    /// API token used as the bearer credential.
    pub token: String,
    /// Organization name.
    pub org: String,
    /// Bucket holding the environment measurement.
    pub bucket: String,
}

impl Default for InfluxConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8086".to_string(),
            token: String::new(),
            org: String::new(),
            bucket: String::new(),
        }
    }
}

impl InfluxConfig {
    /// Load settings from an optional config file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let settings = builder
            .add_source(Environment::with_prefix("FERMWATCH"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Apply per-field overrides (CLI flags) on top of loaded settings.
    pub fn with_overrides(
        mut self,
        url: Option<String>,
        token: Option<String>,
        org: Option<String>,
        bucket: Option<String>,
    ) -> Self {
        if let Some(url) = url {
            self.url = url;
        }
        if let Some(token) = token {
            self.token = token;
        }
        if let Some(org) = org {
            self.org = org;
        }
        if let Some(bucket) = bucket {
            self.bucket = bucket;
        }
        self
    }

    /// A usable connection needs a token; everything else has a default.
    pub fn ensure_token(&self) -> Result<()> {
        if self.token.is_empty() {
            bail!(
                "no API token configured; pass --token, set FERMWATCH_TOKEN, \
                 provide a config file, or use --demo"
            );
        }
        Ok(())
    }
}
