//
//  samplify
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Two layers of configuration live here:
//!
//! - [`ClientOptions`] and [`Environment`]: what a library client needs
//!   (endpoints and timeout). Always supplied at construction.
//! - [`Config`]: the CLI's persisted settings, a TOML file in the platform
//!   config directory. The library never reads it.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/samplify/config.toml`
//! - **macOS**: `~/Library/Application Support/samplify/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\samplify\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [client]
//! client_id = "my-client-id"
//! environment = "uat"
//! timeout_secs = 30
//! ```
//!
//! The client secret is not stored here; see [`KeyringStore`](crate::auth::KeyringStore).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use samplify::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("environment", "production")?;
//! config.save()?;
//!
//! let options = config.client_options();
//! println!("Talking to {}", options.api_base_url);
//! # Ok::<(), anyhow::Error>(())
//! ```

mod options;

pub use options::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: [&str; 5] = ["client_id", "environment", "api_url", "auth_url", "timeout_secs"];

/// Persisted CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
}

/// The `[client]` section of the config file.
///
/// `api_url` and `auth_url` override the URLs implied by `environment`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ClientConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default)]
    pub environment: Environment,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves the configuration to the default location, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Returns the path of the config file for the current platform.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Reads a setting by key. Returns `None` for unset or unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "client_id" => self.client.client_id.clone(),
            "environment" => Some(self.client.environment.to_string()),
            "api_url" => self.client.api_url.clone(),
            "auth_url" => self.client.auth_url.clone(),
            "timeout_secs" => self.client.timeout_secs.map(|secs| secs.to_string()),
            _ => None,
        }
    }

    /// Updates a setting by key, validating the value.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys, unknown environments and non-numeric timeouts.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "client_id" => self.client.client_id = Some(value.to_string()),
            "environment" => {
                self.client.environment = value.parse().map_err(anyhow::Error::msg)?;
            }
            "api_url" => self.client.api_url = Some(parse_url(value)?),
            "auth_url" => self.client.auth_url = Some(parse_url(value)?),
            "timeout_secs" => {
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("timeout_secs must be a whole number, got '{}'", value))?;
                if secs == 0 {
                    bail!("timeout_secs must be greater than zero");
                }
                self.client.timeout_secs = Some(secs);
            }
            _ => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Builds client options from the environment preset and any overrides.
    pub fn client_options(&self) -> ClientOptions {
        let mut options = ClientOptions::for_environment(self.client.environment);
        if let Some(url) = &self.client.api_url {
            options = options.with_api_base_url(url.clone());
        }
        if let Some(url) = &self.client.auth_url {
            options = options.with_auth_url(url.clone());
        }
        if let Some(secs) = self.client.timeout_secs {
            options = options.with_timeout(Duration::from_secs(secs));
        }
        options
    }
}

fn parse_url(value: &str) -> Result<String> {
    let url = url::Url::parse(value).with_context(|| format!("'{}' is not a valid URL", value))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("URL must use http or https, got '{}'", url.scheme());
    }
    Ok(value.to_string())
}
