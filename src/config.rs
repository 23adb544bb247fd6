// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{Result, ShimError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR_NAME: &str = "loginpath-shim";
const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "LOGINPATH_SHIM";
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShimConfig {
    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub locator: LocatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Upper bound for a single package-manager or version query
    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocatorConfig {
    /// Additional executable paths or glob patterns, tried after the built-in candidates
    #[serde(default)]
    pub extra_paths: Vec<String>,
}

fn default_probe_timeout_secs() -> u64 {
    DEFAULT_PROBE_TIMEOUT_SECS
}

/// Default location of the optional configuration file.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl ShimConfig {
    /// Load configuration from the default file location and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path().as_deref())
    }

    /// Load configuration from `config_path` (if it exists), overridden by
    /// `LOGINPATH_SHIM_*` environment variables.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
            } else {
                log::debug!("Config file not found at {}, using defaults", path.display());
            }
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("locator.extra_paths"),
        );

        let config: ShimConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ShimError::ConfigError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load like [`ShimConfig::load`], but fall back to the defaults with a
    /// warning when the configuration is unusable.
    pub fn load_or_default() -> Self {
        Self::load_from_or_default(default_config_path().as_deref())
    }

    pub fn load_from_or_default(config_path: Option<&Path>) -> Self {
        Self::load_from(config_path).unwrap_or_else(|e| {
            log::warn!("Ignoring configuration: {e}");
            Self::default()
        })
    }

    fn validate(&self) -> Result<()> {
        if self.probe.timeout_secs == 0 {
            return Err(ShimError::ConfigError(
                "probe.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
