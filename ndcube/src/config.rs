/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Configuration for ndcube.
//!
//! A [`Config`] can be loaded from environment variables
//! ([`from_env`]) or from YAML ([`from_yaml`], [`to_yaml`]). The
//! process-wide value lives in [`global`]; collections and label
//! rendering read it when they are built.

use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

/// Environment variable overriding [`Config::partitions`].
pub const PARTITIONS_ENV: &str = "NDCUBE_PARTITIONS";

/// Environment variable overriding [`Config::position_separator`].
pub const POSITION_SEPARATOR_ENV: &str = "NDCUBE_POSITION_SEPARATOR";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of partitions a collection is spread over. Keyed
    /// operations shuffle keys onto this many partitions.
    pub partitions: usize,

    /// Separator used when a multi-coordinate position is rendered
    /// into a single label coordinate.
    pub position_separator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            partitions: 4,
            position_separator: "|".to_string(),
        }
    }
}

/// Load configuration from environment variables, starting from
/// defaults. Unparsable values are reported and ignored.
pub fn from_env() -> Config {
    let mut config = Config::default();

    if let Ok(value) = env::var(PARTITIONS_ENV) {
        match value.parse::<usize>() {
            Ok(partitions) if partitions > 0 => config.partitions = partitions,
            _ => tracing::error!(
                "failed to override partitions from value \"{}\" in ${}",
                value,
                PARTITIONS_ENV
            ),
        }
    }
    if let Ok(value) = env::var(POSITION_SEPARATOR_ENV) {
        config.position_separator = value;
    }

    tracing::info!(
        partitions = config.partitions,
        position_separator = %config.position_separator,
        "loaded configuration from environment"
    );
    config
}

/// Load configuration from a YAML file. Missing keys take defaults.
pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Config, anyhow::Error> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    let config: Config = serde_yaml::from_str(&contents)?;
    if config.partitions == 0 {
        anyhow::bail!("partitions must be positive");
    }
    Ok(config)
}

/// Save configuration to a YAML file.
pub fn to_yaml<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), anyhow::Error> {
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Process-wide configuration.
pub mod global {
    use std::sync::LazyLock;
    use std::sync::RwLock;

    use super::Config;

    static CONFIG: LazyLock<RwLock<Config>> = LazyLock::new(|| RwLock::new(Config::default()));

    /// A snapshot of the current configuration.
    pub fn get() -> Config {
        match CONFIG.read() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replace the current configuration.
    pub fn set(config: Config) {
        match CONFIG.write() {
            Ok(mut current) => *current = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }

    /// Replace the current configuration with [`super::from_env`].
    pub fn init_from_env() {
        set(super::from_env());
    }
}
