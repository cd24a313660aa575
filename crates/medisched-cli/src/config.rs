// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_CONFIG_FILE: &str = "medisched.toml";
const DEFAULT_BASE_URL: &str = "http://localhost:8123";

/// Optional on-disk connection settings
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub token: Option<String>,
}

/// Fully resolved connection settings
#[derive(Debug, Clone)]
pub struct Connection {
    pub base_url: String,
    pub token: String,
}

fn load_file(path: Option<&Path>) -> Result<FileConfig> {
    let path: PathBuf = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(FileConfig::default());
            }
            default
        }
    };

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: FileConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Resolve connection settings: CLI flags, then environment, then the
/// config file, then defaults. A missing token is a hard startup error.
pub fn resolve(
    cli_base_url: Option<String>,
    cli_token: Option<String>,
    config_path: Option<&Path>,
) -> Result<Connection> {
    let file = load_file(config_path)?;

    let base_url = cli_base_url
        .or_else(|| std::env::var("HA_BASE_URL").ok())
        .or(file.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

    let Some(token) = cli_token
        .or_else(|| std::env::var("HA_TOKEN").ok())
        .or(file.token)
    else {
        bail!(
            "No Home Assistant token configured. Pass --token, set HA_TOKEN, \
             or add 'token' to medisched.toml"
        );
    };

    Ok(Connection { base_url, token })
}
