//! Configuration system for sunnyside.
//!
//! Settings come from `sunnyside.toml`, searched under
//! `$XDG_CONFIG_HOME/sunnyside/` (or the directory given with
//! `--config-dir`). A commented default file is generated on first run.
//! Every field is optional; omitted fields fall back to the defaults in
//! [`crate::constants`].
//!
//! ```toml
//! #[Storage]
//! db_path = "~/.local/share/sunnyside/places.db"  # Place database location
//!
//! #[Server]
//! listen_address = "127.0.0.1"  # Address the HTTP API binds to
//! listen_port = 8000            # Port the HTTP API binds to
//!
//! #[Shade model]
//! default_blocker_height = 10.0 # Obstruction height in meters where unsurveyed
//! blocker_distance = 10.0       # Assumed distance to obstructions in meters
//! ```

pub mod builder;
pub mod loading;
pub mod validation;

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

use crate::constants::*;
use crate::sunlight::SunlightParams;

// Re-export public API
pub use builder::create_default_config;
pub use loading::{get_config_path, load, load_from_path, set_config_dir};

/// Application settings loaded from `sunnyside.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    /// Path of the SQLite place database.
    pub db_path: Option<String>,
    /// Address the HTTP API binds to.
    pub listen_address: Option<String>,
    /// Port the HTTP API binds to.
    pub listen_port: Option<u16>,
    /// Obstruction height in meters assumed for unsurveyed octants.
    pub default_blocker_height: Option<f64>,
    /// Assumed horizontal distance to obstructions in meters.
    pub blocker_distance: Option<f64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        load()
    }

    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        load_from_path(path)
    }

    /// Resolved database path, defaulting under the platform data dir.
    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => {
                let data_dir = dirs::data_dir()
                    .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
                Ok(data_dir.join("sunnyside").join(DEFAULT_DB_FILE))
            }
        }
    }

    pub fn listen_address(&self) -> String {
        self.listen_address
            .clone()
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDRESS.to_string())
    }

    pub fn listen_port(&self) -> u16 {
        self.listen_port.unwrap_or(DEFAULT_LISTEN_PORT)
    }

    /// Shade geometry with config overrides applied.
    pub fn sunlight_params(&self) -> SunlightParams {
        SunlightParams {
            default_blocker_height: self
                .default_blocker_height
                .unwrap_or(DEFAULT_BLOCKER_HEIGHT),
            blocker_distance: self.blocker_distance.unwrap_or(DEFAULT_BLOCKER_DISTANCE),
        }
    }

    /// Print the effective configuration as an indented block.
    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");
        if let Ok(db_path) = self.db_path() {
            log_indented!("Database: {}", crate::utils::private_path(&db_path));
        }
        log_indented!("Listen: {}:{}", self.listen_address(), self.listen_port());
        let params = self.sunlight_params();
        log_indented!(
            "Default obstruction height: {} m",
            params.default_blocker_height
        );
        log_indented!("Obstruction distance: {} m", params.blocker_distance);
    }
}

#[cfg(test)]
mod tests;
