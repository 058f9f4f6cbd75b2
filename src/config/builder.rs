//! Default configuration file generation.
//!
//! Builds a commented `sunnyside.toml` with aligned inline comments, the
//! same layout a hand-maintained file would use.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::constants::*;

/// Builder assembling a formatted configuration file.
struct ConfigBuilder {
    lines: Vec<ConfigLine>,
}

enum ConfigLine {
    Section(String),
    Setting { key_value: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn add_section(mut self, name: &str) -> Self {
        self.lines.push(ConfigLine::Section(name.to_string()));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.lines.push(ConfigLine::Setting {
            key_value: format!("{key} = {value}"),
            comment: comment.to_string(),
        });
        self
    }

    /// Render with inline comments aligned past the widest setting.
    fn build(self) -> String {
        let width = self
            .lines
            .iter()
            .filter_map(|line| match line {
                ConfigLine::Setting { key_value, .. } => Some(key_value.len()),
                ConfigLine::Section(_) => None,
            })
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        let mut first = true;
        for line in self.lines {
            match line {
                ConfigLine::Section(name) => {
                    if !first {
                        out.push('\n');
                    }
                    out.push_str(&format!("#[{name}]\n"));
                }
                ConfigLine::Setting { key_value, comment } => {
                    out.push_str(&format!("{key_value:<width$}  # {comment}\n"));
                }
            }
            first = false;
        }
        out
    }
}

/// Write a default config file at `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let default_db = dirs::data_dir()
        .map(|d| d.join("sunnyside").join(DEFAULT_DB_FILE))
        .context("Could not determine data directory")?;

    let content = ConfigBuilder::new()
        .add_section("Storage")
        .add_setting(
            "db_path",
            &format!("\"{}\"", default_db.display()),
            "Place database location",
        )
        .add_section("Server")
        .add_setting(
            "listen_address",
            &format!("\"{DEFAULT_LISTEN_ADDRESS}\""),
            "Address the HTTP API binds to",
        )
        .add_setting(
            "listen_port",
            &DEFAULT_LISTEN_PORT.to_string(),
            "Port the HTTP API binds to",
        )
        .add_section("Shade model")
        .add_setting(
            "default_blocker_height",
            &format!("{DEFAULT_BLOCKER_HEIGHT:.1}"),
            "Obstruction height in meters for unsurveyed directions",
        )
        .add_setting(
            "blocker_distance",
            &format!("{DEFAULT_BLOCKER_DISTANCE:.1}"),
            "Assumed distance to obstructions in meters",
        )
        .build();

    fs::write(path, content)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(())
}
