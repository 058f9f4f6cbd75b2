//! Configuration validation.
//!
//! Rejects configurations that would undermine the shade formula's
//! guarantees (negative heights, zero obstruction distance) or that cannot
//! possibly serve (empty bind address).

use anyhow::Result;

use super::Config;
use crate::constants::MAXIMUM_BLOCKER_HEIGHT;

pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(height) = config.default_blocker_height
        && (!height.is_finite() || !(0.0..=MAXIMUM_BLOCKER_HEIGHT).contains(&height))
    {
        anyhow::bail!(
            "default_blocker_height ({height}) must be between 0 and {MAXIMUM_BLOCKER_HEIGHT} meters"
        );
    }

    if let Some(distance) = config.blocker_distance
        && (!distance.is_finite() || distance <= 0.0)
    {
        anyhow::bail!("blocker_distance ({distance}) must be a positive number of meters");
    }

    if let Some(address) = &config.listen_address
        && address.trim().is_empty()
    {
        anyhow::bail!("listen_address must not be empty");
    }

    if config.listen_port == Some(0) {
        anyhow::bail!("listen_port must be between 1 and 65535");
    }

    if let Some(db_path) = &config.db_path
        && db_path.trim().is_empty()
    {
        anyhow::bail!("db_path must not be empty");
    }

    Ok(())
}
