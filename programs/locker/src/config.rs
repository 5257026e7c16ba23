//! Locked-account configuration

use anyhow::{Context, Result};
use lock_model::{DEFAULT_LOCK_PERIOD_SECS, DEFAULT_PENALTY_FRACTION, WHOLE_UNIT};
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;
use std::path::Path;
use std::str::FromStr;

use crate::error::LockError;

/// On-disk configuration (TOML)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockConfig {
    /// Individual lock period in seconds
    pub lock_period_secs: u64,

    /// Early-unlock penalty in ULPs of one whole unit (1e18 = 100%)
    pub penalty_fraction: u64,

    /// Base58 identity receiving early-unlock penalties
    pub penalty_disbursal: String,
}

/// Validated construction parameters of a locked account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockSettings {
    pub lock_period: u64,
    pub penalty_fraction: u128,
    pub penalty_disbursal: Pubkey,
}

impl LockSettings {
    /// Default period and penalty, penalties sent to `penalty_disbursal`
    pub fn new(penalty_disbursal: Pubkey) -> Self {
        Self {
            lock_period: DEFAULT_LOCK_PERIOD_SECS,
            penalty_fraction: DEFAULT_PENALTY_FRACTION,
            penalty_disbursal,
        }
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        if self.lock_period == 0 {
            return Err(LockError::InvalidLockPeriod);
        }
        if self.penalty_fraction > WHOLE_UNIT {
            return Err(LockError::PenaltyFractionTooLarge(self.penalty_fraction));
        }
        Ok(())
    }
}

impl LockConfig {
    /// Load configuration from the TOML file named by `LOCKER_CONFIG`
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("LOCKER_CONFIG")
            .unwrap_or_else(|_| "locker-config.toml".to_string());

        Self::load_from(&config_path)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: LockConfig = toml::from_str(&config_str)
            .context("Failed to parse config TOML")?;

        log::debug!("Loaded locker config from {}", path.display());
        Ok(config)
    }

    /// Default parameters with penalties disbursed to `penalty_disbursal`
    pub fn with_disbursal(penalty_disbursal: &Pubkey) -> Self {
        Self {
            lock_period_secs: DEFAULT_LOCK_PERIOD_SECS,
            penalty_fraction: DEFAULT_PENALTY_FRACTION as u64,
            penalty_disbursal: penalty_disbursal.to_string(),
        }
    }

    /// Write a default config to file
    pub fn write_default(path: impl AsRef<Path>, penalty_disbursal: &Pubkey) -> Result<()> {
        let path = path.as_ref();
        let config = Self::with_disbursal(penalty_disbursal);
        let toml_str = toml::to_string_pretty(&config)
            .context("Failed to serialize config")?;

        std::fs::write(path, toml_str)
            .context(format!("Failed to write config to {}", path.display()))?;

        log::info!("Created default config at {}", path.display());
        Ok(())
    }

    pub fn penalty_disbursal(&self) -> Result<Pubkey> {
        Pubkey::from_str(&self.penalty_disbursal)
            .map_err(|e| anyhow::anyhow!("{:?}", e))
            .context(format!("Invalid penalty_disbursal: {}", self.penalty_disbursal))
    }

    pub fn validate(&self) -> Result<()> {
        self.settings().map(|_| ())
    }

    /// Parse and validate into construction parameters
    pub fn settings(&self) -> Result<LockSettings> {
        let settings = LockSettings {
            lock_period: self.lock_period_secs,
            penalty_fraction: u128::from(self.penalty_fraction),
            penalty_disbursal: self.penalty_disbursal()?,
        };
        settings.validate().context("Invalid locker config")?;
        Ok(settings)
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self::with_disbursal(&Pubkey::default())
    }
}
