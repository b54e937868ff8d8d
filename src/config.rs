//! Runtime configuration for the terminal binary.
//!
//! Everything comes from `BLOCKFALL_*` environment variables. A variable that
//! is missing or does not parse falls back to its default; values that parse
//! but make no sense are caught by [`AppConfig::validate`].

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{ensure, Result};

use crate::core::Rules;
use crate::types::{
    BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH, DROP_STEP_MS, MAX_BOARD_DIM, MIN_DROP_MS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub width: u8,
    pub height: u8,
    pub seed: u32,
    pub base_drop_ms: u32,
    pub min_drop_ms: u32,
    pub drop_step_ms: u32,
    /// JSON-lines event log; disabled when `None`
    pub log_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            seed: time_seed(),
            base_drop_ms: BASE_DROP_MS,
            min_drop_ms: MIN_DROP_MS,
            drop_step_ms: DROP_STEP_MS,
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| -> Option<u32> { lookup(key).and_then(|s| s.trim().parse().ok()) };

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            width: parsed("BLOCKFALL_WIDTH")
                .and_then(|v| u8::try_from(v).ok())
                .unwrap_or(defaults.width),
            height: parsed("BLOCKFALL_HEIGHT")
                .and_then(|v| u8::try_from(v).ok())
                .unwrap_or(defaults.height),
            seed: parsed("BLOCKFALL_SEED").unwrap_or(defaults.seed),
            base_drop_ms: parsed("BLOCKFALL_BASE_DROP_MS").unwrap_or(defaults.base_drop_ms),
            min_drop_ms: parsed("BLOCKFALL_MIN_DROP_MS").unwrap_or(defaults.min_drop_ms),
            drop_step_ms: parsed("BLOCKFALL_DROP_STEP_MS").unwrap_or(defaults.drop_step_ms),
            log_path,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_BOARD_DIM).contains(&self.width),
            "BLOCKFALL_WIDTH must be between 1 and {MAX_BOARD_DIM}, got {}",
            self.width
        );
        ensure!(
            (1..=MAX_BOARD_DIM).contains(&self.height),
            "BLOCKFALL_HEIGHT must be between 1 and {MAX_BOARD_DIM}, got {}",
            self.height
        );
        ensure!(self.min_drop_ms > 0, "BLOCKFALL_MIN_DROP_MS must be positive");
        ensure!(
            self.base_drop_ms >= self.min_drop_ms,
            "BLOCKFALL_BASE_DROP_MS ({}) is below BLOCKFALL_MIN_DROP_MS ({})",
            self.base_drop_ms,
            self.min_drop_ms
        );
        Ok(())
    }

    /// Progression rules with the configured gravity timings
    pub fn rules(&self) -> Rules {
        Rules {
            base_drop_ms: self.base_drop_ms,
            min_drop_ms: self.min_drop_ms,
            drop_step_ms: self.drop_step_ms,
            ..Rules::default()
        }
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
