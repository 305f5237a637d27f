// Centralized configuration for SFC Tracker

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, Utc};

/// JST is UTC+9; flight dates and backup file names follow Japan time
pub const JST_OFFSET_HOURS: i64 = 9;

/// Store key holding the flight log sequence
pub const FLIGHT_LOGS_KEY: &str = "flight_logs";

/// Store key holding the selected target status
pub const TARGET_TYPE_KEY: &str = "target_type";

/// Store file name inside the data directory
pub const STORE_FILE_NAME: &str = "sfc_store.json";

/// Discord embed colors
pub mod colors {
    pub const PRIMARY: u32 = 0x003184;
    pub const SUCCESS: u32 = 0x2ecc71;
    pub const ERROR: u32 = 0xff0000;
    pub const WARNING: u32 = 0xffa500;
    pub const INFO: u32 = 0x3498db;
    pub const FLIGHT: u32 = 0x00bfff;
}

/// Runtime settings read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    /// The only Discord user allowed to run commands
    pub owner_id: u64,
    pub data_dir: PathBuf,
    pub prefix: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let discord_token = env::var("DISCORD_TOKEN").context("DISCORD_TOKEN must be set")?;
        let owner_id = env::var("OWNER_ID")
            .context("OWNER_ID must be set")?
            .trim()
            .parse::<u64>()
            .context("OWNER_ID must be a Discord user id")?;
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let prefix = env::var("COMMAND_PREFIX").unwrap_or_else(|_| "sfc!".to_string());

        Ok(Self {
            discord_token,
            owner_id,
            data_dir,
            prefix,
        })
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }
}

/// Today's date in JST
pub fn today() -> NaiveDate {
    (Utc::now() + Duration::hours(JST_OFFSET_HOURS)).date_naive()
}

/// Parse a YYYY-MM-DD date; blank input counts as missing
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
