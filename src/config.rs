use std::env;
use std::path::PathBuf;
use dotenvy::dotenv;
use thiserror::Error;
use crate::storage::StorageFormat;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub inventory_format: StorageFormat,
    pub inventory_path: PathBuf,
    /// Write the inventory after every change instead of on save/exit.
    pub autosave: bool,
    pub hotel_name: String,
    pub seed_rooms: bool,
    /// Default filter when `RUST_LOG` is unset.
    pub log_level: String,
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            var,
            reason: format!("expected true or false, got '{}'", other),
        }),
    }
}

impl AppConfig {
    /// Reads the environment, after loading a `.env` file if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let inventory_format = match get("INVENTORY_FORMAT") {
            Some(value) => value
                .parse::<StorageFormat>()
                .map_err(|reason| ConfigError::Invalid { var: "INVENTORY_FORMAT", reason })?,
            None => StorageFormat::Json,
        };
        let inventory_path = get("INVENTORY_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(inventory_format.default_path()));

        // The line format has always saved on every change
        let autosave = match get("INVENTORY_AUTOSAVE") {
            Some(value) => parse_bool("INVENTORY_AUTOSAVE", &value)?,
            None => inventory_format == StorageFormat::Flat,
        };

        let hotel_name = get("HOTEL_NAME")
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Hotel Amazonia".to_string());
        let seed_rooms = match get("HOTEL_SEED_ROOMS") {
            Some(value) => parse_bool("HOTEL_SEED_ROOMS", &value)?,
            None => true,
        };
        let log_level = get("LOG_LEVEL").unwrap_or_else(|| "warn".to_string());

        Ok(Self {
            inventory_format,
            inventory_path,
            autosave,
            hotel_name,
            seed_rooms,
            log_level,
        })
    }
}
