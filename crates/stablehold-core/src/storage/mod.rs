mod config;

pub use config::{Config, DisplayConfig, Secrets, WaitlistConfig, WeatherConfig};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `STABLEHOLD_DATA_DIR` wins outright. Otherwise `~/.config/stablehold[-dev]/`
/// based on STABLEHOLD_ENV; set STABLEHOLD_ENV=dev to use the development
/// directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("STABLEHOLD_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("STABLEHOLD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("stablehold-dev")
            } else {
                base_dir.join("stablehold")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Where the CLI keeps its session cache.
pub fn session_path() -> std::io::Result<PathBuf> {
    Ok(data_dir()?.join("session.json"))
}
