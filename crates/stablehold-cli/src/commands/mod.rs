pub mod access_code;
pub mod background;
pub mod config;
pub mod period;
pub mod progress;
pub mod waitlist;
pub mod weather;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use stablehold_core::{parse_instant, resolve_timezone, Config, RandomSource, RngSource};

/// `--now` if given, otherwise the wall clock.
pub fn resolve_now(
    now: Option<&str>,
    timezone: &str,
) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    match now {
        Some(text) => Ok(parse_instant(text, resolve_timezone(timezone)?)?),
        None => Ok(Utc::now()),
    }
}

/// Seeded PCG for reproducible output, thread RNG otherwise.
pub fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(RngSource(Mcg128Xsl64::seed_from_u64(seed))),
        None => Box::new(RngSource(rand::thread_rng())),
    }
}

/// Catalog from `display.catalog_path`, or the built-in one.
pub fn load_catalog(
    config: &Config,
) -> Result<stablehold_core::SelectionCatalog, Box<dyn std::error::Error>> {
    match config.display.catalog_path.as_deref() {
        Some(path) if !path.is_empty() => Ok(stablehold_core::SelectionCatalog::load(
            std::path::Path::new(path),
        )?),
        _ => Ok(stablehold_core::SelectionCatalog::builtin()),
    }
}

pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
