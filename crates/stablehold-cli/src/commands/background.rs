use std::path::PathBuf;

use clap::Subcommand;
use serde_json::json;
use stablehold_core::storage::session_path;
use stablehold_core::{choose_background, classify, Config, FileStore, SessionBackground};

use super::{load_catalog, print_json, random_source, resolve_now};

#[derive(Subcommand)]
pub enum BackgroundAction {
    /// Pick (or recall) this session's background
    Pick {
        /// Evaluate at this instant (RFC 3339) or date instead of now
        #[arg(long)]
        now: Option<String>,
        /// Seed the selector for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,
        /// Ignore and do not touch the session cache
        #[arg(long)]
        fresh: bool,
    },
    /// Clear the session cache
    Forget,
    /// Print the active catalog as TOML
    Catalog {
        /// Write the catalog to this file instead of stdout
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

pub fn run(action: BackgroundAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        BackgroundAction::Pick { now, seed, fresh } => {
            let timezone = config.progress.timezone.clone();
            let now = resolve_now(now.as_deref(), &timezone)?;
            let catalog = load_catalog(&config)?;
            let mut rng = random_source(seed);

            if fresh {
                let period = classify(now, &timezone)?;
                let selection = choose_background(&catalog, period, rng.as_mut())?;
                print_json(&json!({ "selection": selection, "from_cache": false }))?;
            } else {
                let store = FileStore::open(session_path()?)?;
                let mut session = SessionBackground::new(store);
                let pick = session.resolve(&catalog, now, &timezone, rng.as_mut())?;
                print_json(&json!({
                    "selection": pick.selection,
                    "from_cache": pick.from_cache,
                }))?;
            }
        }
        BackgroundAction::Forget => {
            let mut session = SessionBackground::new(FileStore::open(session_path()?)?);
            session.forget()?;
            println!("session background cleared");
        }
        BackgroundAction::Catalog { export } => {
            let catalog = load_catalog(&config)?;
            match export {
                Some(path) => {
                    catalog.save(&path)?;
                    println!("catalog written to {}", path.display());
                }
                None => print!("{}", catalog.to_toml_string()?),
            }
        }
    }
    Ok(())
}
