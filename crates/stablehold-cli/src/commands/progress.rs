use clap::Args;
use stablehold_core::Config;

use super::{print_json, resolve_now};

#[derive(Args)]
pub struct ProgressArgs {
    /// Evaluate at this date (YYYY-MM-DD) or RFC 3339 instant instead of now
    #[arg(long)]
    now: Option<String>,
    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ProgressArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let now = resolve_now(args.now.as_deref(), &config.progress.timezone)?;
    let report = config.progress.report(now)?;

    if args.json {
        print_json(&report)?;
    } else {
        println!("{}%", report.percent);
        println!("remaining: {}", report.remaining);
        println!("day: {}", report.days_elapsed);
    }
    Ok(())
}
