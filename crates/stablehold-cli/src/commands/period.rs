use clap::Args;
use serde_json::json;
use stablehold_core::{classify, Config};

use super::{print_json, resolve_now};

#[derive(Args)]
pub struct PeriodArgs {
    /// Classify this instant (RFC 3339) or date instead of now
    #[arg(long)]
    now: Option<String>,
    /// IANA timezone overriding the configured one
    #[arg(long)]
    timezone: Option<String>,
    /// Print period and theme as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: PeriodArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let timezone = args
        .timezone
        .unwrap_or_else(|| config.progress.timezone.clone());
    let now = resolve_now(args.now.as_deref(), &timezone)?;
    let period = classify(now, &timezone)?;

    if args.json {
        print_json(&json!({
            "period": period,
            "theme": period.theme(),
            "timezone": timezone,
        }))?;
    } else {
        println!("{period}");
    }
    Ok(())
}
