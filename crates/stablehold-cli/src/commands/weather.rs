use chrono::Utc;
use clap::Args;
use stablehold_core::{current_or_fallback, Config, Secrets, WeatherClient};

use super::{print_json, runtime};

#[derive(Args)]
pub struct WeatherArgs {
    /// Print the canned reading instead of failing when the provider errors
    #[arg(long)]
    fallback_on_error: bool,
}

pub fn run(args: WeatherArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let secrets = Secrets::from_env();
    let client = WeatherClient::new(secrets.openweather_api_key)
        .with_base_url(config.weather.base_url.clone())
        .with_coordinates(config.weather.latitude, config.weather.longitude);

    let rt = runtime()?;
    let now = Utc::now();

    if args.fallback_on_error {
        let (reading, err) = rt.block_on(current_or_fallback(&client, now));
        if let Some(e) = err {
            eprintln!("warning: {e}; showing fallback data");
        }
        print_json(&reading)?;
    } else {
        let reading = rt.block_on(client.current(now))?;
        print_json(&reading)?;
    }
    Ok(())
}
