use clap::Args;
use stablehold_core::generate_access_code;

use super::random_source;

#[derive(Args)]
pub struct AccessCodeArgs {
    /// Seed for a reproducible code
    #[arg(long)]
    seed: Option<u64>,
}

pub fn run(args: AccessCodeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = random_source(args.seed);
    println!("{}", generate_access_code(rng.as_mut()));
    Ok(())
}
