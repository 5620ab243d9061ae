use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "stablehold", version, about = "Stablehold CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch progress widget values
    Progress(commands::progress::ProgressArgs),
    /// Time-of-day period in the reference timezone
    Period(commands::period::PeriodArgs),
    /// Background selection for the current session
    Background {
        #[command(subcommand)]
        action: commands::background::BackgroundAction,
    },
    /// Email waitlist
    Waitlist {
        #[command(subcommand)]
        action: commands::waitlist::WaitlistAction,
    },
    /// Current weather for the widget
    Weather(commands::weather::WeatherArgs),
    /// Generate a post-signup access code
    AccessCode(commands::access_code::AccessCodeArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("STABLEHOLD_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Progress(args) => commands::progress::run(args),
        Commands::Period(args) => commands::period::run(args),
        Commands::Background { action } => commands::background::run(action),
        Commands::Waitlist { action } => commands::waitlist::run(action),
        Commands::Weather(args) => commands::weather::run(args),
        Commands::AccessCode(args) => commands::access_code::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
