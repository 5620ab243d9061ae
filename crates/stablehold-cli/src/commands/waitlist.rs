use chrono::Utc;
use clap::Subcommand;
use serde_json::json;
use stablehold_core::waitlist::{check_table, masked_host, setup_instructions, TableStatus};
use stablehold_core::{
    submit_email, Config, ConfigError, MemoryWaitlist, Secrets, SupabaseStore, WaitlistEntry,
    WaitlistStore,
};

use super::{print_json, runtime};

#[derive(Subcommand)]
pub enum WaitlistAction {
    /// Add an email to the waitlist
    Submit {
        email: String,
        /// Run the signup flow against an in-memory table
        #[arg(long)]
        dry_run: bool,
    },
    /// List all signups, newest first
    List,
    /// Check that the Supabase project answers
    Check,
    /// Show setup instructions and whether the table exists
    Setup,
    /// Insert a test row directly, bypassing the duplicate check
    TestInsert {
        #[arg(default_value = "test@example.com")]
        email: String,
    },
    /// Print the configured Supabase host
    Host,
}

enum KeyKind {
    ServiceRole,
    Anon,
}

fn open_store(
    config: &Config,
    secrets: &Secrets,
    kind: KeyKind,
) -> Result<SupabaseStore, Box<dyn std::error::Error>> {
    let url = config
        .supabase_url(secrets)
        .ok_or_else(|| ConfigError::MissingKey("SUPABASE_URL or waitlist.supabase_url".into()))?;
    let key = match kind {
        KeyKind::ServiceRole => secrets.supabase_service_role_key.clone(),
        KeyKind::Anon => secrets
            .supabase_anon_key
            .clone()
            .or_else(|| secrets.supabase_service_role_key.clone()),
    }
    .ok_or_else(|| ConfigError::MissingKey("SUPABASE_SERVICE_ROLE_KEY".into()))?;

    Ok(SupabaseStore::new(&url, &key, &config.waitlist.table)?)
}

pub fn run(action: WaitlistAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let secrets = Secrets::from_env();
    let rt = runtime()?;

    match action {
        WaitlistAction::Submit { email, dry_run } => {
            let outcome = if dry_run {
                rt.block_on(submit_email(&MemoryWaitlist::new(), &email, Utc::now()))
            } else {
                let store = open_store(&config, &secrets, KeyKind::ServiceRole)?;
                rt.block_on(submit_email(&store, &email, Utc::now()))
            };
            print_json(&outcome)?;
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
        WaitlistAction::List => {
            let store = open_store(&config, &secrets, KeyKind::ServiceRole)?;
            let rows = rt.block_on(store.list())?;
            print_json(&json!({ "count": rows.len(), "emails": rows }))?;
        }
        WaitlistAction::Check => {
            let store = open_store(&config, &secrets, KeyKind::Anon)?;
            let status = rt.block_on(check_table(&store));
            print_json(&status)?;
            if matches!(status, TableStatus::Unreachable(_)) {
                std::process::exit(1);
            }
        }
        WaitlistAction::Setup => {
            for step in setup_instructions() {
                println!("{step}");
            }
            if let Ok(store) = open_store(&config, &secrets, KeyKind::ServiceRole) {
                println!();
                print_json(&rt.block_on(check_table(&store)))?;
            }
        }
        WaitlistAction::TestInsert { email } => {
            let store = open_store(&config, &secrets, KeyKind::ServiceRole)?;
            rt.block_on(async {
                store.ping().await?;
                store.insert(&WaitlistEntry::new(email.as_str(), Utc::now())).await
            })?;
            println!("test email {email} inserted");
        }
        WaitlistAction::Host => {
            println!("{}", masked_host(config.supabase_url(&secrets).as_deref()));
        }
    }
    Ok(())
}
