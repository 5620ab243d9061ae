//! Operator helpers: connection checks and one-time table setup.

use serde::Serialize;
use url::Url;

use super::{StoreError, WaitlistStore};

/// DDL for the waitlist table.
pub const SETUP_SQL: &str = "\
CREATE TABLE IF NOT EXISTS waitlist (
  id SERIAL PRIMARY KEY,
  email TEXT UNIQUE NOT NULL,
  submitted_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
);";

/// Whether the table answers reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum TableStatus {
    Ready,
    Missing(String),
    Unreachable(String),
}

/// Probe the store and classify the answer.
pub async fn check_table<S>(store: &S) -> TableStatus
where
    S: WaitlistStore + ?Sized,
{
    match store.ping().await {
        Ok(()) => TableStatus::Ready,
        Err(StoreError::MissingTable(detail)) => {
            tracing::warn!(%detail, "waitlist table is missing");
            TableStatus::Missing(detail)
        }
        Err(e) => {
            tracing::error!(error = %e, "waitlist store unreachable");
            TableStatus::Unreachable(e.to_string())
        }
    }
}

/// Steps for creating the table by hand in the Supabase dashboard.
pub fn setup_instructions() -> Vec<String> {
    vec![
        "1. Log in to your Supabase dashboard".to_string(),
        "2. Go to the SQL Editor".to_string(),
        "3. Create a new query".to_string(),
        format!("4. Paste the following SQL and run it:\n{SETUP_SQL}"),
        "5. Verify the table was created by running: SELECT * FROM waitlist;".to_string(),
    ]
}

/// Hostname of the configured project URL, safe to display.
pub fn masked_host(url: Option<&str>) -> String {
    match url.map(str::trim).filter(|u| !u.is_empty()) {
        None => "Not configured".to_string(),
        Some(raw) => match Url::parse(raw).ok().and_then(|u| u.host_str().map(str::to_string)) {
            Some(host) => host,
            None => "Invalid URL format".to_string(),
        },
    }
}

/// First five characters of a secret, for logs.
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(5).collect();
    format!("{prefix}...")
}
