//! Email waitlist.
//!
//! [`submit_email`] is the whole signup flow: validate, check for an
//! existing row, insert, and fold a uniqueness race back into
//! "already exists". Storage sits behind [`WaitlistStore`] so the flow can
//! run against Supabase or an in-memory table.

pub mod admin;
pub mod supabase;

pub use admin::{check_table, masked_host, setup_instructions, TableStatus, SETUP_SQL};
pub use supabase::SupabaseStore;

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Postgres SQLSTATE for unique_violation.
pub const UNIQUE_VIOLATION: &str = "23505";

/// One waitlist row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub email: String,
    pub submitted_at: DateTime<Utc>,
}

impl WaitlistEntry {
    pub fn new(email: impl Into<String>, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            email: email.into(),
            submitted_at,
        }
    }
}

/// Result of a signup, as reported to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Inserted,
    AlreadyExists,
    Error(String),
}

impl SubmitOutcome {
    /// Both inserted and already-present count as a successful signup.
    pub fn is_success(&self) -> bool {
        !matches!(self, SubmitOutcome::Error(_))
    }
}

/// Storage failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Row with this email already present
    #[error("unique constraint violated")]
    UniqueViolation,

    /// Table missing or not exposed
    #[error("table not found: {0}")]
    MissingTable(String),

    /// Transport or upstream failure
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Request(err.to_string())
    }
}

#[async_trait]
pub trait WaitlistStore: Send + Sync {
    /// Whether a row with `email` exists.
    async fn exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Insert a row; uniqueness is enforced by the store.
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), StoreError>;

    /// All rows, newest first.
    async fn list(&self) -> Result<Vec<WaitlistEntry>, StoreError>;

    /// Cheap read proving the table is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Basic shape check: one `@` with something on both sides and a dot in the domain.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Add `email` to the waitlist.
pub async fn submit_email<S>(store: &S, email: &str, now: DateTime<Utc>) -> SubmitOutcome
where
    S: WaitlistStore + ?Sized,
{
    let email = email.trim();
    if email.is_empty() {
        tracing::warn!("email submission without an address");
        return SubmitOutcome::Error("Email is required".into());
    }
    if !is_valid_email(email) {
        tracing::warn!(email, "rejected malformed email");
        return SubmitOutcome::Error("Invalid email address".into());
    }

    tracing::info!(email, "email submission received");

    match store.exists(email).await {
        Ok(true) => {
            tracing::info!(email, "email already on waitlist");
            return SubmitOutcome::AlreadyExists;
        }
        Ok(false) => {}
        // The insert's unique constraint still guards duplicates.
        Err(e) => tracing::warn!(email, error = %e, "existence check failed, inserting anyway"),
    }

    match store.insert(&WaitlistEntry::new(email, now)).await {
        Ok(()) => {
            tracing::info!(email, "email added to waitlist");
            SubmitOutcome::Inserted
        }
        Err(StoreError::UniqueViolation) => {
            tracing::info!(email, "email added concurrently (unique violation)");
            SubmitOutcome::AlreadyExists
        }
        Err(e) => {
            tracing::error!(email, error = %e, "failed to insert email");
            SubmitOutcome::Error(format!("Failed to submit email: {e}"))
        }
    }
}

/// Waitlist table held in memory.
#[derive(Debug, Default)]
pub struct MemoryWaitlist {
    rows: Mutex<Vec<WaitlistEntry>>,
}

impl MemoryWaitlist {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> Result<std::sync::MutexGuard<'_, Vec<WaitlistEntry>>, StoreError> {
        self.rows
            .lock()
            .map_err(|_| StoreError::Request("waitlist lock poisoned".into()))
    }
}

#[async_trait]
impl WaitlistStore for MemoryWaitlist {
    async fn exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.rows()?.iter().any(|row| row.email == email))
    }

    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), StoreError> {
        let mut rows = self.rows()?;
        if rows.iter().any(|row| row.email == entry.email) {
            return Err(StoreError::UniqueViolation);
        }
        let id = rows.len() as i64 + 1;
        rows.push(WaitlistEntry {
            id: Some(id),
            ..entry.clone()
        });
        Ok(())
    }

    async fn list(&self) -> Result<Vec<WaitlistEntry>, StoreError> {
        let mut rows = self.rows()?.clone();
        rows.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.rows().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 15, 0, 0).unwrap()
    }

    /// Existence check misses, insert collides: the race between two signups.
    struct RacingStore;

    #[async_trait]
    impl WaitlistStore for RacingStore {
        async fn exists(&self, _email: &str) -> Result<bool, StoreError> {
            Ok(false)
        }
        async fn insert(&self, _entry: &WaitlistEntry) -> Result<(), StoreError> {
            Err(StoreError::UniqueViolation)
        }
        async fn list(&self) -> Result<Vec<WaitlistEntry>, StoreError> {
            Ok(Vec::new())
        }
        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    /// Reads fail, writes succeed.
    struct FlakyReads;

    #[async_trait]
    impl WaitlistStore for FlakyReads {
        async fn exists(&self, _email: &str) -> Result<bool, StoreError> {
            Err(StoreError::Request("timeout".into()))
        }
        async fn insert(&self, _entry: &WaitlistEntry) -> Result<(), StoreError> {
            Ok(())
        }
        async fn list(&self) -> Result<Vec<WaitlistEntry>, StoreError> {
            Err(StoreError::Request("timeout".into()))
        }
        async fn ping(&self) -> Result<(), StoreError> {
            Err(StoreError::Request("timeout".into()))
        }
    }

    #[tokio::test]
    async fn first_submission_inserts_second_reports_existing() {
        let store = MemoryWaitlist::new();
        assert_eq!(
            submit_email(&store, "rider@example.com", now()).await,
            SubmitOutcome::Inserted
        );
        assert_eq!(
            submit_email(&store, "  rider@example.com ", now()).await,
            SubmitOutcome::AlreadyExists
        );
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unique_violation_counts_as_existing() {
        let outcome = submit_email(&RacingStore, "late@example.com", now()).await;
        assert_eq!(outcome, SubmitOutcome::AlreadyExists);
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn failed_precheck_still_inserts() {
        let outcome = submit_email(&FlakyReads, "ok@example.com", now()).await;
        assert_eq!(outcome, SubmitOutcome::Inserted);
    }

    #[test]
    fn email_domain_needs_a_dotted_host() {
        assert!(is_valid_email("rider@example.com"));
        assert!(is_valid_email("first.last@mail.example.co.uk"));
        for bad in ["user@localhost", "user@.com", "user@example.", "a@b@example.com"] {
            assert!(!is_valid_email(bad), "{bad} accepted");
        }
    }

    #[tokio::test]
    async fn blank_and_malformed_addresses_are_rejected() {
        let store = MemoryWaitlist::new();
        assert_eq!(
            submit_email(&store, "   ", now()).await,
            SubmitOutcome::Error("Email is required".into())
        );
        for bad in ["no-at-sign", "@example.com", "user@", "user@nodot", "a b@example.com"] {
            let outcome = submit_email(&store, bad, now()).await;
            assert!(!outcome.is_success(), "{bad} accepted");
        }
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryWaitlist::new();
        submit_email(&store, "first@example.com", now()).await;
        submit_email(&store, "second@example.com", now() + Duration::hours(1)).await;
        let rows = store.list().await.unwrap();
        assert_eq!(rows[0].email, "second@example.com");
        assert_eq!(rows[1].email, "first@example.com");
    }

    #[test]
    fn outcome_serializes_as_tagged_status() {
        let json = serde_json::to_value(SubmitOutcome::AlreadyExists).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "already_exists" }));

        let json = serde_json::to_value(SubmitOutcome::Error("boom".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "error", "message": "boom" }));
    }
}
