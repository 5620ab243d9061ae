//! Supabase (PostgREST) waitlist backend.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use super::admin::mask_secret;
use super::{StoreError, WaitlistEntry, WaitlistStore, UNIQUE_VIOLATION};

/// PostgREST codes meaning the relation does not exist.
const MISSING_TABLE_CODES: [&str; 2] = ["42P01", "PGRST205"];

/// Error body PostgREST returns on failure.
#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub struct SupabaseStore {
    endpoint: String,
    api_key: String,
    http_client: Client,
}

impl SupabaseStore {
    /// `project_url` is the project root, e.g. `https://xyz.supabase.co`.
    /// A trailing `/rest/v1` is accepted and ignored.
    pub fn new(project_url: &str, api_key: &str, table: &str) -> Result<Self, StoreError> {
        let base = url::Url::parse(project_url.trim())
            .map_err(|e| StoreError::Request(format!("invalid Supabase URL: {e}")))?;
        if api_key.is_empty() {
            return Err(StoreError::Request("Supabase API key is empty".into()));
        }

        let root = base
            .as_str()
            .trim_end_matches('/')
            .trim_end_matches("/rest/v1");
        let endpoint = format!("{root}/rest/v1/{table}");
        tracing::debug!(
            host = base.host_str().unwrap_or_default(),
            key = %mask_secret(api_key),
            "configured Supabase waitlist store"
        );

        Ok(Self {
            endpoint,
            api_key: api_key.to_string(),
            http_client: Client::new(),
        })
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn error_from(resp: Response) -> StoreError {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let body: PostgrestError = serde_json::from_str(&text).unwrap_or_default();
        let code = body.code.as_deref().unwrap_or_default();

        if status == StatusCode::CONFLICT || code == UNIQUE_VIOLATION {
            return StoreError::UniqueViolation;
        }
        if MISSING_TABLE_CODES.contains(&code) {
            return StoreError::MissingTable(body.message.unwrap_or(text));
        }
        let message = body.message.unwrap_or(text);
        StoreError::Request(format!("Supabase error (HTTP {status}): {message}"))
    }
}

#[async_trait]
impl WaitlistStore for SupabaseStore {
    async fn exists(&self, email: &str) -> Result<bool, StoreError> {
        let filter = format!("eq.{email}");
        let resp = self
            .authed(self.http_client.get(&self.endpoint))
            .query(&[("select", "email"), ("email", filter.as_str()), ("limit", "1")])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }

        let rows: Vec<serde_json::Value> = resp.json().await?;
        Ok(!rows.is_empty())
    }

    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), StoreError> {
        let body = json!([{
            "email": entry.email,
            "submitted_at": entry.submitted_at.to_rfc3339(),
        }]);

        let resp = self
            .authed(self.http_client.post(&self.endpoint))
            .header("Prefer", "return=minimal")
            .json(&body)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(resp).await)
        }
    }

    async fn list(&self) -> Result<Vec<WaitlistEntry>, StoreError> {
        let resp = self
            .authed(self.http_client.get(&self.endpoint))
            .query(&[("select", "*"), ("order", "submitted_at.desc")])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }

        Ok(resp.json().await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let resp = self
            .authed(self.http_client.get(&self.endpoint))
            .query(&[("select", "*"), ("limit", "1")])
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(resp).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_project_url() {
        assert!(matches!(
            SupabaseStore::new("not a url", "key", "waitlist"),
            Err(StoreError::Request(_))
        ));
    }

    #[test]
    fn rejects_empty_key() {
        assert!(SupabaseStore::new("https://xyz.supabase.co", "", "waitlist").is_err());
    }

    #[test]
    fn endpoint_joins_project_and_table() {
        let store = SupabaseStore::new("https://xyz.supabase.co/", "key", "waitlist").unwrap();
        assert_eq!(store.endpoint, "https://xyz.supabase.co/rest/v1/waitlist");

        let store = SupabaseStore::new("https://xyz.supabase.co/rest/v1", "key", "signups").unwrap();
        assert_eq!(store.endpoint, "https://xyz.supabase.co/rest/v1/signups");
    }
}
