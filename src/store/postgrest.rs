use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::models::{Councillor, Meeting, NewSpeech};
use crate::store::{CouncilStore, StoreError};

const MEETING_COLUMNS: &str = "id,title,transcript_text";

/// Configuration for the Supabase-backed store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project base URL (from SUPABASE_URL env var)
    pub url: String,
    /// Service key (from SUPABASE_KEY env var)
    pub key: String,
}

impl StoreConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("SUPABASE_URL")
            .context("SUPABASE_URL environment variable not set")?;
        let key = std::env::var("SUPABASE_KEY")
            .context("SUPABASE_KEY environment variable not set")?;

        Ok(Self { url, key })
    }
}

/// Record store over the Supabase PostgREST API.
pub struct PostgrestStore {
    client: Client,
    config: StoreConfig,
}

impl PostgrestStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.key)
            .bearer_auth(&self.config.key)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .authorize(self.client.get(self.table_url(table)))
            .query(query)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(StoreError::Api { status, body })
        }
    }
}

impl CouncilStore for PostgrestStore {
    async fn meeting_by_id(&self, id: &str) -> Result<Option<Meeting>, StoreError> {
        let rows: Vec<Meeting> = self
            .select(
                "meetings",
                &[
                    ("select", MEETING_COLUMNS.to_string()),
                    ("id", format!("eq.{id}")),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn meetings_with_transcript(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<Meeting>, StoreError> {
        let mut query = vec![
            ("select", MEETING_COLUMNS.to_string()),
            ("transcript_text", "not.is.null".to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        self.select("meetings", &query).await
    }

    async fn find_councillor(
        &self,
        name_fragment: &str,
    ) -> Result<Option<Councillor>, StoreError> {
        let rows: Vec<Councillor> = self
            .select(
                "councillors",
                &[
                    ("select", "id,name".to_string()),
                    ("name", format!("ilike.*{name_fragment}*")),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn has_speeches(&self, meeting_id: &str) -> Result<bool, StoreError> {
        let rows: Vec<serde_json::Value> = self
            .select(
                "speeches",
                &[
                    ("select", "id".to_string()),
                    ("meeting_id", format!("eq.{meeting_id}")),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(!rows.is_empty())
    }

    async fn insert_speech(&self, speech: &NewSpeech) -> Result<(), StoreError> {
        let response = self
            .authorize(self.client.post(self.table_url("speeches")))
            .header("Prefer", "return=minimal")
            .json(&[speech])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_speeches(&self, meeting_id: &str) -> Result<(), StoreError> {
        let response = self
            .authorize(self.client.delete(self.table_url("speeches")))
            .query(&[("meeting_id", format!("eq.{meeting_id}"))])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
