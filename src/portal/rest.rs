//! HTTP backend for the hosted table + storage API.
//!
//! Tables are served PostgREST-style under `/rest/v1/<table>` and objects
//! under `/storage/v1/object/<bucket>/<path>`. Every request carries the
//! project API key; writes use the signed-in user's access token when one
//! is configured.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::backend::PortalBackend;
use super::{Course, CourseDraft, DocumentDraft, DocumentItem, Lesson, LessonDraft};
use crate::config::BackendConfig;
use crate::error::{PortalError, Result};

/// [`PortalBackend`] over HTTP.
pub struct RestBackend {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

/// Error body returned by the table and storage APIs.
#[derive(Debug, Default, Deserialize)]
struct ApiError {
    message: Option<String>,
    error: Option<String>,
    msg: Option<String>,
}

impl RestBackend {
    /// Build a client for the configured project.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(PortalError::Validation("backend URL is not configured".into()));
        }
        if config.api_key.trim().is_empty() {
            return Err(PortalError::Validation("backend API key is not configured".into()));
        }

        let client = Client::builder()
            .user_agent(concat!("ava/", env!("CARGO_PKG_VERSION")))
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            access_token: config.access_token.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{bucket}/{}",
            self.base_url,
            encode_path(path)
        )
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self.access_token.as_deref().unwrap_or(&self.api_key);
        request.header("apikey", &self.api_key).bearer_auth(token)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.table_url(table);
        debug!("GET {} {:?}", url, filters);
        let response = self
            .authed(self.client.get(&url))
            .query(&[("select", "*")])
            .query(filters)
            .send()
            .await?;
        let rows = check(response).await?.json::<Vec<T>>().await?;
        debug!("{} returned {} rows", table, rows.len());
        Ok(rows)
    }

    async fn insert<T: serde::Serialize + Sync>(&self, table: &str, row: &T) -> Result<()> {
        let url = self.table_url(table);
        debug!("POST {}", url);
        let response = self
            .authed(self.client.post(&url))
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await?;
        check(response).await?;
        info!("Inserted row into {}", table);
        Ok(())
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> Result<()> {
        let url = self.table_url(table);
        debug!("DELETE {} id={}", url, id);
        let response = self
            .authed(self.client.delete(&url))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        check(response).await?;
        info!("Deleted {} from {}", id, table);
        Ok(())
    }
}

/// Turn a non-2xx response into [`PortalError::Backend`].
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body, status.canonical_reason().unwrap_or("request failed"));
    warn!("Backend request failed ({}): {}", status, message);
    Err(PortalError::Backend {
        status: status.as_u16(),
        message,
    })
}

fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(api) = serde_json::from_str::<ApiError>(body) {
        if let Some(message) = api.message.or(api.error).or(api.msg) {
            return message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Percent-encode each segment of an object path, keeping the separators.
fn encode_path(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl PortalBackend for RestBackend {
    fn name(&self) -> &'static str {
        "rest"
    }

    #[instrument(skip(self))]
    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.select("courses", &[]).await
    }

    async fn insert_course(&self, draft: &CourseDraft) -> Result<()> {
        self.insert("courses", draft).await
    }

    #[instrument(skip(self, draft))]
    async fn update_course(&self, id: &str, draft: &CourseDraft) -> Result<()> {
        let url = self.table_url("courses");
        let response = self
            .authed(self.client.patch(&url))
            .header("Prefer", "return=minimal")
            .query(&[("id", format!("eq.{id}"))])
            .json(draft)
            .send()
            .await?;
        check(response).await?;
        info!("Updated course {}", id);
        Ok(())
    }

    async fn delete_course(&self, id: &str) -> Result<()> {
        self.delete_by_id("courses", id).await
    }

    #[instrument(skip(self))]
    async fn list_lessons(&self, course_id: &str) -> Result<Vec<Lesson>> {
        self.select(
            "lessons",
            &[
                ("course_id", format!("eq.{course_id}")),
                ("order", "created_at.asc".to_string()),
            ],
        )
        .await
    }

    async fn insert_lesson(&self, draft: &LessonDraft) -> Result<()> {
        self.insert("lessons", draft).await
    }

    async fn delete_lesson(&self, id: &str) -> Result<()> {
        self.delete_by_id("lessons", id).await
    }

    #[instrument(skip(self))]
    async fn list_documents(&self) -> Result<Vec<DocumentItem>> {
        self.select("documents", &[("order", "created_at.desc".to_string())])
            .await
    }

    async fn insert_document(&self, draft: &DocumentDraft) -> Result<()> {
        self.insert("documents", draft).await
    }

    async fn delete_document(&self, id: &str) -> Result<()> {
        self.delete_by_id("documents", id).await
    }

    #[instrument(skip(self, bytes))]
    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let url = self.object_url(bucket, path);
        debug!("Uploading {} bytes to {}", bytes.len(), url);
        let response = self
            .authed(self.client.post(&url))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;
        check(response).await?;
        info!("Stored {}/{}", bucket, path);
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{bucket}/{}",
            self.base_url,
            encode_path(path)
        )
    }
}
