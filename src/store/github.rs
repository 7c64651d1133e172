//! Object store backed by the GitHub contents API.
//!
//! Each document is a file in a repository; the version token is the
//! file's blob SHA as reported by the API. A PUT must echo the SHA read
//! earlier, so a stale token is rejected server-side (HTTP 409/422) and
//! surfaces as `ConflictingWrite`.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use super::{Document, ObjectStore};
use crate::config::Config;
use crate::error::{Result, SyncError};

const API_ROOT: &str = "https://api.github.com";
const USER_AGENT: &str = "tenebris-sync";
const ACCEPT: &str = "application/vnd.github+json";

/// Contents-API response for a single file
#[derive(Debug, Deserialize)]
struct FileResponse {
    /// Base64 file body, wrapped at 60 columns by the API
    content: Option<String>,
    /// Blob SHA, used as the version token
    sha: String,
}

/// One entry of a directory listing
#[derive(Debug, Deserialize)]
struct ListEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Contents-API response for a successful PUT
#[derive(Debug, Deserialize)]
struct PutResponse {
    content: PutContent,
}

#[derive(Debug, Deserialize)]
struct PutContent {
    sha: String,
}

/// Contents-API backed object store
pub struct GitHubStore {
    client: reqwest::Client,
    repository: String,
    branch: String,
    token: String,
}

impl GitHubStore {
    /// Build a store client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            repository: config.repository.clone(),
            branch: config.branch.clone(),
            token: config.token.clone(),
        })
    }

    fn contents_url(&self, path: &str) -> String {
        format!("{}/repos/{}/contents/{}", API_ROOT, self.repository, path)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
    }
}

#[async_trait]
impl ObjectStore for GitHubStore {
    async fn get(&self, path: &str) -> Result<Option<Document>> {
        let response = self
            .authorize(self.client.get(self.contents_url(path)))
            .query(&[("ref", self.branch.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(SyncError::StoreUnavailable(format!(
                "GET {} returned {}",
                path,
                response.status()
            )));
        }

        let file: FileResponse = response.json().await?;
        let encoded: String = file
            .content
            .unwrap_or_default()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let content = BASE64
            .decode(encoded.as_bytes())
            .map_err(|e| SyncError::MalformedDocument {
                path: path.to_string(),
                reason: format!("invalid base64 content: {}", e),
            })?;

        Ok(Some(Document {
            content,
            version: file.sha,
        }))
    }

    async fn put(&self, path: &str, content: &[u8], expected: Option<&str>) -> Result<String> {
        let mut body = json!({
            "message": format!("sync: update {}", path),
            "content": BASE64.encode(content),
            "branch": self.branch,
        });
        if let Some(token) = expected {
            body["sha"] = json!(token);
        }

        let response = self
            .authorize(self.client.put(self.contents_url(path)))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        // 409: stale SHA. 422: missing SHA for an existing file, i.e. a
        // create raced with another create. Both are the same conflict
        // from the caller's point of view.
        if status == StatusCode::CONFLICT || status == StatusCode::UNPROCESSABLE_ENTITY {
            tracing::warn!("Conflicting write at {} ({})", path, status);
            return Err(SyncError::ConflictingWrite(path.to_string()));
        }
        if !status.is_success() {
            return Err(SyncError::StoreUnavailable(format!(
                "PUT {} returned {}",
                path, status
            )));
        }

        let put: PutResponse = response.json().await?;
        Ok(put.content.sha)
    }

    async fn list(&self, dir: &str) -> Result<Vec<String>> {
        let response = self
            .authorize(self.client.get(self.contents_url(dir)))
            .query(&[("ref", self.branch.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(SyncError::StoreUnavailable(format!(
                "LIST {} returned {}",
                dir,
                response.status()
            )));
        }

        let entries: Vec<ListEntry> = response.json().await?;
        Ok(entries
            .into_iter()
            .filter(|e| e.kind == "file")
            .map(|e| e.path)
            .collect())
    }
}
