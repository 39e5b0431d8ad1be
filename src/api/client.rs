//! HTTP client for the custody backend.
//!
//! Every failure is terminal for the user action that triggered it; there
//! are no automatic retries anywhere in this client.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use thiserror::Error;
use tracing::debug;

use super::types::*;

/// Errors from talking to the custody backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("cannot connect to {0}")]
    Connection(String),
    #[error("request timed out")]
    TimedOut,
    #[error("server returned HTTP {code}")]
    Status { code: u16 },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// A rejected or missing credential; the caller should send the user
    /// back to the authentication entry point.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            ApiError::Status { code } if *code == StatusCode::UNAUTHORIZED.as_u16()
        )
    }
}

/// Client for the custody REST API. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer credential when one is held. Trust lives in the
    /// backend; the client never inspects the token beyond display claims.
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authed(builder).send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::TimedOut
            } else if e.is_connect() {
                ApiError::Connection(self.base_url.clone())
            } else {
                ApiError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(code = status.as_u16(), "backend rejected request");
            return Err(ApiError::Status {
                code: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `GET /documents/{userId}` — pending and sealed documents for a user.
    pub async fn documents(&self, user_id: &str) -> Result<Vec<Document>, ApiError> {
        let response = self
            .send(self.client.get(self.url(&format!("/documents/{user_id}"))))
            .await?;
        Self::decode(response).await
    }

    /// `GET /documents/download/{id}` — a single document's payload.
    pub async fn download(&self, id: u64) -> Result<DownloadPayload, ApiError> {
        let response = self
            .send(self.client.get(self.url(&format!("/documents/download/{id}"))))
            .await?;
        Self::decode(response).await
    }

    /// `POST /documents/download/zip` — one archive for many documents.
    pub async fn download_zip(&self, ids: &[u64]) -> Result<Vec<u8>, ApiError> {
        let response = self
            .send(
                self.client
                    .post(self.url("/documents/download/zip"))
                    .json(&ids),
            )
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// `DELETE /documents/delete/{id}` — delete one pending document.
    pub async fn delete_document(&self, id: u64) -> Result<(), ApiError> {
        self.send(
            self.client
                .delete(self.url(&format!("/documents/delete/{id}"))),
        )
        .await?;
        Ok(())
    }

    /// `DELETE /documents/delete/multiple` — bulk delete by id list.
    pub async fn delete_documents(&self, ids: &[u64]) -> Result<(), ApiError> {
        self.send(
            self.client
                .delete(self.url("/documents/delete/multiple"))
                .json(&ids),
        )
        .await?;
        Ok(())
    }

    /// `POST /documents/upload` — submit a new pending document.
    pub async fn upload(&self, request: &UploadRequest) -> Result<(), ApiError> {
        self.send(self.client.post(self.url("/documents/upload")).json(request))
            .await?;
        Ok(())
    }

    /// `GET /blocks/all` — all blocks with embedded documents.
    pub async fn blocks(&self) -> Result<Vec<Block>, ApiError> {
        let response = self.send(self.client.get(self.url("/blocks/all"))).await?;
        Self::decode(response).await
    }

    /// `POST /blocks/create-and-mine/{maxDocs}/{zeros}` — assemble a block
    /// from pending documents and mine it in one step. Long-running: the
    /// backend mines synchronously.
    pub async fn create_and_mine(&self, max_docs: u32, zeros: u32) -> Result<(), ApiError> {
        self.send(
            self.client
                .post(self.url(&format!("/blocks/create-and-mine/{max_docs}/{zeros}"))),
        )
        .await?;
        Ok(())
    }

    /// `POST /blocks/mine/{blockId}/{zeros}` — mine a pre-assembled block.
    pub async fn mine_block(&self, block_id: u64, zeros: u32) -> Result<(), ApiError> {
        self.send(
            self.client
                .post(self.url(&format!("/blocks/mine/{block_id}/{zeros}"))),
        )
        .await?;
        Ok(())
    }

    /// `GET /blocks/validate-chain` — structural chain validity check.
    pub async fn validate_chain(&self) -> Result<ValidationReport, ApiError> {
        let response = self
            .send(self.client.get(self.url("/blocks/validate-chain")))
            .await?;
        Self::decode(response).await
    }

    /// `GET /systemconfig/get` — the singleton system configuration.
    pub async fn system_config(&self) -> Result<SystemConfig, ApiError> {
        let response = self
            .send(self.client.get(self.url("/systemconfig/get")))
            .await?;
        Self::decode(response).await
    }

    /// `GET /audit/logs` — backend audit trail.
    pub async fn audit_logs(&self) -> Result<Vec<AuditLog>, ApiError> {
        let response = self.send(self.client.get(self.url("/audit/logs"))).await?;
        Self::decode(response).await
    }

    /// `DELETE /audit/logs` — clear the audit trail.
    pub async fn clear_audit_logs(&self) -> Result<(), ApiError> {
        self.send(self.client.delete(self.url("/audit/logs"))).await?;
        Ok(())
    }
}
