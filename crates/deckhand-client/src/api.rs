use crate::error::ClientError;
use crate::Result;
use deckhand_core::ActionRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ─── Wire types ───────────────────────────────────────────────────────────

/// One action as the service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDto {
    pub id: u32,
    pub state: String,
    pub repo_url: String,
    pub image: String,
}

impl From<ActionDto> for ActionRecord {
    fn from(dto: ActionDto) -> Self {
        ActionRecord {
            id: dto.id,
            repo_url: dto.repo_url,
            image: dto.image,
            state: dto.state,
        }
    }
}

/// Body of `POST /actions`. The scheduler requires the caller to pick the
/// action id; the acknowledgment echoes the record it created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActionRequest {
    pub image: String,
    pub commands: Vec<String>,
    pub repo_url: String,
    pub action_id: u32,
}

/// Body of a successful `DELETE /actions/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteActionResponse {
    pub id: u32,
}

/// Error body the service attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub code: Option<u16>,
}

// ─── ActionApi ────────────────────────────────────────────────────────────

/// Typed client for the action service's HTTP surface.
///
/// Cheap to clone; the underlying `reqwest::Client` is already shared.
#[derive(Debug, Clone)]
pub struct ActionApi {
    http: reqwest::Client,
    base_url: String,
}

impl ActionApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// `GET /actions` — the full collection.
    pub async fn list_actions(&self) -> Result<Vec<ActionDto>> {
        let url = format!("{}/actions", self.base_url);
        let response = self.http.get(&url).send().await?;
        decode(response, "GET /actions").await
    }

    /// `GET /actions/{id}` — one action.
    pub async fn get_action(&self, id: u32) -> Result<ActionDto> {
        let url = format!("{}/actions/{id}", self.base_url);
        let response = self.http.get(&url).send().await?;
        decode(response, "GET /actions/{id}").await
    }

    /// `POST /actions` — submit a new action; returns the created record.
    pub async fn create_action(&self, request: &CreateActionRequest) -> Result<ActionDto> {
        let url = format!("{}/actions", self.base_url);
        let response = self.http.post(&url).json(request).send().await?;
        decode(response, "POST /actions").await
    }

    /// `DELETE /actions/{id}` — returns the acknowledged id.
    pub async fn delete_action(&self, id: u32) -> Result<DeleteActionResponse> {
        let url = format!("{}/actions/{id}", self.base_url);
        let response = self.http.delete(&url).send().await?;
        decode(response, "DELETE /actions/{id}").await
    }
}

/// Shared decode path. 2xx bodies must parse to `T`; anything else becomes
/// [`ClientError::Server`], carrying the `{error}` body when the service
/// provided one and falling back to the raw body or status text.
async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await?;
    debug!(endpoint, status = status.as_u16(), "action service response");

    if !status.is_success() {
        let message = match serde_json::from_slice::<ErrorResponse>(&body) {
            Ok(err) => err.error,
            Err(_) => String::from_utf8_lossy(&body).trim().to_string(),
        };
        let message = if message.is_empty() {
            status.canonical_reason().unwrap_or("unknown error").to_string()
        } else {
            message
        };
        return Err(ClientError::Server {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|source| ClientError::Malformed {
        endpoint: endpoint.to_string(),
        source,
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────
