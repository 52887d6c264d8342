// src/core/api_client.rs
//! HTTP client for the job-search backend

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, trace};

use crate::profile::session::ProfileGateway;
use crate::types::profile::ProfileRecord;
use crate::types::snapshot::JobSnapshot;

const PROFILE_ENDPOINT: &str = "/users/profile";
const SNAPSHOTS_ENDPOINT: &str = "/snapshots";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Service returned error status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn profile_url(&self, user_id: &str) -> String {
        format!("{}{}/{}", self.base_url, PROFILE_ENDPOINT, user_id)
    }

    pub fn snapshots_url(&self, user_id: &str) -> String {
        format!("{}{}/{}", self.base_url, SNAPSHOTS_ENDPOINT, user_id)
    }

    /// GET /users/profile/{user_id}
    pub async fn fetch_profile(&self, user_id: &str, token: &str) -> Result<ProfileRecord, ApiError> {
        let url = self.profile_url(user_id);
        info!("Fetching profile: {}", url);

        let request = self.request(Method::GET, &url, Some(token));
        self.send_json(request, &url).await
    }

    /// PATCH /users/profile/{user_id}; any 2xx is success, the body is ignored
    pub async fn update_profile(
        &self,
        user_id: &str,
        token: &str,
        body: &ProfileRecord,
    ) -> Result<(), ApiError> {
        let url = self.profile_url(user_id);
        info!("Updating profile: {}", url);

        let response = self
            .request(Method::PATCH, &url, Some(token))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        trace!("Response status: {}", status);

        if status.is_success() {
            Ok(())
        } else {
            Err(Self::status_error(response).await)
        }
    }

    /// GET /snapshots/{user_id}
    pub async fn fetch_snapshots(
        &self,
        user_id: &str,
        token: Option<&str>,
    ) -> Result<Vec<JobSnapshot>, ApiError> {
        let url = self.snapshots_url(user_id);
        info!("Fetching job snapshots: {}", url);

        let request = self.request(Method::GET, &url, token);
        self.send_json(request, &url).await
    }

    fn request(&self, method: Method, url: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<R, ApiError> {
        let response = request.send().await?;

        let status = response.status();
        trace!("Response status: {}", status);

        if !status.is_success() {
            return Err(Self::status_error(response).await);
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse response from {}: {}", url, e);
            ApiError::Decode(format!("{} (from {})", e, url))
        })
    }

    async fn status_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        error!("Backend error response {}: {}", status, body);
        ApiError::Status { status, body }
    }
}

#[async_trait]
impl ProfileGateway for ApiClient {
    async fn fetch_profile(&self, user_id: &str, token: &str) -> Result<ProfileRecord, ApiError> {
        ApiClient::fetch_profile(self, user_id, token).await
    }

    async fn update_profile(
        &self,
        user_id: &str,
        token: &str,
        body: &ProfileRecord,
    ) -> Result<(), ApiError> {
        ApiClient::update_profile(self, user_id, token, body).await
    }
}
