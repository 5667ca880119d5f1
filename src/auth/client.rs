//! Okta Sessions API client
//!
//! Exchanges the configured guest credentials for a one-time cookie token.
//! One POST per call: no retries, no caching of the resulting token.

use std::time::Duration;

use axum::http::{header, StatusCode};

use super::models::{SessionRequest, SessionResponse};
use crate::config::{Config, OktaSettings};

/// Path (with query) of the session creation endpoint
pub const SESSIONS_PATH: &str = "/api/v1/sessions?additionalFields=cookieToken";

/// Why a session could not be created
///
/// Messages never repeat the underlying error; it is exposed through
/// `Error::source` instead.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("failed to serialize session request")]
    Serialize(#[source] serde_json::Error),

    #[error("session request to identity provider timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("session request to identity provider failed")]
    Transport(#[source] reqwest::Error),

    #[error("identity provider answered with status {0}")]
    UnexpectedStatus(StatusCode),

    #[error("failed to decode session response")]
    Decode(#[source] DecodeError),

    #[error("session response did not include a cookie token")]
    MissingCookieToken,
}

/// Cause of a `ProviderError::Decode`
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to read response body")]
    Body(#[source] reqwest::Error),

    #[error("response body is not a session")]
    Json(#[source] serde_json::Error),
}

impl ProviderError {
    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout(e)
        } else {
            ProviderError::Transport(e)
        }
    }
}

/// Create a reqwest client for provider calls using config timeouts
pub fn create_http_client(
    connect_timeout_secs: u64,
    request_timeout_secs: u64,
) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .timeout(Duration::from_secs(request_timeout_secs))
        .build()
}

pub struct OktaClient {
    host: String,
    api_key: String,
    guest: SessionRequest,
    http: reqwest::Client,
}

impl OktaClient {
    pub fn new(settings: &OktaSettings, http: reqwest::Client) -> Self {
        Self {
            host: settings.host.clone(),
            api_key: settings.api_key.clone(),
            guest: SessionRequest {
                username: settings.guest_username.clone(),
                password: settings.guest_password.clone(),
            },
            http,
        }
    }

    /// Build a client with the HTTP timeouts from `config`
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = create_http_client(
            config.http_connect_timeout_secs,
            config.http_request_timeout_secs,
        )
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client for Okta: {}", e))?;

        Ok(Self::new(&config.okta, http))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn sessions_url(&self) -> String {
        format!("{}{}", self.host, SESSIONS_PATH)
    }

    /// Create a session for the guest account
    pub async fn create_guest_session(&self) -> Result<SessionResponse, ProviderError> {
        self.create_session(&self.guest).await
    }

    /// POST `request` to the Sessions API and parse a 200 answer
    pub async fn create_session(
        &self,
        request: &SessionRequest,
    ) -> Result<SessionResponse, ProviderError> {
        let body = serde_json::to_vec(request).map_err(ProviderError::Serialize)?;

        let response = self
            .http
            .post(self.sessions_url())
            .header(header::AUTHORIZATION, format!("SSWS {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(ProviderError::from_reqwest)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::debug!(status = %status, "Okta rejected session request");
            return Err(ProviderError::UnexpectedStatus(status));
        }

        // A stalled body still counts against the request budget
        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(e)
            } else {
                ProviderError::Decode(DecodeError::Body(e))
            }
        })?;
        let session: SessionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ProviderError::Decode(DecodeError::Json(e)))?;

        if session.cookie_token.is_empty() {
            return Err(ProviderError::MissingCookieToken);
        }

        tracing::debug!(
            user_id = %session.user_id,
            mfa_active = session.mfa_active,
            "Okta session created"
        );

        Ok(session)
    }
}
