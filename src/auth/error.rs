use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::client::ProviderError;

/// Failure of the guest login flow, as seen by the browser
#[derive(Debug)]
pub enum GatewayError {
    /// Caller asked to be sent somewhere outside the allow-list
    RedirectNotAllowed(String),
    /// The identity provider could not issue a session
    Provider(ProviderError),
    /// The composed redirect could not be turned into a Location header
    InvalidRedirect(String),
}

impl From<ProviderError> for GatewayError {
    fn from(e: ProviderError) -> Self {
        GatewayError::Provider(e)
    }
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::RedirectNotAllowed(_) => StatusCode::BAD_REQUEST,
            GatewayError::Provider(ProviderError::Serialize(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::Provider(ProviderError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Provider(_) => StatusCode::BAD_GATEWAY,
            GatewayError::InvalidRedirect(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            GatewayError::RedirectNotAllowed(_) => "Redirect target is not allowed",
            GatewayError::Provider(ProviderError::Serialize(_)) => "Internal server error",
            GatewayError::Provider(ProviderError::Timeout(_)) => {
                "Identity provider did not respond in time"
            }
            GatewayError::Provider(_) | GatewayError::InvalidRedirect(_) => {
                "Guest login is temporarily unavailable"
            }
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::client::DecodeError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GatewayError::RedirectNotAllowed("https://evil.example.net".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::from(ProviderError::UnexpectedStatus(StatusCode::FORBIDDEN)).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::from(ProviderError::Decode(DecodeError::Json(
                serde_json::from_str::<serde_json::Value>("{").unwrap_err()
            )))
            .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::from(ProviderError::MissingCookieToken).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::InvalidRedirect("bad".to_string()).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_into_response_hides_provider_detail() {
        let response = GatewayError::from(ProviderError::UnexpectedStatus(
            StatusCode::UNAUTHORIZED,
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
