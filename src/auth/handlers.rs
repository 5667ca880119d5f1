//! Guest login handler
//!
//! `guest_handler` logs the shared guest account into Okta and sends the
//! browser to Okta's cookie redirect endpoint, which sets the session cookie
//! and forwards to the requested target.

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Form, Query, State,
    },
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::error::GatewayError;
use super::helpers::{
    build_session_redirect_url, is_redirect_allowed, no_cache_headers, resolve_redirect_target,
};
use crate::AppState;

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct RedirectParams {
    #[serde(rename = "redirectUrl")]
    pub redirect_url: Option<String>,
}

impl RedirectParams {
    /// Combine a form body with the query string.
    ///
    /// A `redirectUrl` present in the body wins even when empty; the query
    /// string is only consulted when the body does not carry the field.
    pub fn merge(
        query: Result<Query<RedirectParams>, QueryRejection>,
        form: Result<Form<RedirectParams>, FormRejection>,
    ) -> Option<String> {
        let from_form = form
            .ok()
            .and_then(|Form(params)| params.redirect_url);

        from_form.or_else(|| match query {
            Ok(Query(params)) => params.redirect_url,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unreadable query string");
                None
            }
        })
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Guest login handler - creates an Okta session and redirects (301) to it
pub async fn guest_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RedirectParams>, QueryRejection>,
    form: Result<Form<RedirectParams>, FormRejection>,
) -> Result<Response, GatewayError> {
    let okta = &state.config.okta;
    let requested = RedirectParams::merge(query, form);
    let target = resolve_redirect_target(requested.as_deref(), &okta.default_target_url);

    tracing::info!(
        requested_target = target.is_requested(),
        "Guest login requested"
    );

    if target.is_requested() && !is_redirect_allowed(target.as_str(), &okta.allowed_redirect_hosts)
    {
        tracing::warn!(
            redirect_target = %target.as_str(),
            "Rejected guest login: redirect target not in allow-list"
        );
        return Err(GatewayError::RedirectNotAllowed(target.as_str().to_string()));
    }

    let session = state.okta.create_guest_session().await.map_err(|e| {
        tracing::error!(
            error = &e as &(dyn std::error::Error + 'static),
            okta_host = %state.okta.host(),
            "Failed to create guest session"
        );
        GatewayError::from(e)
    })?;

    let redirect_url =
        build_session_redirect_url(state.okta.host(), &session.cookie_token, target.as_str());

    let location = HeaderValue::from_str(&redirect_url).map_err(|e| {
        tracing::error!(
            error = %e,
            value_len = redirect_url.len(),
            "Failed to create Location header - possible malformed token"
        );
        GatewayError::InvalidRedirect(e.to_string())
    })?;

    // Security: the URL carries a live session token, so only the target is logged
    tracing::info!(
        redirect_target = %target.as_str(),
        "Guest session created, redirecting to Okta"
    );

    let mut response = (StatusCode::MOVED_PERMANENTLY, no_cache_headers()).into_response();
    response.headers_mut().insert(header::LOCATION, location);

    Ok(response)
}
