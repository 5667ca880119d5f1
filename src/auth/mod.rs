//! Guest authentication module
//!
//! Logs the shared guest account into Okta and hands the browser a session.
//!
//! ## Structure
//!
//! - `models`: Okta Sessions API request/response payloads
//! - `client`: HTTP client for the Sessions API
//! - `helpers`: Pure helper functions (URL builders, redirect policy, headers)
//! - `error`: Mapping of flow failures to HTTP responses
//! - `handlers`: HTTP handler for `/guest`
//!
//! ## Guest Login Flow
//!
//! 1. Browser visits `/guest?redirectUrl=...`
//! 2. Gateway POSTs the guest credentials to `{OktaHost}/api/v1/sessions`
//! 3. Okta answers with a one-time cookie token
//! 4. Gateway 301-redirects to `{OktaHost}/login/sessionCookieRedirect?token=...&redirectUrl=...`
//! 5. Okta sets its session cookie and forwards the browser to the target

pub mod client;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export handlers for convenient routing
pub use handlers::{guest_handler, RedirectParams};

pub use client::{DecodeError, OktaClient, ProviderError};
pub use error::GatewayError;
pub use helpers::{
    build_guest_login_url, build_session_redirect_url, is_redirect_allowed, no_cache_headers,
    resolve_redirect_target, RedirectTarget,
};
pub use models::{SessionRequest, SessionResponse};
