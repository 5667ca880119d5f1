//! Okta Sessions API payloads
//!
//! See <http://developer.okta.com/docs/api/rest/sessions.html>.

use serde::{Deserialize, Serialize};

/// Credentials posted to create a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRequest {
    pub username: String,
    pub password: String,
}

/// Successful session creation.
///
/// Field names follow the provider contract exactly. The live API answers in
/// camelCase, which is accepted as an alias. Only `cookie_token` is used
/// today; the rest are kept for callers that need them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SessionResponse {
    #[serde(rename = "Id", alias = "id", default)]
    pub id: String,
    #[serde(rename = "UserID", alias = "userId", default)]
    pub user_id: String,
    #[serde(rename = "MfaActive", alias = "mfaActive", default)]
    pub mfa_active: bool,
    #[serde(rename = "CookieToken", alias = "cookieToken", default)]
    pub cookie_token: String,
}
