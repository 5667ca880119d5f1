//! Pure helper functions for the guest login flow
//!
//! URL builders and redirect-target policy. Nothing in here performs I/O.

use axum::http::{header, HeaderMap, HeaderValue};

// =============================================================================
// URL Builders
// =============================================================================

/// Build the provider URL that trades a cookie token for a browser session
///
/// `redirect_target` is percent-encoded exactly once here; callers pass it
/// decoded.
pub fn build_session_redirect_url(
    okta_host: &str,
    cookie_token: &str,
    redirect_target: &str,
) -> String {
    format!(
        "{}/login/sessionCookieRedirect?token={}&redirectUrl={}",
        okta_host,
        urlencoding::encode(cookie_token),
        urlencoding::encode(redirect_target)
    )
}

/// Build a link back to this gateway's `/guest` route for a given target
pub fn build_guest_login_url(request_host: &str, redirect_target: &str) -> String {
    format!(
        "http://{}/guest?redirectUrl={}",
        request_host,
        urlencoding::encode(redirect_target)
    )
}

// =============================================================================
// Redirect Target Policy
// =============================================================================

/// Where the browser should land once the provider session exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget<'a> {
    /// Supplied by the caller through `redirectUrl`
    Requested(&'a str),
    /// `DefaultTargetURL` from the config file
    Default(&'a str),
}

impl<'a> RedirectTarget<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            RedirectTarget::Requested(target) | RedirectTarget::Default(target) => target,
        }
    }

    pub fn is_requested(&self) -> bool {
        matches!(self, RedirectTarget::Requested(_))
    }
}

/// Pick the caller's target, or the configured default when it is empty
pub fn resolve_redirect_target<'a>(
    requested: Option<&'a str>,
    default_target: &'a str,
) -> RedirectTarget<'a> {
    match requested.filter(|target| !target.trim().is_empty()) {
        Some(target) => RedirectTarget::Requested(target),
        None => RedirectTarget::Default(default_target),
    }
}

/// Check a caller-supplied target against the host allow-list.
///
/// An empty allow-list accepts everything. Otherwise the target must be an
/// absolute http(s) URL whose host matches an entry (case-insensitive).
pub fn is_redirect_allowed(target: &str, allowed_hosts: &[String]) -> bool {
    if allowed_hosts.is_empty() {
        return true;
    }

    let Ok(parsed) = url::Url::parse(target) else {
        return false;
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    parsed.host_str().is_some_and(|host| {
        allowed_hosts
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(host))
    })
}

// =============================================================================
// Response Headers
// =============================================================================

/// Headers that stop browsers and proxies from caching a guest redirect.
///
/// A guest session is short-lived; a cached redirect would replay a dead token.
pub fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    headers
}

// =============================================================================
// Tests
// =============================================================================
