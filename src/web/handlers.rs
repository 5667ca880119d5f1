use super::templates::AboutTemplate;
use crate::auth::{build_guest_login_url, RedirectParams};
use askama::Template;
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Query};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};

/// Body served on `/` and every unrouted path
pub const PLACEHOLDER_BODY: &str = "This page intentionally left blank\n";

pub async fn root_handler() -> &'static str {
    PLACEHOLDER_BODY
}

/// About page - on POST, also shows a `/guest` link for the posted target
pub async fn about_handler(
    method: Method,
    headers: HeaderMap,
    uri: Uri,
    query: Result<Query<RedirectParams>, QueryRejection>,
    form: Result<Form<RedirectParams>, FormRejection>,
) -> Response {
    let encoded_url = if method == Method::POST {
        let target = RedirectParams::merge(query, form).unwrap_or_default();
        let host = request_host(&headers, &uri);
        Some(build_guest_login_url(host, &target))
    } else {
        None
    };

    let template = AboutTemplate { encoded_url };
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render about page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Host the browser used to reach us (Host header, else the request URI authority)
fn request_host<'a>(headers: &'a HeaderMap, uri: &'a Uri) -> &'a str {
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .unwrap_or("localhost")
}
