//! Guest gateway library
//!
//! Logs a shared guest identity into Okta and redirects the browser to the
//! provider's session cookie URL.

#![deny(dead_code)]

pub mod auth;
pub mod config;
pub mod web;

use auth::OktaClient;
use config::Config;
use std::sync::Arc;

/// Shared, read-only application state, built once in `main`
pub struct AppState {
    pub config: Arc<Config>,
    pub okta: OktaClient,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let okta = OktaClient::from_config(&config)?;
        Ok(Self {
            config: Arc::new(config),
            okta,
        })
    }
}
