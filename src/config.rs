use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Config file location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";

/// Port used when PORT is unset or empty
pub const DEFAULT_PORT: u16 = 9000;

/// Settings read from the JSON config file.
///
/// Field names match the existing deployment files exactly (`OktaAPIKey`,
/// `OktaHost`, ...), so they are renamed one by one rather than with a
/// blanket `rename_all`.
#[derive(Clone, Deserialize)]
pub struct OktaSettings {
    #[serde(rename = "OktaAPIKey", default)]
    pub api_key: String,
    #[serde(rename = "OktaHost", default)]
    pub host: String,
    #[serde(rename = "DefaultTargetURL", default)]
    pub default_target_url: String,
    #[serde(rename = "GuestUserName", default)]
    pub guest_username: String,
    #[serde(rename = "GuestPassword", default)]
    pub guest_password: String,
    /// Hosts a caller-supplied redirect target may point at (empty = any)
    #[serde(rename = "AllowedRedirectHosts", default)]
    pub allowed_redirect_hosts: Vec<String>,
}

// Secrets must never reach the logs
impl fmt::Debug for OktaSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OktaSettings")
            .field("api_key", &"<redacted>")
            .field("host", &self.host)
            .field("default_target_url", &self.default_target_url)
            .field("guest_username", &self.guest_username)
            .field("guest_password", &"<redacted>")
            .field("allowed_redirect_hosts", &self.allowed_redirect_hosts)
            .finish()
    }
}

impl OktaSettings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let mut settings: OktaSettings =
            serde_json::from_str(json).context("Configuration file is not valid JSON")?;

        // Normalize host by trimming trailing slashes to prevent double-slash issues
        // e.g., "https://example.okta.com/" -> "https://example.okta.com"
        settings.host = settings.host.trim_end_matches('/').to_string();

        Ok(settings)
    }

    /// Read and parse the settings file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path).with_context(|| {
            format!("Configuration file '{}' could not be found", path.display())
        })?;

        Self::from_json(&json)
            .with_context(|| format!("Configuration file '{}' is malformed", path.display()))
    }

    /// Names of settings left empty.
    ///
    /// Empty values are not rejected; they surface as failed provider calls.
    pub fn empty_fields(&self) -> Vec<&'static str> {
        [
            ("OktaAPIKey", &self.api_key),
            ("OktaHost", &self.host),
            ("DefaultTargetURL", &self.default_target_url),
            ("GuestUserName", &self.guest_username),
            ("GuestPassword", &self.guest_password),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub server_host: String,
    pub server_port: u16,

    // Where the settings were read from
    pub config_path: PathBuf,

    // Provider and guest account settings from the config file
    pub okta: OktaSettings,

    // HTTP client timeout configuration (in seconds)
    pub http_connect_timeout_secs: u64,
    pub http_request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from the environment and the JSON config file
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(|name| env::var(name).ok())
    }

    /// Load configuration, reading variables through `lookup`
    pub fn load_from<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = lookup("GUEST_GATEWAY_CONFIG")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let okta = OktaSettings::from_file(&config_path)?;

        let server_host = lookup("SERVER_HOST")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let server_port = parse_port(lookup("PORT").as_deref());

        let http_connect_timeout_secs = parse_timeout_secs(
            "HTTP_CONNECT_TIMEOUT_SECS",
            lookup("HTTP_CONNECT_TIMEOUT_SECS").as_deref(),
            10,
        );

        let http_request_timeout_secs = parse_timeout_secs(
            "HTTP_REQUEST_TIMEOUT_SECS",
            lookup("HTTP_REQUEST_TIMEOUT_SECS").as_deref(),
            30,
        );

        Ok(Config {
            server_host,
            server_port,
            config_path,
            okta,
            http_connect_timeout_secs,
            http_request_timeout_secs,
        })
    }

    /// Get bind address for server
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Parse the PORT value, falling back to the default when unset, empty or invalid
fn parse_port(value: Option<&str>) -> u16 {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
            tracing::warn!(port = raw, fallback = DEFAULT_PORT, "Invalid PORT, using default");
            DEFAULT_PORT
        }),
        None => DEFAULT_PORT,
    }
}

/// Parse a timeout in seconds; unset, empty, invalid or zero yields `default`
fn parse_timeout_secs(name: &str, value: Option<&str>, default: u64) -> u64 {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                tracing::warn!(
                    variable = name,
                    value = raw,
                    fallback = default,
                    "Invalid timeout, using default"
                );
                default
            }
        },
        None => default,
    }
}
