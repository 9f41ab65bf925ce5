//! Client configuration.
//!
//! Base URLs are injected rather than hardcoded. `from_env` reads the
//! `ECOSYSTEM_*` variables with localhost defaults for local development.

/// Default base URL for a locally running backend.
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default path slug for the private HTML section of the website.
const DEFAULT_PRIVATE_SLUG: &str = "private";

/// Configuration for an [`ApiClient`](crate::ApiClient).
///
/// The JSON API (login + `/api` routes) and the website serving private
/// HTML fragments may live on different hosts; by default both point at
/// the same base URL.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the JSON API server, no trailing slash.
    pub api_base_url: String,
    /// Base URL of the website serving private HTML fragments, no trailing slash.
    pub site_base_url: String,
    /// Path slug for the private HTML section, no slashes.
    pub private_slug: String,
}

impl ClientConfig {
    /// Create a configuration pointing both the API and the website at
    /// the given base URL.
    pub fn new(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            api_base_url: base.clone(),
            site_base_url: base,
            private_slug: DEFAULT_PRIVATE_SLUG.to_string(),
        }
    }

    /// Build a configuration from the environment.
    ///
    /// `ECOSYSTEM_API_URL` > localhost default; `ECOSYSTEM_SITE_URL`
    /// defaults to the API base URL; `ECOSYSTEM_PRIVATE_SLUG` defaults
    /// to `private`.
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("ECOSYSTEM_API_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let site_base_url = std::env::var("ECOSYSTEM_SITE_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| api_base_url.clone());
        let private_slug = std::env::var("ECOSYSTEM_PRIVATE_SLUG")
            .unwrap_or_else(|_| DEFAULT_PRIVATE_SLUG.to_string())
            .trim_matches('/')
            .to_string();
        Self {
            api_base_url,
            site_base_url,
            private_slug,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
