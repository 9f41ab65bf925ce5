//! Client helper library for the EcoSystem backend API.
//!
//! Wraps an HTTP client four ways (JSON POST, JSON DELETE, private HTML GET,
//! login POST) and persists the bearer token in a durable local store so a
//! fresh process can resume its anonymous session. Call
//! [`ApiClient::ensure_logged_on`] once at startup to establish a session
//! when none is stored.

pub mod api;
pub mod config;
pub mod error;
pub mod store;

pub use api::client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use store::TokenStore;
