//! HTTP client with bearer auth header injection and token persistence.
//!
//! Authenticated JSON routes live under `/api` on the API server; private
//! HTML fragments are served by the website under the configured slug. The
//! login route sits outside the `/api` group and is the only call sent
//! without an Authorization header.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use super::types::{ErrorBody, LoginRequest, LoginResponse, MagicCodeRequest};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::store::TokenStore;

/// Username and password of the anonymous account. Posting both as `anon`
/// makes the backend mint a token for a brand-new anonymous user.
const ANON_CREDENTIAL: &str = "anon";

/// HTTP client for the EcoSystem backend API.
///
/// Holds injected configuration, the durable token store, and the current
/// session token. The token is loaded from the store at construction and
/// replaced by any later successful login; there is no logout or expiry
/// handling, an invalidated token simply makes requests fail with an
/// authorization error.
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    store: TokenStore,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a client from configuration and a token store.
    pub fn new(config: ClientConfig, store: TokenStore) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        let token = store.get_token();
        Self {
            http,
            config,
            store,
            token: Arc::new(RwLock::new(token)),
        }
    }

    /// Whether a session token is currently held.
    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Establish an anonymous session if none exists yet.
    ///
    /// Call once at startup.
    /// Performs exactly one anonymous login when no token is held and none
    /// at all otherwise. Returns `true` if a login was performed.
    ///
    /// Deliberately not atomic across concurrent callers: two racing calls
    /// may both log in, and the last token written wins.
    pub async fn ensure_logged_on(&self) -> Result<bool, ApiError> {
        if self.token.read().await.is_some() {
            log::debug!("Session token already present, skipping anonymous login");
            return Ok(false);
        }
        match self.log_on_anon().await {
            Ok(_) => Ok(true),
            Err(e) => {
                log::warn!("Could not log in anonymously: {}", e);
                Err(e)
            }
        }
    }

    /// Log in with the fixed anonymous credential pair.
    pub async fn log_on_anon(&self) -> Result<Option<String>, ApiError> {
        self.log_on(ANON_CREDENTIAL, ANON_CREDENTIAL).await
    }

    /// POST credentials to the login endpoint.
    ///
    /// The route sits outside the `/api` group, so no Authorization header
    /// is attached. On success the returned token is persisted to the
    /// store, overwriting any prior value, and becomes the session token
    /// for subsequent requests. A success response without a `token` field
    /// leaves both the store and the session unchanged.
    pub async fn log_on(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<String>, ApiError> {
        let url = format!("{}/login", self.config.api_base_url);
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let login: LoginResponse = resp.json().await?;

        match login.token {
            Some(token) => {
                self.store.set_token(&token)?;
                *self.token.write().await = Some(token.clone());
                log::info!("Logged on as {}, token persisted", username);
                Ok(Some(token))
            }
            None => {
                log::warn!("Login succeeded but the response carried no token");
                Ok(None)
            }
        }
    }

    /// Request a one-off login code to be emailed.
    pub async fn request_magic_code(&self, email: &str) -> Result<(), ApiError> {
        let url = format!("{}/magiccode", self.config.api_base_url);
        let resp = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&MagicCodeRequest {
                email: email.to_string(),
            })
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    /// Authenticated JSON POST to `/api{endpoint}`.
    ///
    /// `endpoint` is appended verbatim and conventionally starts with a
    /// slash, e.g. `/things`. The body is serialized as JSON and the
    /// response deserialized from JSON.
    pub async fn json_post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/api{}", self.config.api_base_url, endpoint);
        let builder = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(body);
        let resp = self.attach_bearer(builder).await.send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// Authenticated JSON DELETE to `/api{endpoint}`. No request body.
    pub async fn json_delete<R>(&self, endpoint: &str) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let url = format!("{}/api{}", self.config.api_base_url, endpoint);
        let builder = self.http.delete(&url).header(ACCEPT, "application/json");
        let resp = self.attach_bearer(builder).await.send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// Authenticated GET for a private HTML fragment. Returns the body text.
    ///
    /// Targets the website base, not the JSON API:
    /// `{site_base}/{private_slug}{endpoint}`.
    pub async fn html_get(&self, endpoint: &str) -> Result<String, ApiError> {
        let url = format!(
            "{}/{}{}",
            self.config.site_base_url, self.config.private_slug, endpoint
        );
        let builder = self.http.get(&url).header(ACCEPT, "text/html");
        let resp = self.attach_bearer(builder).await.send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.text().await?)
    }

    /// Attach `Authorization: Bearer <token>` when a session token is held.
    /// Tokenless requests go out without the header and are rejected
    /// server-side.
    async fn attach_bearer(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self.token.read().await;
        match *token {
            Some(ref t) => builder.bearer_auth(t),
            None => builder,
        }
    }
}

/// Map non-success responses to [`ApiError::Status`], preferring the
/// server's JSON `message` field over raw body text.
async fn check_status(resp: Response) -> Result<Response, ApiError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or(body);
    Err(ApiError::Status { status, message })
}
