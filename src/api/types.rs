//! Request and response types for the EcoSystem backend API.

use serde::{Deserialize, Serialize};

/// Login request body sent to POST /login.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response from POST /login.
///
/// The backend's JWT middleware reports the token expiry alongside the
/// token itself; the client stores only the token. A success response may
/// omit `token` entirely, in which case nothing is persisted.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub expire: Option<String>,
}

/// Magic code request body sent to POST /magiccode.
#[derive(Debug, Serialize)]
pub struct MagicCodeRequest {
    pub email: String,
}

/// Error body the backend attaches to non-success responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: Option<u16>,
    pub message: Option<String>,
}
