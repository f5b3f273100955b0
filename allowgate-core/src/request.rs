//! Request and response types for authorization checks

use serde::{Deserialize, Serialize};

/// Authorization request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Username to check, passed through without normalisation
    pub username: String,
}

impl AuthRequest {
    /// Create a new request
    pub fn new(username: impl Into<String>) -> Self {
        AuthRequest {
            username: username.into(),
        }
    }
}

/// Authorization response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Whether the username is authorized
    pub authorized: bool,
}

impl AuthResponse {
    /// Response granting authorization
    pub const AUTHORIZED: AuthResponse = AuthResponse { authorized: true };

    /// Response refusing authorization
    pub const UNAUTHORIZED: AuthResponse = AuthResponse { authorized: false };
}

impl From<bool> for AuthResponse {
    fn from(authorized: bool) -> Self {
        AuthResponse { authorized }
    }
}
