//! RPC request and response messages

use allowgate_core::{AuthRequest, AuthResponse, MembershipMode};
use serde::{Deserialize, Serialize};

/// `CheckAuthorization` request message
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckAuthorizationRequest {
    /// Username to check
    pub username: String,
}

/// `CheckAuthorization` response message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckAuthorizationResponse {
    /// Whether the username is authorized
    pub authorized: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status
    pub status: HealthStatus,

    /// Service version
    pub version: String,

    /// Uptime in seconds
    pub uptime_seconds: u64,

    /// Number of allow-list entries
    pub allow_list_entries: usize,

    /// Active membership mode
    pub membership_mode: MembershipMode,
}

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Service is healthy
    Healthy,
}

impl From<CheckAuthorizationRequest> for AuthRequest {
    fn from(req: CheckAuthorizationRequest) -> Self {
        AuthRequest::new(req.username)
    }
}

impl From<AuthResponse> for CheckAuthorizationResponse {
    fn from(resp: AuthResponse) -> Self {
        CheckAuthorizationResponse {
            authorized: resp.authorized,
        }
    }
}
