//! Authorization responder

use crate::allowlist::AllowList;
use crate::error::AllowGateError;
use crate::request::{AuthRequest, AuthResponse};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// How an allow-list entry's flag takes part in the decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipMode {
    /// Any listed username is authorized, whatever its flag
    #[default]
    Presence,
    /// A listed username is authorized only when its flag is `true`
    Flag,
}

impl MembershipMode {
    /// Mode name as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipMode::Presence => "presence",
            MembershipMode::Flag => "flag",
        }
    }
}

impl fmt::Display for MembershipMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipMode {
    type Err = AllowGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "presence" => Ok(MembershipMode::Presence),
            "flag" => Ok(MembershipMode::Flag),
            _ => Err(AllowGateError::UnknownMembershipMode(s.to_string())),
        }
    }
}

/// Answers authorization checks against a loaded allow-list
///
/// The allow-list is never mutated after construction, so an `Authorizer`
/// can be shared across any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct Authorizer {
    allow_list: Arc<AllowList>,
    mode: MembershipMode,
}

impl Authorizer {
    /// Create an authorizer using presence-only membership
    pub fn new(allow_list: AllowList) -> Self {
        Self::with_mode(allow_list, MembershipMode::default())
    }

    /// Create an authorizer with an explicit membership mode
    pub fn with_mode(allow_list: AllowList, mode: MembershipMode) -> Self {
        Authorizer {
            allow_list: Arc::new(allow_list),
            mode,
        }
    }

    /// Decide a request
    pub fn check(&self, request: &AuthRequest) -> AuthResponse {
        self.is_authorized(&request.username).into()
    }

    /// Decide a bare username
    pub fn is_authorized(&self, username: &str) -> bool {
        match self.mode {
            MembershipMode::Presence => self.allow_list.contains(username),
            MembershipMode::Flag => self.allow_list.flag(username).unwrap_or(false),
        }
    }

    /// The loaded allow-list
    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// The active membership mode
    pub fn mode(&self) -> MembershipMode {
        self.mode
    }
}
