//! allowgate core - static allow-list authorization
//!
//! This crate holds the allow-list loader and the authorization responder.
//! Both are free of I/O beyond the single read performed by the loader, so
//! they can be exercised in isolation from the RPC server.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod allowlist;
pub mod authorizer;
pub mod error;
pub mod request;

pub use allowlist::AllowList;
pub use authorizer::{Authorizer, MembershipMode};
pub use error::{AllowGateError, Result};
pub use request::{AuthRequest, AuthResponse};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
