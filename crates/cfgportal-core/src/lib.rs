//! Core infrastructure for cfgportal.
//!
//! Shared application state, request extractors, authentication middleware
//! and the built-in identity provider and permission validator. Feature
//! crates depend on this crate rather than on each other.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod extract;
pub mod identity;
pub mod middleware;
pub mod namespace_perm;
pub mod prelude;

// Re-export commonly used types
pub use app::{App, AppBuilderOpts, AppState, SyncPermissionMode};
pub use extract::{Auth, JsonBody, OptionalRequestId};
pub use identity::JwtIdentityProvider;
pub use namespace_perm::RolePermissionValidator;

// vim: ts=4
