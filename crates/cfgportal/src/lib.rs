//! cfgportal is a gateway for namespace configuration items.
//!
//! # Features
//!
//! - Item CRUD with server-side attribution of creator and modifier
//! - Bulk update of a namespace from configuration text
//! - Diff and sync of an item set across namespaces
//! - Revoke of unreleased changes
//! - YAML syntax check with duplicate key detection
//! - Per-namespace permission checks and visibility hiding
//!
//! Storage, identity and permission decisions are pluggable adapters.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

// Re-export shared types and adapter traits from cfgportal-types
pub use cfgportal_types::auth_adapter;
pub use cfgportal_types::error;
pub use cfgportal_types::item;
pub use cfgportal_types::item_adapter;
pub use cfgportal_types::model;
pub use cfgportal_types::namespace_adapter;
pub use cfgportal_types::permission;
pub use cfgportal_types::types;

// Feature crate re-exports
pub use cfgportal_core::identity;
pub use cfgportal_core::namespace_perm;
pub use cfgportal_item as items;

// Local modules
pub mod app;
pub mod prelude;
pub mod routes;
pub mod webserver;

pub use crate::app::{App, AppBuilder, SyncPermissionMode};

// vim: ts=4
