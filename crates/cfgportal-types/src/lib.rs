//! Shared types, adapter traits, and core utilities for cfgportal.
//!
//! This crate contains the foundational types that are shared between the
//! gateway crates and all adapter implementations. Keeping them in a separate
//! crate allows adapters to compile without pulling in the HTTP layer.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod auth_adapter;
pub mod error;
pub mod item;
pub mod item_adapter;
pub mod model;
pub mod namespace_adapter;
pub mod permission;
pub mod prelude;
pub mod types;
pub mod utils;

// vim: ts=4
