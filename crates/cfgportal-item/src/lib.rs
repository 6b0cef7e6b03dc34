//! Configuration item endpoints.
//!
//! Handlers validate and normalize requests, check permissions with explicit
//! guards, delegate to the item and namespace adapters and shape responses.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod diff;
pub mod handler;
pub mod perm;
mod prelude;
pub mod syntax;

// vim: ts=4
