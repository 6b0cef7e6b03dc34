//! Identity of the caller and the adapter resolving it

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

/// Context struct for an authenticated user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthCtx {
	pub user_id: Box<str>,
	/// Permission grants, e.g. `ModifyNamespace+app+application`
	pub roles: Box<[Box<str>]>,
}

impl AuthCtx {
	pub fn new(user_id: impl Into<Box<str>>, roles: impl IntoIterator<Item = impl Into<Box<str>>>) -> Self {
		AuthCtx { user_id: user_id.into(), roles: roles.into_iter().map(Into::into).collect() }
	}

	pub fn has_role(&self, role: &str) -> bool {
		self.roles.iter().any(|r| r.as_ref() == role)
	}
}

/// Resolves the caller's identity from a bearer token
#[async_trait]
pub trait IdentityProvider: Debug + Send + Sync {
	/// Validate the token and return the identity it carries.
	///
	/// Returns `Error::Unauthorized` for invalid or expired tokens.
	async fn validate_token(&self, token: &str) -> ClResult<AuthCtx>;
}

// vim: ts=4
