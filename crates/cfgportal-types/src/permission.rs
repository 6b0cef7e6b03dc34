//! Permission decisions per namespace

use async_trait::async_trait;
use std::fmt::Debug;

use crate::auth_adapter::AuthCtx;
use crate::item::NamespaceIdentifier;
use crate::prelude::*;

#[async_trait]
pub trait PermissionValidator: Debug + Send + Sync {
	/// Whether the caller may change items of the namespace
	async fn has_modify_namespace_permission(
		&self,
		auth: &AuthCtx,
		namespace: &NamespaceIdentifier,
	) -> ClResult<bool>;

	/// Whether the namespace's configuration must be hidden from the caller
	async fn should_hide_config_to_current_user(
		&self,
		auth: &AuthCtx,
		namespace: &NamespaceIdentifier,
	) -> ClResult<bool>;
}

// vim: ts=4
