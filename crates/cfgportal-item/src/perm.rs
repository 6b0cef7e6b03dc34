//! Permission guards called at the top of the item handlers

use itertools::Itertools;

use crate::prelude::*;
use cfgportal_core::SyncPermissionMode;
use cfgportal_types::auth_adapter::AuthCtx;
use cfgportal_types::item::NamespaceIdentifier;

/// Fails with `PermissionDenied` unless the caller may modify the namespace
pub async fn require_modify_permission(
	app: &App,
	auth: &AuthCtx,
	namespace: &NamespaceIdentifier,
) -> ClResult<()> {
	if app.permission_validator.has_modify_namespace_permission(auth, namespace).await? {
		return Ok(());
	}

	warn!(
		user = %auth.user_id,
		namespace = %namespace,
		"Modify namespace permission denied"
	);
	Err(Error::PermissionDenied)
}

/// Checks modify permission on every sync target in declaration order.
///
/// In `FailFast` mode the first unauthorized target ends the check; in
/// `CollectAll` mode all of them are named in the error.
pub async fn require_sync_permission(
	app: &App,
	auth: &AuthCtx,
	targets: &[NamespaceIdentifier],
) -> ClResult<()> {
	let mut denied = Vec::new();
	for namespace in targets {
		if !app.permission_validator.has_modify_namespace_permission(auth, namespace).await? {
			denied.push(namespace);
			if app.opts.sync_permission_mode == SyncPermissionMode::FailFast {
				break;
			}
		}
	}

	if denied.is_empty() {
		return Ok(());
	}

	let names = denied.iter().join(", ");
	warn!(user = %auth.user_id, namespaces = %names, "Sync permission denied");
	Err(Error::AccessDenied(format!("You don't have the permission to modify namespace: {}", names)))
}

// vim: ts=4
