//! Role grant based namespace permission validation
//!
//! Grants are plain strings carried in the caller's token:
//!
//! - `SuperAdmin`
//! - `Master+{appId}` (application administrator)
//! - `ModifyNamespace+{appId}+{namespace}[+{ENV}]`
//! - `ModifyNamespacesInCluster+{appId}+{ENV}+{cluster}`
//! - `ReleaseNamespace+{appId}+{namespace}[+{ENV}]`
//! - `ReleaseNamespacesInCluster+{appId}+{ENV}+{cluster}`

use async_trait::async_trait;
use std::collections::HashSet;

use crate::prelude::*;
use cfgportal_types::auth_adapter::AuthCtx;
use cfgportal_types::item::NamespaceIdentifier;
use cfgportal_types::permission::PermissionValidator;

pub const SUPER_ADMIN: &str = "SuperAdmin";
const MASTER: &str = "Master";
const MODIFY_NAMESPACE: &str = "ModifyNamespace";
const MODIFY_NAMESPACES_IN_CLUSTER: &str = "ModifyNamespacesInCluster";
const RELEASE_NAMESPACE: &str = "ReleaseNamespace";
const RELEASE_NAMESPACES_IN_CLUSTER: &str = "ReleaseNamespacesInCluster";

pub fn build_app_master_role(app_id: &str) -> String {
	format!("{}+{}", MASTER, app_id)
}

pub fn build_modify_namespace_role(app_id: &str, namespace: &str, env: Option<&Env>) -> String {
	build_namespace_role(MODIFY_NAMESPACE, app_id, namespace, env)
}

pub fn build_release_namespace_role(app_id: &str, namespace: &str, env: Option<&Env>) -> String {
	build_namespace_role(RELEASE_NAMESPACE, app_id, namespace, env)
}

pub fn build_modify_cluster_role(app_id: &str, env: &Env, cluster: &str) -> String {
	format!("{}+{}+{}+{}", MODIFY_NAMESPACES_IN_CLUSTER, app_id, env, cluster)
}

fn build_namespace_role(perm: &str, app_id: &str, namespace: &str, env: Option<&Env>) -> String {
	match env {
		Some(env) => format!("{}+{}+{}+{}", perm, app_id, namespace, env),
		None => format!("{}+{}+{}", perm, app_id, namespace),
	}
}

#[derive(Debug, Default)]
pub struct RolePermissionValidator {
	/// Environments where only members may view configuration
	member_only_envs: HashSet<Env>,
}

impl RolePermissionValidator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_member_only_envs(envs: impl IntoIterator<Item = Env>) -> Self {
		RolePermissionValidator { member_only_envs: envs.into_iter().collect() }
	}

	fn has_namespace_grant(auth: &AuthCtx, perm: &str, cluster_perm: &str, ns: &NamespaceIdentifier) -> bool {
		let candidates = [
			build_namespace_role(perm, &ns.app_id, &ns.namespace_name, None),
			build_namespace_role(perm, &ns.app_id, &ns.namespace_name, Some(&ns.env)),
			format!("{}+{}+{}+{}", cluster_perm, ns.app_id, ns.env, ns.cluster_name),
		];
		candidates.iter().any(|role| auth.has_role(role))
	}

	fn can_modify(auth: &AuthCtx, ns: &NamespaceIdentifier) -> bool {
		auth.has_role(SUPER_ADMIN)
			|| Self::has_namespace_grant(auth, MODIFY_NAMESPACE, MODIFY_NAMESPACES_IN_CLUSTER, ns)
	}

	fn can_release(auth: &AuthCtx, ns: &NamespaceIdentifier) -> bool {
		auth.has_role(SUPER_ADMIN)
			|| Self::has_namespace_grant(auth, RELEASE_NAMESPACE, RELEASE_NAMESPACES_IN_CLUSTER, ns)
	}
}

#[async_trait]
impl PermissionValidator for RolePermissionValidator {
	async fn has_modify_namespace_permission(
		&self,
		auth: &AuthCtx,
		namespace: &NamespaceIdentifier,
	) -> ClResult<bool> {
		Ok(Self::can_modify(auth, namespace))
	}

	async fn should_hide_config_to_current_user(
		&self,
		auth: &AuthCtx,
		namespace: &NamespaceIdentifier,
	) -> ClResult<bool> {
		if !self.member_only_envs.contains(&namespace.env) {
			return Ok(false);
		}

		let is_member = auth.has_role(&build_app_master_role(&namespace.app_id))
			|| Self::can_modify(auth, namespace)
			|| Self::can_release(auth, namespace);
		Ok(!is_member)
	}
}


// vim: ts=4
