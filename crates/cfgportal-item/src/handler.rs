//! Item HTTP handlers

use axum::{
	Json,
	extract::{Path, Query, State},
	http::StatusCode,
};
use serde::Deserialize;

use cfgportal_core::extract::{Auth, JsonBody};
use cfgportal_types::auth_adapter::AuthCtx;
use cfgportal_types::item::{Item, ItemDiffs, NamespaceIdentifier};
use cfgportal_types::model::{NamespaceSyncModel, NamespaceTextModel};

use crate::{diff, perm, prelude::*, syntax};

pub const ORDER_BY_LINE_NUM: &str = "lineNum";
pub const ORDER_BY_LAST_MODIFIED_TIME: &str = "lastModifiedTime";

// Path parameters //
//*****************//
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespacePath {
	pub app_id: String,
	pub env: String,
	pub cluster_name: String,
	pub namespace_name: String,
}

impl NamespacePath {
	fn namespace(&self) -> ClResult<NamespaceIdentifier> {
		Ok(NamespaceIdentifier::new(
			self.app_id.as_str(),
			Env::parse(&self.env)?,
			self.cluster_name.as_str(),
			self.namespace_name.as_str(),
		))
	}
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPath {
	pub app_id: String,
	pub env: String,
	pub cluster_name: String,
	pub namespace_name: String,
	pub item_id: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchPath {
	pub app_id: String,
	pub env: String,
	pub namespace_name: String,
	pub branch_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppNamespacePath {
	pub app_id: String,
	pub namespace_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsQuery {
	pub order_by: Option<String>,
}

fn invalid_item() -> Error {
	Error::ValidationError("Item key cannot be empty".to_string())
}

fn invalid_sync_model() -> Error {
	Error::ValidationError("Invalid namespace sync request".to_string())
}

// Handlers //
//**********//

/// PUT /apps/{appId}/envs/{env}/clusters/{clusterName}/namespaces/{namespaceName}/items
pub async fn put_items_by_text(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(path): Path<NamespacePath>,
	JsonBody(mut model): JsonBody<NamespaceTextModel>,
) -> ClResult<StatusCode> {
	let namespace = path.namespace()?;
	perm::require_modify_permission(&app, &auth, &namespace).await?;

	model.bind(&namespace);
	model.operator = Some(auth.user_id.clone());

	app.item_adapter.update_config_item_by_text(&model).await?;
	info!(user = %auth.user_id, namespace = %namespace, "Updated items by text");

	Ok(StatusCode::OK)
}

/// POST /apps/{appId}/envs/{env}/clusters/{clusterName}/namespaces/{namespaceName}/item
pub async fn post_item(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(path): Path<NamespacePath>,
	JsonBody(item): JsonBody<Option<Item>>,
) -> ClResult<(StatusCode, Json<Item>)> {
	let namespace = path.namespace()?;
	perm::require_modify_permission(&app, &auth, &namespace).await?;

	let mut item = item.filter(Item::has_valid_key).ok_or_else(invalid_item)?;

	// Position, identity and timestamps belong to the store
	item.line_num = 0;
	item.id = 0;
	item.data_change_created_by = Some(auth.user_id.clone());
	item.data_change_last_modified_by = Some(auth.user_id.clone());
	item.data_change_created_time = None;
	item.data_change_last_modified_time = None;

	let created = app.item_adapter.create_item(&namespace, item).await?;
	info!(
		user = %auth.user_id,
		namespace = %namespace,
		item_id = created.id,
		key = %created.key(),
		"Created item"
	);

	Ok((StatusCode::OK, Json(created)))
}

/// PUT /apps/{appId}/envs/{env}/clusters/{clusterName}/namespaces/{namespaceName}/item
pub async fn put_item(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(path): Path<NamespacePath>,
	JsonBody(item): JsonBody<Option<Item>>,
) -> ClResult<StatusCode> {
	let namespace = path.namespace()?;
	perm::require_modify_permission(&app, &auth, &namespace).await?;

	let mut item = item.filter(Item::has_valid_key).ok_or_else(invalid_item)?;
	item.data_change_last_modified_by = Some(auth.user_id.clone());

	let (item_id, key) = (item.id, item.key.clone());
	app.item_adapter.update_item(&namespace, item).await?;
	info!(
		user = %auth.user_id,
		namespace = %namespace,
		item_id = item_id,
		key = ?key,
		"Updated item"
	);

	Ok(StatusCode::OK)
}

/// DELETE /apps/{appId}/envs/{env}/clusters/{clusterName}/namespaces/{namespaceName}/items/{itemId}
pub async fn delete_item(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(path): Path<ItemPath>,
) -> ClResult<StatusCode> {
	let namespace = NamespaceIdentifier::new(
		path.app_id.as_str(),
		Env::parse(&path.env)?,
		path.cluster_name.as_str(),
		path.namespace_name.as_str(),
	);
	perm::require_modify_permission(&app, &auth, &namespace).await?;

	let item = app.item_adapter.load_item_by_id(&namespace.env, path.item_id).await?;
	let base_info = app.namespace_adapter.load_namespace_base_info(&namespace).await?;

	// The path must address the namespace that actually owns the item
	if base_info.is_none_or(|ns| ns.id != item.namespace_id) {
		warn!(
			user = %auth.user_id,
			namespace = %namespace,
			item_id = path.item_id,
			item_namespace_id = item.namespace_id,
			"Item does not belong to the addressed namespace"
		);
		return Err(Error::NamespaceMismatch);
	}

	app.item_adapter.delete_item(&namespace.env, path.item_id, &auth.user_id).await?;
	info!(user = %auth.user_id, namespace = %namespace, item_id = path.item_id, "Deleted item");

	Ok(StatusCode::OK)
}

/// GET /apps/{appId}/envs/{env}/clusters/{clusterName}/namespaces/{namespaceName}/items
pub async fn list_items(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(path): Path<NamespacePath>,
	Query(query): Query<ListItemsQuery>,
) -> ClResult<Json<Vec<Item>>> {
	let namespace = path.namespace()?;
	let order_by = query.order_by.as_deref().unwrap_or(ORDER_BY_LINE_NUM);

	let items = find_items(&app, &auth, &namespace, order_by).await?;
	Ok(Json(items))
}

/// GET /apps/{appId}/envs/{env}/clusters/{clusterName}/namespaces/{namespaceName}/branches/{branchName}/items
pub async fn list_branch_items(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(path): Path<BranchPath>,
) -> ClResult<Json<Vec<Item>>> {
	// A branch is addressed as a cluster named after the branch
	let namespace = NamespaceIdentifier::new(
		path.app_id.as_str(),
		Env::parse(&path.env)?,
		path.branch_name.as_str(),
		path.namespace_name.as_str(),
	);

	let items = find_items(&app, &auth, &namespace, ORDER_BY_LAST_MODIFIED_TIME).await?;
	Ok(Json(items))
}

/// POST /namespaces/{namespaceName}/diff
pub async fn post_diff(
	State(app): State<App>,
	Auth(auth): Auth,
	JsonBody(model): JsonBody<NamespaceSyncModel>,
) -> ClResult<Json<Vec<ItemDiffs>>> {
	if model.is_invalid() {
		return Err(invalid_sync_model());
	}

	let diffs = app.item_adapter.compare(&model.sync_to_namespaces, &model.sync_items).await?;

	let mut res = Vec::with_capacity(diffs.len());
	for item_diff in diffs {
		let hidden = match &item_diff.namespace {
			Some(namespace) => {
				app.permission_validator.should_hide_config_to_current_user(&auth, namespace).await?
			}
			None => false,
		};
		res.push(if hidden { diff::redact(item_diff) } else { item_diff });
	}

	Ok(Json(res))
}

/// PUT /apps/{appId}/namespaces/{namespaceName}/items
pub async fn put_sync_items(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(path): Path<AppNamespacePath>,
	JsonBody(model): JsonBody<NamespaceSyncModel>,
) -> ClResult<StatusCode> {
	if model.is_invalid() || !model.sync_to_namespaces_valid(&path.app_id, &path.namespace_name) {
		return Err(invalid_sync_model());
	}

	perm::require_sync_permission(&app, &auth, &model.sync_to_namespaces).await?;

	app.item_adapter
		.sync_items(&model.sync_to_namespaces, &model.sync_items, &auth.user_id)
		.await?;
	info!(
		user = %auth.user_id,
		app_id = %path.app_id,
		namespace = %path.namespace_name,
		targets = model.sync_to_namespaces.len(),
		items = model.sync_items.len(),
		"Synced items"
	);

	Ok(StatusCode::OK)
}

/// POST /apps/{appId}/envs/{env}/clusters/{clusterName}/namespaces/{namespaceName}/syntax-check
pub async fn post_syntax_check(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(path): Path<NamespacePath>,
	JsonBody(model): JsonBody<NamespaceTextModel>,
) -> ClResult<StatusCode> {
	let namespace = path.namespace()?;
	perm::require_modify_permission(&app, &auth, &namespace).await?;

	syntax::check_syntax(&model)?;

	Ok(StatusCode::OK)
}

/// PUT /apps/{appId}/envs/{env}/clusters/{clusterName}/namespaces/{namespaceName}/revoke-items
pub async fn put_revoke_items(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(path): Path<NamespacePath>,
) -> ClResult<StatusCode> {
	let namespace = path.namespace()?;
	perm::require_modify_permission(&app, &auth, &namespace).await?;

	app.item_adapter.revoke_item(&namespace, &auth.user_id).await?;
	info!(user = %auth.user_id, namespace = %namespace, "Revoked items");

	Ok(StatusCode::OK)
}

// Helpers //
//*********//

async fn find_items(
	app: &App,
	auth: &AuthCtx,
	namespace: &NamespaceIdentifier,
	order_by: &str,
) -> ClResult<Vec<Item>> {
	if app.permission_validator.should_hide_config_to_current_user(auth, namespace).await? {
		debug!(user = %auth.user_id, namespace = %namespace, "Config hidden from user");
		return Ok(Vec::new());
	}

	let mut items = app.item_adapter.find_items(namespace).await?;
	sort_items(&mut items, order_by);
	Ok(items)
}

/// Newest first for `lastModifiedTime`, store order otherwise
pub fn sort_items(items: &mut [Item], order_by: &str) {
	if order_by == ORDER_BY_LAST_MODIFIED_TIME {
		items.sort_by(|a, b| b.data_change_last_modified_time.cmp(&a.data_change_last_modified_time));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn item(key: &str, modified: Option<i64>) -> Item {
		Item { data_change_last_modified_time: modified.map(Timestamp), ..Item::new(key, "v") }
	}

	fn keys(items: &[Item]) -> Vec<&str> {
		items.iter().map(Item::key).collect()
	}

	#[test]
	fn test_sort_by_last_modified_time() {
		let mut items = vec![item("a", Some(10)), item("b", Some(30)), item("c", Some(20))];
		sort_items(&mut items, ORDER_BY_LAST_MODIFIED_TIME);
		assert_eq!(keys(&items), ["b", "c", "a"]);
	}

	#[test]
	fn test_sort_is_stable_and_missing_times_last() {
		let mut items =
			vec![item("a", None), item("b", Some(5)), item("c", Some(5)), item("d", Some(7))];
		sort_items(&mut items, ORDER_BY_LAST_MODIFIED_TIME);
		assert_eq!(keys(&items), ["d", "b", "c", "a"]);
	}

	#[test]
	fn test_other_order_keeps_store_order() {
		let mut items = vec![item("a", Some(10)), item("b", Some(30))];
		sort_items(&mut items, ORDER_BY_LINE_NUM);
		assert_eq!(keys(&items), ["a", "b"]);
		sort_items(&mut items, "something-else");
		assert_eq!(keys(&items), ["a", "b"]);
	}

	#[test]
	fn test_namespace_path_env_validated() {
		let path = NamespacePath {
			app_id: "app".into(),
			env: "dev".into(),
			cluster_name: "default".into(),
			namespace_name: "application".into(),
		};
		assert_eq!(path.namespace().unwrap().env.as_str(), "DEV");

		let bad = NamespacePath { env: "d e v".into(), ..path };
		assert!(matches!(bad.namespace(), Err(Error::ValidationError(_))));
	}
}

// vim: ts=4
