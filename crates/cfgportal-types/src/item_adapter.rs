//! Adapter that stores configuration items.
//!
//! The gateway never touches storage directly. Every item operation goes
//! through this trait, which keeps release/versioning consistency and atomic
//! change set application inside the implementation.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::item::{Item, ItemDiffs, NamespaceIdentifier};
use crate::model::NamespaceTextModel;
use crate::prelude::*;

#[async_trait]
pub trait ItemAdapter: Debug + Send + Sync {
	/// Parse `model.config_text` according to `model.format` and apply the
	/// resulting change set to the namespace the model is bound to.
	async fn update_config_item_by_text(&self, model: &NamespaceTextModel) -> ClResult<()>;

	/// Persist a new item. The store assigns `id`, `lineNum` and timestamps.
	async fn create_item(&self, namespace: &NamespaceIdentifier, item: Item) -> ClResult<Item>;

	async fn update_item(&self, namespace: &NamespaceIdentifier, item: Item) -> ClResult<()>;

	async fn delete_item(&self, env: &Env, item_id: u64, operator: &str) -> ClResult<()>;

	/// All items of a namespace in their natural (line number) order
	async fn find_items(&self, namespace: &NamespaceIdentifier) -> ClResult<Vec<Item>>;

	/// Returns `Error::NotFound` if there is no such item
	async fn load_item_by_id(&self, env: &Env, item_id: u64) -> ClResult<Item>;

	/// Compare `items` with each target namespace, one entry per target
	async fn compare(
		&self,
		targets: &[NamespaceIdentifier],
		items: &[Item],
	) -> ClResult<Vec<ItemDiffs>>;

	/// Apply `items` to every target namespace
	async fn sync_items(
		&self,
		targets: &[NamespaceIdentifier],
		items: &[Item],
		operator: &str,
	) -> ClResult<()>;

	/// Restore the namespace's items to their last released state
	async fn revoke_item(&self, namespace: &NamespaceIdentifier, operator: &str) -> ClResult<()>;
}

// vim: ts=4
