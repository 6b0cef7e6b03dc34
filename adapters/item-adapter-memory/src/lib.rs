//! In-memory item and namespace adapter
//!
//! Implements `ItemAdapter` and `NamespaceAdapter` on a single process-local
//! store. Suitable for development servers and tests.
//!
//! # Storage Layout
//!
//! - namespaces keyed by `(appId, env, clusterName, namespaceName)`, with
//!   sequential ids assigned by `create_namespace`
//! - items kept per namespace in line number order, with sequential ids
//!   unique across the store
//! - one released snapshot per namespace, taken by `release` and restored by
//!   `revoke_item`
//!
//! Every mutation validates its whole change set before touching the store
//! and runs under one write lock, so change sets apply atomically.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::RwLock;

use cfgportal::item::{Item, ItemChangeSets, ItemDiffs, Namespace, NamespaceIdentifier};
use cfgportal::item_adapter::ItemAdapter;
use cfgportal::model::NamespaceTextModel;
use cfgportal::namespace_adapter::NamespaceAdapter;
use cfgportal::prelude::*;

mod store;
pub mod text;

use store::{Store, diff_items, text_changes};

#[derive(Debug, Default)]
pub struct MemoryItemAdapter {
	store: RwLock<Store>,
}

impl MemoryItemAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a namespace. Existing namespaces are returned unchanged.
	pub fn create_namespace(&self, namespace: &NamespaceIdentifier) -> ClResult<Namespace> {
		if namespace.is_invalid() {
			return Err(Error::ValidationError(format!("Invalid namespace: {}", namespace)));
		}
		let info = self.store.write().create_namespace(namespace);
		debug!(
			namespace = %namespace,
			id = info.id,
			created = %info.data_change_created_time.unwrap_or_default().to_iso_string(),
			"Namespace registered"
		);
		Ok(info)
	}

	/// Snapshot the namespace's current items as its released state
	pub fn release(&self, namespace: &NamespaceIdentifier) -> ClResult<()> {
		let mut store = self.store.write();
		let entry = store.namespaces.get_mut(namespace).ok_or(Error::NotFound)?;
		entry.released = Some(entry.items.clone());
		info!(namespace = %namespace, items = entry.items.len(), "Namespace released");
		Ok(())
	}
}

#[async_trait]
impl ItemAdapter for MemoryItemAdapter {
	async fn update_config_item_by_text(&self, model: &NamespaceTextModel) -> ClResult<()> {
		let namespace = model.namespace().ok_or_else(|| {
			Error::ValidationError("Text model is not bound to a namespace".to_string())
		})?;
		let parsed = text::parse(model.format, model.config_text.as_deref().unwrap_or_default())?;

		let mut store = self.store.write();
		let changes = text_changes(&store.entry(&namespace)?.items, parsed, model.operator.clone());
		if changes.is_empty() {
			debug!(namespace = %namespace, "Text update without changes");
			return Ok(());
		}

		let (created, updated, deleted) =
			(changes.create_items.len(), changes.update_items.len(), changes.delete_items.len());
		store.apply(&namespace, changes)?;
		debug!(namespace = %namespace, created, updated, deleted, "Text update applied");
		Ok(())
	}

	async fn create_item(&self, namespace: &NamespaceIdentifier, item: Item) -> ClResult<Item> {
		let changes = ItemChangeSets {
			data_change_last_modified_by: item.data_change_last_modified_by.clone(),
			create_items: vec![item],
			..ItemChangeSets::default()
		};
		self.store.write().apply(namespace, changes)?.pop().ok_or(Error::DbError)
	}

	async fn update_item(&self, namespace: &NamespaceIdentifier, item: Item) -> ClResult<()> {
		let changes = ItemChangeSets {
			data_change_last_modified_by: item.data_change_last_modified_by.clone(),
			update_items: vec![item],
			..ItemChangeSets::default()
		};
		self.store.write().apply(namespace, changes)?;
		Ok(())
	}

	async fn delete_item(&self, env: &Env, item_id: u64, operator: &str) -> ClResult<()> {
		let mut store = self.store.write();
		let namespace = store.locate_item(env, item_id)?.clone();
		let changes = ItemChangeSets {
			data_change_last_modified_by: Some(operator.into()),
			delete_items: vec![Item { id: item_id, ..Item::default() }],
			..ItemChangeSets::default()
		};
		store.apply(&namespace, changes)?;
		Ok(())
	}

	async fn find_items(&self, namespace: &NamespaceIdentifier) -> ClResult<Vec<Item>> {
		let store = self.store.read();
		Ok(store.namespaces.get(namespace).map(|entry| entry.items.clone()).unwrap_or_default())
	}

	async fn load_item_by_id(&self, env: &Env, item_id: u64) -> ClResult<Item> {
		let store = self.store.read();
		let namespace = store.locate_item(env, item_id)?;
		store
			.entry(namespace)?
			.items
			.iter()
			.find(|i| i.id == item_id)
			.cloned()
			.ok_or(Error::NotFound)
	}

	async fn compare(
		&self,
		targets: &[NamespaceIdentifier],
		items: &[Item],
	) -> ClResult<Vec<ItemDiffs>> {
		let store = self.store.read();
		Ok(targets
			.iter()
			.map(|target| {
				let existing = store.namespaces.get(target).map_or(&[][..], |e| e.items.as_slice());
				diff_items(target, existing, items)
			})
			.collect())
	}

	async fn sync_items(
		&self,
		targets: &[NamespaceIdentifier],
		items: &[Item],
		operator: &str,
	) -> ClResult<()> {
		let mut store = self.store.write();

		// Each namespace once, first occurrence wins
		let mut seen = HashSet::new();
		let targets: Vec<&NamespaceIdentifier> = targets.iter().filter(|t| seen.insert(*t)).collect();

		let mut pending = Vec::with_capacity(targets.len());
		for target in targets {
			let diff = diff_items(target, &store.entry(target)?.items, items);
			let changes =
				ItemChangeSets { data_change_last_modified_by: Some(operator.into()), ..diff.diffs };
			store.check(target, &changes)?;
			pending.push((target, changes));
		}

		for (target, changes) in pending {
			if !changes.is_empty() {
				store.apply(target, changes)?;
			}
		}
		Ok(())
	}

	async fn revoke_item(&self, namespace: &NamespaceIdentifier, operator: &str) -> ClResult<()> {
		let restored = self.store.write().restore_released(namespace)?;
		info!(namespace = %namespace, operator = %operator, items = restored, "Items revoked");
		Ok(())
	}
}

#[async_trait]
impl NamespaceAdapter for MemoryItemAdapter {
	async fn load_namespace_base_info(
		&self,
		namespace: &NamespaceIdentifier,
	) -> ClResult<Option<Namespace>> {
		Ok(self.store.read().namespaces.get(namespace).map(|entry| entry.info.clone()))
	}
}

// vim: ts=4
