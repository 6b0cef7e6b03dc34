//! Store state and change set application

use std::collections::{HashMap, HashSet};

use cfgportal::item::{Item, ItemChangeSets, ItemDiffs, Namespace, NamespaceIdentifier};
use cfgportal::prelude::*;

#[derive(Debug)]
pub(crate) struct NamespaceEntry {
	pub info: Namespace,
	/// Ordered by `line_num`
	pub items: Vec<Item>,
	pub released: Option<Vec<Item>>,
}

impl NamespaceEntry {
	fn max_line_num(&self) -> u32 {
		self.items.iter().map(|i| i.line_num).max().unwrap_or(0)
	}
}

#[derive(Debug, Default)]
pub(crate) struct Store {
	last_namespace_id: u64,
	last_item_id: u64,
	last_timestamp: i64,
	pub namespaces: HashMap<NamespaceIdentifier, NamespaceEntry>,
	/// Item id to owning namespace
	pub item_index: HashMap<u64, NamespaceIdentifier>,
}

impl Store {
	/// Wall clock in milliseconds, strictly increasing per store
	fn tick(&mut self) -> Timestamp {
		self.last_timestamp = Timestamp::now().0.max(self.last_timestamp + 1);
		Timestamp(self.last_timestamp)
	}

	pub fn create_namespace(&mut self, namespace: &NamespaceIdentifier) -> Namespace {
		if let Some(entry) = self.namespaces.get(namespace) {
			return entry.info.clone();
		}

		self.last_namespace_id += 1;
		let info = Namespace {
			id: self.last_namespace_id,
			app_id: namespace.app_id.clone(),
			cluster_name: namespace.cluster_name.clone(),
			namespace_name: namespace.namespace_name.clone(),
			data_change_created_time: Some(self.tick()),
		};
		self.namespaces.insert(
			namespace.clone(),
			NamespaceEntry { info: info.clone(), items: Vec::new(), released: None },
		);
		info
	}

	pub fn entry(&self, namespace: &NamespaceIdentifier) -> ClResult<&NamespaceEntry> {
		self.namespaces.get(namespace).ok_or(Error::NotFound)
	}

	fn entry_mut(&mut self, namespace: &NamespaceIdentifier) -> ClResult<&mut NamespaceEntry> {
		self.namespaces.get_mut(namespace).ok_or(Error::NotFound)
	}

	/// Namespace owning the item, restricted to `env`
	pub fn locate_item(&self, env: &Env, item_id: u64) -> ClResult<&NamespaceIdentifier> {
		self.item_index.get(&item_id).filter(|ns| &ns.env == env).ok_or(Error::NotFound)
	}

	/// Reject change sets that would leave the namespace inconsistent.
	/// Nothing is modified.
	pub fn check(&self, namespace: &NamespaceIdentifier, changes: &ItemChangeSets) -> ClResult<()> {
		let entry = self.entry(namespace)?;
		let owned = |id: u64| entry.items.iter().any(|i| i.id == id);

		for item in changes.update_items.iter().chain(&changes.delete_items) {
			if !owned(item.id) {
				return Err(Error::NotFound);
			}
		}

		let deleted: HashSet<u64> = changes.delete_items.iter().map(|i| i.id).collect();
		let mut keys: HashSet<&str> = entry
			.items
			.iter()
			.filter(|i| !deleted.contains(&i.id))
			.map(Item::key)
			.collect();
		for item in &changes.create_items {
			if !item.has_valid_key() {
				return Err(Error::ValidationError("Item key cannot be empty".to_string()));
			}
			if !keys.insert(item.key()) {
				return Err(Error::Conflict(format!("Item already exists: {}", item.key())));
			}
		}
		Ok(())
	}

	/// Validate and apply a change set. Returns the created items.
	pub fn apply(
		&mut self,
		namespace: &NamespaceIdentifier,
		changes: ItemChangeSets,
	) -> ClResult<Vec<Item>> {
		self.check(namespace, &changes)?;

		let now = self.tick();
		let operator = changes.data_change_last_modified_by;
		let mut created = Vec::with_capacity(changes.create_items.len());
		let mut new_ids = Vec::with_capacity(changes.create_items.len());

		let mut next_id = self.last_item_id;
		let entry = self.entry_mut(namespace)?;

		let deleted: HashSet<u64> = changes.delete_items.iter().map(|i| i.id).collect();
		entry.items.retain(|i| !deleted.contains(&i.id));

		for update in changes.update_items {
			if let Some(item) = entry.items.iter_mut().find(|i| i.id == update.id) {
				item.value = update.value;
				item.comment = update.comment;
				if update.line_num > 0 {
					item.line_num = update.line_num;
				}
				item.data_change_last_modified_by.clone_from(&operator);
				item.data_change_last_modified_time = Some(now);
			}
		}

		for mut item in changes.create_items {
			next_id += 1;
			item.id = next_id;
			item.namespace_id = entry.info.id;
			if item.line_num == 0 {
				item.line_num = entry.max_line_num() + 1;
			}
			if item.data_change_created_by.is_none() {
				item.data_change_created_by.clone_from(&operator);
			}
			if item.data_change_last_modified_by.is_none() {
				item.data_change_last_modified_by.clone_from(&operator);
			}
			item.data_change_created_time = Some(now);
			item.data_change_last_modified_time = Some(now);
			entry.items.push(item.clone());
			new_ids.push(item.id);
			created.push(item);
		}
		entry.items.sort_by_key(|i| i.line_num);

		self.last_item_id = next_id;
		for id in deleted {
			self.item_index.remove(&id);
		}
		for id in new_ids {
			self.item_index.insert(id, namespace.clone());
		}

		Ok(created)
	}

	/// Replace the namespace's items with its last released snapshot
	pub fn restore_released(&mut self, namespace: &NamespaceIdentifier) -> ClResult<usize> {
		let entry = self.entry_mut(namespace)?;
		let current: Vec<u64> = entry.items.iter().map(|i| i.id).collect();
		entry.items = entry.released.clone().unwrap_or_default();
		let restored: Vec<u64> = entry.items.iter().map(|i| i.id).collect();

		for id in current {
			self.item_index.remove(&id);
		}
		for id in &restored {
			self.item_index.insert(*id, namespace.clone());
		}
		Ok(restored.len())
	}
}

/// Changes turning `existing` into `source`: creations for missing keys,
/// updates for differing value or comment. Nothing is deleted.
pub(crate) fn diff_items(
	target: &NamespaceIdentifier,
	existing: &[Item],
	source: &[Item],
) -> ItemDiffs {
	let mut diff = ItemDiffs::new(target.clone());
	let mut seen = HashSet::new();

	for item in source.iter().filter(|i| i.has_valid_key()) {
		if !seen.insert(item.key()) {
			continue;
		}
		match existing.iter().find(|e| e.key() == item.key()) {
			None => diff.diffs.create_items.push(Item {
				key: item.key.clone(),
				value: item.value.clone(),
				comment: item.comment.clone(),
				..Item::default()
			}),
			Some(current) if current.value != item.value || current.comment != item.comment => {
				diff.diffs.update_items.push(Item {
					value: item.value.clone(),
					comment: item.comment.clone(),
					..current.clone()
				});
			}
			Some(_) => {}
		}
	}

	diff
}

/// Full change set from the namespace's items to the parsed text, including
/// deletions and line renumbering
pub(crate) fn text_changes(
	existing: &[Item],
	parsed: Vec<Item>,
	operator: Option<Box<str>>,
) -> ItemChangeSets {
	let mut changes =
		ItemChangeSets { data_change_last_modified_by: operator, ..ItemChangeSets::default() };

	changes.delete_items = {
		let parsed_keys: HashSet<&str> = parsed.iter().map(Item::key).collect();
		existing.iter().filter(|i| !parsed_keys.contains(i.key())).cloned().collect()
	};

	for item in parsed {
		match existing.iter().find(|e| e.key() == item.key()) {
			None => changes.create_items.push(item),
			Some(current)
				if current.value != item.value
					|| current.comment != item.comment
					|| current.line_num != item.line_num =>
			{
				changes.update_items.push(Item {
					value: item.value,
					comment: item.comment,
					line_num: item.line_num,
					..current.clone()
				});
			}
			Some(_) => {}
		}
	}

	changes
}

// vim: ts=4
