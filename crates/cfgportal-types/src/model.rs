//! Request models for text based updates and cross-namespace sync

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::item::{ConfigFileFormat, Item, NamespaceIdentifier};
use crate::prelude::*;
use crate::utils;

/// Free-form configuration text of a namespace
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceTextModel {
	pub app_id: Option<Box<str>>,
	pub env: Option<Env>,
	pub cluster_name: Option<Box<str>>,
	pub namespace_name: Option<Box<str>>,
	#[serde(default)]
	pub namespace_id: u64,
	pub format: Option<ConfigFileFormat>,
	pub config_text: Option<String>,
	pub operator: Option<Box<str>>,
}

impl NamespaceTextModel {
	/// Overwrite the model's coordinates with the ones addressed by the request
	pub fn bind(&mut self, namespace: &NamespaceIdentifier) {
		self.app_id = Some(namespace.app_id.clone());
		self.env = Some(namespace.env.clone());
		self.cluster_name = Some(namespace.cluster_name.clone());
		self.namespace_name = Some(namespace.namespace_name.clone());
	}

	/// The bound coordinates, if all are present
	pub fn namespace(&self) -> Option<NamespaceIdentifier> {
		Some(NamespaceIdentifier::new(
			self.app_id.clone()?,
			self.env.clone()?,
			self.cluster_name.clone()?,
			self.namespace_name.clone()?,
		))
	}

	pub fn is_blank(&self) -> bool {
		utils::is_blank(self.config_text.as_deref())
	}
}

/// Source items plus the namespaces they should be compared with or synced to
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSyncModel {
	#[serde(default)]
	pub sync_to_namespaces: Vec<NamespaceIdentifier>,
	#[serde(default)]
	pub sync_items: Vec<Item>,
}

impl NamespaceSyncModel {
	pub fn is_invalid(&self) -> bool {
		self.sync_to_namespaces.is_empty()
			|| self.sync_items.is_empty()
			|| self.sync_to_namespaces.iter().any(NamespaceIdentifier::is_invalid)
	}

	/// Every target must belong to the given app and namespace
	pub fn sync_to_namespaces_valid(&self, app_id: &str, namespace_name: &str) -> bool {
		self.sync_to_namespaces
			.iter()
			.all(|ns| ns.app_id.as_ref() == app_id && ns.namespace_name.as_ref() == namespace_name)
	}
}


// vim: ts=4
