//! Configuration items, namespaces and change sets

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::prelude::*;
use crate::utils;

/// A single key/value configuration entry within a namespace
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
	#[serde(default)]
	pub id: u64,
	#[serde(default)]
	pub namespace_id: u64,
	pub key: Option<Box<str>>,
	pub value: Option<Box<str>>,
	pub comment: Option<Box<str>>,
	#[serde(default)]
	pub line_num: u32,
	pub data_change_created_by: Option<Box<str>>,
	pub data_change_last_modified_by: Option<Box<str>>,
	pub data_change_created_time: Option<Timestamp>,
	pub data_change_last_modified_time: Option<Timestamp>,
}

impl Item {
	pub fn new(key: impl Into<Box<str>>, value: impl Into<Box<str>>) -> Item {
		Item { key: Some(key.into()), value: Some(value.into()), ..Default::default() }
	}

	pub fn key(&self) -> &str {
		self.key.as_deref().unwrap_or_default()
	}

	pub fn value(&self) -> &str {
		self.value.as_deref().unwrap_or_default()
	}

	/// Keys must be present and not blank
	pub fn has_valid_key(&self) -> bool {
		!utils::is_blank(self.key.as_deref())
	}
}

/// Namespace base info as stored by the namespace service
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
	pub id: u64,
	pub app_id: Box<str>,
	pub cluster_name: Box<str>,
	pub namespace_name: Box<str>,
	pub data_change_created_time: Option<Timestamp>,
}

/// Address of a namespace: (appId, env, clusterName, namespaceName)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceIdentifier {
	#[serde(default)]
	pub app_id: Box<str>,
	pub env: Env,
	#[serde(default)]
	pub cluster_name: Box<str>,
	#[serde(default)]
	pub namespace_name: Box<str>,
}

impl NamespaceIdentifier {
	pub fn new(
		app_id: impl Into<Box<str>>,
		env: Env,
		cluster_name: impl Into<Box<str>>,
		namespace_name: impl Into<Box<str>>,
	) -> NamespaceIdentifier {
		NamespaceIdentifier {
			app_id: app_id.into(),
			env,
			cluster_name: cluster_name.into(),
			namespace_name: namespace_name.into(),
		}
	}

	pub fn is_invalid(&self) -> bool {
		utils::is_contain_empty([
			Some(self.app_id.as_ref()),
			Some(self.env.as_str()),
			Some(self.cluster_name.as_ref()),
			Some(self.namespace_name.as_ref()),
		])
	}
}

impl std::fmt::Display for NamespaceIdentifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}+{}+{}+{}", self.app_id, self.env, self.cluster_name, self.namespace_name)
	}
}

/// A batch of item changes applied atomically by the item service
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemChangeSets {
	pub data_change_last_modified_by: Option<Box<str>>,
	#[serde(default)]
	pub create_items: Vec<Item>,
	#[serde(default)]
	pub update_items: Vec<Item>,
	#[serde(default)]
	pub delete_items: Vec<Item>,
}

impl ItemChangeSets {
	pub fn is_empty(&self) -> bool {
		self.create_items.is_empty() && self.update_items.is_empty() && self.delete_items.is_empty()
	}
}

/// Diff of a source item set against one target namespace
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDiffs {
	pub namespace: Option<NamespaceIdentifier>,
	#[serde(default)]
	pub diffs: ItemChangeSets,
	pub ext_info: Option<String>,
}

impl ItemDiffs {
	pub fn new(namespace: NamespaceIdentifier) -> ItemDiffs {
		ItemDiffs { namespace: Some(namespace), ..Default::default() }
	}
}

/// Format of a namespace's configuration text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFileFormat {
	Properties,
	Xml,
	Json,
	Yml,
	Yaml,
	Txt,
	#[serde(other)]
	Unknown,
}

impl ConfigFileFormat {
	pub fn is_yaml(self) -> bool {
		matches!(self, ConfigFileFormat::Yaml | ConfigFileFormat::Yml)
	}
}


// vim: ts=4
