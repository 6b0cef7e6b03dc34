//! Memory adapter operation tests
//!
//! Covers item CRUD, text updates, compare/sync and release/revoke

use cfgportal::error::Error;
use cfgportal::item::{ConfigFileFormat, Item, NamespaceIdentifier};
use cfgportal::item_adapter::ItemAdapter;
use cfgportal::model::NamespaceTextModel;
use cfgportal::namespace_adapter::NamespaceAdapter;
use cfgportal::types::Env;
use cfgportal_item_adapter_memory::MemoryItemAdapter;

fn ns(env: &str, cluster: &str) -> NamespaceIdentifier {
	NamespaceIdentifier::new("orders", Env::parse(env).unwrap(), cluster, "application")
}

fn create_test_adapter() -> (MemoryItemAdapter, NamespaceIdentifier) {
	let adapter = MemoryItemAdapter::new();
	let namespace = ns("DEV", "default");
	adapter.create_namespace(&namespace).expect("Failed to create namespace");
	(adapter, namespace)
}

fn by(item: Item, user: &str) -> Item {
	Item {
		data_change_created_by: Some(user.into()),
		data_change_last_modified_by: Some(user.into()),
		..item
	}
}

fn text_model(
	namespace: &NamespaceIdentifier,
	format: ConfigFileFormat,
	text: &str,
) -> NamespaceTextModel {
	let mut model = NamespaceTextModel {
		format: Some(format),
		config_text: Some(text.to_string()),
		operator: Some("alice".into()),
		..Default::default()
	};
	model.bind(namespace);
	model
}

#[tokio::test]
async fn test_create_assigns_identity_and_times() {
	let (adapter, namespace) = create_test_adapter();

	let first = adapter.create_item(&namespace, by(Item::new("db.url", "x"), "alice")).await.unwrap();
	let second = adapter.create_item(&namespace, by(Item::new("db.user", "y"), "alice")).await.unwrap();

	assert_ne!(first.id, 0);
	assert_ne!(first.id, second.id);
	assert_eq!(first.line_num, 1);
	assert_eq!(second.line_num, 2);
	assert_eq!(first.data_change_created_by.as_deref(), Some("alice"));
	assert!(first.data_change_created_time.is_some());
	assert!(second.data_change_last_modified_time > first.data_change_last_modified_time);

	let info = adapter.load_namespace_base_info(&namespace).await.unwrap().unwrap();
	assert_eq!(first.namespace_id, info.id);
}

#[tokio::test]
async fn test_create_duplicate_key_conflicts() {
	let (adapter, namespace) = create_test_adapter();
	adapter.create_item(&namespace, Item::new("k", "1")).await.unwrap();

	let res = adapter.create_item(&namespace, Item::new("k", "2")).await;
	assert!(matches!(res, Err(Error::Conflict(_))));
	assert_eq!(adapter.find_items(&namespace).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_in_unknown_namespace() {
	let adapter = MemoryItemAdapter::new();
	let res = adapter.create_item(&ns("DEV", "default"), Item::new("k", "v")).await;
	assert!(matches!(res, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_update_keeps_creator() {
	let (adapter, namespace) = create_test_adapter();
	let created = adapter.create_item(&namespace, by(Item::new("k", "1"), "alice")).await.unwrap();

	let update = Item {
		id: created.id,
		value: Some("2".into()),
		data_change_last_modified_by: Some("bob".into()),
		..Item::new("k", "ignored")
	};
	adapter.update_item(&namespace, update).await.unwrap();

	let loaded = adapter.load_item_by_id(&namespace.env, created.id).await.unwrap();
	assert_eq!(loaded.value(), "2");
	assert_eq!(loaded.data_change_created_by.as_deref(), Some("alice"));
	assert_eq!(loaded.data_change_last_modified_by.as_deref(), Some("bob"));
	assert_eq!(loaded.data_change_created_time, created.data_change_created_time);
	assert_eq!(loaded.line_num, created.line_num);
}

#[tokio::test]
async fn test_update_unknown_item() {
	let (adapter, namespace) = create_test_adapter();
	let res = adapter.update_item(&namespace, Item { id: 42, ..Item::new("k", "v") }).await;
	assert!(matches!(res, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_delete_and_load_scoped_by_env() {
	let (adapter, namespace) = create_test_adapter();
	let created = adapter.create_item(&namespace, Item::new("k", "v")).await.unwrap();
	let pro = Env::parse("PRO").unwrap();

	assert!(matches!(adapter.load_item_by_id(&pro, created.id).await, Err(Error::NotFound)));
	assert!(matches!(adapter.delete_item(&pro, created.id, "alice").await, Err(Error::NotFound)));

	adapter.delete_item(&namespace.env, created.id, "alice").await.unwrap();
	assert!(adapter.find_items(&namespace).await.unwrap().is_empty());
	assert!(matches!(
		adapter.load_item_by_id(&namespace.env, created.id).await,
		Err(Error::NotFound)
	));
}

#[tokio::test]
async fn test_namespace_base_info() {
	let adapter = MemoryItemAdapter::new();
	let a = adapter.create_namespace(&ns("DEV", "default")).unwrap();
	let b = adapter.create_namespace(&ns("DEV", "east")).unwrap();
	let again = adapter.create_namespace(&ns("DEV", "default")).unwrap();

	assert_ne!(a.id, b.id);
	assert_eq!(a, again);
	assert!(adapter.load_namespace_base_info(&ns("PRO", "default")).await.unwrap().is_none());
	assert!(adapter.create_namespace(&ns("DEV", "")).is_err());
}

#[tokio::test]
async fn test_text_update_properties() {
	let (adapter, namespace) = create_test_adapter();
	let kept = adapter.create_item(&namespace, Item::new("a", "1")).await.unwrap();
	adapter.create_item(&namespace, Item::new("gone", "x")).await.unwrap();

	let model = text_model(&namespace, ConfigFileFormat::Properties, "# first\nb=2\na=1\n");
	adapter.update_config_item_by_text(&model).await.unwrap();

	let items = adapter.find_items(&namespace).await.unwrap();
	let keys: Vec<&str> = items.iter().map(Item::key).collect();
	assert_eq!(keys, ["b", "a"]);
	assert_eq!(items[0].comment.as_deref(), Some("# first"));
	assert_eq!(items[0].data_change_created_by.as_deref(), Some("alice"));
	assert_eq!(items[1].id, kept.id);
	assert_eq!(items[1].line_num, 2);
}

#[tokio::test]
async fn test_text_update_other_format() {
	let (adapter, namespace) = create_test_adapter();
	let text = "{\"a\": 1}";

	let model = text_model(&namespace, ConfigFileFormat::Json, text);
	adapter.update_config_item_by_text(&model).await.unwrap();

	let items = adapter.find_items(&namespace).await.unwrap();
	assert_eq!(items.len(), 1);
	assert_eq!(items[0].key(), "content");
	assert_eq!(items[0].value(), text);
}

#[tokio::test]
async fn test_text_update_unbound_model() {
	let (adapter, _namespace) = create_test_adapter();
	let res = adapter.update_config_item_by_text(&NamespaceTextModel::default()).await;
	assert!(matches!(res, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_compare_and_sync() {
	let (adapter, source) = create_test_adapter();
	let target = ns("DEV", "east");
	adapter.create_namespace(&target).unwrap();
	adapter.create_item(&target, Item::new("a", "old")).await.unwrap();
	adapter.create_item(&target, Item::new("only.target", "t")).await.unwrap();
	let unknown = ns("DEV", "west");

	let items = [Item::new("a", "new"), Item::new("b", "2")];
	let diffs = adapter.compare(&[target.clone(), unknown.clone()], &items).await.unwrap();

	assert_eq!(diffs.len(), 2);
	assert_eq!(diffs[0].namespace.as_ref(), Some(&target));
	assert_eq!(diffs[0].diffs.create_items.len(), 1);
	assert_eq!(diffs[0].diffs.update_items.len(), 1);
	assert!(diffs[0].diffs.delete_items.is_empty());
	assert_eq!(diffs[1].diffs.create_items.len(), 2);

	adapter.sync_items(&[target.clone()], &items, "alice").await.unwrap();
	let synced = adapter.find_items(&target).await.unwrap();
	let pairs: Vec<(&str, &str)> = synced.iter().map(|i| (i.key(), i.value())).collect();
	assert_eq!(pairs, [("a", "new"), ("only.target", "t"), ("b", "2")]);
	assert_eq!(synced[0].data_change_last_modified_by.as_deref(), Some("alice"));
	assert_eq!(synced[2].data_change_created_by.as_deref(), Some("alice"));

	// Source namespace untouched
	assert!(adapter.find_items(&source).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sync_unknown_target_applies_nothing() {
	let (adapter, namespace) = create_test_adapter();
	let res = adapter
		.sync_items(&[namespace.clone(), ns("DEV", "west")], &[Item::new("a", "1")], "alice")
		.await;

	assert!(matches!(res, Err(Error::NotFound)));
	assert!(adapter.find_items(&namespace).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sync_repeated_target_applied_once() {
	let (adapter, namespace) = create_test_adapter();
	let items = [Item::new("k", "v")];

	adapter.sync_items(&[namespace.clone(), namespace.clone()], &items, "alice").await.unwrap();

	let synced = adapter.find_items(&namespace).await.unwrap();
	assert_eq!(synced.len(), 1);
	assert_eq!(synced[0].key(), "k");
}

#[tokio::test]
async fn test_sync_unknown_last_target_applies_nothing() {
	let (adapter, namespace) = create_test_adapter();
	let target = ns("DEV", "east");
	adapter.create_namespace(&target).unwrap();

	let res = adapter
		.sync_items(
			&[namespace.clone(), target.clone(), ns("PRO", "default")],
			&[Item::new("k", "v")],
			"alice",
		)
		.await;

	assert!(matches!(res, Err(Error::NotFound)));
	assert!(adapter.find_items(&namespace).await.unwrap().is_empty());
	assert!(adapter.find_items(&target).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_release_and_revoke() {
	let (adapter, namespace) = create_test_adapter();
	let released = adapter.create_item(&namespace, Item::new("a", "1")).await.unwrap();
	adapter.release(&namespace).unwrap();

	adapter.create_item(&namespace, Item::new("b", "2")).await.unwrap();
	adapter
		.update_item(&namespace, Item { id: released.id, ..Item::new("a", "changed") })
		.await
		.unwrap();

	adapter.revoke_item(&namespace, "alice").await.unwrap();

	let items = adapter.find_items(&namespace).await.unwrap();
	assert_eq!(items, vec![released.clone()]);
	assert!(adapter.load_item_by_id(&namespace.env, released.id).await.is_ok());
}

#[tokio::test]
async fn test_revoke_without_release_clears() {
	let (adapter, namespace) = create_test_adapter();
	let created = adapter.create_item(&namespace, Item::new("a", "1")).await.unwrap();

	adapter.revoke_item(&namespace, "alice").await.unwrap();

	assert!(adapter.find_items(&namespace).await.unwrap().is_empty());
	assert!(adapter.load_item_by_id(&namespace.env, created.id).await.is_err());
}

// vim: ts=4
