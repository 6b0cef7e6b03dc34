//! Redaction of diff entries the caller may not see

use cfgportal_types::item::{ItemChangeSets, ItemDiffs};

const HIDDEN_NAMESPACE_MSG: &str =
	"You are not this project's administrator, nor you have edit or release permission for the namespace: ";

/// Replace the entry's change set with an empty one and explain why
pub fn redact(diff: ItemDiffs) -> ItemDiffs {
	let ext_info = match &diff.namespace {
		Some(namespace) => format!("{}{}", HIDDEN_NAMESPACE_MSG, namespace),
		None => return diff,
	};

	ItemDiffs { namespace: diff.namespace, diffs: ItemChangeSets::default(), ext_info: Some(ext_info) }
}

#[cfg(test)]
mod tests {
	use super::*;
	use cfgportal_types::item::{Item, NamespaceIdentifier};
	use cfgportal_types::types::Env;

	fn diff_with_changes() -> ItemDiffs {
		let namespace = NamespaceIdentifier::new("app", Env::parse("PRO").unwrap(), "default", "application");
		let mut diff = ItemDiffs::new(namespace);
		diff.diffs.create_items.push(Item::new("secret.key", "hunter2"));
		diff.diffs.update_items.push(Item::new("db.url", "jdbc:prod"));
		diff
	}

	#[test]
	fn test_redact_clears_changes() {
		let redacted = redact(diff_with_changes());

		assert!(redacted.diffs.is_empty());
		assert!(redacted.namespace.is_some());
		let ext_info = redacted.ext_info.unwrap();
		assert!(ext_info.starts_with("You are not this project's administrator"));
		assert!(ext_info.ends_with("app+PRO+default+application"));
	}

	#[test]
	fn test_redact_without_namespace_is_noop() {
		let mut diff = diff_with_changes();
		diff.namespace = None;

		assert_eq!(redact(diff.clone()), diff);
	}
}

// vim: ts=4
