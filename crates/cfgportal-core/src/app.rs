//! App state type

use std::sync::Arc;

use cfgportal_types::auth_adapter::IdentityProvider;
use cfgportal_types::item_adapter::ItemAdapter;
use cfgportal_types::namespace_adapter::NamespaceAdapter;
use cfgportal_types::permission::PermissionValidator;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How sync reports targets the caller cannot modify
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncPermissionMode {
	/// Stop at the first unauthorized target and name it
	#[default]
	FailFast,
	/// Check every target and name all unauthorized ones
	CollectAll,
}

impl std::str::FromStr for SyncPermissionMode {
	type Err = cfgportal_types::error::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"fail-fast" => Ok(SyncPermissionMode::FailFast),
			"collect-all" => Ok(SyncPermissionMode::CollectAll),
			_ => Err(cfgportal_types::error::Error::ValidationError(format!(
				"Unknown sync permission mode: {}",
				s
			))),
		}
	}
}

pub struct AppState {
	pub opts: AppBuilderOpts,

	pub item_adapter: Arc<dyn ItemAdapter>,
	pub namespace_adapter: Arc<dyn NamespaceAdapter>,
	pub identity_provider: Arc<dyn IdentityProvider>,
	pub permission_validator: Arc<dyn PermissionValidator>,
}

pub type App = Arc<AppState>;

pub struct Adapters {
	pub item_adapter: Option<Arc<dyn ItemAdapter>>,
	pub namespace_adapter: Option<Arc<dyn NamespaceAdapter>>,
	pub identity_provider: Option<Arc<dyn IdentityProvider>>,
	pub permission_validator: Option<Arc<dyn PermissionValidator>>,
}

#[derive(Debug)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	pub sync_permission_mode: SyncPermissionMode,
	/// Allow cross-origin requests from any origin
	pub cors: bool,
}

impl Default for AppBuilderOpts {
	fn default() -> Self {
		AppBuilderOpts {
			listen: "127.0.0.1:8070".into(),
			sync_permission_mode: SyncPermissionMode::FailFast,
			cors: false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sync_permission_mode_parse() {
		assert_eq!("fail-fast".parse::<SyncPermissionMode>().ok(), Some(SyncPermissionMode::FailFast));
		assert_eq!(
			"collect-all".parse::<SyncPermissionMode>().ok(),
			Some(SyncPermissionMode::CollectAll)
		);
		assert!("all".parse::<SyncPermissionMode>().is_err());
		assert_eq!(SyncPermissionMode::default(), SyncPermissionMode::FailFast);
	}
}

// vim: ts=4
