//! App builder - constructs and runs the cfgportal application

use std::sync::Arc;

use crate::auth_adapter::IdentityProvider;
use crate::item_adapter::ItemAdapter;
use crate::namespace_adapter::NamespaceAdapter;
use crate::permission::PermissionValidator;
use crate::prelude::*;
use crate::{routes, webserver};
pub use cfgportal_core::app::{
	Adapters, App, AppBuilderOpts, AppState, SyncPermissionMode, VERSION,
};
use cfgportal_core::{JwtIdentityProvider, RolePermissionValidator};

/// Install the global fmt subscriber. Later calls are no-ops.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.try_init();
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
	jwt_secret: Option<Box<[u8]>>,
	member_only_envs: Vec<Env>,
}

impl AppBuilder {
	pub fn new() -> Self {
		init_tracing();
		AppBuilder {
			opts: AppBuilderOpts::default(),
			adapters: Adapters {
				item_adapter: None,
				namespace_adapter: None,
				identity_provider: None,
				permission_validator: None,
			},
			jwt_secret: None,
			member_only_envs: Vec::new(),
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn sync_permission_mode(&mut self, mode: SyncPermissionMode) -> &mut Self {
		self.opts.sync_permission_mode = mode;
		self
	}
	pub fn cors(&mut self, enabled: bool) -> &mut Self {
		self.opts.cors = enabled;
		self
	}
	/// Secret of the built-in JWT identity provider
	pub fn jwt_secret(&mut self, secret: impl Into<Box<[u8]>>) -> &mut Self {
		self.jwt_secret = Some(secret.into());
		self
	}
	/// Environments whose configuration is visible to project members only
	pub fn member_only_envs(&mut self, envs: impl IntoIterator<Item = Env>) -> &mut Self {
		self.member_only_envs = envs.into_iter().collect();
		self
	}

	// Adapters
	pub fn item_adapter(&mut self, item_adapter: Arc<dyn ItemAdapter>) -> &mut Self {
		self.adapters.item_adapter = Some(item_adapter);
		self
	}
	pub fn namespace_adapter(&mut self, namespace_adapter: Arc<dyn NamespaceAdapter>) -> &mut Self {
		self.adapters.namespace_adapter = Some(namespace_adapter);
		self
	}
	pub fn identity_provider(&mut self, identity_provider: Arc<dyn IdentityProvider>) -> &mut Self {
		self.adapters.identity_provider = Some(identity_provider);
		self
	}
	pub fn permission_validator(
		&mut self,
		permission_validator: Arc<dyn PermissionValidator>,
	) -> &mut Self {
		self.adapters.permission_validator = Some(permission_validator);
		self
	}

	/// Assemble the shared state. Falls back to the JWT identity provider and
	/// the role based permission validator when none is given.
	pub fn build(self) -> ClResult<App> {
		let Some(item_adapter) = self.adapters.item_adapter else {
			error!("FATAL: No item adapter configured");
			return Err(Error::Internal("No item adapter configured".to_string()));
		};
		let Some(namespace_adapter) = self.adapters.namespace_adapter else {
			error!("FATAL: No namespace adapter configured");
			return Err(Error::Internal("No namespace adapter configured".to_string()));
		};

		let identity_provider: Arc<dyn IdentityProvider> =
			match (self.adapters.identity_provider, self.jwt_secret) {
				(Some(provider), _) => provider,
				(None, Some(secret)) => Arc::new(JwtIdentityProvider::new(&secret)?),
				(None, None) => {
					error!("FATAL: No identity provider or JWT secret configured");
					return Err(Error::Internal("No identity provider configured".to_string()));
				}
			};

		let permission_validator = self.adapters.permission_validator.unwrap_or_else(|| {
			Arc::new(RolePermissionValidator::with_member_only_envs(self.member_only_envs))
		});

		Ok(Arc::new(AppState {
			opts: self.opts,
			item_adapter,
			namespace_adapter,
			identity_provider,
			permission_validator,
		}))
	}

	pub async fn run(self) -> ClResult<()> {
		info!("cfgportal V{}", VERSION);

		let app = self.build()?;
		info!(
			listen = %app.opts.listen,
			sync_permission_mode = ?app.opts.sync_permission_mode,
			cors = app.opts.cors,
			"Starting"
		);

		let router = routes::init(app.clone());
		webserver::serve(&app.opts.listen, router).await?;

		info!("Shutdown complete");
		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_build_requires_item_adapter() {
		let mut builder = AppBuilder::new();
		builder.jwt_secret(b"0123456789abcdef0123".to_vec());
		assert!(matches!(builder.build(), Err(Error::Internal(_))));
	}
}

// vim: ts=4
