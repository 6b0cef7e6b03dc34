use std::env;
use std::sync::Arc;

use cfgportal::error::{ClResult, Error};
use cfgportal::item::NamespaceIdentifier;
use cfgportal::types::Env;
use cfgportal::{AppBuilder, SyncPermissionMode};
use cfgportal_item_adapter_memory::MemoryItemAdapter;

pub struct Config {
	pub listen: Option<String>,
	pub jwt_secret: String,
	pub member_only_envs: Vec<Env>,
	pub sync_permission_mode: SyncPermissionMode,
	pub cors: bool,
	/// Namespaces registered at startup, as `appId+ENV+cluster+namespace`
	pub namespaces: Vec<NamespaceIdentifier>,
}

/// Comma separated list variable
fn list(var: &str) -> Vec<String> {
	env::var(var)
		.unwrap_or_default()
		.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(ToString::to_string)
		.collect()
}

fn parse_namespace(value: &str) -> ClResult<NamespaceIdentifier> {
	let parts: Vec<&str> = value.split('+').collect();
	let [app_id, env_name, cluster, namespace] = parts.as_slice() else {
		return Err(Error::ValidationError(format!("Invalid namespace: {}", value)));
	};
	let namespace = NamespaceIdentifier::new(*app_id, Env::parse(env_name)?, *cluster, *namespace);
	if namespace.is_invalid() {
		return Err(Error::ValidationError(format!("Invalid namespace: {}", value)));
	}
	Ok(namespace)
}

impl Config {
	pub fn from_env() -> ClResult<Self> {
		let jwt_secret = env::var("JWT_SECRET")
			.map_err(|_| Error::ValidationError("JWT_SECRET must be set".to_string()))?;

		Ok(Config {
			listen: env::var("LISTEN").ok(),
			jwt_secret,
			member_only_envs: list("CONFIG_VIEW_MEMBER_ONLY_ENVS")
				.iter()
				.map(|e| Env::parse(e))
				.collect::<ClResult<_>>()?,
			sync_permission_mode: match env::var("SYNC_PERMISSION_MODE") {
				Ok(mode) => mode.parse()?,
				Err(_) => SyncPermissionMode::default(),
			},
			cors: env::var("CORS").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true")),
			namespaces: list("NAMESPACES")
				.iter()
				.map(|ns| parse_namespace(ns))
				.collect::<ClResult<_>>()?,
		})
	}
}

#[tokio::main]
async fn main() {
	if let Err(e) = run().await {
		tracing::error!("FATAL: {}", e);
		std::process::exit(1);
	}
}

async fn run() -> ClResult<()> {
	let mut builder = AppBuilder::new();
	let config = Config::from_env()?;

	let item_adapter = Arc::new(MemoryItemAdapter::new());
	for namespace in &config.namespaces {
		item_adapter.create_namespace(namespace)?;
	}

	if let Some(listen) = config.listen {
		builder.listen(listen);
	}
	builder
		.jwt_secret(config.jwt_secret.into_bytes())
		.member_only_envs(config.member_only_envs)
		.sync_permission_mode(config.sync_permission_mode)
		.cors(config.cors)
		.item_adapter(item_adapter.clone())
		.namespace_adapter(item_adapter);

	builder.run().await
}


// vim: ts=4
