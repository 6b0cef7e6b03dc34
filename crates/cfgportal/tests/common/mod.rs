//! Common test utilities and helpers
//!
//! Builds the full router on top of the in-memory adapter and drives it with
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use cfgportal::identity::JwtIdentityProvider;
use cfgportal::item::NamespaceIdentifier;
use cfgportal::types::Env;
use cfgportal::{AppBuilder, SyncPermissionMode, routes};
use cfgportal_item_adapter_memory::MemoryItemAdapter;

pub const SECRET: &[u8] = b"integration-test-secret-0123456789";
pub const APP_ID: &str = "orders";
pub const NAMESPACE: &str = "application";

pub struct TestApp {
	pub router: Router,
	pub adapter: Arc<MemoryItemAdapter>,
	idp: JwtIdentityProvider,
}

pub struct TestResponse {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Value,
}

impl TestResponse {
	pub fn error_code(&self) -> &str {
		self.body["error"]["code"].as_str().unwrap_or_default()
	}

	pub fn error_message(&self) -> &str {
		self.body["error"]["message"].as_str().unwrap_or_default()
	}
}

pub fn env(name: &str) -> Env {
	Env::parse(name).unwrap()
}

pub fn ns(env_name: &str, cluster: &str) -> NamespaceIdentifier {
	NamespaceIdentifier::new(APP_ID, env(env_name), cluster, NAMESPACE)
}

/// Path prefix addressing a namespace of the test app
pub fn ns_path(env_name: &str, cluster: &str) -> String {
	format!("/apps/{}/envs/{}/clusters/{}/namespaces/{}", APP_ID, env_name, cluster, NAMESPACE)
}

/// App with `PRO` as member-only environment and the namespaces
/// DEV/default, DEV/east, PRO/default and PRO/east registered
pub fn setup(mode: SyncPermissionMode) -> TestApp {
	let adapter = Arc::new(MemoryItemAdapter::new());
	for (env_name, cluster) in [("DEV", "default"), ("DEV", "east"), ("PRO", "default"), ("PRO", "east")]
	{
		adapter.create_namespace(&ns(env_name, cluster)).unwrap();
	}

	let mut builder = AppBuilder::new();
	builder
		.item_adapter(adapter.clone())
		.namespace_adapter(adapter.clone())
		.jwt_secret(SECRET.to_vec())
		.member_only_envs([env("PRO")])
		.sync_permission_mode(mode);
	let app = builder.build().unwrap();

	TestApp {
		router: routes::init(app),
		adapter,
		idp: JwtIdentityProvider::new(SECRET).unwrap(),
	}
}

impl TestApp {
	pub fn token(&self, user: &str, roles: &[&str]) -> String {
		self.idp.issue_token(user, roles, 3600).unwrap()
	}

	pub async fn send(
		&self,
		method: Method,
		uri: &str,
		token: Option<&str>,
		body: Option<Value>,
	) -> TestResponse {
		let mut req = Request::builder().method(method).uri(uri);
		if let Some(token) = token {
			req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
		}
		let req = match body {
			Some(body) => req
				.header(header::CONTENT_TYPE, "application/json")
				.body(Body::from(serde_json::to_vec(&body).unwrap())),
			None => req.body(Body::empty()),
		}
		.unwrap();

		let res = self.router.clone().oneshot(req).await.unwrap();
		let status = res.status();
		let headers = res.headers().clone();
		let bytes = res.into_body().collect().await.unwrap().to_bytes();
		let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };

		TestResponse { status, headers, body }
	}
}

// vim: ts=4
