//! Router setup

use axum::{
	Json, Router,
	middleware,
	routing::{delete, get, post, put},
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::app::VERSION;
use crate::prelude::*;
use cfgportal_core::middleware::{request_id, require_auth};
use cfgportal_item::handler;

const NAMESPACE: &str =
	"/apps/{appId}/envs/{env}/clusters/{clusterName}/namespaces/{namespaceName}";

fn namespace_route(suffix: &str) -> String {
	format!("{}{}", NAMESPACE, suffix)
}

fn init_api(app: App) -> Router<App> {
	Router::new()
		.route(
			&namespace_route("/items"),
			get(handler::list_items).put(handler::put_items_by_text),
		)
		.route(&namespace_route("/item"), post(handler::post_item).put(handler::put_item))
		.route(&namespace_route("/items/{itemId}"), delete(handler::delete_item))
		.route(&namespace_route("/branches/{branchName}/items"), get(handler::list_branch_items))
		.route(&namespace_route("/syntax-check"), post(handler::post_syntax_check))
		.route(&namespace_route("/revoke-items"), put(handler::put_revoke_items))
		.route("/namespaces/{namespaceName}/diff", post(handler::post_diff))
		.route("/apps/{appId}/namespaces/{namespaceName}/items", put(handler::put_sync_items))
		.route_layer(middleware::from_fn_with_state(app, require_auth))
}

async fn get_health() -> Json<serde_json::Value> {
	Json(json!({ "status": "ok", "version": VERSION }))
}

pub fn init(app: App) -> Router {
	let mut router = Router::new()
		.route("/health", get(get_health))
		.merge(init_api(app.clone()))
		.with_state(app.clone())
		.layer(middleware::from_fn(request_id))
		.layer(TraceLayer::new_for_http());

	if app.opts.cors {
		router = router.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));
	}

	router
}

// vim: ts=4
