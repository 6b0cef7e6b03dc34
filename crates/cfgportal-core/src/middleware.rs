//! Custom middlewares

use axum::{
	extract::{Request, State},
	http::{HeaderValue, header},
	middleware::Next,
	response::Response,
};

use crate::extract::{Auth, RequestId};
use crate::prelude::*;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
const MAX_REQUEST_ID_LEN: usize = 128;

/// Resolves the bearer token into an `Auth` extension, 401 otherwise
pub async fn require_auth(
	State(app): State<App>,
	mut req: Request,
	next: Next,
) -> ClResult<Response> {
	let token = req
		.headers()
		.get(header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
		.map(|t| t.trim().to_string())
		.filter(|t| !t.is_empty())
		.ok_or(Error::Unauthorized)?;

	let auth_ctx = app.identity_provider.validate_token(&token).await.map_err(|e| {
		debug!(error = %e, "Token validation failed");
		Error::Unauthorized
	})?;

	req.extensions_mut().insert(Auth(auth_ctx));

	Ok(next.run(req).await)
}

/// Tags every request with an id, taken from `x-request-id` when sane
pub async fn request_id(mut req: Request, next: Next) -> Response {
	let req_id = req
		.headers()
		.get(REQUEST_ID_HEADER)
		.and_then(|h| h.to_str().ok())
		.filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
		.map_or_else(|| uuid::Uuid::new_v4().to_string(), ToString::to_string);

	req.extensions_mut().insert(RequestId(req_id.clone()));

	let mut res = next.run(req).await;
	if let Ok(val) = HeaderValue::from_str(&req_id) {
		res.headers_mut().insert(REQUEST_ID_HEADER, val);
	}
	res
}


// vim: ts=4
