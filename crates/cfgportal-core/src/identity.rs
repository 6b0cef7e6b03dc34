//! JWT based identity provider
//!
//! Tokens are HS256 signed with a shared secret and carry the user id in
//! `sub` and the caller's permission grants in `roles`.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use cfgportal_types::auth_adapter::{AuthCtx, IdentityProvider};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
	sub: Box<str>,
	#[serde(default)]
	roles: Vec<Box<str>>,
	exp: i64,
}

pub struct JwtIdentityProvider {
	encoding_key: EncodingKey,
	decoding_key: DecodingKey,
	validation: Validation,
}

impl std::fmt::Debug for JwtIdentityProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("JwtIdentityProvider").finish_non_exhaustive()
	}
}

impl JwtIdentityProvider {
	pub fn new(secret: &[u8]) -> ClResult<Self> {
		if secret.len() < 16 {
			return Err(Error::ValidationError(
				"JWT secret must be at least 16 bytes long".to_string(),
			));
		}
		Ok(JwtIdentityProvider {
			encoding_key: EncodingKey::from_secret(secret),
			decoding_key: DecodingKey::from_secret(secret),
			validation: Validation::new(Algorithm::HS256),
		})
	}

	/// Mint a token for `user_id` valid for `ttl_secs` seconds
	pub fn issue_token(&self, user_id: &str, roles: &[&str], ttl_secs: i64) -> ClResult<String> {
		let claims = Claims {
			sub: user_id.into(),
			roles: roles.iter().map(|r| Box::from(*r)).collect(),
			exp: Timestamp::now().0 / 1000 + ttl_secs,
		};
		jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
			.map_err(|e| Error::Internal(format!("Cannot sign token: {}", e)))
	}
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
	async fn validate_token(&self, token: &str) -> ClResult<AuthCtx> {
		let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
			.map_err(|e| {
				debug!(error = %e, "Invalid JWT");
				Error::Unauthorized
			})?;

		if data.claims.sub.is_empty() {
			return Err(Error::Unauthorized);
		}

		Ok(AuthCtx { user_id: data.claims.sub, roles: data.claims.roles.into_boxed_slice() })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

	#[tokio::test]
	async fn test_issue_and_validate() {
		let idp = JwtIdentityProvider::new(SECRET).unwrap();
		let token = idp.issue_token("alice", &["ModifyNamespace+app+application"], 60).unwrap();

		let auth = idp.validate_token(&token).await.unwrap();
		assert_eq!(auth.user_id.as_ref(), "alice");
		assert!(auth.has_role("ModifyNamespace+app+application"));
	}

	#[tokio::test]
	async fn test_expired_token_rejected() {
		let idp = JwtIdentityProvider::new(SECRET).unwrap();
		let token = idp.issue_token("alice", &[], -3600).unwrap();

		assert!(matches!(idp.validate_token(&token).await, Err(Error::Unauthorized)));
	}

	#[tokio::test]
	async fn test_foreign_signature_rejected() {
		let idp = JwtIdentityProvider::new(SECRET).unwrap();
		let other = JwtIdentityProvider::new(b"another-secret-of-enough-length").unwrap();
		let token = other.issue_token("mallory", &["SuperAdmin"], 60).unwrap();

		assert!(matches!(idp.validate_token(&token).await, Err(Error::Unauthorized)));
		assert!(matches!(idp.validate_token("garbage").await, Err(Error::Unauthorized)));
	}

	#[test]
	fn test_short_secret_rejected() {
		assert!(JwtIdentityProvider::new(b"short").is_err());
	}
}

// vim: ts=4
