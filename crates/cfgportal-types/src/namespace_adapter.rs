//! Adapter for namespace metadata lookup

use async_trait::async_trait;
use std::fmt::Debug;

use crate::item::{Namespace, NamespaceIdentifier};
use crate::prelude::*;

#[async_trait]
pub trait NamespaceAdapter: Debug + Send + Sync {
	/// Load a namespace's base info, `None` if it does not exist
	async fn load_namespace_base_info(
		&self,
		namespace: &NamespaceIdentifier,
	) -> ClResult<Option<Namespace>>;
}

// vim: ts=4
