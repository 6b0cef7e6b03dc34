//! Syntax check of configuration text before it is saved

use serde::Deserialize;

use crate::prelude::*;
use cfgportal_types::model::NamespaceTextModel;

/// Validate the model's text. Only the YAML family is checked; blank text
/// and other formats always pass.
pub fn check_syntax(model: &NamespaceTextModel) -> ClResult<()> {
	if model.is_blank() {
		return Ok(());
	}
	if !model.format.is_some_and(|f| f.is_yaml()) {
		return Ok(());
	}

	check_yaml(model.config_text.as_deref().unwrap_or_default())
}

/// Parse every document of a YAML stream. Duplicate mapping keys are errors.
pub fn check_yaml(text: &str) -> ClResult<()> {
	for document in serde_yaml::Deserializer::from_str(text) {
		serde_yaml::Value::deserialize(document).map_err(|e| {
			debug!(error = %e, "YAML syntax check failed");
			Error::ValidationError(e.to_string())
		})?;
	}
	Ok(())
}


// vim: ts=4
