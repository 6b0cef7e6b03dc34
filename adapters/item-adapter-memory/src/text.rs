//! Configuration text to item conversion

use std::collections::HashSet;

use cfgportal::item::{ConfigFileFormat, Item};
use cfgportal::prelude::*;

/// Key of the single item holding the text of non-properties namespaces
pub const CONTENT_KEY: &str = "content";

/// Parse configuration text into items numbered by position, starting at 1
pub fn parse(format: Option<ConfigFileFormat>, text: &str) -> ClResult<Vec<Item>> {
	if text.trim().is_empty() {
		return Ok(Vec::new());
	}

	match format.unwrap_or(ConfigFileFormat::Properties) {
		ConfigFileFormat::Properties => parse_properties(text),
		_ => Ok(vec![Item { line_num: 1, ..Item::new(CONTENT_KEY, text) }]),
	}
}

/// `key=value` or `key:value` per line. `#` and `!` lines are comments and
/// attach to the next item.
fn parse_properties(text: &str) -> ClResult<Vec<Item>> {
	let mut items = Vec::new();
	let mut seen = HashSet::new();
	let mut comment: Vec<&str> = Vec::new();

	for line in text.lines() {
		let line = line.trim();
		if line.is_empty() {
			continue;
		}
		if line.starts_with('#') || line.starts_with('!') {
			comment.push(line);
			continue;
		}

		let (key, value) = match line.find(['=', ':']) {
			Some(pos) => (line[..pos].trim_end(), line[pos + 1..].trim_start()),
			None => (line, ""),
		};
		if key.is_empty() {
			return Err(Error::ValidationError(format!("Missing key in line: {}", line)));
		}
		if !seen.insert(key) {
			return Err(Error::ValidationError(format!("Duplicate key: {}", key)));
		}

		let mut item = Item::new(key, value);
		if !comment.is_empty() {
			item.comment = Some(comment.join("\n").into());
			comment.clear();
		}
		item.line_num = u32::try_from(items.len() + 1).unwrap_or(u32::MAX);
		items.push(item);
	}

	Ok(items)
}


// vim: ts=4
