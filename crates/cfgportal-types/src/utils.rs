//! Utility functions

/// A string is blank when it is absent or contains only whitespace.
pub fn is_blank(s: Option<&str>) -> bool {
	s.is_none_or(|s| s.trim().is_empty())
}

/// Returns true when any of the given values is absent or empty.
///
/// Whitespace is significant here: `" "` is not empty.
pub fn is_contain_empty<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> bool {
	values.into_iter().any(|v| v.is_none_or(str::is_empty))
}


// vim: ts=4
