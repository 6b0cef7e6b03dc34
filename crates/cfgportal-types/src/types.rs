//! Common types used throughout cfgportal.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::prelude::*;

// Timestamp //
//***********//
/// Milliseconds since the Unix epoch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Timestamp {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(i64::try_from(res.as_millis()).unwrap_or(i64::MAX))
	}

	/// RFC 3339 rendering, used in log lines
	pub fn to_iso_string(&self) -> String {
		chrono::DateTime::from_timestamp_millis(self.0)
			.map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
			.unwrap_or_default()
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

// Env //
//*****//
/// Deployment environment name (`DEV`, `FAT`, `UAT`, `PRO`, ...)
///
/// Always stored upper case so that `dev` and `DEV` address the same
/// environment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Env(Box<str>);

impl Env {
	pub fn parse(name: &str) -> ClResult<Env> {
		let name = name.trim();
		if name.is_empty() {
			return Err(Error::ValidationError("Env name cannot be empty".to_string()));
		}
		if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
			return Err(Error::ValidationError(format!("Invalid env name: {}", name)));
		}
		Ok(Env(name.to_ascii_uppercase().into_boxed_str()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::str::FromStr for Env {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Env::parse(s)
	}
}

impl std::fmt::Display for Env {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl Serialize for Env {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for Env {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let name = String::deserialize(deserializer)?;
		Env::parse(&name).map_err(serde::de::Error::custom)
	}
}


// vim: ts=4
