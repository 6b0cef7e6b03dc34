//! Error type shared by the gateway and its adapters

use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	// Client errors
	ValidationError(String),
	NamespaceMismatch,
	Unauthorized,
	PermissionDenied,
	/// Permission denied with a message naming the rejected resource
	AccessDenied(String),
	NotFound,
	Conflict(String),

	// Server side
	DbError,
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl Error {
	pub fn status(&self) -> StatusCode {
		match self {
			Error::ValidationError(_) | Error::NamespaceMismatch => StatusCode::BAD_REQUEST,
			Error::Unauthorized => StatusCode::UNAUTHORIZED,
			Error::PermissionDenied | Error::AccessDenied(_) => StatusCode::FORBIDDEN,
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::Conflict(_) => StatusCode::CONFLICT,
			Error::DbError | Error::Internal(_) | Error::Io(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	fn code(&self) -> &'static str {
		match self {
			Error::ValidationError(_) => "E-VALIDATION",
			Error::NamespaceMismatch => "E-NS-MISMATCH",
			Error::Unauthorized => "E-AUTH-UNAUTH",
			Error::PermissionDenied | Error::AccessDenied(_) => "E-AUTH-NOPERM",
			Error::NotFound => "E-CORE-NOTFOUND",
			Error::Conflict(_) => "E-CORE-CONFLICT",
			Error::DbError | Error::Internal(_) | Error::Io(_) => {
				"E-CORE-INTERNAL"
			}
		}
	}

	/// Message shown to the client. Server side details stay in the logs.
	fn public_message(&self) -> String {
		match self {
			Error::ValidationError(msg)
			| Error::AccessDenied(msg)
			| Error::Conflict(msg) => msg.clone(),
			Error::NamespaceMismatch => {
				"Invalid request, item and namespace do not match".to_string()
			}
			Error::Unauthorized => "Authentication required".to_string(),
			Error::PermissionDenied => "Permission denied".to_string(),
			Error::NotFound => "Not found".to_string(),
			Error::DbError | Error::Internal(_) | Error::Io(_) => {
				"Internal server error".to_string()
			}
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::AccessDenied(msg) => write!(f, "access denied: {}", msg),
			Error::Conflict(msg) => write!(f, "conflict: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
			_ => write!(f, "{:?}", self),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = self.status();
		if status.is_server_error() {
			tracing::error!(error = %self, "Request failed");
		}
		let body = serde_json::json!({
			"error": {
				"code": self.code(),
				"message": self.public_message(),
			}
		});
		(status, Json(body)).into_response()
	}
}


// vim: ts=4
