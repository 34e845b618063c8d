//! Structured error body carried by non-2xx responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{"detail": ...}` error payload.
///
/// `detail` is a human-readable string for business errors and an array of
/// field errors for request validation failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
	#[serde(default)]
	pub detail: Option<Value>,
}

impl ErrorBody {
	/// Returns the detail when it is a non-empty human-readable string.
	pub fn message(&self) -> Option<&str> {
		self.detail.as_ref().and_then(Value::as_str).filter(|m| !m.trim().is_empty())
	}

	/// Parses an error body, returning `None` for anything that is not JSON.
	pub fn from_slice(body: &[u8]) -> Option<Self> {
		serde_json::from_slice(body).ok()
	}
}
