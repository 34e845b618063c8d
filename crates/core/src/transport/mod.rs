//! Transport seam between the gateway and the wire.
//!
//! A [`Transport`] performs exactly one HTTP exchange per call. Every HTTP
//! status, including 4xx and 5xx, is a response; only failures where no
//! response arrived are reported as [`TransportError`]. Status
//! interpretation belongs to the gateway.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod fake;
mod http;

pub use fake::{DeferredResponse, FakeTransport, FakeTransportBuilder, FakeTransportController};
pub use http::ReqwestTransport;

/// HTTP methods used by the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
	Get,
	Post,
	Delete,
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Method::Get => write!(f, "GET"),
			Method::Post => write!(f, "POST"),
			Method::Delete => write!(f, "DELETE"),
		}
	}
}

/// One outbound request, relative to the backend base URL.
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
	pub method: Method,
	/// Path beginning with `/`, e.g. `/bookmarks/12`.
	pub path: String,
	/// Bearer token attached as `Authorization: Bearer ...`.
	pub bearer: Option<String>,
	/// JSON body, sent with `Content-Type: application/json`.
	pub body: Option<Value>,
}

impl fmt::Debug for HttpRequest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HttpRequest")
			.field("method", &self.method)
			.field("path", &self.path)
			.field("bearer", &self.bearer.as_ref().map(|_| "<redacted>"))
			.field("body", &self.body)
			.finish()
	}
}

/// Raw response status and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
	pub status: u16,
	pub body: Vec<u8>,
}

impl HttpResponse {
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	pub fn json(status: u16, body: &Value) -> Self {
		Self::new(status, body.to_string())
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Failures where no HTTP response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
	#[error("request timed out: {0}")]
	Timeout(String),
	#[error("connection failed: {0}")]
	Connect(String),
	#[error("request could not be built: {0}")]
	InvalidRequest(String),
}

/// Sends a single request and returns whatever the server answered.
#[async_trait]
pub trait Transport: Send + Sync {
	async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn request_debug_redacts_bearer() {
		let request = HttpRequest {
			method: Method::Get,
			path: "/verify-token".into(),
			bearer: Some("secret-access-token".into()),
			body: None,
		};
		let rendered = format!("{request:?}");
		assert!(!rendered.contains("secret-access-token"));
		assert!(rendered.contains("<redacted>"));
	}

	#[test]
	fn success_range_is_2xx() {
		assert!(HttpResponse::new(204, Vec::new()).is_success());
		assert!(!HttpResponse::new(301, Vec::new()).is_success());
		assert!(!HttpResponse::new(401, Vec::new()).is_success());
	}
}
