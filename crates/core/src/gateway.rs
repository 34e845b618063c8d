//! Authenticated request gateway.
//!
//! Every backend call goes through [`Gateway`]. Authenticated calls attach
//! the session's access token as a bearer credential, and an unauthorized
//! answer tears the session down before [`Error::SessionExpired`] is
//! returned. One attempt per call: nothing here retries.

use std::sync::Arc;

use hotelcmp_protocol::ErrorBody;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::session::SessionStore;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

/// Wraps a transport with the current session's credential.
///
/// Cheap to clone; clones share the transport and the session store.
#[derive(Clone)]
pub struct Gateway {
	transport: Arc<dyn Transport>,
	session: Arc<SessionStore>,
}

impl Gateway {
	pub fn new(transport: Arc<dyn Transport>, session: Arc<SessionStore>) -> Self {
		Self { transport, session }
	}

	pub fn session(&self) -> &Arc<SessionStore> {
		&self.session
	}

	/// Sends an authenticated request and returns the JSON payload.
	///
	/// An empty success body is returned as `Value::Null`.
	///
	/// # Errors
	///
	/// - [`Error::Unauthenticated`] when no access token is held (nothing sent)
	/// - [`Error::SessionExpired`] on 401; the session that sent the request
	///   has been cleared, a login made while it was in flight is kept
	/// - [`Error::RequestFailed`] on any other non-success status
	/// - [`Error::Network`] when no response arrived
	/// - [`Error::Decode`] when a success body is not JSON
	pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
		let token = self.session.access_token()?;
		let response = self.send(method, path, body, Some(token.clone())).await?;

		if response.status == StatusCode::UNAUTHORIZED.as_u16() {
			warn!(target = "hotelcmp.gateway", %method, path, "credential rejected; ending session");
			// Only the session that sent this request is ended.
			if let Err(err) = self.session.clear_if_current(&token) {
				warn!(target = "hotelcmp.gateway", error = %err, "failed to erase stored credential");
			}
			return Err(Error::SessionExpired);
		}

		into_payload(response)
	}

	/// Sends a request without a bearer credential (login, registration).
	///
	/// A 401 here means rejected credentials, not an expired session, and
	/// is reported as [`Error::RequestFailed`].
	pub async fn request_anonymous(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
		let response = self.send(method, path, body, None).await?;
		into_payload(response)
	}

	pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		decode(self.request(Method::Get, path, None).await?)
	}

	pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
		decode(self.request(Method::Post, path, Some(encode(body)?)).await?)
	}

	pub async fn delete(&self, path: &str) -> Result<()> {
		self.request(Method::Delete, path, None).await.map(|_| ())
	}

	pub async fn post_anonymous<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
		decode(self.request_anonymous(Method::Post, path, Some(encode(body)?)).await?)
	}

	async fn send(&self, method: Method, path: &str, body: Option<Value>, bearer: Option<String>) -> Result<HttpResponse> {
		debug!(target = "hotelcmp.gateway", %method, path, authenticated = bearer.is_some(), "request");
		let response = self
			.transport
			.send(HttpRequest {
				method,
				path: path.to_string(),
				bearer,
				body,
			})
			.await
			.map_err(|err| {
				warn!(target = "hotelcmp.gateway", %method, path, error = %err, "no response");
				Error::from(err)
			})?;
		debug!(target = "hotelcmp.gateway", %method, path, status = response.status, "response");
		Ok(response)
	}
}

impl std::fmt::Debug for Gateway {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Gateway").field("session", &self.session).finish_non_exhaustive()
	}
}

fn into_payload(response: HttpResponse) -> Result<Value> {
	if !response.is_success() {
		return Err(Error::RequestFailed {
			status: response.status,
			message: failure_message(&response),
		});
	}
	if response.body.iter().all(u8::is_ascii_whitespace) {
		return Ok(Value::Null);
	}
	serde_json::from_slice(&response.body).map_err(|e| Error::Decode(e.to_string()))
}

/// Prefers the server's `detail` string; otherwise describes the status.
fn failure_message(response: &HttpResponse) -> String {
	if let Some(message) = ErrorBody::from_slice(&response.body).as_ref().and_then(ErrorBody::message) {
		return message.to_string();
	}
	match StatusCode::from_u16(response.status).ok().and_then(|s| s.canonical_reason()) {
		Some(reason) => format!("{reason} ({})", response.status),
		None => format!("unexpected status {}", response.status),
	}
}

fn encode<B: Serialize>(body: &B) -> Result<Value> {
	serde_json::to_value(body).map_err(|e| Error::Decode(format!("cannot encode request body: {e}")))
}

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T> {
	serde_json::from_value(payload).map_err(|e| Error::Decode(e.to_string()))
}
