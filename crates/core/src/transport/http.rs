//! Reqwest-backed transport.
//!
//! Owns connection details only: URL resolution against the configured base,
//! bearer header, JSON body encoding and timeout mapping.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url, header};
use tracing::trace;

use super::{HttpRequest, HttpResponse, Method, Transport, TransportError};

const USER_AGENT: &str = concat!("hotelcmp/", env!("CARGO_PKG_VERSION"));

/// Transport that performs real HTTP requests against one backend.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
	client: Client,
	base_url: Url,
}

impl ReqwestTransport {
	/// Builds a transport with an explicit per-request timeout.
	///
	/// # Errors
	///
	/// Returns an error when the reqwest client cannot be constructed.
	pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
		let client = Client::builder().timeout(timeout).user_agent(USER_AGENT).build()?;
		Ok(Self {
			client,
			base_url: with_trailing_slash(base_url),
		})
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	fn resolve(&self, path: &str) -> Result<Url, TransportError> {
		self.base_url
			.join(path.trim_start_matches('/'))
			.map_err(|e| TransportError::InvalidRequest(format!("cannot resolve {path}: {e}")))
	}
}

#[async_trait]
impl Transport for ReqwestTransport {
	async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
		let url = self.resolve(&request.path)?;
		trace!(target = "hotelcmp.transport", method = %request.method, %url, "sending request");

		let method = match request.method {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
			Method::Delete => reqwest::Method::DELETE,
		};

		let mut builder = self.client.request(method, url).header(header::ACCEPT, "application/json");
		if let Some(token) = &request.bearer {
			builder = builder.bearer_auth(token);
		}
		if let Some(body) = &request.body {
			builder = builder.json(body);
		}

		let response = builder.send().await.map_err(map_transport_error)?;
		let status = response.status().as_u16();
		let body = response.bytes().await.map_err(map_transport_error)?;

		Ok(HttpResponse { status, body: body.to_vec() })
	}
}

/// `Url::join` replaces the last path segment unless the base ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());
		url.set_path(&path);
	}
	url
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
	if error.is_timeout() {
		TransportError::Timeout(error.to_string())
	} else if error.is_builder() {
		TransportError::InvalidRequest(error.to_string())
	} else {
		TransportError::Connect(error.to_string())
	}
}
