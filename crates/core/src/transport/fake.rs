//! Fake transport for testing gateway, search and bookmark flows.
//!
//! Provides an in-memory transport that replays scripted outcomes in FIFO
//! order and records every request it receives.
//!
//! # Example
//!
//! ```ignore
//! let (transport, controller) = FakeTransportBuilder::new().build();
//! controller.respond(200, json!({"result": []}));
//! let slow = controller.defer();
//!
//! // first request gets the immediate reply, second waits on `slow`
//! slow.respond(200, json!({"result": []}));
//! assert_eq!(controller.sent().len(), 2);
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::oneshot;

use super::{HttpRequest, HttpResponse, Transport, TransportError};

type Reply = Result<HttpResponse, TransportError>;

enum Scripted {
	Ready(Reply),
	Deferred(oneshot::Receiver<Reply>),
}

#[derive(Default)]
struct Shared {
	script: Mutex<VecDeque<Scripted>>,
	sent: Mutex<Vec<HttpRequest>>,
}

/// Builder for creating fake transport instances.
#[derive(Debug, Default)]
pub struct FakeTransportBuilder {}

impl FakeTransportBuilder {
	pub fn new() -> Self {
		Self {}
	}

	/// Builds the transport and a controller sharing its script and log.
	pub fn build(self) -> (FakeTransport, FakeTransportController) {
		let shared = Arc::new(Shared::default());
		(
			FakeTransport {
				shared: Arc::clone(&shared),
			},
			FakeTransportController { shared },
		)
	}
}

/// Transport half: answers each request with the next scripted outcome.
///
/// A request arriving with an empty script fails with
/// [`TransportError::Connect`], which surfaces as a network error.
pub struct FakeTransport {
	shared: Arc<Shared>,
}

#[async_trait]
impl Transport for FakeTransport {
	async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
		self.shared.sent.lock().push(request);
		let next = self.shared.script.lock().pop_front();
		match next {
			Some(Scripted::Ready(reply)) => reply,
			Some(Scripted::Deferred(rx)) => rx
				.await
				.unwrap_or_else(|_| Err(TransportError::Connect("deferred response dropped".into()))),
			None => Err(TransportError::Connect("no scripted response".into())),
		}
	}
}

/// Controller for scripting responses and inspecting sent requests.
#[derive(Clone)]
pub struct FakeTransportController {
	shared: Arc<Shared>,
}

impl FakeTransportController {
	/// Queues a JSON response.
	pub fn respond(&self, status: u16, body: Value) {
		self.push(Scripted::Ready(Ok(HttpResponse::json(status, &body))));
	}

	/// Queues a response with an empty body.
	pub fn respond_empty(&self, status: u16) {
		self.push(Scripted::Ready(Ok(HttpResponse::new(status, Vec::new()))));
	}

	/// Queues a response with a raw, possibly non-JSON body.
	pub fn respond_raw(&self, status: u16, body: &str) {
		self.push(Scripted::Ready(Ok(HttpResponse::new(status, body))));
	}

	/// Queues a failure where no response arrives.
	pub fn fail_network(&self) {
		self.push(Scripted::Ready(Err(TransportError::Connect("connection refused".into()))));
	}

	/// Queues a slot whose outcome is decided later through the returned handle.
	pub fn defer(&self) -> DeferredResponse {
		let (tx, rx) = oneshot::channel();
		self.push(Scripted::Deferred(rx));
		DeferredResponse { tx }
	}

	/// Returns a copy of every request sent so far.
	pub fn sent(&self) -> Vec<HttpRequest> {
		self.shared.sent.lock().clone()
	}

	/// Takes all sent requests, clearing the log.
	pub fn take_sent(&self) -> Vec<HttpRequest> {
		std::mem::take(&mut *self.shared.sent.lock())
	}

	/// Number of scripted outcomes not yet consumed.
	pub fn pending(&self) -> usize {
		self.shared.script.lock().len()
	}

	fn push(&self, scripted: Scripted) {
		self.shared.script.lock().push_back(scripted);
	}
}

/// Handle that completes one deferred request.
pub struct DeferredResponse {
	tx: oneshot::Sender<Reply>,
}

impl DeferredResponse {
	pub fn respond(self, status: u16, body: Value) {
		let _ = self.tx.send(Ok(HttpResponse::json(status, &body)));
	}

	pub fn fail_network(self) {
		let _ = self.tx.send(Err(TransportError::Connect("connection reset".into())));
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::transport::Method;

	fn get(path: &str) -> HttpRequest {
		HttpRequest {
			method: Method::Get,
			path: path.into(),
			bearer: None,
			body: None,
		}
	}

	#[tokio::test]
	async fn replays_script_in_order_and_records_requests() {
		let (transport, controller) = FakeTransportBuilder::new().build();
		controller.respond(200, json!({"n": 1}));
		controller.respond_empty(204);

		let first = transport.send(get("/a")).await.unwrap();
		let second = transport.send(get("/b")).await.unwrap();

		assert_eq!(first.body, br#"{"n":1}"#.to_vec());
		assert_eq!(second.status, 204);
		let sent = controller.take_sent();
		assert_eq!(sent.len(), 2);
		assert_eq!(sent[0].path, "/a");
		assert_eq!(sent[1].path, "/b");
		assert!(controller.sent().is_empty());
	}

	#[tokio::test]
	async fn empty_script_is_a_network_failure() {
		let (transport, _controller) = FakeTransportBuilder::new().build();
		let err = transport.send(get("/a")).await.unwrap_err();
		assert!(matches!(err, TransportError::Connect(_)));
	}

	#[tokio::test]
	async fn deferred_slot_waits_for_release() {
		let (transport, controller) = FakeTransportBuilder::new().build();
		let slot = controller.defer();

		let pending = tokio::spawn(async move { transport.send(get("/slow")).await });
		tokio::task::yield_now().await;
		slot.respond(200, json!({"ok": true}));

		let response = pending.await.unwrap().unwrap();
		assert_eq!(response.status, 200);
		assert_eq!(controller.pending(), 0);
	}
}
