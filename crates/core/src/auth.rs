//! Login, registration and logout.

use hotelcmp_protocol::{Identity, LoginRequest, RegisterRequest, TokenResponse};
use tracing::info;

use crate::error::{Error, Result};
use crate::gateway::Gateway;
use crate::storage::Credential;

pub(crate) const LOGIN_PATH: &str = "/login";
pub(crate) const REGISTER_PATH: &str = "/register";

/// Establishes and ends sessions on the shared [`SessionStore`](crate::SessionStore).
#[derive(Debug, Clone)]
pub struct Auth {
	gateway: Gateway,
}

impl Auth {
	pub fn new(gateway: Gateway) -> Self {
		Self { gateway }
	}

	/// Exchanges email and password for a token pair and stores the session.
	///
	/// Rejected credentials come back as [`Error::RequestFailed`] carrying
	/// the server's message.
	pub async fn login(&self, email: &str, password: &str) -> Result<Identity> {
		let request = LoginRequest {
			email: email.to_string(),
			password: password.to_string(),
		};
		let tokens: TokenResponse = self.gateway.post_anonymous(LOGIN_PATH, &request).await?;
		self.establish(tokens, Identity::new(email))
	}

	/// Creates an account and stores the session it returns.
	pub async fn register(&self, email: &str, username: &str, password: &str) -> Result<Identity> {
		let request = RegisterRequest {
			email: email.to_string(),
			username: username.to_string(),
			password: password.to_string(),
		};
		let tokens: TokenResponse = self.gateway.post_anonymous(REGISTER_PATH, &request).await?;
		self.establish(tokens, Identity::new(email).with_username(username))
	}

	/// Ends the session locally. No request is sent.
	pub fn logout(&self) -> Result<()> {
		info!(target = "hotelcmp.auth", "logging out");
		self.gateway.session().clear_session()
	}

	fn establish(&self, tokens: TokenResponse, identity: Identity) -> Result<Identity> {
		if tokens.access_token.is_empty() {
			return Err(Error::Decode("server issued an empty access token".into()));
		}
		let credential = Credential::new(tokens.access_token, tokens.refresh_token);
		self.gateway.session().set_session(credential, identity.clone())?;
		info!(target = "hotelcmp.auth", email = %identity.email, "signed in");
		Ok(identity)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use serde_json::json;

	use super::*;
	use crate::session::SessionStore;
	use crate::storage::MemoryCredentialStorage;
	use crate::transport::{FakeTransportBuilder, FakeTransportController};

	fn auth() -> (Auth, FakeTransportController, MemoryCredentialStorage) {
		let (transport, controller) = FakeTransportBuilder::new().build();
		let storage = MemoryCredentialStorage::new();
		let store = Arc::new(SessionStore::new(Box::new(storage.clone())));
		(Auth::new(Gateway::new(Arc::new(transport), store)), controller, storage)
	}

	#[tokio::test]
	async fn login_stores_token_pair() {
		let (auth, controller, storage) = auth();
		controller.respond(200, json!({"access_token": "a1", "refresh_token": "r1", "token_type": "bearer"}));

		let identity = auth.login("t@example.com", "pw").await.unwrap();

		assert_eq!(identity, Identity::new("t@example.com"));
		assert_eq!(storage.snapshot(), Some(Credential::new("a1", "r1")));
		let sent = controller.take_sent();
		assert_eq!(sent[0].path, "/login");
		assert!(sent[0].bearer.is_none());
		assert_eq!(sent[0].body, Some(json!({"email": "t@example.com", "password": "pw"})));
	}

	#[tokio::test]
	async fn rejected_login_is_a_request_failure() {
		let (auth, controller, storage) = auth();
		controller.respond(401, json!({"detail": "Incorrect email or password"}));

		let err = auth.login("t@example.com", "wrong").await.unwrap_err();

		assert_eq!(err.status(), Some(401));
		assert!(!err.is_session_expired());
		assert!(storage.snapshot().is_none());
	}

	#[tokio::test]
	async fn register_keeps_username() {
		let (auth, controller, _) = auth();
		controller.respond(200, json!({"access_token": "a1", "refresh_token": "r1"}));

		let identity = auth.register("t@example.com", "traveller", "pw").await.unwrap();

		assert_eq!(identity.username.as_deref(), Some("traveller"));
		assert_eq!(controller.take_sent()[0].path, "/register");
	}

	#[tokio::test]
	async fn logout_clears_without_network() {
		let (auth, controller, storage) = auth();
		controller.respond(200, json!({"access_token": "a1", "refresh_token": "r1"}));
		auth.login("t@example.com", "pw").await.unwrap();
		controller.take_sent();

		auth.logout().unwrap();
		auth.logout().unwrap();

		assert!(storage.snapshot().is_none());
		assert!(controller.sent().is_empty());
	}
}
