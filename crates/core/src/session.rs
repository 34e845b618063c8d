//! Session store: single source of truth for "is the user authenticated".
//!
//! Holds the credential pair and the identity derived from it, writes the
//! credential through to durable storage, and restores it on start-up by
//! asking the backend to verify the stored token.

use hotelcmp_protocol::Identity;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::gateway::Gateway;
use crate::storage::{Credential, CredentialStorage};

pub(crate) const VERIFY_TOKEN_PATH: &str = "/verify-token";

/// Authentication state as seen by dependent code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
	/// Start-up verification has not finished; render neither state.
	Loading,
	Anonymous,
	Authenticated,
}

#[derive(Debug)]
struct SessionState {
	credential: Option<Credential>,
	identity: Option<Identity>,
	status: SessionStatus,
}

/// Owns the current credential and identity.
///
/// Shared between the gateway and callers behind an `Arc`. Mutators are
/// safe to call back-to-back: clearing an empty session is a no-op.
pub struct SessionStore {
	storage: Box<dyn CredentialStorage>,
	state: RwLock<SessionState>,
}

impl SessionStore {
	/// Creates a store in the [`SessionStatus::Loading`] state.
	///
	/// Nothing is read from storage until [`restore`](Self::restore) runs.
	pub fn new(storage: Box<dyn CredentialStorage>) -> Self {
		Self {
			storage,
			state: RwLock::new(SessionState {
				credential: None,
				identity: None,
				status: SessionStatus::Loading,
			}),
		}
	}

	/// Replaces any existing session and persists the credential.
	///
	/// Storage is written first; if that fails the in-memory session is
	/// left as it was.
	pub fn set_session(&self, credential: Credential, identity: Identity) -> Result<()> {
		if !credential.is_usable() {
			return Err(Error::Storage("refusing to store an empty access token".into()));
		}
		self.storage.save(&credential)?;

		let mut state = self.state.write();
		info!(target = "hotelcmp.session", email = %identity.email, "session established");
		state.credential = Some(credential);
		state.identity = Some(identity);
		state.status = SessionStatus::Authenticated;
		Ok(())
	}

	/// Erases the credential and identity from memory and storage.
	///
	/// Memory is cleared even when storage fails, so the process never keeps
	/// using a credential it was told to drop.
	pub fn clear_session(&self) -> Result<()> {
		{
			let mut state = self.state.write();
			if state.credential.is_some() {
				info!(target = "hotelcmp.session", "session cleared");
			}
			Self::reset(&mut state);
		}
		self.storage.clear()
	}

	/// Clears the session only while it still holds `access_token`.
	///
	/// Returns `Ok(false)` and leaves the store alone when the token was
	/// already replaced or cleared.
	pub fn clear_if_current(&self, access_token: &str) -> Result<bool> {
		{
			let mut state = self.state.write();
			if !holds_token(&state, access_token) {
				debug!(target = "hotelcmp.session", "credential already replaced; keeping current session");
				return Ok(false);
			}
			info!(target = "hotelcmp.session", "session cleared");
			Self::reset(&mut state);
		}
		self.storage.clear()?;
		Ok(true)
	}

	fn reset(state: &mut SessionState) {
		state.credential = None;
		state.identity = None;
		state.status = SessionStatus::Anonymous;
	}

	/// Returns the current access token.
	///
	/// # Errors
	///
	/// Returns [`Error::Unauthenticated`] when no credential is held.
	pub fn access_token(&self) -> Result<String> {
		self.state
			.read()
			.credential
			.as_ref()
			.filter(|c| c.is_usable())
			.map(|c| c.access_token.clone())
			.ok_or(Error::Unauthenticated)
	}

	/// Refresh token kept alongside the access token. Not exchanged by this
	/// client; exposed for callers that implement renewal themselves.
	pub fn refresh_token(&self) -> Option<String> {
		self.state.read().credential.as_ref().map(|c| c.refresh_token.clone())
	}

	pub fn is_authenticated(&self) -> bool {
		self.state.read().credential.as_ref().is_some_and(Credential::is_usable)
	}

	pub fn identity(&self) -> Option<Identity> {
		self.state.read().identity.clone()
	}

	pub fn status(&self) -> SessionStatus {
		self.state.read().status
	}

	/// Restores a stored session and verifies it with the backend.
	///
	/// Performs at most one `GET /verify-token`. Any verification failure
	/// clears the session. The store reports [`SessionStatus::Loading`]
	/// until this returns.
	pub async fn restore(&self, gateway: &Gateway) -> SessionStatus {
		let stored = self.storage.load().unwrap_or_else(|err| {
			warn!(target = "hotelcmp.session", error = %err, "could not read stored credential");
			None
		});

		let Some(credential) = stored.filter(Credential::is_usable) else {
			debug!(target = "hotelcmp.session", "no stored credential");
			self.state.write().status = SessionStatus::Anonymous;
			return SessionStatus::Anonymous;
		};

		let token = credential.access_token.clone();
		{
			let mut state = self.state.write();
			state.credential = Some(credential);
			state.identity = None;
			state.status = SessionStatus::Loading;
		}

		match gateway.get::<Identity>(VERIFY_TOKEN_PATH).await {
			Ok(identity) => {
				let mut state = self.state.write();
				// A clear or a new login during verification wins.
				if !holds_token(&state, &token) {
					return state.status;
				}
				info!(target = "hotelcmp.session", email = %identity.email, "stored session verified");
				state.identity = Some(identity);
				state.status = SessionStatus::Authenticated;
				SessionStatus::Authenticated
			}
			Err(err) => {
				warn!(target = "hotelcmp.session", error = %err, "stored session rejected; clearing");
				if let Err(storage_err) = self.clear_if_current(&token) {
					warn!(target = "hotelcmp.session", error = %storage_err, "failed to erase stored credential");
				}
				self.status()
			}
		}
	}
}

fn holds_token(state: &SessionState, access_token: &str) -> bool {
	state.credential.as_ref().is_some_and(|c| c.access_token == access_token)
}

impl std::fmt::Debug for SessionStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.read();
		f.debug_struct("SessionStore")
			.field("status", &state.status)
			.field("identity", &state.identity)
			.field("authenticated", &state.credential.is_some())
			.finish()
	}
}
