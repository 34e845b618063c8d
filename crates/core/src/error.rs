//! Error taxonomy shared by every client component.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors surfaced by the session store, gateway, search session and
/// bookmark manager.
///
/// Every variant is returned as a value to the calling component. Only
/// [`Error::SessionExpired`] has a side effect attached: the gateway tears
/// the session down before returning it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
	/// Search criteria rejected client-side; no request was sent.
	#[error("invalid search criteria: {0}")]
	InvalidCriteria(String),

	/// No local credential; the request was not sent.
	#[error("not logged in")]
	Unauthenticated,

	/// The backend rejected the credential. The session has been cleared.
	#[error("session expired; log in again")]
	SessionExpired,

	/// The backend answered with a non-success status.
	#[error("request failed with status {status}: {message}")]
	RequestFailed { status: u16, message: String },

	/// No response was received.
	#[error("network error: {0}")]
	Network(String),

	/// The hotel carries no source offers to choose from.
	#[error("no offers available for {hotel}")]
	NoOffersAvailable { hotel: String },

	/// A success payload did not match the expected shape.
	#[error("unexpected response payload: {0}")]
	Decode(String),

	/// Durable credential storage could not be read or written.
	#[error("credential storage error: {0}")]
	Storage(String),

	/// A bookmark id that cannot name a single resource; nothing was sent.
	#[error("invalid bookmark id: {0:?}")]
	InvalidBookmarkId(String),

	/// The client could not be set up from its configuration.
	#[error("invalid client configuration: {0}")]
	Config(String),
}

impl Error {
	/// Returns true when the caller should send the user to log in.
	pub fn requires_login(&self) -> bool {
		matches!(self, Error::Unauthenticated | Error::SessionExpired)
	}

	pub fn is_session_expired(&self) -> bool {
		matches!(self, Error::SessionExpired)
	}

	pub fn is_network(&self) -> bool {
		matches!(self, Error::Network(_))
	}

	/// HTTP status of a server-reported failure, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Error::RequestFailed { status, .. } => Some(*status),
			_ => None,
		}
	}
}

impl From<TransportError> for Error {
	fn from(err: TransportError) -> Self {
		Error::Network(err.to_string())
	}
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn login_required_for_auth_failures_only() {
		assert!(Error::Unauthenticated.requires_login());
		assert!(Error::SessionExpired.requires_login());
		assert!(!Error::Network("refused".into()).requires_login());
		assert!(
			!Error::RequestFailed {
				status: 401,
				message: "Incorrect email or password".into()
			}
			.requires_login()
		);
	}

	#[test]
	fn transport_errors_become_network_errors() {
		let err: Error = TransportError::Timeout("after 150s".into()).into();
		assert!(err.is_network());
		assert_eq!(err.status(), None);
	}

	#[test]
	fn configuration_failures_are_not_network_errors() {
		let err = Error::Config("cannot build HTTP client".into());
		assert!(!err.is_network());
		assert!(!err.requires_login());
	}
}
