use serde::{Deserialize, Serialize};

/// The result envelope returned by all commands.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	pub ok: bool,
	pub command: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub duration_ms: Option<u64>,
}

/// Error information for failed commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	pub code: ErrorCode,
	pub message: String,
	/// HTTP status for server-reported failures.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<u16>,
}

impl CommandError {
	pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
		Self {
			code,
			message: message.into(),
			status: None,
		}
	}
}

impl From<hotelcmp::Error> for CommandError {
	fn from(err: hotelcmp::Error) -> Self {
		use hotelcmp::Error;

		let code = match &err {
			Error::InvalidCriteria(_) => ErrorCode::InvalidCriteria,
			Error::Unauthenticated => ErrorCode::Unauthenticated,
			Error::SessionExpired => ErrorCode::SessionExpired,
			Error::RequestFailed { .. } => ErrorCode::RequestFailed,
			Error::Network(_) => ErrorCode::NetworkError,
			Error::NoOffersAvailable { .. } => ErrorCode::NoOffersAvailable,
			Error::Decode(_) => ErrorCode::UnexpectedResponse,
			Error::Storage(_) => ErrorCode::StorageError,
			Error::InvalidBookmarkId(_) => ErrorCode::InvalidInput,
			Error::Config(_) => ErrorCode::ConfigError,
		};
		let message = match &err {
			Error::Unauthenticated => "Not logged in. Run `hotelcmp login` first.".to_string(),
			Error::SessionExpired => "Session expired. Please log in again.".to_string(),
			Error::RequestFailed { message, .. } => message.clone(),
			other => other.to_string(),
		};
		Self {
			code,
			message,
			status: err.status(),
		}
	}
}

/// Standardized error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	InvalidCriteria,
	Unauthenticated,
	SessionExpired,
	RequestFailed,
	NetworkError,
	NoOffersAvailable,
	UnexpectedResponse,
	StorageError,
	InvalidInput,
	ConfigError,
	InternalError,
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorCode::InvalidCriteria => write!(f, "INVALID_CRITERIA"),
			ErrorCode::Unauthenticated => write!(f, "UNAUTHENTICATED"),
			ErrorCode::SessionExpired => write!(f, "SESSION_EXPIRED"),
			ErrorCode::RequestFailed => write!(f, "REQUEST_FAILED"),
			ErrorCode::NetworkError => write!(f, "NETWORK_ERROR"),
			ErrorCode::NoOffersAvailable => write!(f, "NO_OFFERS_AVAILABLE"),
			ErrorCode::UnexpectedResponse => write!(f, "UNEXPECTED_RESPONSE"),
			ErrorCode::StorageError => write!(f, "STORAGE_ERROR"),
			ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
			ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
			ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
		}
	}
}
