//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Searches scrape live booking sites and may run for about two minutes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(150);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	pub base_url: Url,
	pub timeout: Duration,
	/// JSON file holding the persisted credential pair.
	pub credentials_path: PathBuf,
}

impl ClientConfig {
	pub fn new(base_url: Url) -> Self {
		Self {
			base_url,
			..Self::default()
		}
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.credentials_path = path.into();
		self
	}
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: default_base_url(),
			timeout: DEFAULT_TIMEOUT,
			credentials_path: default_credentials_path(),
		}
	}
}

fn default_base_url() -> Url {
	// Constant input; parsing cannot fail.
	Url::parse(DEFAULT_BASE_URL).unwrap_or_else(|_| unreachable!("default base URL is valid"))
}

/// `$XDG_CONFIG_HOME/hotelcmp/credentials.json`, falling back to
/// `$HOME/.config`, then to the working directory.
pub fn default_credentials_path() -> PathBuf {
	std::env::var_os("XDG_CONFIG_HOME")
		.filter(|dir| !dir.is_empty())
		.map(PathBuf::from)
		.or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
		.unwrap_or_else(|| PathBuf::from("."))
		.join("hotelcmp/credentials.json")
}
