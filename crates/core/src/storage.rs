//! Durable credential storage.
//!
//! The credential pair is the only client state that survives a restart.
//! It is stored under two fixed keys, `access_token` and `refresh_token`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Access and refresh token issued at login or registration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
	#[serde(default)]
	pub access_token: String,
	#[serde(default)]
	pub refresh_token: String,
}

impl Credential {
	pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
		Self {
			access_token: access_token.into(),
			refresh_token: refresh_token.into(),
		}
	}

	/// A credential is usable only with a non-empty access token.
	pub fn is_usable(&self) -> bool {
		!self.access_token.is_empty()
	}
}

impl fmt::Debug for Credential {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credential")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &"<redacted>")
			.finish()
	}
}

/// Client-local durable storage for the credential pair.
pub trait CredentialStorage: Send + Sync {
	/// Returns the stored credential, or `None` when nothing usable is stored.
	fn load(&self) -> Result<Option<Credential>>;

	fn save(&self, credential: &Credential) -> Result<()>;

	/// Removes the stored credential. Clearing empty storage succeeds.
	fn clear(&self) -> Result<()>;
}

/// JSON file holding `{"access_token": ..., "refresh_token": ...}`.
#[derive(Debug, Clone)]
pub struct FileCredentialStorage {
	path: PathBuf,
}

impl FileCredentialStorage {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl CredentialStorage for FileCredentialStorage {
	fn load(&self) -> Result<Option<Credential>> {
		let Ok(content) = fs::read_to_string(&self.path) else {
			return Ok(None);
		};
		match serde_json::from_str::<Credential>(&content) {
			Ok(credential) if credential.is_usable() => Ok(Some(credential)),
			Ok(_) => Ok(None),
			Err(err) => {
				debug!(target = "hotelcmp.session", path = %self.path.display(), error = %err, "ignoring unreadable credential file");
				Ok(None)
			}
		}
	}

	fn save(&self, credential: &Credential) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			if !parent.as_os_str().is_empty() {
				fs::create_dir_all(parent).map_err(|e| storage_error(&self.path, e))?;
			}
		}
		let json = serde_json::to_string_pretty(credential).map_err(|e| Error::Storage(e.to_string()))?;
		fs::write(&self.path, json).map_err(|e| storage_error(&self.path, e))
	}

	fn clear(&self) -> Result<()> {
		match fs::remove_file(&self.path) {
			Ok(()) => Ok(()),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(err) => Err(storage_error(&self.path, err)),
		}
	}
}

fn storage_error(path: &Path, err: std::io::Error) -> Error {
	Error::Storage(format!("{}: {err}", path.display()))
}

/// In-process storage; clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStorage {
	slot: Arc<Mutex<Option<Credential>>>,
}

impl MemoryCredentialStorage {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_credential(credential: Credential) -> Self {
		Self {
			slot: Arc::new(Mutex::new(Some(credential))),
		}
	}

	/// Current raw contents, for inspection.
	pub fn snapshot(&self) -> Option<Credential> {
		self.slot.lock().clone()
	}
}

impl CredentialStorage for MemoryCredentialStorage {
	fn load(&self) -> Result<Option<Credential>> {
		Ok(self.slot.lock().clone().filter(Credential::is_usable))
	}

	fn save(&self, credential: &Credential) -> Result<()> {
		*self.slot.lock() = Some(credential.clone());
		Ok(())
	}

	fn clear(&self) -> Result<()> {
		*self.slot.lock() = None;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use tempfile::TempDir;

	use super::*;

	#[test]
	fn file_storage_round_trips_both_keys() {
		let tmp = TempDir::new().unwrap();
		let storage = FileCredentialStorage::new(tmp.path().join("nested/credentials.json"));

		storage.save(&Credential::new("access-1", "refresh-1")).unwrap();

		let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(storage.path()).unwrap()).unwrap();
		assert_eq!(raw["access_token"], "access-1");
		assert_eq!(raw["refresh_token"], "refresh-1");
		assert_eq!(storage.load().unwrap(), Some(Credential::new("access-1", "refresh-1")));
	}

	#[test]
	fn file_storage_clear_is_idempotent() {
		let tmp = TempDir::new().unwrap();
		let storage = FileCredentialStorage::new(tmp.path().join("credentials.json"));
		storage.save(&Credential::new("a", "r")).unwrap();

		storage.clear().unwrap();
		storage.clear().unwrap();

		assert!(!storage.path().exists());
		assert_eq!(storage.load().unwrap(), None);
	}

	#[test]
	fn corrupt_or_empty_file_loads_as_nothing() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("credentials.json");
		let storage = FileCredentialStorage::new(&path);

		fs::write(&path, "not json").unwrap();
		assert_eq!(storage.load().unwrap(), None);

		fs::write(&path, r#"{"access_token":"","refresh_token":"r"}"#).unwrap();
		assert_eq!(storage.load().unwrap(), None);
	}

	#[test]
	fn memory_storage_clones_share_state() {
		let storage = MemoryCredentialStorage::new();
		let observer = storage.clone();
		storage.save(&Credential::new("a", "r")).unwrap();
		assert!(observer.snapshot().is_some());
		storage.clear().unwrap();
		assert!(observer.snapshot().is_none());
	}

	#[test]
	fn credential_debug_hides_tokens() {
		let rendered = format!("{:?}", Credential::new("very-secret", "also-secret"));
		assert!(!rendered.contains("very-secret"));
		assert!(!rendered.contains("also-secret"));
	}
}
