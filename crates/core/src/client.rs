//! Client facade wiring the components around one session.

use std::sync::Arc;

use tracing::debug;

use crate::auth::Auth;
use crate::bookmarks::BookmarkCollection;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::gateway::Gateway;
use crate::search::SearchSession;
use crate::session::{SessionStatus, SessionStore};
use crate::storage::{CredentialStorage, FileCredentialStorage};
use crate::transport::{ReqwestTransport, Transport};

/// Session store, gateway and the services built on them.
///
/// All services share the same [`SessionStore`], so a session expiry seen
/// by one of them is visible to the others immediately.
#[derive(Debug)]
pub struct HotelClient {
	gateway: Gateway,
	auth: Auth,
	search: SearchSession,
	bookmarks: BookmarkCollection,
}

impl HotelClient {
	/// Builds a client that talks HTTP to `config.base_url` and keeps its
	/// credential in `config.credentials_path`.
	///
	/// # Errors
	///
	/// Returns [`Error::Config`] when the HTTP client cannot be built.
	pub fn new(config: &ClientConfig) -> Result<Self> {
		let transport = ReqwestTransport::new(config.base_url.clone(), config.timeout)
			.map_err(|e| Error::Config(format!("cannot build HTTP client: {e}")))?;
		debug!(target = "hotelcmp.session", base_url = %transport.base_url(), credentials = %config.credentials_path.display(), "client configured");
		Ok(Self::with_parts(
			Arc::new(transport),
			Box::new(FileCredentialStorage::new(&config.credentials_path)),
		))
	}

	/// Builds a client over any transport and credential storage.
	pub fn with_parts(transport: Arc<dyn Transport>, storage: Box<dyn CredentialStorage>) -> Self {
		let session = Arc::new(SessionStore::new(storage));
		let gateway = Gateway::new(transport, session);
		Self {
			auth: Auth::new(gateway.clone()),
			search: SearchSession::new(gateway.clone()),
			bookmarks: BookmarkCollection::new(gateway.clone()),
			gateway,
		}
	}

	/// Restores the persisted session, verifying it once with the backend.
	pub async fn init(&self) -> SessionStatus {
		self.session().restore(&self.gateway).await
	}

	pub fn session(&self) -> &SessionStore {
		self.gateway.session()
	}

	pub fn gateway(&self) -> &Gateway {
		&self.gateway
	}

	pub fn auth(&self) -> &Auth {
		&self.auth
	}

	pub fn search(&self) -> &SearchSession {
		&self.search
	}

	pub fn bookmarks(&self) -> &BookmarkCollection {
		&self.bookmarks
	}
}
