//! Session-aware client for a multi-source hotel price comparison backend.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ HotelClient                                   │
//! │   Auth · SearchSession · BookmarkCollection   │
//! ├───────────────────────────────────────────────┤
//! │ Gateway (bearer, 401 → session teardown)      │
//! ├──────────────────────┬────────────────────────┤
//! │ SessionStore         │ Transport              │
//! │  └ CredentialStorage │  ├ ReqwestTransport    │
//! │                      │  └ FakeTransport       │
//! └──────────────────────┴────────────────────────┘
//! ```
//!
//! The [`SessionStore`] is the single owner of the credential. Every backend
//! call goes through the [`Gateway`], which turns an unauthorized answer into
//! [`Error::SessionExpired`] after clearing the session. Offer selection
//! lives in [`offers`], so the tie-break rule is defined once.
//!
//! # Example
//!
//! ```ignore
//! let client = HotelClient::new(&ClientConfig::default())?;
//! client.init().await;
//! client.auth().login("me@example.com", "secret").await?;
//!
//! let criteria = SearchCriteria::new("Dhaka", 1000, 5000).with_star_rating(4);
//! if let SearchOutcome::Applied(hotels) = client.search().search(&criteria).await? {
//!     let bookmark = client.bookmarks().add(&hotels[0]).await?;
//!     println!("saved {}", bookmark.id);
//! }
//! ```

pub mod auth;
pub mod bookmarks;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod offers;
pub mod search;
pub mod session;
pub mod storage;
pub mod transport;

pub use auth::Auth;
pub use bookmarks::BookmarkCollection;
pub use client::HotelClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, default_credentials_path};
pub use error::{Error, Result};
pub use gateway::Gateway;
pub use offers::{best_deal, normalize_results, offer_for, to_bookmark_payload};
pub use search::{SearchCriteria, SearchOutcome, SearchSession, SearchState};
pub use session::{SessionStatus, SessionStore};
pub use storage::{Credential, CredentialStorage, FileCredentialStorage, MemoryCredentialStorage};
pub use transport::{FakeTransport, FakeTransportBuilder, FakeTransportController, ReqwestTransport, Transport};

pub use hotelcmp_protocol as protocol;
