//! Bookmark collection backed by a local cache.
//!
//! The cache mirrors the server: it is replaced wholesale by [`load`],
//! and changed by [`add`] and [`remove`] only after the server confirmed
//! the change. Entries are unique by id.
//!
//! [`load`]: BookmarkCollection::load
//! [`add`]: BookmarkCollection::add
//! [`remove`]: BookmarkCollection::remove

use std::collections::HashSet;

use hotelcmp_protocol::{Bookmark, BookmarkId, HotelResult, SourceOffer};
use parking_lot::Mutex;
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::gateway::Gateway;
use crate::offers::{best_deal, to_bookmark_payload};

pub(crate) const BOOKMARKS_PATH: &str = "/bookmarks";

#[derive(Debug, Default)]
struct Cache {
	entries: Vec<Bookmark>,
	loaded: bool,
}

impl Cache {
	fn upsert(&mut self, bookmark: Bookmark) {
		match self.entries.iter_mut().find(|b| b.id == bookmark.id) {
			Some(existing) => *existing = bookmark,
			None => self.entries.push(bookmark),
		}
	}
}

/// The signed-in user's bookmarks.
#[derive(Debug)]
pub struct BookmarkCollection {
	gateway: Gateway,
	cache: Mutex<Cache>,
}

impl BookmarkCollection {
	pub fn new(gateway: Gateway) -> Self {
		Self {
			gateway,
			cache: Mutex::new(Cache::default()),
		}
	}

	/// Replaces the cache with the server's current set.
	pub async fn load(&self) -> Result<Vec<Bookmark>> {
		let fetched: Vec<Bookmark> = self.gateway.get(BOOKMARKS_PATH).await?;

		let mut seen = HashSet::new();
		let entries: Vec<Bookmark> = fetched.into_iter().filter(|b| seen.insert(b.id.clone())).collect();

		let mut cache = self.cache.lock();
		cache.entries = entries.clone();
		cache.loaded = true;
		debug!(target = "hotelcmp.bookmarks", count = entries.len(), "bookmarks loaded");
		Ok(entries)
	}

	/// Bookmarks the hotel's best deal.
	///
	/// # Errors
	///
	/// [`Error::NoOffersAvailable`] when the hotel has no offers (nothing is
	/// sent), or any gateway error. The cache is unchanged on failure.
	pub async fn add(&self, hotel: &HotelResult) -> Result<Bookmark> {
		let offer = best_deal(hotel)?;
		self.add_offer(hotel, offer).await
	}

	/// Bookmarks a specific offer of the hotel.
	pub async fn add_offer(&self, hotel: &HotelResult, offer: &SourceOffer) -> Result<Bookmark> {
		let payload = to_bookmark_payload(hotel, offer);
		let created: Bookmark = self.gateway.post(BOOKMARKS_PATH, &payload).await?;

		info!(target = "hotelcmp.bookmarks", id = %created.id, hotel = %created.hotel_name, "bookmark added");
		self.cache.lock().upsert(created.clone());
		Ok(created)
	}

	/// Deletes a bookmark on the server and drops it from the cache.
	///
	/// Removing an id the server no longer knows (404) succeeds, and an id
	/// absent from the cache leaves the cache unchanged.
	///
	/// # Errors
	///
	/// [`Error::InvalidBookmarkId`] for an empty, `.` or `..` id (nothing is
	/// sent), or any gateway error other than 404.
	pub async fn remove(&self, id: &BookmarkId) -> Result<()> {
		let path = bookmark_path(id)?;
		match self.gateway.delete(&path).await {
			Ok(()) => {}
			Err(Error::RequestFailed { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
				debug!(target = "hotelcmp.bookmarks", %id, "bookmark already gone on server");
			}
			Err(err) => return Err(err),
		}

		let mut cache = self.cache.lock();
		let before = cache.entries.len();
		cache.entries.retain(|b| &b.id != id);
		if cache.entries.len() < before {
			info!(target = "hotelcmp.bookmarks", %id, "bookmark removed");
		}
		Ok(())
	}

	/// Snapshot of the cache in display order.
	pub fn bookmarks(&self) -> Vec<Bookmark> {
		self.cache.lock().entries.clone()
	}

	/// True once a load succeeded; before that the cache is not authoritative.
	pub fn is_loaded(&self) -> bool {
		self.cache.lock().loaded
	}

	pub fn len(&self) -> usize {
		self.cache.lock().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cache.lock().entries.is_empty()
	}
}

/// Path of one bookmark, with the id encoded as a single segment.
fn bookmark_path(id: &BookmarkId) -> Result<String> {
	match id.as_str() {
		"" | "." | ".." => Err(Error::InvalidBookmarkId(id.to_string())),
		raw => Ok(format!("{BOOKMARKS_PATH}/{}", urlencoding::encode(raw))),
	}
}
