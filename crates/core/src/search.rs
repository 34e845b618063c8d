//! Search session: criteria validation and the search state machine.
//!
//! States move `Idle -> Searching -> {Succeeded, Failed}` and back to
//! `Searching` on every new search. Each search takes a generation number
//! when it is issued; a response is applied only if its generation is
//! still the latest when it completes, so a slow earlier search can never
//! overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

use hotelcmp_protocol::{HotelResult, MAX_RATING, SearchRequest, SearchResponse};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::gateway::Gateway;
use crate::offers::normalize_results;

pub(crate) const SEARCH_PATH: &str = "/search";

/// Star rating used when the caller does not pick one.
pub const DEFAULT_STAR_RATING: u8 = MAX_RATING;

/// User-entered search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
	pub city: String,
	pub min_price: u32,
	pub max_price: u32,
	pub star_rating: u8,
}

impl SearchCriteria {
	pub fn new(city: impl Into<String>, min_price: u32, max_price: u32) -> Self {
		Self {
			city: city.into(),
			min_price,
			max_price,
			star_rating: DEFAULT_STAR_RATING,
		}
	}

	pub fn with_star_rating(mut self, star_rating: u8) -> Self {
		self.star_rating = star_rating;
		self
	}

	/// Checks the criteria without touching the network.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidCriteria`] for a blank city, an inverted
	/// price range or a star rating outside `1..=5`.
	pub fn validate(&self) -> Result<()> {
		if self.city.trim().is_empty() {
			return Err(Error::InvalidCriteria("city must not be empty".into()));
		}
		if self.min_price > self.max_price {
			return Err(Error::InvalidCriteria(format!(
				"minimum price {} exceeds maximum price {}",
				self.min_price, self.max_price
			)));
		}
		if !(1..=MAX_RATING).contains(&self.star_rating) {
			return Err(Error::InvalidCriteria(format!(
				"star rating must be between 1 and {MAX_RATING}, got {}",
				self.star_rating
			)));
		}
		Ok(())
	}

	pub fn to_request(&self) -> SearchRequest {
		SearchRequest {
			city: self.city.trim().to_string(),
			min_price: self.min_price,
			max_price: self.max_price,
			star_rating: self.star_rating,
		}
	}
}

/// Observable state of a [`SearchSession`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
	#[default]
	Idle,
	Searching,
	Succeeded(Vec<HotelResult>),
	Failed(Error),
}

impl SearchState {
	pub fn is_searching(&self) -> bool {
		matches!(self, SearchState::Searching)
	}

	pub fn results(&self) -> Option<&[HotelResult]> {
		match self {
			SearchState::Succeeded(results) => Some(results),
			_ => None,
		}
	}

	pub fn error(&self) -> Option<&Error> {
		match self {
			SearchState::Failed(err) => Some(err),
			_ => None,
		}
	}
}

/// What happened to a search that completed successfully.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
	/// The results are now the session's state.
	Applied(Vec<HotelResult>),
	/// A newer search was issued first; the response was discarded.
	Superseded,
}

/// Runs searches through the gateway and exposes the latest result.
///
/// `search` takes `&self`, so several searches may be in flight at once;
/// only the most recently issued one may change the state.
#[derive(Debug)]
pub struct SearchSession {
	gateway: Gateway,
	generation: AtomicU64,
	state: Mutex<SearchState>,
}

impl SearchSession {
	pub fn new(gateway: Gateway) -> Self {
		Self {
			gateway,
			generation: AtomicU64::new(0),
			state: Mutex::new(SearchState::Idle),
		}
	}

	pub fn state(&self) -> SearchState {
		self.state.lock().clone()
	}

	/// Validates the criteria, then issues `POST /search`.
	///
	/// # Errors
	///
	/// [`Error::InvalidCriteria`] is returned before any request and leaves
	/// the state untouched. Gateway errors are recorded as
	/// [`SearchState::Failed`] unless a newer search superseded this one, in
	/// which case they are returned without changing the state.
	pub async fn search(&self, criteria: &SearchCriteria) -> Result<SearchOutcome> {
		criteria.validate()?;
		let request = criteria.to_request();

		let generation = {
			let mut state = self.state.lock();
			*state = SearchState::Searching;
			self.generation.fetch_add(1, Ordering::SeqCst) + 1
		};
		debug!(target = "hotelcmp.search", generation, city = %request.city, "search issued");

		let result = self
			.gateway
			.post::<_, SearchResponse>(SEARCH_PATH, &request)
			.await
			.map(|response| normalize_results(response.result));

		let mut state = self.state.lock();
		if self.generation.load(Ordering::SeqCst) != generation {
			debug!(target = "hotelcmp.search", generation, "discarding superseded response");
			return result.map(|_| SearchOutcome::Superseded);
		}

		match result {
			Ok(hotels) => {
				info!(target = "hotelcmp.search", generation, hotels = hotels.len(), "search applied");
				*state = SearchState::Succeeded(hotels.clone());
				Ok(SearchOutcome::Applied(hotels))
			}
			Err(err) => {
				info!(target = "hotelcmp.search", generation, error = %err, "search failed");
				*state = SearchState::Failed(err.clone());
				Err(err)
			}
		}
	}
}
