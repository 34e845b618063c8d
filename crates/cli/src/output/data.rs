use std::fmt::Write;

use colored::Colorize;
use hotelcmp_protocol::{Bookmark, HotelResult, Identity, SourceOffer};
use serde::Serialize;

/// Human-readable rendering of a command payload.
pub trait TextView {
	fn render(&self, out: &mut String);
}

/// Result data for login, register and whoami.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
	pub authenticated: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
}

impl SessionData {
	pub fn anonymous() -> Self {
		Self {
			authenticated: false,
			email: None,
			username: None,
		}
	}

	pub fn from_identity(identity: Option<Identity>) -> Self {
		match identity {
			Some(identity) => Self {
				authenticated: true,
				email: Some(identity.email),
				username: identity.username,
			},
			None => Self {
				authenticated: true,
				email: None,
				username: None,
			},
		}
	}
}

impl TextView for SessionData {
	fn render(&self, out: &mut String) {
		if !self.authenticated {
			let _ = writeln!(out, "Not logged in");
			return;
		}
		let who = self.email.as_deref().unwrap_or("unknown user");
		match &self.username {
			Some(username) => {
				let _ = writeln!(out, "Logged in as {} ({username})", who.bold());
			}
			None => {
				let _ = writeln!(out, "Logged in as {}", who.bold());
			}
		}
	}
}

/// Result data for logout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutData {
	pub logged_out: bool,
}

impl TextView for LogoutData {
	fn render(&self, out: &mut String) {
		let _ = writeln!(out, "Logged out");
	}
}

/// One hotel in a search listing with its chosen offer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSummary {
	/// 1-based position, as accepted by `search --bookmark`.
	pub index: usize,
	pub hotel_name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub best_deal: Option<SourceOffer>,
	pub offers: Vec<SourceOffer>,
}

impl HotelSummary {
	pub fn new(index: usize, hotel: &HotelResult) -> Self {
		Self {
			index,
			hotel_name: hotel.hotel_name.clone(),
			best_deal: hotelcmp::best_deal(hotel).ok().cloned(),
			offers: hotel.sources.clone(),
		}
	}
}

/// Result data for search.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
	pub city: String,
	pub hotels: Vec<HotelSummary>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bookmarked: Option<Bookmark>,
}

impl TextView for SearchData {
	fn render(&self, out: &mut String) {
		if self.hotels.is_empty() {
			let _ = writeln!(out, "No hotels found in {}", self.city);
		}
		for hotel in &self.hotels {
			let _ = writeln!(out, "{:>3}. {}", hotel.index, hotel.hotel_name.bold());
			for offer in &hotel.offers {
				let is_best = hotel.best_deal.as_ref().is_some_and(|best| best.source == offer.source);
				let line = format!(
					"{:<12} {:>10}  {}★  {}",
					offer.source.as_str(),
					format_price(offer.price),
					offer.rating,
					offer.booking_url
				);
				if is_best {
					let _ = writeln!(out, "     {} {}", line.green(), "best deal".green().bold());
				} else {
					let _ = writeln!(out, "     {line}");
				}
			}
			if hotel.offers.is_empty() {
				let _ = writeln!(out, "     {}", "no offers".dimmed());
			}
		}
		if let Some(bookmark) = &self.bookmarked {
			let _ = writeln!(
				out,
				"Bookmarked {} at {} (id {})",
				bookmark.hotel_name,
				format_price(bookmark.price),
				bookmark.id
			);
		}
	}
}

/// Result data for bookmarks list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkListData {
	pub bookmarks: Vec<Bookmark>,
}

impl TextView for BookmarkListData {
	fn render(&self, out: &mut String) {
		if self.bookmarks.is_empty() {
			let _ = writeln!(out, "No bookmarks yet");
			return;
		}
		for bookmark in &self.bookmarks {
			let _ = writeln!(
				out,
				"{:>6}  {}  {}  {}★  {}",
				bookmark.id,
				bookmark.hotel_name.bold(),
				format_price(bookmark.price),
				bookmark.rating,
				bookmark.booking_url
			);
		}
	}
}

/// Result data for bookmarks remove.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedData {
	pub id: String,
}

impl TextView for RemovedData {
	fn render(&self, out: &mut String) {
		let _ = writeln!(out, "Removed bookmark {}", self.id);
	}
}

/// Whole prices print without decimals.
pub fn format_price(price: f64) -> String {
	if price.fract() == 0.0 {
		format!("{price:.0}")
	} else {
		format!("{price:.2}")
	}
}
