//! Search request and multi-source hotel result types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Highest star rating an offer can carry.
pub const MAX_RATING: u8 = 5;

/// External booking source an offer was scraped from.
///
/// Unknown sources are kept verbatim so a backend that adds a new spider
/// does not break older clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
	BookingCom,
	Agoda,
	Other(String),
}

impl Source {
	pub fn as_str(&self) -> &str {
		match self {
			Source::BookingCom => "booking.com",
			Source::Agoda => "agoda",
			Source::Other(name) => name,
		}
	}
}

impl From<String> for Source {
	fn from(value: String) -> Self {
		match value.as_str() {
			"booking.com" => Source::BookingCom,
			"agoda" => Source::Agoda,
			_ => Source::Other(value),
		}
	}
}

impl From<&str> for Source {
	fn from(value: &str) -> Self {
		Source::from(value.to_string())
	}
}

impl From<Source> for String {
	fn from(value: Source) -> Self {
		match value {
			Source::Other(name) => name,
			known => known.as_str().to_string(),
		}
	}
}

impl fmt::Display for Source {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One hotel's price, rating and booking link from a single source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceOffer {
	pub source: Source,
	pub price: f64,
	#[serde(deserialize_with = "deserialize_rating")]
	pub rating: u8,
	#[serde(default)]
	pub image: String,
	#[serde(default)]
	pub booking_url: String,
}

/// A hotel with the offers every source returned for it, in server order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelResult {
	pub hotel_name: String,
	#[serde(default)]
	pub sources: Vec<SourceOffer>,
}

/// Body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
	pub city: String,
	pub min_price: u32,
	pub max_price: u32,
	pub star_rating: u8,
}

/// Success payload of `POST /search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
	#[serde(default)]
	pub result: Vec<HotelResult>,
}

/// Accepts integral ratings sent either as integers or as floats with no
/// fractional part (`4` and `4.0`), bounded to `0..=MAX_RATING`.
pub fn deserialize_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
	D: Deserializer<'de>,
{
	use serde::de::Error;

	let raw = f64::deserialize(deserializer)?;
	if raw.fract() != 0.0 || !(0.0..=f64::from(MAX_RATING)).contains(&raw) {
		return Err(D::Error::custom(format!("rating must be an integer between 0 and {MAX_RATING}, got {raw}")));
	}
	Ok(raw as u8)
}
