//! Saved-offer (bookmark) types.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::search::deserialize_rating;

/// Server-assigned bookmark identifier.
///
/// Opaque to the client: the backend currently hands out integers, but the
/// id is only ever compared and echoed back in `DELETE /bookmarks/{id}`.
/// Ids compare by their text, and serialize in the form they were decoded
/// from, so `"007"` stays a string and `7` stays a number.
#[derive(Debug, Clone)]
pub struct BookmarkId {
	text: String,
	numeric: Option<u64>,
}

impl BookmarkId {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			text: id.into(),
			numeric: None,
		}
	}

	pub fn as_str(&self) -> &str {
		&self.text
	}
}

impl PartialEq for BookmarkId {
	fn eq(&self, other: &Self) -> bool {
		self.text == other.text
	}
}

impl Eq for BookmarkId {}

impl Hash for BookmarkId {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.text.hash(state);
	}
}

impl PartialOrd for BookmarkId {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for BookmarkId {
	fn cmp(&self, other: &Self) -> Ordering {
		self.text.cmp(&other.text)
	}
}

impl fmt::Display for BookmarkId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text)
	}
}

impl From<&str> for BookmarkId {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<u64> for BookmarkId {
	fn from(value: u64) -> Self {
		Self {
			text: value.to_string(),
			numeric: Some(value),
		}
	}
}

impl Serialize for BookmarkId {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self.numeric {
			Some(numeric) => serializer.serialize_u64(numeric),
			None => serializer.serialize_str(&self.text),
		}
	}
}

impl<'de> Deserialize<'de> for BookmarkId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum RawId {
			Number(u64),
			Text(String),
		}

		Ok(match RawId::deserialize(deserializer)? {
			RawId::Number(n) => BookmarkId::from(n),
			RawId::Text(s) => BookmarkId::new(s),
		})
	}
}

/// A persisted bookmark as returned by `GET /bookmarks` and `POST /bookmarks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
	pub id: BookmarkId,
	pub hotel_name: String,
	#[serde(default)]
	pub image: String,
	pub price: f64,
	#[serde(deserialize_with = "deserialize_rating")]
	pub rating: u8,
	#[serde(default)]
	pub booking_url: String,
}

/// Body of `POST /bookmarks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBookmark {
	pub hotel_name: String,
	pub image: String,
	pub price: f64,
	pub rating: u8,
	pub booking_url: String,
}
