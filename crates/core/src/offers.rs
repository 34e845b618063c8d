//! Offer normalization and best-deal selection.
//!
//! The tie-break rule lives here and nowhere else: the lowest price wins,
//! and among equal prices the offer encountered first in the hotel's
//! source sequence wins.

use std::collections::HashSet;

use hotelcmp_protocol::{HotelResult, NewBookmark, Source, SourceOffer};
use tracing::debug;

use crate::error::{Error, Result};

/// Returns the lowest-priced offer, first occurrence winning ties.
///
/// # Errors
///
/// Returns [`Error::NoOffersAvailable`] when the hotel has no sources.
pub fn best_deal(hotel: &HotelResult) -> Result<&SourceOffer> {
	let mut offers = hotel.sources.iter();
	let mut best = offers.next().ok_or_else(|| Error::NoOffersAvailable {
		hotel: hotel.hotel_name.clone(),
	})?;
	for offer in offers {
		if offer.price < best.price {
			best = offer;
		}
	}
	Ok(best)
}

/// Maps a hotel and its chosen offer to the bookmark-creation body.
pub fn to_bookmark_payload(hotel: &HotelResult, offer: &SourceOffer) -> NewBookmark {
	NewBookmark {
		hotel_name: hotel.hotel_name.clone(),
		image: offer.image.clone(),
		price: offer.price,
		rating: offer.rating,
		booking_url: offer.booking_url.clone(),
	}
}

/// Looks up one source's offer for side-by-side comparison.
pub fn offer_for<'a>(hotel: &'a HotelResult, source: &Source) -> Option<&'a SourceOffer> {
	hotel.sources.iter().find(|offer| &offer.source == source)
}

/// Enforces one offer per source (first occurrence kept) and fixes
/// protocol-relative image URLs.
pub fn normalize_hotel(mut hotel: HotelResult) -> HotelResult {
	let mut seen = HashSet::new();
	let before = hotel.sources.len();
	hotel.sources.retain(|offer| seen.insert(offer.source.clone()));
	if hotel.sources.len() < before {
		debug!(
			target = "hotelcmp.search",
			hotel = %hotel.hotel_name,
			dropped = before - hotel.sources.len(),
			"dropped duplicate source offers"
		);
	}
	for offer in &mut hotel.sources {
		normalize_image_url(&mut offer.image);
	}
	hotel
}

/// Normalizes every hotel while preserving server order.
pub fn normalize_results(hotels: Vec<HotelResult>) -> Vec<HotelResult> {
	hotels.into_iter().map(normalize_hotel).collect()
}

fn normalize_image_url(url: &mut String) {
	if url.starts_with("//") {
		url.insert_str(0, "https:");
	}
}
