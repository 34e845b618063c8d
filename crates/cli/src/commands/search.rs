use hotelcmp::{HotelClient, SearchCriteria, SearchOutcome};
use tracing::warn;

use super::{CommandResult, require_session};
use crate::output::{CommandError, ErrorCode, HotelSummary, SearchData};

#[derive(Debug)]
pub struct SearchArgs {
	pub city: String,
	pub min_price: u32,
	pub max_price: u32,
	pub stars: u8,
	/// 1-based hotel position to bookmark.
	pub bookmark: Option<usize>,
}

pub async fn run(client: &HotelClient, args: SearchArgs) -> CommandResult<SearchData> {
	let criteria = SearchCriteria::new(args.city, args.min_price, args.max_price).with_star_rating(args.stars);
	criteria.validate()?;
	if args.bookmark == Some(0) {
		return Err(CommandError::new(ErrorCode::InvalidInput, "bookmark positions start at 1"));
	}

	require_session(client).await?;

	let hotels = match client.search().search(&criteria).await? {
		SearchOutcome::Applied(hotels) => hotels,
		SearchOutcome::Superseded => {
			warn!(target = "hotelcmp.cli", "search superseded");
			return Err(CommandError::new(ErrorCode::InternalError, "search was superseded"));
		}
	};

	let bookmarked = match args.bookmark {
		Some(position) => {
			let hotel = hotels.get(position - 1).ok_or_else(|| {
				CommandError::new(
					ErrorCode::InvalidInput,
					format!("no hotel at position {position}; the search returned {}", hotels.len()),
				)
			})?;
			Some(client.bookmarks().add(hotel).await?)
		}
		None => None,
	};

	Ok(SearchData {
		city: criteria.to_request().city,
		hotels: hotels.iter().enumerate().map(|(i, hotel)| HotelSummary::new(i + 1, hotel)).collect(),
		bookmarked,
	})
}
