use hotelcmp::HotelClient;
use hotelcmp_protocol::BookmarkId;

use super::{CommandResult, require_session};
use crate::output::{BookmarkListData, CommandError, ErrorCode, RemovedData};

pub async fn list(client: &HotelClient) -> CommandResult<BookmarkListData> {
	require_session(client).await?;
	let bookmarks = client.bookmarks().load().await?;
	Ok(BookmarkListData { bookmarks })
}

pub async fn remove(client: &HotelClient, id: &str) -> CommandResult<RemovedData> {
	let id = id.trim();
	if id.is_empty() {
		return Err(CommandError::new(ErrorCode::InvalidInput, "bookmark id must not be empty"));
	}
	require_session(client).await?;
	client.bookmarks().remove(&BookmarkId::new(id)).await?;
	Ok(RemovedData { id: id.to_string() })
}
