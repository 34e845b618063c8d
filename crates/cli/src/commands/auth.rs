//! Session commands: login, register, logout and whoami.

use hotelcmp::{HotelClient, SessionStatus};

use super::CommandResult;
use crate::output::{LogoutData, SessionData};

pub async fn login(client: &HotelClient, email: &str, password: &str) -> CommandResult<SessionData> {
	let identity = client.auth().login(email, password).await?;
	Ok(SessionData::from_identity(Some(identity)))
}

pub async fn register(client: &HotelClient, email: &str, username: &str, password: &str) -> CommandResult<SessionData> {
	let identity = client.auth().register(email, username, password).await?;
	Ok(SessionData::from_identity(Some(identity)))
}

/// Local only; succeeds when nothing was stored.
pub fn logout(client: &HotelClient) -> CommandResult<LogoutData> {
	client.auth().logout()?;
	Ok(LogoutData { logged_out: true })
}

/// Verifies the stored credential; a rejected one is erased.
pub async fn whoami(client: &HotelClient) -> CommandResult<SessionData> {
	Ok(match client.init().await {
		SessionStatus::Authenticated => SessionData::from_identity(client.session().identity()),
		SessionStatus::Anonymous | SessionStatus::Loading => SessionData::anonymous(),
	})
}
