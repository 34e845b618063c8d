mod auth;
mod bookmarks;
mod search;

use std::time::Instant;

use hotelcmp::{HotelClient, SessionStatus};
use serde::Serialize;
use tracing::{debug, error};

use crate::cli::{BookmarksAction, Cli, Commands};
use crate::output::{CommandError, OutputFormat, ResultBuilder, SessionData, TextView, print_result};

type CommandResult<T> = std::result::Result<T, CommandError>;

/// Runs the parsed command and prints its envelope.
///
/// Returns whether the command succeeded; `Err` only when the envelope
/// itself could not be written.
pub async fn run(cli: Cli) -> anyhow::Result<bool> {
	let emitter = Emitter {
		command: cli.command.name(),
		format: cli.format,
		start: Instant::now(),
	};

	let config = cli.client_config();
	let client = match HotelClient::new(&config) {
		Ok(client) => client,
		Err(err) => return emitter.emit::<SessionData>(Err(err.into())),
	};

	dispatch(&client, cli.command, &emitter).await
}

async fn dispatch(client: &HotelClient, command: Commands, emitter: &Emitter) -> anyhow::Result<bool> {
	match command {
		Commands::Login { email, password } => emitter.emit(auth::login(client, &email, &password).await),
		Commands::Register { email, username, password } => {
			emitter.emit(auth::register(client, &email, &username, &password).await)
		}
		Commands::Logout => emitter.emit(auth::logout(client)),
		Commands::Whoami => emitter.emit(auth::whoami(client).await),
		Commands::Search {
			city,
			min_price,
			max_price,
			stars,
			bookmark,
		} => emitter.emit(
			search::run(
				client,
				search::SearchArgs {
					city,
					min_price,
					max_price,
					stars,
					bookmark,
				},
			)
			.await,
		),
		Commands::Bookmarks { action } => match action {
			BookmarksAction::List => emitter.emit(bookmarks::list(client).await),
			BookmarksAction::Remove { id } => emitter.emit(bookmarks::remove(client, &id).await),
		},
	}
}

/// Restores the stored session; commands that need a login call this first.
pub(crate) async fn require_session(client: &HotelClient) -> CommandResult<()> {
	match client.init().await {
		SessionStatus::Authenticated => Ok(()),
		status => {
			debug!(target = "hotelcmp.cli", ?status, "no usable session");
			Err(hotelcmp::Error::Unauthenticated.into())
		}
	}
}

struct Emitter {
	command: &'static str,
	format: OutputFormat,
	start: Instant,
}

impl Emitter {
	fn emit<T: Serialize + TextView>(&self, outcome: CommandResult<T>) -> anyhow::Result<bool> {
		let builder = ResultBuilder::started_at(self.command, self.start);
		let result = match outcome {
			Ok(data) => builder.data(data).build(),
			Err(err) => {
				error!(target = "hotelcmp.cli", command = self.command, code = %err.code, "command failed");
				builder.failure(err).build()
			}
		};
		print_result(&result, self.format)?;
		Ok(result.ok)
	}
}
