use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use hotelcmp::{ClientConfig, DEFAULT_BASE_URL, default_credentials_path};
use url::Url;

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "hotelcmp")]
#[command(about = "Compare hotel prices across booking sites")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Backend base URL
	#[arg(long, global = true, env = "HOTELCMP_BASE_URL", default_value = DEFAULT_BASE_URL)]
	pub base_url: Url,

	/// Per-request timeout in seconds
	#[arg(long, global = true, env = "HOTELCMP_TIMEOUT_SECS", default_value_t = 150)]
	pub timeout_secs: u64,

	/// Credential file (defaults to $XDG_CONFIG_HOME/hotelcmp/credentials.json)
	#[arg(long, global = true, env = "HOTELCMP_CREDENTIALS", value_name = "FILE")]
	pub credentials: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

impl Cli {
	pub fn client_config(&self) -> ClientConfig {
		ClientConfig::new(self.base_url.clone())
			.with_timeout(Duration::from_secs(self.timeout_secs))
			.with_credentials_path(self.credentials.clone().unwrap_or_else(default_credentials_path))
	}
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Log in and store the session
	Login {
		#[arg(long)]
		email: String,
		#[arg(long, env = "HOTELCMP_PASSWORD", hide_env_values = true)]
		password: String,
	},

	/// Create an account and store the session
	Register {
		#[arg(long)]
		email: String,
		#[arg(long)]
		username: String,
		#[arg(long, env = "HOTELCMP_PASSWORD", hide_env_values = true)]
		password: String,
	},

	/// Forget the stored session
	Logout,

	/// Verify the stored session and show who is logged in
	Whoami,

	/// Search hotels in a city and show the best deal per hotel
	Search {
		#[arg(long)]
		city: String,
		#[arg(long)]
		min_price: u32,
		#[arg(long)]
		max_price: u32,
		/// Star rating (1-5)
		#[arg(long, default_value_t = hotelcmp::search::DEFAULT_STAR_RATING)]
		stars: u8,
		/// Bookmark the best deal of the hotel at this position (1-based)
		#[arg(long, value_name = "INDEX")]
		bookmark: Option<usize>,
	},

	/// Manage bookmarks
	#[command(alias = "bm")]
	Bookmarks {
		#[command(subcommand)]
		action: BookmarksAction,
	},
}

impl Commands {
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Login { .. } => "login",
			Commands::Register { .. } => "register",
			Commands::Logout => "logout",
			Commands::Whoami => "whoami",
			Commands::Search { .. } => "search",
			Commands::Bookmarks {
				action: BookmarksAction::List,
			} => "bookmarks.list",
			Commands::Bookmarks {
				action: BookmarksAction::Remove { .. },
			} => "bookmarks.remove",
		}
	}
}

#[derive(Subcommand, Debug)]
pub enum BookmarksAction {
	/// List saved bookmarks
	#[command(alias = "ls")]
	List,
	/// Delete a bookmark by id
	#[command(alias = "rm")]
	Remove { id: String },
}
