use std::process::ExitCode;

use clap::Parser;
use hotelcmp_cli::{cli::Cli, commands, logging};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	match commands::run(cli).await {
		Ok(true) => ExitCode::SUCCESS,
		Ok(false) => ExitCode::FAILURE,
		Err(err) => {
			error!(target = "hotelcmp.cli", error = %format!("{err:#}"), "could not report result");
			ExitCode::FAILURE
		}
	}
}
