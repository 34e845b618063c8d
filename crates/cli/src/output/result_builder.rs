use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::output::data::TextView;
use crate::output::format::OutputFormat;
use crate::output::model::{CommandError, CommandResult};

/// Builder for constructing command results.
pub struct ResultBuilder<T: Serialize> {
	command: String,
	data: Option<T>,
	error: Option<CommandError>,
	start_time: Instant,
}

impl<T: Serialize> ResultBuilder<T> {
	pub fn started_at(command: impl Into<String>, start_time: Instant) -> Self {
		Self {
			command: command.into(),
			data: None,
			error: None,
			start_time,
		}
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn failure(mut self, error: CommandError) -> Self {
		self.error = Some(error);
		self
	}

	pub fn build(self) -> CommandResult<T> {
		let ok = self.error.is_none() && self.data.is_some();
		let duration_ms = self.start_time.elapsed().as_millis() as u64;

		CommandResult {
			ok,
			command: self.command,
			data: self.data,
			error: self.error,
			duration_ms: Some(duration_ms),
		}
	}
}

/// Print a command result in the specified format.
///
/// JSON always goes to stdout. Text goes to stdout on success and to
/// stderr on failure.
pub fn print_result<T: Serialize + TextView>(result: &CommandResult<T>, format: OutputFormat) -> Result<()> {
	match format {
		OutputFormat::Json => {
			let json = serde_json::to_string_pretty(result).context("failed to encode command result")?;
			writeln!(io::stdout().lock(), "{json}").context("failed to write to stdout")?;
		}
		OutputFormat::Text => {
			let rendered = render_text(result);
			if result.ok {
				io::stdout().lock().write_all(rendered.as_bytes()).context("failed to write to stdout")?;
			} else {
				io::stderr().lock().write_all(rendered.as_bytes()).context("failed to write to stderr")?;
			}
		}
	}
	Ok(())
}

/// Renders a result for humans: the payload on success, the error otherwise.
pub fn render_text<T: Serialize + TextView>(result: &CommandResult<T>) -> String {
	let mut out = String::new();
	if result.ok {
		if let Some(ref data) = result.data {
			data.render(&mut out);
		}
	} else if let Some(ref error) = result.error {
		out.push_str(&format!("{} [{}]: {}\n", "Error".red().bold(), error.code, error.message));
	}
	out
}
