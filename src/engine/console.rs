//! Operation transcript shown under each visualization.

use log::{error, info, warn};

/// Severity of a transcript line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleLevel {
	/// Plain progress.
	Info,
	/// An operation completed.
	Success,
	/// Not found, duplicate, empty or overflow.
	Warning,
	/// Something the user cannot fix by retrying.
	Error,
}

impl ConsoleLevel {
	/// CSS class suffix used by the transcript view.
	pub fn class(self) -> &'static str {
		match self {
			ConsoleLevel::Info => "info",
			ConsoleLevel::Success => "success",
			ConsoleLevel::Warning => "warning",
			ConsoleLevel::Error => "error",
		}
	}
}

/// One transcript entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleLine {
	/// Severity, also picks the CSS class.
	pub level: ConsoleLevel,
	/// Rendered text.
	pub text: String,
}

/// Append-only operation transcript, independent of step narration.
#[derive(Clone, Debug, Default)]
pub struct ConsoleLog {
	lines: Vec<ConsoleLine>,
}

impl ConsoleLog {
	/// Empty transcript.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a line and mirror it to the log facade.
	pub fn push(&mut self, level: ConsoleLevel, text: impl Into<String>) {
		let text = text.into();
		match level {
			ConsoleLevel::Info | ConsoleLevel::Success => info!("{text}"),
			ConsoleLevel::Warning => warn!("{text}"),
			ConsoleLevel::Error => error!("{text}"),
		}
		self.lines.push(ConsoleLine { level, text });
	}

	/// Lines oldest first.
	pub fn lines(&self) -> &[ConsoleLine] {
		&self.lines
	}

	/// Number of lines.
	pub fn len(&self) -> usize {
		self.lines.len()
	}

	/// Whether nothing has been logged since the last clear.
	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	/// Drop every line.
	pub fn clear(&mut self) {
		self.lines.clear();
	}
}
