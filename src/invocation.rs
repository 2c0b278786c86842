// SPDX-License-Identifier: Apache-2.0 OR MIT
use std::{fmt, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
	Compress,
	Extract,
	List,
}

impl Operation {
	/// The verb used when describing this operation to a user.
	pub const fn verb(self) -> &'static str {
		match self {
			Self::Compress => "compress",
			Self::Extract => "extract",
			Self::List => "list",
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.verb())
	}
}

/// One parsed command line: what to do, and the raw paths it was given.
///
/// Paths are kept exactly as typed; defaults and absolutization happen in
/// [`crate::paths::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
	pub operation: Operation,
	pub input: Option<PathBuf>,
	pub output: Option<PathBuf>,
}

impl Invocation {
	pub fn new(operation: Operation) -> Self {
		Self {
			operation,
			input: None,
			output: None,
		}
	}

	pub fn input(mut self, input: impl Into<PathBuf>) -> Self {
		self.input = Some(input.into());
		self
	}

	pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
		self.output = Some(output.into());
		self
	}
}
