// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::{
	error::{Error, FAILURE_EXIT_CODE},
	invocation::Operation,
};

/// Exit code for a completed operation or an explicit help request.
pub const SUCCESS_EXIT_CODE: u8 = 0;
/// Exit code after printing the top-level usage summary.
pub const USAGE_EXIT_CODE: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	/// Goes to standard output.
	Info,
	/// Goes to standard error.
	Error,
}

/// Everything a single run has to say to the console, and how the process
/// should exit afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
	pub message: String,
	pub severity: Severity,
	pub exit_code: u8,
}

impl Outcome {
	pub fn success(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			severity: Severity::Info,
			exit_code: SUCCESS_EXIT_CODE,
		}
	}

	pub fn help(text: impl Into<String>) -> Self {
		Self::success(text)
	}

	pub fn usage(text: impl Into<String>) -> Self {
		Self {
			message: text.into(),
			severity: Severity::Info,
			exit_code: USAGE_EXIT_CODE,
		}
	}

	pub fn failure(operation: Option<Operation>, err: &Error) -> Self {
		let message = match operation {
			Some(operation) => format!("failed to {operation}: {}", err.chain()),
			None => err.chain(),
		};
		Self {
			message,
			severity: Severity::Error,
			exit_code: err.exit_code(),
		}
	}

	#[inline]
	pub const fn is_success(&self) -> bool {
		self.exit_code == SUCCESS_EXIT_CODE
	}
}
