// SPDX-License-Identifier: Apache-2.0 OR MIT
use std::{error::Error as StdError, io::Error as IoError, path::PathBuf};
use thiserror::Error as ThisError;
use zip::result::ZipError;

/// Exit code used for every failed invocation.
pub const FAILURE_EXIT_CODE: u8 = 1;

#[derive(Debug, ThisError)]
pub enum Error {
	#[error("The <{0}> is missing")]
	MissingArgument(&'static str),
	#[error("{0}")]
	Parse(String),
	#[error("'{}' does not exist", .0.display())]
	PathNotFound(PathBuf),
	#[error("'{}' is not a directory", .0.display())]
	NotADirectory(PathBuf),
	#[error("'{}' is not a file", .0.display())]
	NotAFile(PathBuf),
	#[error(
		"the zip file '{}' must not target the input directory '{}'",
		output.display(),
		input.display()
	)]
	SelfInclusion { input: PathBuf, output: PathBuf },
	#[error("failed to {action} '{}'", path.display())]
	Io {
		action: &'static str,
		path: PathBuf,
		#[source]
		source: IoError,
	},
	#[error("zip codec failed on '{}'", path.display())]
	Codec {
		path: PathBuf,
		#[source]
		source: ZipError,
	},
	#[error("archive entry '{0}' attempted to escape the destination")]
	UnsafeEntry(String),
}

/// The coarse failure classes a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	MissingArgument,
	ParseError,
	PathNotFound,
	NotADirectory,
	ValidationError,
	IoFailure,
	CodecFailure,
}

impl Error {
	pub fn io(action: &'static str, path: impl Into<PathBuf>, source: IoError) -> Self {
		Self::Io {
			action,
			path: path.into(),
			source,
		}
	}

	pub fn codec(path: impl Into<PathBuf>, source: ZipError) -> Self {
		Self::Codec {
			path: path.into(),
			source,
		}
	}

	pub const fn kind(&self) -> ErrorKind {
		match self {
			Self::MissingArgument(_) => ErrorKind::MissingArgument,
			Self::Parse(_) => ErrorKind::ParseError,
			Self::PathNotFound(_) => ErrorKind::PathNotFound,
			Self::NotADirectory(_) | Self::NotAFile(_) => ErrorKind::NotADirectory,
			Self::SelfInclusion { .. } => ErrorKind::ValidationError,
			Self::Io { .. } => ErrorKind::IoFailure,
			Self::Codec { .. } | Self::UnsafeEntry(_) => ErrorKind::CodecFailure,
		}
	}

	pub const fn exit_code(&self) -> u8 {
		FAILURE_EXIT_CODE
	}

	/// Renders the error followed by every underlying cause on one line.
	pub fn chain(&self) -> String {
		let mut out = self.to_string();
		let mut source = StdError::source(self);
		while let Some(cause) = source {
			out.push_str(": ");
			out.push_str(&cause.to_string());
			source = cause.source();
		}
		out
	}
}

impl PartialEq for Error {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::MissingArgument(a), Self::MissingArgument(b)) => a == b,
			(Self::Parse(a), Self::Parse(b)) => a == b,
			(Self::PathNotFound(a), Self::PathNotFound(b))
			| (Self::NotADirectory(a), Self::NotADirectory(b))
			| (Self::NotAFile(a), Self::NotAFile(b)) => a == b,
			(
				Self::SelfInclusion { input, output },
				Self::SelfInclusion {
					input: other_input,
					output: other_output,
				},
			) => input == other_input && output == other_output,
			(
				Self::Io {
					action,
					path,
					source,
				},
				Self::Io {
					action: other_action,
					path: other_path,
					source: other_source,
				},
			) => {
				action == other_action
					&& path == other_path
					&& source.kind() == other_source.kind()
					&& source.raw_os_error() == other_source.raw_os_error()
					&& source.to_string() == other_source.to_string()
			}
			(
				Self::Codec { path, source },
				Self::Codec {
					path: other_path,
					source: other_source,
				},
			) => path == other_path && source.to_string() == other_source.to_string(),
			(Self::UnsafeEntry(a), Self::UnsafeEntry(b)) => a == b,
			_ => false,
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
	use super::{Error, ErrorKind, FAILURE_EXIT_CODE};
	use std::io::{Error as IoError, ErrorKind as IoErrorKind};

	#[test]
	fn missing_argument_message() {
		let err = Error::MissingArgument("zipFile");
		assert_eq!(err.to_string(), "The <zipFile> is missing");
		assert_eq!(err.kind(), ErrorKind::MissingArgument);
		assert_eq!(err.exit_code(), FAILURE_EXIT_CODE);
	}

	#[test]
	fn chain_includes_causes() {
		let err = Error::io(
			"create",
			"/nowhere/out.zip",
			IoError::new(IoErrorKind::PermissionDenied, "permission denied"),
		);
		assert_eq!(err.kind(), ErrorKind::IoFailure);
		assert_eq!(
			err.chain(),
			"failed to create '/nowhere/out.zip': permission denied"
		);
	}

	#[test]
	fn io_errors_compare_by_kind_and_text() {
		let a = Error::io("read", "a", IoError::new(IoErrorKind::NotFound, "gone"));
		let b = Error::io("read", "a", IoError::new(IoErrorKind::NotFound, "gone"));
		let c = Error::io("read", "a", IoError::new(IoErrorKind::Other, "gone"));
		assert_eq!(a, b);
		assert_ne!(a, c);
	}
}
