// SPDX-License-Identifier: Apache-2.0 OR MIT
#![forbid(unsafe_code)]
#![warn(
	clippy::perf,
	clippy::complexity,
	clippy::style,
	clippy::correctness,
	clippy::missing_const_for_fn
)]
#![allow(clippy::tabs_in_doc_comments)]

//! This crate compresses a directory tree into a zip archive and extracts a
//! zip archive back into a directory. The archive format itself is handled by
//! the [`zip`] crate; this crate owns resolving and validating the paths
//! around it.
//!
//! Every run goes through the same steps: resolve the paths of an
//! [`Invocation`], create the directory the operation writes into, then hand
//! off to the codec. The result is an [`Outcome`] (or an [`Error`]) that the
//! caller prints.
//!
//! # Examples
//!
//! ## Compressing the current directory
//! ```rust,no_run
//! use zipper::{pipeline, Invocation, Operation, Result};
//!
//! fn main() -> Result<()> {
//! 	let cwd = std::env::current_dir().expect("no working directory");
//! 	let invocation = Invocation::new(Operation::Compress).output("../backup.zip");
//! 	let outcome = pipeline::run(&invocation, &cwd)?;
//! 	println!("{}", outcome.message);
//! 	Ok(())
//! }
//! ```
//!
//! ## Extracting an archive
//! ```rust,no_run
//! use zipper::{codec, Result};
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//! 	let entries = codec::extract(Path::new("backup.zip"), Path::new("restored"))?;
//! 	println!("extracted {entries} entries");
//! 	Ok(())
//! }
//! ```
//!
//! # License
//!
//! `zipper` is licensed under either the MIT license or the Apache License
//! 2.0, at the choice of the user.

/// Driving the zip codec.
pub mod codec;
/// Error handling for every stage of a run.
pub mod error;
pub mod invocation;
/// Turning raw command-line paths into absolute, validated ones.
pub mod paths;
pub mod pipeline;
pub mod prepare;
pub mod report;

pub use codec::EntryInfo;
pub use error::{Error, ErrorKind, Result};
pub use invocation::{Invocation, Operation};
pub use paths::ResolvedPaths;
pub use report::{Outcome, Severity};
