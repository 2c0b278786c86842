// SPDX-License-Identifier: Apache-2.0 OR MIT
use color_eyre::eyre::Report;
use log::LevelFilter;
use std::process::ExitCode;
use zipper::{Error, Operation, Outcome, Severity};

pub fn init_logger(verbose: bool) {
	let level = if verbose {
		LevelFilter::Debug
	} else {
		LevelFilter::Warn
	};
	env_logger::Builder::new()
		.filter_level(level)
		.format_timestamp(None)
		.format_target(false)
		.init();
}

/// Prints an outcome to the stream its severity calls for.
pub fn emit(outcome: &Outcome) -> ExitCode {
	match outcome.severity {
		Severity::Info => println!("{}", outcome.message),
		Severity::Error => eprintln!("{}", outcome.message),
	}
	ExitCode::from(outcome.exit_code)
}

/// Prints the full cause chain of a failed operation for debugging.
pub fn diagnose(operation: Operation, err: Error) {
	let report = Report::new(err).wrap_err(format!("failed to {operation}"));
	eprintln!("{report:?}");
}
