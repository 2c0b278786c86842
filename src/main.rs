// SPDX-License-Identifier: Apache-2.0 OR MIT
mod app;

use self::app::{
	args::{self, Parsed},
	console,
};
use std::{env, process::ExitCode};
use zipper::{pipeline, Error, Outcome};

fn main() -> ExitCode {
	if let Err(err) = color_eyre::install() {
		eprintln!("failed to install color-eyre handler: {err}");
	}

	let (invocation, verbose) = match args::parse(env::args_os()) {
		Parsed::Run {
			invocation,
			verbose,
		} => (invocation, verbose),
		Parsed::Exit(outcome) => return console::emit(&outcome),
	};
	console::init_logger(verbose);

	let operation = invocation.operation;
	let result = env::current_dir()
		.map_err(|err| Error::io("read", "the current directory", err))
		.and_then(|cwd| pipeline::run(&invocation, &cwd));
	match result {
		Ok(outcome) => console::emit(&outcome),
		Err(err) => {
			let outcome = Outcome::failure(Some(operation), &err);
			let code = console::emit(&outcome);
			console::diagnose(operation, err);
			code
		}
	}
}
