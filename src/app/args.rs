// SPDX-License-Identifier: Apache-2.0 OR MIT
use clap::{error::ErrorKind as ClapErrorKind, ArgAction, Args, Parser, Subcommand};
use std::{ffi::OsString, path::PathBuf};
use zipper::{Error, Invocation, Operation, Outcome};

pub const USAGE: &str = "
Usage: zipper compress -o ../myFile.zip
       zipper extract -i myFile.zip

Help:  zipper compress --help
       zipper extract --help";

#[derive(Parser, Debug)]
#[command(
	name = "zipper",
	author,
	version,
	about = "Zipper is a tiny app that can compress and extract zip files.",
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true
)]
pub struct AppArgs {
	/// Log every archive entry as it is processed
	#[arg(short, long, global = true)]
	pub verbose: bool,
	#[command(subcommand)]
	pub subcommand: AppSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AppSubcommand {
	/// Compress a directory into a zip file
	#[command(disable_help_flag = true)]
	Compress(CompressArgs),
	/// Extract a zip file into a directory
	#[command(disable_help_flag = true)]
	Extract(ExtractArgs),
	/// List the entries of a zip file
	#[command(disable_help_flag = true)]
	List(ListArgs),
}

#[derive(Args, Debug)]
pub struct CompressArgs {
	/// The input directory to be compressed. Defaults to the current directory.
	#[arg(short, long, value_name = "directory")]
	pub input: Option<PathBuf>,
	/// The zip file to output. Must not target the input directory.
	#[arg(short, long, value_name = "zipFile")]
	pub output: Option<PathBuf>,
	/// Print help
	#[arg(short = '?', long, action = ArgAction::Help)]
	#[allow(dead_code)]
	help: Option<bool>,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
	/// The zip file to be extracted.
	#[arg(short, long, value_name = "zipFile")]
	pub input: Option<PathBuf>,
	/// The directory to output. Defaults to the current directory.
	#[arg(short, long, value_name = "directory")]
	pub output: Option<PathBuf>,
	/// Print help
	#[arg(short = '?', long, action = ArgAction::Help)]
	#[allow(dead_code)]
	help: Option<bool>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
	/// The zip file to list.
	#[arg(short, long, value_name = "zipFile")]
	pub input: Option<PathBuf>,
	/// Print help
	#[arg(short = '?', long, action = ArgAction::Help)]
	#[allow(dead_code)]
	help: Option<bool>,
}

impl From<AppSubcommand> for Invocation {
	fn from(subcommand: AppSubcommand) -> Self {
		let (operation, input, output) = match subcommand {
			AppSubcommand::Compress(args) => (Operation::Compress, args.input, args.output),
			AppSubcommand::Extract(args) => (Operation::Extract, args.input, args.output),
			AppSubcommand::List(args) => (Operation::List, args.input, None),
		};
		Self {
			operation,
			input,
			output,
		}
	}
}

/// What the command line asked for.
#[derive(Debug)]
pub enum Parsed {
	Run { invocation: Invocation, verbose: bool },
	/// Nothing to run; print this and exit.
	Exit(Outcome),
}

pub fn parse<I, T>(argv: I) -> Parsed
where
	I: IntoIterator<Item = T>,
	T: Into<OsString>,
{
	let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
	if wants_usage(&argv) {
		return Parsed::Exit(Outcome::usage(USAGE));
	}
	match AppArgs::try_parse_from(argv) {
		Ok(args) => Parsed::Run {
			verbose: args.verbose,
			invocation: args.subcommand.into(),
		},
		Err(err) => {
			let rendered = err.to_string().trim_end().to_string();
			match err.kind() {
				ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
					Parsed::Exit(Outcome::help(rendered))
				}
				_ => Parsed::Exit(Outcome::failure(None, &Error::Parse(rendered))),
			}
		}
	}
}

/// No arguments at all, or nothing but a help flag.
fn wants_usage(argv: &[OsString]) -> bool {
	match argv.get(1..) {
		None | Some([]) => true,
		Some([only]) => *only == "-?" || *only == "--help",
		Some(_) => false,
	}
}

#[cfg(test)]
mod test {
	use super::{parse, AppArgs, Parsed, USAGE};
	use clap::CommandFactory;
	use std::path::PathBuf;
	use zipper::{Invocation, Operation, Severity};

	fn run(argv: &[&str]) -> (Invocation, bool) {
		match parse(argv.iter().copied()) {
			Parsed::Run {
				invocation,
				verbose,
			} => (invocation, verbose),
			Parsed::Exit(outcome) => panic!("expected a run, got {outcome:?}"),
		}
	}

	fn exit(argv: &[&str]) -> zipper::Outcome {
		match parse(argv.iter().copied()) {
			Parsed::Exit(outcome) => outcome,
			Parsed::Run { invocation, .. } => panic!("expected an exit, got {invocation:?}"),
		}
	}

	#[test]
	fn command_is_well_formed() {
		AppArgs::command().debug_assert();
	}

	#[test]
	fn compress_options() {
		let (invocation, verbose) = run(&["zipper", "compress", "-i", "src", "--output", "out.zip"]);
		assert!(!verbose);
		assert_eq!(invocation, Invocation {
			operation: Operation::Compress,
			input: Some(PathBuf::from("src")),
			output: Some(PathBuf::from("out.zip")),
		});
	}

	#[test]
	fn extract_without_output() {
		let (invocation, _) = run(&["zipper", "extract", "--input", "a.zip", "-v"]);
		assert_eq!(invocation, Invocation::new(Operation::Extract).input("a.zip"));
	}

	#[test]
	fn missing_options_are_left_to_the_resolver() {
		let (invocation, _) = run(&["zipper", "compress"]);
		assert_eq!(invocation, Invocation::new(Operation::Compress));
	}

	#[test]
	fn no_arguments_prints_usage() {
		for argv in [&["zipper"][..], &["zipper", "-?"], &["zipper", "--help"]] {
			let outcome = exit(argv);
			assert_eq!(outcome.message, USAGE);
			assert_eq!(outcome.exit_code, 1);
			assert_eq!(outcome.severity, Severity::Info);
		}
	}

	#[test]
	fn subcommand_help_exits_zero() {
		for flag in ["-?", "--help"] {
			let outcome = exit(&["zipper", "extract", flag]);
			assert_eq!(outcome.exit_code, 0);
			assert!(outcome.message.contains("--input"));
			assert!(outcome.message.contains("--output"));
		}
	}

	#[test]
	fn unknown_option_names_token() {
		let outcome = exit(&["zipper", "compress", "--bogus"]);
		assert_eq!(outcome.exit_code, 1);
		assert_eq!(outcome.severity, Severity::Error);
		assert!(outcome.message.contains("--bogus"));
	}

	#[test]
	fn unknown_subcommand_fails() {
		let outcome = exit(&["zipper", "shrink"]);
		assert_eq!(outcome.exit_code, 1);
		assert!(outcome.message.contains("shrink"));
	}
}
