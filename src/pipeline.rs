// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::{
	codec,
	error::Result,
	invocation::Invocation,
	paths::{self, ResolvedPaths},
	prepare::prepare,
	report::Outcome,
};
use std::path::Path;

/// Runs one invocation start to finish: resolve, prepare, then hand off to the
/// zip codec. `cwd` stands in for any path the invocation left out.
pub fn run(invocation: &Invocation, cwd: &Path) -> Result<Outcome> {
	let resolved = paths::resolve(invocation, cwd)?;
	prepare(&resolved)?;
	invoke(&resolved)
}

fn invoke(resolved: &ResolvedPaths) -> Result<Outcome> {
	match resolved {
		ResolvedPaths::Compress { source, archive } => {
			log::info!(
				"Compressing '{}' into '{}'",
				source.display(),
				archive.display()
			);
			let entries = codec::compress(source, archive).map_err(|err| {
				warn_partial(archive);
				err
			})?;
			log::info!("wrote {entries} entries");
			Ok(Outcome::success(format!(
				"Compressed '{}' into '{}'",
				source.display(),
				archive.display()
			)))
		}
		ResolvedPaths::Extract {
			archive,
			destination,
		} => {
			log::info!(
				"Extracting '{}' to '{}'",
				archive.display(),
				destination.display()
			);
			let entries = codec::extract(archive, destination).map_err(|err| {
				warn_partial(destination);
				err
			})?;
			log::info!("extracted {entries} entries");
			Ok(Outcome::success(format!(
				"Extracted '{}' to '{}'",
				archive.display(),
				destination.display()
			)))
		}
		ResolvedPaths::List { archive } => {
			let lines: Vec<String> = codec::list(archive)?
				.into_iter()
				.map(|entry| {
					if entry.is_dir {
						entry.name
					} else {
						format!("{} ({} bytes)", entry.name, entry.size)
					}
				})
				.collect();
			Ok(Outcome::success(lines.join("\n")))
		}
	}
}

fn warn_partial(path: &Path) {
	if path.exists() {
		log::warn!("'{}' may be partially written", path.display());
	}
}
