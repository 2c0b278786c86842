// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::{
	error::{Error, Result},
	paths::ResolvedPaths,
};
use std::{fs, path::Path};

/// Creates whatever directory the operation is about to write into.
pub fn prepare(paths: &ResolvedPaths) -> Result<()> {
	match paths {
		ResolvedPaths::Compress { archive, .. } => match archive.parent() {
			Some(parent) => ensure_dir(parent),
			None => Ok(()),
		},
		ResolvedPaths::Extract { destination, .. } => ensure_dir(destination),
		ResolvedPaths::List { .. } => Ok(()),
	}
}

fn ensure_dir(dir: &Path) -> Result<()> {
	if dir.is_dir() {
		return Ok(());
	}
	log::debug!("creating directory {}", dir.display());
	fs::create_dir_all(dir).map_err(|err| Error::io("create directory", dir, err))
}

#[cfg(test)]
mod test {
	use super::prepare;
	use crate::{error::ErrorKind, paths::ResolvedPaths};
	use std::fs;

	#[test]
	fn creates_missing_archive_parents() {
		let dir = tempfile::tempdir().expect("failed to create temp dir");
		let archive = dir.path().join("a/b/c/out.zip");
		prepare(&ResolvedPaths::Compress {
			source: dir.path().to_path_buf(),
			archive: archive.clone(),
		})
		.expect("failed to prepare");
		assert!(dir.path().join("a/b/c").is_dir());
		assert!(!archive.exists());
	}

	#[test]
	fn creates_missing_destination() {
		let dir = tempfile::tempdir().expect("failed to create temp dir");
		let destination = dir.path().join("x/y");
		prepare(&ResolvedPaths::Extract {
			archive: dir.path().join("in.zip"),
			destination: destination.clone(),
		})
		.expect("failed to prepare");
		assert!(destination.is_dir());
	}

	#[test]
	fn blocked_by_file_is_io_failure() {
		let dir = tempfile::tempdir().expect("failed to create temp dir");
		fs::write(dir.path().join("blocker"), b"").expect("failed to write blocker");
		let err = prepare(&ResolvedPaths::Extract {
			archive: dir.path().join("in.zip"),
			destination: dir.path().join("blocker/out"),
		})
		.expect_err("creating under a file should fail");
		assert_eq!(err.kind(), ErrorKind::IoFailure);
	}
}
