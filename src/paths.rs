// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::{
	error::{Error, Result},
	invocation::{Invocation, Operation},
};
use std::{
	fs,
	io::ErrorKind as IoErrorKind,
	path::{Component, Path, PathBuf},
};

/// Absolute, default-substituted paths for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPaths {
	Compress { source: PathBuf, archive: PathBuf },
	Extract { archive: PathBuf, destination: PathBuf },
	List { archive: PathBuf },
}

/// Resolves the raw paths of `invocation` against `cwd`.
///
/// Input paths are checked for existence and kind; output paths only have to
/// be of the right kind if they already exist.
pub fn resolve(invocation: &Invocation, cwd: &Path) -> Result<ResolvedPaths> {
	let input = invocation.input.as_deref().map(|raw| absolutize(cwd, raw));
	let output = invocation.output.as_deref().map(|raw| absolutize(cwd, raw));

	match invocation.operation {
		Operation::Compress => {
			let archive = output.ok_or(Error::MissingArgument("zipFile"))?;
			let source = input.unwrap_or_else(|| absolutize(cwd, Path::new("")));
			require_dir(&source)?;
			check_self_inclusion(&source, &archive)?;
			if archive.is_dir() {
				return Err(Error::NotAFile(archive));
			}
			Ok(ResolvedPaths::Compress { source, archive })
		}
		Operation::Extract => {
			let archive = input.ok_or(Error::MissingArgument("zipFile"))?;
			require_file(&archive)?;
			let destination = output.unwrap_or_else(|| absolutize(cwd, Path::new("")));
			if destination.exists() && !destination.is_dir() {
				return Err(Error::NotADirectory(destination));
			}
			Ok(ResolvedPaths::Extract {
				archive,
				destination,
			})
		}
		Operation::List => {
			let archive = input.ok_or(Error::MissingArgument("zipFile"))?;
			require_file(&archive)?;
			Ok(ResolvedPaths::List { archive })
		}
	}
}

/// Lexically joins `raw` onto `base`, dropping `.` and folding `..`.
pub fn absolutize(base: &Path, raw: &Path) -> PathBuf {
	let joined = base.join(raw);
	let mut out = PathBuf::new();
	for component in joined.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				out.pop();
			}
			other => out.push(other.as_os_str()),
		}
	}
	out
}

fn metadata(path: &Path) -> Result<fs::Metadata> {
	fs::metadata(path).map_err(|err| match err.kind() {
		IoErrorKind::NotFound => Error::PathNotFound(path.to_path_buf()),
		_ => Error::io("inspect", path, err),
	})
}

fn require_dir(path: &Path) -> Result<()> {
	if metadata(path)?.is_dir() {
		Ok(())
	} else {
		Err(Error::NotADirectory(path.to_path_buf()))
	}
}

fn require_file(path: &Path) -> Result<()> {
	if metadata(path)?.is_dir() {
		Err(Error::NotAFile(path.to_path_buf()))
	} else {
		Ok(())
	}
}

/// Canonicalizes the deepest existing ancestor of `path` and re-appends the
/// part that does not exist yet.
fn canonicalize_lenient(path: &Path) -> Result<PathBuf> {
	let mut existing = path;
	let mut missing = Vec::new();
	loop {
		match existing.canonicalize() {
			Ok(canonical) => {
				return Ok(missing
					.iter()
					.rev()
					.fold(canonical, |acc: PathBuf, name| acc.join(name)));
			}
			Err(err) if err.kind() == IoErrorKind::NotFound => {
				match (existing.parent(), existing.file_name()) {
					(Some(parent), Some(name)) => {
						missing.push(name.to_os_string());
						existing = parent;
					}
					_ => return Ok(path.to_path_buf()),
				}
			}
			Err(err) => return Err(Error::io("canonicalize", existing, err)),
		}
	}
}

fn check_self_inclusion(source: &Path, archive: &Path) -> Result<()> {
	let canonical_source = canonicalize_lenient(source)?;
	let canonical_archive = canonicalize_lenient(archive)?;
	if canonical_archive.starts_with(&canonical_source) {
		return Err(Error::SelfInclusion {
			input: source.to_path_buf(),
			output: archive.to_path_buf(),
		});
	}
	Ok(())
}
