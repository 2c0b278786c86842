// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::error::{Error, Result};
use std::{
	fs::{self, File},
	io::{self, BufReader, BufWriter, Read, Write},
	path::{Component, Path},
};
use walkdir::WalkDir;
use zip::{result::ZipError, write::FileOptions, CompressionMethod, ZipArchive, ZipWriter};

const FILE_MODE: u32 = 0o644;
const EXECUTABLE_MODE: u32 = 0o755;
const DIR_MODE: u32 = 0o755;
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// One entry of an archive, as reported by [`list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
	pub name: String,
	pub size: u64,
	pub compressed_size: u64,
	pub is_dir: bool,
}

/// Packs everything beneath `source` into a new zip at `archive`.
///
/// Entry names are relative to `source`, so `source` itself never shows up as
/// a path segment. An existing file at `archive` is truncated, not appended
/// to. Returns the number of entries written.
pub fn compress(source: &Path, archive: &Path) -> Result<usize> {
	let file = File::create(archive).map_err(|err| Error::io("create", archive, err))?;
	let mut zip = ZipWriter::new(BufWriter::new(file));
	let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
	let mut written = 0;

	for entry in WalkDir::new(source)
		.min_depth(1)
		.follow_links(true)
		.sort_by_file_name()
	{
		let entry = entry.map_err(|err| {
			let path = err.path().unwrap_or(source).to_path_buf();
			Error::io("walk", path, err.into())
		})?;
		let path = entry.path();
		let stripped_path = path.strip_prefix(source).map_err(|err| {
			Error::io("relativize", path, io::Error::new(io::ErrorKind::Other, err))
		})?;
		let name = entry_name(stripped_path);

		let file_type = entry.file_type();
		if file_type.is_dir() {
			log::debug!("adding directory {name}/");
			zip.add_directory(name, options.unix_permissions(DIR_MODE))
				.map_err(|err| Error::codec(path, err))?;
		} else if !file_type.is_file() {
			log::warn!("skipping {}: not a regular file", path.display());
			continue;
		} else {
			let mut input =
				File::open(path).map_err(|err| Error::io("open", path, err))?;
			let len = input
				.metadata()
				.map_err(|err| Error::io("inspect", path, err))?
				.len();
			let mode = if is_executable::is_executable(path) {
				EXECUTABLE_MODE
			} else {
				FILE_MODE
			};
			log::debug!("adding file {name} ({len} bytes)");
			zip.start_file(
				name,
				options
					.unix_permissions(mode)
					.large_file(len >= ZIP64_THRESHOLD),
			)
			.map_err(|err| Error::codec(path, err))?;
			io::copy(&mut input, &mut zip).map_err(|err| Error::io("compress", path, err))?;
		}
		written += 1;
	}

	let out = zip.finish().map_err(|err| Error::codec(archive, err))?;
	out.into_inner()
		.map_err(|err| Error::io("flush", archive, err.into_error()))?
		.sync_all()
		.map_err(|err| Error::io("sync", archive, err))?;
	Ok(written)
}

/// Expands every entry of `archive` beneath `destination`, overwriting files
/// that already exist there. Returns the number of entries extracted.
///
/// Stored directory modes are applied only once every entry is written, so a
/// read-only directory does not lock out its own children.
pub fn extract(archive: &Path, destination: &Path) -> Result<usize> {
	let mut zip = open(archive)?;
	let mut dir_modes = Vec::new();
	for idx in 0..zip.len() {
		let mut entry = zip
			.by_index(idx)
			.map_err(|err| Error::codec(archive, err))?;
		let relative = entry
			.enclosed_name()
			.map(Path::to_path_buf)
			.ok_or_else(|| Error::UnsafeEntry(entry.name().to_string()))?;
		let out_path = destination.join(&relative);
		if !out_path.starts_with(destination) {
			return Err(Error::UnsafeEntry(entry.name().to_string()));
		}

		if entry.is_dir() {
			log::debug!("creating {}", out_path.display());
			ensure_writable_dir(&out_path)?;
			if let Some(mode) = entry.unix_mode() {
				dir_modes.push((out_path, mode));
			}
			continue;
		}

		match out_path.parent() {
			Some(parent) if parent != destination => ensure_writable_dir(parent)?,
			Some(parent) => fs::create_dir_all(parent)
				.map_err(|err| Error::io("create directory", parent, err))?,
			None => {}
		}
		clear_read_only(&out_path)?;
		log::debug!("writing {} ({} bytes)", out_path.display(), entry.size());
		let mut out =
			File::create(&out_path).map_err(|err| Error::io("create", &out_path, err))?;
		copy_entry(&mut entry, &mut out, archive, &out_path)?;
		if let Some(mode) = entry.unix_mode() {
			apply_mode(&out_path, mode)?;
		}
	}

	dir_modes.sort_by_key(|(path, _)| std::cmp::Reverse(path.components().count()));
	for (path, mode) in dir_modes {
		apply_mode(&path, mode)?;
	}
	Ok(zip.len())
}

/// Streams one entry to `out`. Failures reading the entry (bad deflate data,
/// checksum mismatch) belong to the archive; failures writing belong to `out_path`.
fn copy_entry(
	entry: &mut impl Read,
	out: &mut impl Write,
	archive: &Path,
	out_path: &Path,
) -> Result<()> {
	let mut buf = [0_u8; COPY_BUFFER_SIZE];
	loop {
		let read = match entry.read(&mut buf) {
			Ok(0) => return Ok(()),
			Ok(read) => read,
			Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
			Err(err) => return Err(Error::codec(archive, ZipError::Io(err))),
		};
		out.write_all(&buf[..read])
			.map_err(|err| Error::io("write", out_path, err))?;
	}
}

/// Creates `dir` if needed and makes sure its owner can write into it, which
/// a previous extraction of a read-only directory may have taken away.
fn ensure_writable_dir(dir: &Path) -> Result<()> {
	fs::create_dir_all(dir).map_err(|err| Error::io("create directory", dir, err))?;
	let metadata = fs::metadata(dir).map_err(|err| Error::io("inspect", dir, err))?;
	if metadata.permissions().readonly() {
		make_owner_writable(dir, metadata.permissions())?;
	}
	Ok(())
}

/// Removes a read-only file that is about to be overwritten.
fn clear_read_only(path: &Path) -> Result<()> {
	match fs::symlink_metadata(path) {
		Ok(metadata) if metadata.is_file() && metadata.permissions().readonly() => {
			log::debug!("replacing read-only {}", path.display());
			fs::remove_file(path).map_err(|err| Error::io("remove", path, err))
		}
		Ok(_) => Ok(()),
		Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
		Err(err) => Err(Error::io("inspect", path, err)),
	}
}

#[cfg(unix)]
fn make_owner_writable(path: &Path, permissions: fs::Permissions) -> Result<()> {
	use std::os::unix::fs::PermissionsExt;

	fs::set_permissions(path, fs::Permissions::from_mode(permissions.mode() | 0o700))
		.map_err(|err| Error::io("set permissions on", path, err))
}

#[cfg(not(unix))]
fn make_owner_writable(path: &Path, mut permissions: fs::Permissions) -> Result<()> {
	permissions.set_readonly(false);
	fs::set_permissions(path, permissions)
		.map_err(|err| Error::io("set permissions on", path, err))
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: u32) -> Result<()> {
	use std::os::unix::fs::PermissionsExt;

	let mode = mode & 0o7777;
	if mode & 0o777 == 0 {
		return Ok(());
	}
	fs::set_permissions(path, fs::Permissions::from_mode(mode))
		.map_err(|err| Error::io("set permissions on", path, err))
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: u32) -> Result<()> {
	Ok(())
}

/// Reads the central directory of `archive` without extracting anything.
pub fn list(archive: &Path) -> Result<Vec<EntryInfo>> {
	let mut zip = open(archive)?;
	(0..zip.len())
		.map(|idx| {
			let entry = zip
				.by_index_raw(idx)
				.map_err(|err| Error::codec(archive, err))?;
			Ok(EntryInfo {
				name: entry.name().to_string(),
				size: entry.size(),
				compressed_size: entry.compressed_size(),
				is_dir: entry.is_dir(),
			})
		})
		.collect()
}

fn open(archive: &Path) -> Result<ZipArchive<BufReader<File>>> {
	let file = File::open(archive).map_err(|err| Error::io("open", archive, err))?;
	ZipArchive::new(BufReader::new(file)).map_err(|err| Error::codec(archive, err))
}

/// Joins the normal components of a relative path with `/`.
fn entry_name(path: &Path) -> String {
	path.components()
		.filter_map(|c| match c {
			Component::Normal(part) => Some(part.to_string_lossy()),
			_ => None,
		})
		.collect::<Vec<_>>()
		.join("/")
}
