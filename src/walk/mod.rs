//! Candidate enumeration.
//!
//! Yields the regular files below a working root, lazily and in whatever
//! order the filesystem returns them. No sorting is done, so callers must
//! not rely on lexical order.

use crate::error::{Result, RxmvError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lazy iterator over candidate files. Errors from the walk are yielded as
/// [`RxmvError::TraversalFailed`].
pub struct Candidates {
	inner: walkdir::IntoIter,
}

/// Walk `root` for regular files (including symlinks to regular files).
///
/// Without `recursive` only the direct children of `root` are visited.
/// `root` itself is never yielded.
pub fn candidates(root: &Path, recursive: bool) -> Candidates {
	let max_depth = if recursive { usize::MAX } else { 1 };
	Candidates {
		inner: WalkDir::new(root)
			.min_depth(1)
			.max_depth(max_depth)
			.into_iter(),
	}
}

impl Iterator for Candidates {
	type Item = Result<PathBuf>;

	fn next(&mut self) -> Option<Self::Item> {
		for entry in self.inner.by_ref() {
			let entry = match entry {
				Ok(entry) => entry,
				Err(source) => return Some(Err(RxmvError::TraversalFailed { source })),
			};

			let is_file = entry.file_type().is_file()
				|| (entry.path_is_symlink() && entry.path().is_file());
			if is_file {
				return Some(Ok(entry.into_path()));
			}
			tracing::trace!(path = ?entry.path(), "not a regular file");
		}
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	fn tree() -> tempfile::TempDir {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("top.txt"), "").unwrap();
		fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
		fs::write(dir.path().join("nested/mid.txt"), "").unwrap();
		fs::write(dir.path().join("nested/deeper/low.txt"), "").unwrap();
		dir
	}

	fn names(dir: &Path, recursive: bool) -> Vec<String> {
		let mut names: Vec<String> = candidates(dir, recursive)
			.map(|path| {
				path.unwrap()
					.strip_prefix(dir)
					.unwrap()
					.to_string_lossy()
					.replace('\\', "/")
			})
			.collect();
		names.sort();
		names
	}

	#[test]
	fn test_non_recursive_only_direct_children() {
		let dir = tree();
		assert_eq!(names(dir.path(), false), vec!["top.txt"]);
	}

	#[test]
	fn test_recursive_visits_everything() {
		let dir = tree();
		assert_eq!(
			names(dir.path(), true),
			vec!["nested/deeper/low.txt", "nested/mid.txt", "top.txt"]
		);
	}

	#[test]
	fn test_directories_are_not_candidates() {
		let dir = tempfile::tempdir().unwrap();
		fs::create_dir(dir.path().join("only_a_dir")).unwrap();
		assert!(names(dir.path(), true).is_empty());
	}

	#[test]
	fn test_missing_root_yields_traversal_error() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("missing");
		let mut walk = candidates(&missing, false);
		assert!(matches!(
			walk.next(),
			Some(Err(RxmvError::TraversalFailed { .. }))
		));
	}

	#[cfg(unix)]
	#[test]
	fn test_symlink_to_file_is_candidate() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("real.txt"), "").unwrap();
		std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("link.txt"))
			.unwrap();
		assert_eq!(names(dir.path(), false), vec!["link.txt", "real.txt"]);
	}
}
