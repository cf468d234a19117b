//! The top-level rename run: setup, then one pass over the candidates.
//!
//! Setup failures (missing directory, bad selector, unknown processor) are
//! returned before any file is touched. Once the run starts, every failure
//! is per file and is reported instead of returned.

use crate::action::{self, Confirm, Outcome, Policy};
use crate::config::CONFIG_FILE_NAME;
use crate::error::{Result, RxmvError};
use crate::plan::Planner;
use crate::report::Reporter;
use crate::transform::{Registry, TransformChain};
use crate::walk;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Everything a run needs besides its collaborators.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
	/// Working root. Reported paths are relative to it.
	pub directory: PathBuf,

	/// Regex a file name must match in full to be selected.
	pub selector: String,

	/// Target template with optional `$N` markers.
	pub target: String,

	/// Processor names, applied left to right to every backreference.
	pub processors: Vec<String>,

	/// Descend into subdirectories instead of only visiting direct children.
	pub recursive: bool,

	pub policy: Policy,
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
	/// Candidates that produced a rename operation.
	pub planned: usize,
	pub renamed: usize,
	pub would_rename: usize,
	pub unchanged: usize,
	/// Declined or skipped because the destination exists.
	pub skipped: usize,
	pub failed: usize,
	/// Candidates whose template expansion failed.
	pub plan_errors: usize,
	/// Whether the directory walk ended early on an error.
	pub traversal_failed: bool,
}

impl RunStats {
	/// Files renamed, or that would have been renamed in a dry run.
	pub fn affected(&self) -> usize {
		self.renamed + self.would_rename
	}

	fn record(&mut self, outcome: &Outcome) {
		match outcome {
			Outcome::Renamed => self.renamed += 1,
			Outcome::WouldRename => self.would_rename += 1,
			Outcome::Unchanged => self.unchanged += 1,
			Outcome::Declined | Outcome::SkippedExists => self.skipped += 1,
			Outcome::Failed(_) => self.failed += 1,
		}
	}
}

/// Make `directory` absolute and check that it is a directory.
pub fn resolve_root(directory: &Path) -> Result<PathBuf> {
	let not_found = || RxmvError::DirectoryNotFound {
		path: directory.to_path_buf(),
	};
	if !directory.is_dir() {
		return Err(not_found());
	}
	std::path::absolute(directory).map_err(|_| not_found())
}

/// A validated run, ready to execute.
#[derive(Debug)]
pub struct Session {
	root: PathBuf,
	planner: Planner,
	recursive: bool,
	policy: Policy,
}

impl Session {
	/// Validate `options` against `registry`. Nothing on disk is modified.
	pub fn prepare(options: &RunOptions, registry: &Registry) -> Result<Self> {
		let root = resolve_root(&options.directory)?;
		let chain = TransformChain::resolve(registry, &options.processors)?;
		let planner = Planner::new(&options.selector, &options.target, chain)?;

		tracing::debug!(
			root = ?root,
			selector = %options.selector,
			target = %planner.template(),
			chain = %planner.chain(),
			"prepared run"
		);

		Ok(Session {
			root,
			planner,
			recursive: options.recursive,
			policy: options.policy,
		})
	}

	/// Absolute working root.
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Walk the candidates and process each one to completion before the next.
	///
	/// A file produced by an earlier rename in this run is never selected
	/// again, so each file is renamed at most once per run. Configuration
	/// files are never candidates.
	pub fn execute(&self, confirm: &mut dyn Confirm, reporter: &Reporter) -> RunStats {
		self.execute_candidates(walk::candidates(&self.root, self.recursive), confirm, reporter)
	}

	/// Process an explicit candidate stream. The first error ends the stream;
	/// renames already applied stay applied.
	pub fn execute_candidates<I>(
		&self,
		candidates: I,
		confirm: &mut dyn Confirm,
		reporter: &Reporter,
	) -> RunStats
	where
		I: IntoIterator<Item = Result<PathBuf>>,
	{
		let mut stats = RunStats::default();
		let mut produced: HashSet<PathBuf> = HashSet::new();

		for candidate in candidates {
			let path = match candidate {
				Ok(path) => path,
				Err(err) => {
					tracing::warn!(error = %err, "directory walk stopped");
					reporter.traversal_error(&err);
					stats.traversal_failed = true;
					break;
				}
			};

			if produced.contains(&path) {
				reporter.already_renamed(&path);
				continue;
			}

			let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
				tracing::debug!(?path, "skipping non UTF-8 file name");
				continue;
			};

			if file_name == CONFIG_FILE_NAME {
				reporter.ignored_config(&path);
				continue;
			}

			let selected = self.planner.selects(file_name);
			reporter.candidate(&path, selected);
			if !selected {
				continue;
			}

			let operation = match self.planner.plan_path(&path) {
				Ok(Some(operation)) => operation,
				Ok(None) => continue,
				Err(err) => {
					stats.plan_errors += 1;
					reporter.plan_error(&path, &err);
					continue;
				}
			};
			let new_name = operation
				.destination
				.file_name()
				.map(|name| name.to_string_lossy())
				.unwrap_or_default();
			reporter.planned(file_name, &new_name);
			stats.planned += 1;

			let outcome = action::apply(&operation, &self.policy, confirm);
			reporter.outcome(&operation, &outcome);
			if matches!(outcome, Outcome::Renamed) {
				produced.insert(operation.destination.clone());
			}
			stats.record(&outcome);
		}

		stats
	}
}

/// Prepare and execute a run, then print the summary.
pub fn run(
	options: &RunOptions,
	registry: &Registry,
	confirm: &mut dyn Confirm,
	reporter: &Reporter,
) -> Result<RunStats> {
	let session = Session::prepare(options, registry)?;
	reporter.working_directory(session.root());
	let stats = session.execute(confirm, reporter);
	reporter.summary(stats.affected());
	Ok(stats)
}
