use crate::action::prompt::Confirm;
use crate::error::RxmvError;
use crate::plan::RenameOperation;
use std::fs;

/// Gates applied before a rename touches the filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
	/// Report what would happen but never mutate.
	pub dry_run: bool,

	/// Ask the confirmation collaborator before each rename.
	pub require_confirmation: bool,

	/// Leave existing destinations alone.
	pub no_overwrite: bool,
}

/// Result of applying one rename operation.
#[derive(Debug)]
pub enum Outcome {
	/// The file was renamed.
	Renamed,

	/// Dry run: the file would have been renamed.
	WouldRename,

	/// The planned name equals the current one; nothing to do.
	Unchanged,

	/// The user answered "no".
	Declined,

	/// The destination exists and overwriting is disabled.
	SkippedExists,

	/// The rename (or the confirmation prompt) failed.
	Failed(RxmvError),
}

impl Outcome {
	/// Whether this outcome counts towards the "file(s) affected" total.
	pub fn is_affected(&self) -> bool {
		matches!(self, Outcome::Renamed | Outcome::WouldRename)
	}
}

/// Apply `operation` under `policy`.
///
/// Gates run in order: dry run, no-overwrite, no-op, confirmation. Failures
/// are returned as [`Outcome::Failed`] and never abort the caller's batch.
/// The rename itself is a single `rename(2)`, so it is atomic on one
/// filesystem and replaces an existing destination.
pub fn apply(operation: &RenameOperation, policy: &Policy, confirm: &mut dyn Confirm) -> Outcome {
	let RenameOperation {
		source,
		destination,
	} = operation;

	if policy.dry_run {
		tracing::debug!(?source, ?destination, "dry run, not renaming");
		return Outcome::WouldRename;
	}

	if policy.no_overwrite && fs::symlink_metadata(destination).is_ok() {
		tracing::debug!(?destination, "destination exists, skipping");
		return Outcome::SkippedExists;
	}

	if operation.is_noop() {
		tracing::trace!(?source, "name unchanged");
		return Outcome::Unchanged;
	}

	if policy.require_confirmation {
		match confirm.confirm(operation) {
			Ok(true) => {}
			Ok(false) => return Outcome::Declined,
			Err(source) => return Outcome::Failed(RxmvError::PromptFailed { source }),
		}
	}

	match fs::rename(source, destination) {
		Ok(()) => {
			tracing::debug!(?source, ?destination, "renamed");
			Outcome::Renamed
		}
		Err(err) => {
			tracing::debug!(?source, ?destination, error = %err, "rename failed");
			Outcome::Failed(RxmvError::MutationFailed {
				from: source.clone(),
				to: destination.clone(),
				source: err,
			})
		}
	}
}
