use crate::error::{Result, RxmvError};
use crate::expand::{Template, replace_all};
use crate::transform::TransformChain;
use regex::Regex;
use std::path::{Path, PathBuf};

/// A single planned rename: source and destination are siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOperation {
	pub source: PathBuf,
	pub destination: PathBuf,
}

impl RenameOperation {
	/// True when the planned name equals the current one.
	pub fn is_noop(&self) -> bool {
		self.source == self.destination
	}

	/// Source and destination as shown to the user, relative to `root` when possible.
	pub fn relative_to(&self, root: &Path) -> (PathBuf, PathBuf) {
		(relativize(&self.source, root), relativize(&self.destination, root))
	}
}

fn relativize(path: &Path, root: &Path) -> PathBuf {
	path.strip_prefix(root)
		.map(Path::to_path_buf)
		.unwrap_or_else(|_| path.to_path_buf())
}

/// Compiled selector, target template and transform chain for one run.
#[derive(Debug, Clone)]
pub struct Planner {
	/// Unanchored selector, used for substitution.
	selector: Regex,

	/// Selector wrapped as `^(?:...)$`, used to decide which files qualify.
	whole_name: Regex,

	template: Template,

	chain: TransformChain,
}

impl Planner {
	pub fn new(selector: &str, target: &str, chain: TransformChain) -> Result<Self> {
		Ok(Planner {
			selector: compile_regex(selector)?,
			whole_name: compile_regex(&format!("^(?:{selector})$"))?,
			template: Template::parse(target),
			chain,
		})
	}

	pub fn template(&self) -> &Template {
		&self.template
	}

	pub fn chain(&self) -> &TransformChain {
		&self.chain
	}

	/// Whether the selector matches the entire file name.
	pub fn selects(&self, file_name: &str) -> bool {
		self.whole_name.is_match(file_name)
	}

	/// Compute the new file name. A name the selector never matches is returned unchanged.
	pub fn plan(&self, file_name: &str) -> Result<String> {
		replace_all(&self.selector, file_name, &self.template, |group| {
			self.chain.apply(group)
		})
	}

	/// Plan a rename for `path`, keeping it in the same directory.
	///
	/// Returns `Ok(None)` when the file name is not valid UTF-8.
	pub fn plan_path(&self, path: &Path) -> Result<Option<RenameOperation>> {
		let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
			return Ok(None);
		};
		let new_name = self.plan(file_name)?;
		Ok(Some(RenameOperation {
			source: path.to_path_buf(),
			destination: path.with_file_name(new_name),
		}))
	}
}

/// Compute the new name for `file_name` in one call.
pub fn plan(
	file_name: &str,
	selector: &str,
	target: &str,
	chain: &TransformChain,
) -> Result<String> {
	Planner::new(selector, target, chain.clone())?.plan(file_name)
}

/// Compile a regex pattern string.
pub fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| RxmvError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transform::Primitive;

	#[test]
	fn test_compile_invalid_regex() {
		match compile_regex(r"[invalid").unwrap_err() {
			RxmvError::InvalidRegex { pattern, .. } => assert_eq!(pattern, "[invalid"),
			other => panic!("Expected InvalidRegex error, got {other:?}"),
		}
	}

	#[test]
	fn test_plan_uppercase_scenario() {
		let chain = TransformChain::from(Primitive::Uppercase);
		let out = plan("draft_notes.txt", r"(\w+)_(\w+)\.txt", "$1-$2.txt", &chain).unwrap();
		assert_eq!(out, "DRAFT-NOTES.txt");
	}

	#[test]
	fn test_plan_chain_scenario() {
		let chain = TransformChain::new(vec![Primitive::RemoveSnakeCase, Primitive::TitleCase]);
		let out = plan("voice_memo_final", r"(voice_memo)", "$1", &chain).unwrap();
		assert_eq!(out, "Voice Memo_final");
	}

	#[test]
	fn test_plan_non_matching_name_is_unchanged() {
		let chain = TransformChain::from(Primitive::Uppercase);
		for name in ["notes", "README.md", "", "a.b.c"] {
			assert_eq!(plan(name, r"(\d+)x", "$1", &chain).unwrap(), name);
		}
	}

	#[test]
	fn test_plan_out_of_range_reference() {
		let chain = TransformChain::identity();
		let result = plan("a_b.txt", r"(\w)_(\w)\.txt", "$9", &chain);
		assert!(matches!(result, Err(RxmvError::ReferenceOutOfRange { .. })));
	}

	#[test]
	fn test_plan_invalid_selector() {
		let result = plan("a", r"(", "$1", &TransformChain::identity());
		assert!(matches!(result, Err(RxmvError::InvalidRegex { .. })));
	}

	#[test]
	fn test_selects_requires_whole_name() {
		let planner = Planner::new(r"\w+_\w+", "x", TransformChain::identity()).unwrap();
		assert!(planner.selects("draft_notes"));
		assert!(!planner.selects("draft_notes.txt"));
	}

	#[test]
	fn test_selects_with_alternation() {
		let planner = Planner::new(r"a|ab", "x", TransformChain::identity()).unwrap();
		assert!(planner.selects("ab"));
	}

	#[test]
	fn test_plan_path_keeps_directory() {
		let planner = Planner::new(
			r"(\w+)\.txt",
			"$1.md",
			TransformChain::from(Primitive::Uppercase),
		)
		.unwrap();
		let op = planner
			.plan_path(Path::new("/work/docs/notes.txt"))
			.unwrap()
			.unwrap();
		assert_eq!(op.source, PathBuf::from("/work/docs/notes.txt"));
		assert_eq!(op.destination, PathBuf::from("/work/docs/NOTES.md"));
		assert!(!op.is_noop());

		let (from, to) = op.relative_to(Path::new("/work"));
		assert_eq!(from, PathBuf::from("docs/notes.txt"));
		assert_eq!(to, PathBuf::from("docs/NOTES.md"));
	}

	#[test]
	fn test_plan_path_noop() {
		let planner = Planner::new(r"(\w+)\.txt", "$0", TransformChain::identity()).unwrap();
		let op = planner.plan_path(Path::new("notes.txt")).unwrap().unwrap();
		assert!(op.is_noop());
	}
}
