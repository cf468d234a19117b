//! Terminal output for a rename run.
//!
//! Everything the user sees goes through [`Reporter`]. Each message has a
//! `render_*` form returning the text (or `None` when the current verbosity
//! hides it) and a printing form that writes it to stdout or stderr.

use crate::action::Outcome;
use crate::error::RxmvError;
use crate::plan::RenameOperation;
use crate::transform::Registry;
use nu_ansi_term::Color;
use std::error::Error;
use std::fmt::Write as _;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
	#[default]
	Auto,
	Always,
	Never,
}

impl FromStr for ColorMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"auto" => Ok(ColorMode::Auto),
			"always" => Ok(ColorMode::Always),
			"never" => Ok(ColorMode::Never),
			other => Err(format!(
				"invalid color mode '{other}' (expected auto, always or never)"
			)),
		}
	}
}

/// How much the run reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
	#[default]
	Quiet,
	Verbose,
	/// Verbose, plus a line for every candidate and every planned name.
	Fine,
}

#[derive(Debug, Clone)]
pub struct Reporter {
	root: PathBuf,
	color: bool,
	verbosity: Verbosity,
	stacks: bool,
}

impl Reporter {
	pub fn new(root: &Path, color: ColorMode) -> Self {
		let color = match color {
			ColorMode::Always => true,
			ColorMode::Never => false,
			ColorMode::Auto => std::io::stdout().is_terminal(),
		};
		Reporter {
			root: root.to_path_buf(),
			color,
			verbosity: Verbosity::Quiet,
			stacks: false,
		}
	}

	pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
		self.verbosity = verbosity;
		self
	}

	/// Include the full cause chain in failure diagnostics.
	pub fn with_stacks(mut self, stacks: bool) -> Self {
		self.stacks = stacks;
		self
	}

	pub fn is_verbose(&self) -> bool {
		self.verbosity >= Verbosity::Verbose
	}

	pub fn is_fine(&self) -> bool {
		self.verbosity >= Verbosity::Fine
	}

	fn paint(&self, color: Color, text: impl AsRef<str>) -> String {
		if self.color {
			color.paint(text.as_ref()).to_string()
		} else {
			text.as_ref().to_string()
		}
	}

	fn relative(&self, operation: &RenameOperation) -> (String, String) {
		let (from, to) = operation.relative_to(&self.root);
		(from.display().to_string(), to.display().to_string())
	}

	pub fn confirm_question(&self, operation: &RenameOperation) -> String {
		let (from, to) = self.relative(operation);
		format!(
			"Move {} to {}? {}",
			self.paint(Color::Cyan, from),
			self.paint(Color::Cyan, to),
			self.paint(Color::Yellow, "(y/n) ")
		)
	}

	pub fn render_fine_logging(&self) -> Option<String> {
		self.is_fine().then(|| "Fine logging is ON.".to_string())
	}

	pub fn render_working_directory(&self, absolute: &Path) -> Option<String> {
		self.is_verbose()
			.then(|| format!("Working directory: {}", absolute.display()))
	}

	pub fn render_candidate(&self, path: &Path, matched: bool) -> Option<String> {
		let label = if matched { "matches:  " } else { "no match: " };
		self.is_fine().then(|| format!("{label}{}", path.display()))
	}

	pub fn render_planned(&self, file_name: &str, new_name: &str) -> Option<String> {
		self.is_fine().then(|| format!("{file_name}: {new_name}"))
	}

	pub fn render_already_renamed(&self, path: &Path) -> Option<String> {
		self.is_fine()
			.then(|| format!("already renamed this run: {}", path.display()))
	}

	pub fn render_ignored_config(&self, path: &Path) -> Option<String> {
		self.is_fine().then(|| format!("config file: {}", path.display()))
	}

	fn render_arrow(&self, operation: &RenameOperation) -> String {
		let (from, to) = self.relative(operation);
		format!(
			"{} -> {}",
			self.paint(Color::Cyan, from),
			self.paint(Color::Cyan, to)
		)
	}

	/// The `source -> destination` line printed ahead of a failed move, so a
	/// verbose run shows the attempted rename before its failure.
	pub fn render_attempt(&self, operation: &RenameOperation, outcome: &Outcome) -> Option<String> {
		match outcome {
			Outcome::Failed(_) if self.is_verbose() => Some(self.render_arrow(operation)),
			_ => None,
		}
	}

	/// Render an outcome as `(to_stderr, line)`.
	pub fn render_outcome(
		&self,
		operation: &RenameOperation,
		outcome: &Outcome,
	) -> Option<(bool, String)> {
		let (from, to) = self.relative(operation);
		match outcome {
			Outcome::WouldRename => Some((false, self.render_arrow(operation))),
			Outcome::Renamed => self
				.is_verbose()
				.then(|| (false, self.render_arrow(operation))),
			Outcome::Unchanged => self.is_fine().then(|| (false, format!("unchanged: {from}"))),
			Outcome::SkippedExists => self.is_verbose().then(|| {
				(
					true,
					self.paint(Color::Red, format!("Skipping {to}: file exists")),
				)
			}),
			Outcome::Declined => self
				.is_verbose()
				.then(|| (true, format!("Skipping {from}: not confirmed"))),
			Outcome::Failed(err) => self
				.is_verbose()
				.then(|| (true, self.render_failure("Failed to move", err))),
		}
	}

	pub fn render_plan_error(&self, path: &Path, err: &RxmvError) -> Option<String> {
		let shown = path.strip_prefix(&self.root).unwrap_or(path);
		self.is_verbose().then(|| {
			self.render_failure(&format!("Failed to plan {}", shown.display()), err)
		})
	}

	pub fn render_traversal_error(&self, err: &RxmvError) -> Option<String> {
		self.is_verbose()
			.then(|| self.render_failure("Exception traversing path", err))
	}

	/// `None` when quiet; otherwise `(to_stderr, line)`.
	pub fn render_summary(&self, affected: usize) -> Option<(bool, String)> {
		if !self.is_verbose() {
			return None;
		}
		if affected == 0 {
			Some((true, "No files were affected.".to_string()))
		} else {
			Some((
				false,
				format!("{} file(s) affected.", self.paint(Color::White, affected.to_string())),
			))
		}
	}

	/// Without stacks: `<headline> (<innermost cause>)`.
	/// With stacks: the headline followed by every error in the chain.
	fn render_failure(&self, headline: &str, err: &RxmvError) -> String {
		if self.stacks {
			let mut out = format!("{headline}: {err}");
			let mut source = err.source();
			while let Some(cause) = source {
				let _ = write!(out, "\n  caused by: {cause}");
				source = cause.source();
			}
			out
		} else {
			format!("{headline} ({})", root_cause(err))
		}
	}

	pub fn fine_logging(&self) {
		print_out(self.render_fine_logging());
	}

	pub fn working_directory(&self, absolute: &Path) {
		print_out(self.render_working_directory(absolute));
	}

	pub fn candidate(&self, path: &Path, matched: bool) {
		print_out(self.render_candidate(path, matched));
	}

	pub fn planned(&self, file_name: &str, new_name: &str) {
		print_out(self.render_planned(file_name, new_name));
	}

	pub fn already_renamed(&self, path: &Path) {
		print_out(self.render_already_renamed(path));
	}

	pub fn ignored_config(&self, path: &Path) {
		print_out(self.render_ignored_config(path));
	}

	pub fn outcome(&self, operation: &RenameOperation, outcome: &Outcome) {
		print_out(self.render_attempt(operation, outcome));
		print_either(self.render_outcome(operation, outcome));
	}

	pub fn plan_error(&self, path: &Path, err: &RxmvError) {
		print_err(self.render_plan_error(path, err));
	}

	pub fn traversal_error(&self, err: &RxmvError) {
		print_err(self.render_traversal_error(err));
	}

	pub fn summary(&self, affected: usize) {
		print_either(self.render_summary(affected));
	}
}

/// One line per processor: name, then its steps or description.
pub fn render_processors(registry: &Registry) -> String {
	let mut out = String::new();
	for processor in registry.processors() {
		match processor.steps.as_slice() {
			[primitive] if processor.name == primitive.name() => {
				let _ = writeln!(out, "{:<20} {}", processor.name, primitive.description());
			}
			steps => {
				let names: Vec<_> = steps.iter().map(|p| p.name()).collect();
				let _ = writeln!(out, "{:<20} {}", processor.name, names.join(" -> "));
			}
		}
	}
	out
}

fn root_cause(err: &(dyn Error + 'static)) -> String {
	let mut current = err;
	while let Some(source) = current.source() {
		current = source;
	}
	current.to_string()
}

fn print_out(line: Option<String>) {
	if let Some(line) = line {
		println!("{line}");
	}
}

fn print_err(line: Option<String>) {
	if let Some(line) = line {
		eprintln!("{line}");
	}
}

fn print_either(line: Option<(bool, String)>) {
	match line {
		Some((true, line)) => eprintln!("{line}"),
		Some((false, line)) => println!("{line}"),
		None => {}
	}
}
