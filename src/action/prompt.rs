use crate::plan::RenameOperation;
use crate::report::Reporter;
use std::io::{self, BufRead, Write};

/// Yes/no decision source consulted before a confirmed rename.
pub trait Confirm {
	fn confirm(&mut self, operation: &RenameOperation) -> io::Result<bool>;
}

impl<F> Confirm for F
where
	F: FnMut(&RenameOperation) -> io::Result<bool>,
{
	fn confirm(&mut self, operation: &RenameOperation) -> io::Result<bool> {
		self(operation)
	}
}

/// Asks on a line-oriented terminal: `Move <from> to <to>? (y/n) `.
///
/// An empty answer means yes. Anything other than `y`, `n` or empty
/// repeats the question. End of input counts as no.
pub struct PromptConfirm<R, W> {
	input: R,
	output: W,
	reporter: Reporter,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
	pub fn new(input: R, output: W, reporter: Reporter) -> Self {
		PromptConfirm {
			input,
			output,
			reporter,
		}
	}
}

impl PromptConfirm<io::StdinLock<'static>, io::Stdout> {
	/// Prompt on the process's stdin and stdout.
	pub fn stdio(reporter: Reporter) -> Self {
		PromptConfirm::new(io::stdin().lock(), io::stdout(), reporter)
	}
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
	fn confirm(&mut self, operation: &RenameOperation) -> io::Result<bool> {
		let question = self.reporter.confirm_question(operation);
		let mut answer = String::new();

		loop {
			write!(self.output, "{question}")?;
			self.output.flush()?;

			answer.clear();
			if self.input.read_line(&mut answer)? == 0 {
				writeln!(self.output)?;
				return Ok(false);
			}

			match answer.trim().to_lowercase().as_str() {
				"" | "y" => return Ok(true),
				"n" => return Ok(false),
				_ => continue,
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::report::ColorMode;
	use std::io::Cursor;
	use std::path::{Path, PathBuf};

	fn ask(input: &str) -> (bool, String) {
		let reporter = Reporter::new(Path::new("/work"), ColorMode::Never);
		let mut output = Vec::new();
		let answer = {
			let mut prompt = PromptConfirm::new(Cursor::new(input.to_string()), &mut output, reporter);
			prompt
				.confirm(&RenameOperation {
					source: PathBuf::from("/work/a.txt"),
					destination: PathBuf::from("/work/b.txt"),
				})
				.unwrap()
		};
		(answer, String::from_utf8(output).unwrap())
	}

	#[test]
	fn test_yes_answer() {
		let (answer, output) = ask("y\n");
		assert!(answer);
		assert_eq!(output, "Move a.txt to b.txt? (y/n) ");
	}

	#[test]
	fn test_no_answer_is_case_insensitive() {
		let (answer, _) = ask("  N \n");
		assert!(!answer);
	}

	#[test]
	fn test_empty_answer_means_yes() {
		let (answer, _) = ask("\n");
		assert!(answer);
	}

	#[test]
	fn test_invalid_answer_asks_again() {
		let (answer, output) = ask("maybe\nyes\nn\n");
		assert!(!answer);
		assert_eq!(output.matches("(y/n)").count(), 3);
	}

	#[test]
	fn test_end_of_input_means_no() {
		let (answer, _) = ask("");
		assert!(!answer);
	}
}
