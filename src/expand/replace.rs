use crate::error::Result;
use crate::expand::template::{Template, expand};
use regex::Regex;

/// Replace every non-overlapping match of `pattern` in `text`.
///
/// Each match is replaced by the expansion of `template` for that match;
/// text between matches is copied through verbatim. Text with no match is
/// returned unchanged.
pub fn replace_all<F>(pattern: &Regex, text: &str, template: &Template, transform: F) -> Result<String>
where
	F: Fn(&str) -> String,
{
	let mut output = String::with_capacity(text.len());
	let mut last_end = 0;

	for captures in pattern.captures_iter(text) {
		let Some(whole) = captures.get(0) else {
			continue;
		};
		output.push_str(&text[last_end..whole.start()]);
		output.push_str(&expand(&captures, template, &transform)?);
		last_end = whole.end();
	}

	output.push_str(&text[last_end..]);
	Ok(output)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transform::{Primitive, TransformChain};

	fn identity(s: &str) -> String {
		s.to_string()
	}

	#[test]
	fn test_replace_all_whole_name() {
		let re = Regex::new(r"(\w+)_(\w+)\.txt").unwrap();
		let out = replace_all(
			&re,
			"draft_notes.txt",
			&Template::parse("$1-$2.txt"),
			str::to_uppercase,
		)
		.unwrap();
		assert_eq!(out, "DRAFT-NOTES.txt");
	}

	#[test]
	fn test_replace_all_every_match() {
		let re = Regex::new(r"(\d+)").unwrap();
		let out = replace_all(&re, "a1b22c333", &Template::parse("<$1>"), identity).unwrap();
		assert_eq!(out, "a<1>b<22>c<333>");
	}

	#[test]
	fn test_replace_all_keeps_unmatched_spans() {
		let chain = TransformChain::new(vec![Primitive::RemoveSnakeCase, Primitive::TitleCase]);
		let re = Regex::new(r"(voice_memo)").unwrap();
		let out = replace_all(&re, "voice_memo_final", &Template::parse("$1"), |s| {
			chain.apply(s)
		})
		.unwrap();
		assert_eq!(out, "Voice Memo_final");
	}

	#[test]
	fn test_replace_all_no_match_is_identity() {
		let re = Regex::new(r"(\d+)").unwrap();
		let out = replace_all(&re, "no digits here", &Template::parse("$9"), identity).unwrap();
		assert_eq!(out, "no digits here");
	}

	#[test]
	fn test_replace_all_empty_matches() {
		let re = Regex::new(r"x*").unwrap();
		let out = replace_all(&re, "ab", &Template::parse("-"), identity).unwrap();
		assert_eq!(out, "-a-b-");
	}

	#[test]
	fn test_replace_all_propagates_reference_error() {
		let re = Regex::new(r"(a)(b)").unwrap();
		let result = replace_all(&re, "xaby", &Template::parse("$9"), identity);
		assert!(result.is_err());
	}
}
