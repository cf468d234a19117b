use crate::error::{Result, RxmvError};
use regex::Captures;
use std::fmt;

/// A `$N` marker in a target template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
	/// The digit run exactly as written after the `$`.
	pub digits: String,

	/// The decimal group index, or `None` if the digit run does not fit in a `usize`.
	pub index: Option<usize>,
}

/// A piece of a parsed target template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	Literal(String),
	Reference(Reference),
}

/// A target template, parsed once into literal text and group references.
///
/// A marker is `$` followed by one or more ASCII digits. A `$` that is not
/// followed by a digit is plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
	segments: Vec<Segment>,
}

impl Template {
	pub fn parse(template: &str) -> Self {
		let mut segments = Vec::new();
		let mut literal = String::new();
		let mut chars = template.chars().peekable();

		while let Some(c) = chars.next() {
			if c != '$' || !chars.peek().is_some_and(char::is_ascii_digit) {
				literal.push(c);
				continue;
			}

			let mut digits = String::new();
			while let Some(&d) = chars.peek() {
				if !d.is_ascii_digit() {
					break;
				}
				digits.push(d);
				chars.next();
			}

			if !literal.is_empty() {
				segments.push(Segment::Literal(std::mem::take(&mut literal)));
			}
			let index = digits.parse().ok();
			segments.push(Segment::Reference(Reference { digits, index }));
		}

		if !literal.is_empty() {
			segments.push(Segment::Literal(literal));
		}

		Template { segments }
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Iterate over the group references in template order.
	pub fn references(&self) -> impl Iterator<Item = &Reference> {
		self.segments.iter().filter_map(|segment| match segment {
			Segment::Reference(reference) => Some(reference),
			Segment::Literal(_) => None,
		})
	}

	/// True when the template contains no `$N` markers.
	pub fn is_literal(&self) -> bool {
		self.references().next().is_none()
	}
}

impl fmt::Display for Template {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for segment in &self.segments {
			match segment {
				Segment::Literal(text) => f.write_str(text)?,
				Segment::Reference(reference) => write!(f, "${}", reference.digits)?,
			}
		}
		Ok(())
	}
}

/// Expand `template` against one match.
///
/// Each `$N` is replaced by group `N` of `captures` after passing it through
/// `transform`; group 0 is the whole match. Literal text is copied unchanged
/// and never reaches `transform`. A group that exists but did not take part
/// in the match expands to `transform("")`.
///
/// Referencing a group the pattern does not have is an error rather than an
/// empty substitution.
pub fn expand<F>(captures: &Captures<'_>, template: &Template, transform: F) -> Result<String>
where
	F: Fn(&str) -> String,
{
	let mut output = String::new();

	for segment in template.segments() {
		match segment {
			Segment::Literal(text) => output.push_str(text),
			Segment::Reference(reference) => {
				let group = reference
					.index
					.filter(|&index| index < captures.len())
					.ok_or_else(|| RxmvError::ReferenceOutOfRange {
						index: reference.digits.clone(),
						available: captures.len(),
					})?;
				let text = captures.get(group).map_or("", |m| m.as_str());
				output.push_str(&transform(text));
			}
		}
	}

	Ok(output)
}
