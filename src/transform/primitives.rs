use std::fmt;

/// A named, pure string transform.
///
/// The catalog is closed: every primitive carries its own function, and
/// composites are built by sequencing primitives (see [`crate::transform::Registry`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
	RemoveSnakeCase,
	TitleCase,
	LowerCaseFirst,
	NormalCase,
	Uppercase,
	Lowercase,
	RemoveSpaces,
}

impl Primitive {
	/// Every primitive, in catalog order.
	pub const ALL: [Primitive; 7] = [
		Primitive::RemoveSnakeCase,
		Primitive::TitleCase,
		Primitive::LowerCaseFirst,
		Primitive::NormalCase,
		Primitive::Uppercase,
		Primitive::Lowercase,
		Primitive::RemoveSpaces,
	];

	/// Canonical name used on the command line and in config files.
	pub fn name(self) -> &'static str {
		match self {
			Primitive::RemoveSnakeCase => "remove_snake_case",
			Primitive::TitleCase => "title_case",
			Primitive::LowerCaseFirst => "lower_case_first",
			Primitive::NormalCase => "normal_case",
			Primitive::Uppercase => "uppercase",
			Primitive::Lowercase => "lowercase",
			Primitive::RemoveSpaces => "remove_spaces",
		}
	}

	pub fn description(self) -> &'static str {
		match self {
			Primitive::RemoveSnakeCase => "replace every underscore with a space",
			Primitive::TitleCase => "uppercase the first letter of every word",
			Primitive::LowerCaseFirst => "lowercase the first letter of every word",
			Primitive::NormalCase => "uppercase the first letter only",
			Primitive::Uppercase => "uppercase everything",
			Primitive::Lowercase => "lowercase everything",
			Primitive::RemoveSpaces => "delete every space",
		}
	}

	/// The function backing this primitive.
	pub fn function(self) -> fn(&str) -> String {
		match self {
			Primitive::RemoveSnakeCase => remove_snake_case,
			Primitive::TitleCase => title_case,
			Primitive::LowerCaseFirst => lower_case_first,
			Primitive::NormalCase => normal_case,
			Primitive::Uppercase => str::to_uppercase,
			Primitive::Lowercase => str::to_lowercase,
			Primitive::RemoveSpaces => remove_spaces,
		}
	}

	pub fn apply(self, input: &str) -> String {
		(self.function())(input)
	}
}

impl fmt::Display for Primitive {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

fn remove_snake_case(input: &str) -> String {
	input.replace('_', " ")
}

fn title_case(input: &str) -> String {
	recase_word_starts(input, char::to_uppercase)
}

fn lower_case_first(input: &str) -> String {
	recase_word_starts(input, char::to_lowercase)
}

fn normal_case(input: &str) -> String {
	let mut chars = input.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

fn remove_spaces(input: &str) -> String {
	input.replace(' ', "")
}

/// Recase the first character and every character that follows a space.
///
/// Only U+0020 counts as a word boundary; tabs and other whitespace do not.
fn recase_word_starts<I>(input: &str, recase: fn(char) -> I) -> String
where
	I: Iterator<Item = char>,
{
	let (output, _) = input.chars().fold(
		(String::with_capacity(input.len()), true),
		|(mut output, at_boundary), c| {
			if at_boundary {
				output.extend(recase(c));
			} else {
				output.push(c);
			}
			(output, c == ' ')
		},
	);
	output
}
