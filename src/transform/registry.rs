use crate::error::{Result, RxmvError};
use crate::transform::primitives::Primitive;
use std::collections::BTreeMap;
use std::fmt;

/// Composites that ship with rxmv, evaluated left to right.
const BUILTIN_COMPOSITES: &[(&str, &[Primitive])] = &[
	(
		"snake_to_title",
		&[Primitive::RemoveSnakeCase, Primitive::TitleCase],
	),
	(
		"snake_to_normal",
		&[Primitive::RemoveSnakeCase, Primitive::NormalCase],
	),
	(
		"snake_to_pascal",
		&[
			Primitive::RemoveSnakeCase,
			Primitive::TitleCase,
			Primitive::RemoveSpaces,
		],
	),
];

/// Where a registered processor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
	Primitive,
	Builtin,
	Config,
}

/// A named entry in the registry: either a primitive or a sequence of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processor {
	pub name: String,
	pub steps: Vec<Primitive>,
	pub origin: Origin,
}

impl fmt::Display for Processor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name)?;
		if self.origin != Origin::Primitive {
			let steps: Vec<_> = self.steps.iter().map(|p| p.name()).collect();
			write!(f, " = {}", steps.join(" -> "))?;
		}
		Ok(())
	}
}

/// Immutable lookup table from processor names to their primitive steps.
///
/// Names are matched case-insensitively, with `-` and `_` interchangeable,
/// so `Title-Case` and `title_case` resolve to the same primitive.
#[derive(Debug, Clone)]
pub struct Registry {
	entries: BTreeMap<String, Processor>,
}

impl Default for Registry {
	fn default() -> Self {
		Self::builtin()
	}
}

impl Registry {
	/// Registry holding the primitives and the built-in composites.
	pub fn builtin() -> Self {
		let mut entries = BTreeMap::new();

		for primitive in Primitive::ALL {
			entries.insert(
				normalize_name(primitive.name()),
				Processor {
					name: primitive.name().to_string(),
					steps: vec![primitive],
					origin: Origin::Primitive,
				},
			);
		}

		for (name, steps) in BUILTIN_COMPOSITES {
			entries.insert(
				normalize_name(name),
				Processor {
					name: name.to_string(),
					steps: steps.to_vec(),
					origin: Origin::Builtin,
				},
			);
		}

		Registry { entries }
	}

	/// Extend the built-in registry with composites declared in config files.
	///
	/// A composite may reference primitives and built-in composites, but not
	/// other configured composites, and may not shadow a built-in name.
	pub fn with_composites(composites: &BTreeMap<String, Vec<String>>) -> Result<Self> {
		let builtin = Self::builtin();
		let mut registry = builtin.clone();

		for (name, step_names) in composites {
			let key = normalize_name(name);
			if builtin.entries.contains_key(&key) {
				return Err(RxmvError::InvalidComposite {
					name: name.clone(),
					reason: "shadows a built-in processor".to_string(),
				});
			}
			if registry.entries.contains_key(&key) {
				return Err(RxmvError::InvalidComposite {
					name: name.clone(),
					reason: "declared more than once".to_string(),
				});
			}
			if step_names.is_empty() {
				return Err(RxmvError::InvalidComposite {
					name: name.clone(),
					reason: "has no steps".to_string(),
				});
			}

			let mut steps = Vec::new();
			for step in step_names {
				let processor = builtin.resolve(step).map_err(|_| RxmvError::InvalidComposite {
					name: name.clone(),
					reason: format!("unknown step {step}"),
				})?;
				steps.extend_from_slice(&processor.steps);
			}

			registry.entries.insert(
				key,
				Processor {
					name: name.clone(),
					steps,
					origin: Origin::Config,
				},
			);
		}

		Ok(registry)
	}

	/// Look up a processor by name.
	pub fn resolve(&self, name: &str) -> Result<&Processor> {
		self.entries
			.get(&normalize_name(name))
			.ok_or_else(|| RxmvError::UnknownProcessor {
				name: name.to_string(),
			})
	}

	/// All registered processors: primitives first, then built-in, then configured composites.
	pub fn processors(&self) -> Vec<&Processor> {
		let mut all: Vec<_> = self.entries.values().collect();
		all.sort_by_key(|p| match p.origin {
			Origin::Primitive => (0, p.steps.first().copied(), p.name.clone()),
			Origin::Builtin => (1, None, p.name.clone()),
			Origin::Config => (2, None, p.name.clone()),
		});
		all
	}
}

/// Canonical lookup key: trimmed, lowercase, `-` folded to `_`.
pub fn normalize_name(name: &str) -> String {
	name.trim().to_lowercase().replace('-', "_")
}
