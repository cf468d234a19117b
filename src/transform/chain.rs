use crate::error::Result;
use crate::transform::primitives::Primitive;
use crate::transform::registry::Registry;
use std::fmt;

/// An ordered sequence of primitives applied one after another.
///
/// The empty chain is the identity transform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformChain {
	steps: Vec<Primitive>,
}

impl TransformChain {
	pub fn identity() -> Self {
		Self::default()
	}

	pub fn new(steps: Vec<Primitive>) -> Self {
		TransformChain { steps }
	}

	/// Build a chain from processor names in declaration order, flattening composites.
	pub fn resolve<S: AsRef<str>>(registry: &Registry, names: &[S]) -> Result<Self> {
		let mut steps = Vec::new();
		for name in names {
			let processor = registry.resolve(name.as_ref())?;
			steps.extend_from_slice(&processor.steps);
		}
		Ok(TransformChain { steps })
	}

	/// Append `other` so that it runs after this chain.
	pub fn then(mut self, other: &TransformChain) -> Self {
		self.steps.extend_from_slice(&other.steps);
		self
	}

	pub fn steps(&self) -> &[Primitive] {
		&self.steps
	}

	pub fn is_identity(&self) -> bool {
		self.steps.is_empty()
	}

	pub fn apply(&self, input: &str) -> String {
		self.steps
			.iter()
			.fold(input.to_string(), |acc, step| step.apply(&acc))
	}
}

impl From<Primitive> for TransformChain {
	fn from(primitive: Primitive) -> Self {
		TransformChain::new(vec![primitive])
	}
}

impl fmt::Display for TransformChain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.steps.is_empty() {
			return f.write_str("identity");
		}
		let names: Vec<_> = self.steps.iter().map(|p| p.name()).collect();
		f.write_str(&names.join(" -> "))
	}
}
