use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Top-level configuration from a `.rxmv.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop the directory cascade here and jump directly to ~/.rxmv.toml.
	#[serde(default)]
	pub root: bool,

	/// Environment variable name that, if truthy, skips ~/.rxmv.toml lookup.
	/// Useful for CI environments.
	#[serde(default)]
	pub root_config_lookup_disable_env_var: Option<String>,

	/// Flag defaults. Command-line flags can switch these on but not off.
	#[serde(default)]
	pub defaults: Defaults,

	/// Named composite processors: name -> ordered list of processor names.
	#[serde(default)]
	pub processors: BTreeMap<String, Vec<String>>,
}

/// Default values for the run flags. Unset fields defer to less specific configs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Defaults {
	pub verbose: Option<bool>,
	pub fineverbose: Option<bool>,
	pub recursive: Option<bool>,
	pub noact: Option<bool>,
	pub confirm: Option<bool>,
	pub no_overwrite: Option<bool>,
	pub stacks: Option<bool>,
}

impl Defaults {
	/// Fill every unset field from `fallback`.
	pub fn or(self, fallback: Defaults) -> Defaults {
		Defaults {
			verbose: self.verbose.or(fallback.verbose),
			fineverbose: self.fineverbose.or(fallback.fineverbose),
			recursive: self.recursive.or(fallback.recursive),
			noact: self.noact.or(fallback.noact),
			confirm: self.confirm.or(fallback.confirm),
			no_overwrite: self.no_overwrite.or(fallback.no_overwrite),
			stacks: self.stacks.or(fallback.stacks),
		}
	}
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Merged configuration from multiple config files in the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	/// Flag defaults, most specific file first.
	pub defaults: Defaults,

	/// Composite processors; a name defined in a more specific file wins.
	pub processors: BTreeMap<String, Vec<String>>,

	/// The files that contributed, in cascade order.
	pub sources: Vec<PathBuf>,
}

impl Config {
	/// Validate processor declarations.
	pub fn validate(&self) -> Result<(), crate::error::RxmvError> {
		for name in self.processors.keys() {
			if name.trim().is_empty() || name.chars().any(char::is_whitespace) {
				return Err(crate::error::RxmvError::InvalidComposite {
					name: name.clone(),
					reason: "names must be non-empty and contain no whitespace".to_string(),
				});
			}
		}
		Ok(())
	}
}
