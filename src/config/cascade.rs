use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, MergedConfig};
use crate::error::{Result, RxmvError};
use crate::transform::normalize_name;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// File name looked up in each directory of the cascade and in the home directory.
pub const CONFIG_FILE_NAME: &str = ".rxmv.toml";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.rxmv.toml`
/// 2. If found and `root = true`, skip to user config only
/// 3. Otherwise, continue up the directory tree
/// 4. Finally, check ~/.rxmv.toml (unless disabled)
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let user_config = user_config_path()?;
	discover_configs_with_user(start_dir, &user_config)
}

fn discover_configs_with_user(start_dir: &Path, user_config: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let mut current_dir = start_dir.to_path_buf();

	// Walk up the directory tree
	loop {
		let config_path = current_dir.join(CONFIG_FILE_NAME);

		if config_path.is_file() && config_path != user_config {
			let config = parse_config_file(&config_path)?;
			let stop = config.root;
			tracing::debug!(path = ?config_path, root = stop, "loaded config");

			configs.push(LoadedConfig {
				config,
				path: config_path,
			});

			if stop {
				break;
			}
		}

		match current_dir.parent() {
			Some(parent) => current_dir = parent.to_path_buf(),
			None => break,
		}
	}

	if let Some(loaded) = load_user_config(&configs, user_config)? {
		configs.push(loaded);
	}

	Ok(configs)
}

/// Load the user's config if it exists and isn't disabled.
fn load_user_config(existing_configs: &[LoadedConfig], path: &Path) -> Result<Option<LoadedConfig>> {
	// Check if any config disables user config lookup via env var
	for loaded in existing_configs {
		if let Some(ref env_var) = loaded.config.root_config_lookup_disable_env_var
			&& is_env_truthy(env_var)
		{
			tracing::debug!(env_var = %env_var, "user config lookup disabled");
			return Ok(None);
		}
	}

	if path.is_file() {
		let config = parse_config_file(path)?;
		Ok(Some(LoadedConfig {
			config,
			path: path.to_path_buf(),
		}))
	} else {
		Ok(None)
	}
}

/// Check if an environment variable is set to a truthy value.
fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}

/// Merge multiple configs into a single effective config.
///
/// Configs must be in cascade order: for every default and every processor
/// name, the first config that sets it wins.
pub fn merge_configs(configs: &[LoadedConfig]) -> MergedConfig {
	let mut merged = MergedConfig::default();
	let mut seen = BTreeSet::new();

	for loaded in configs {
		merged.defaults = merged.defaults.or(loaded.config.defaults);

		for (name, steps) in &loaded.config.processors {
			if seen.insert(normalize_name(name)) {
				merged.processors.insert(name.clone(), steps.clone());
			}
		}

		merged.sources.push(loaded.path.clone());
	}

	merged
}

/// Convenience function to discover, load, and merge configs from a directory.
pub fn load_merged_config(start_dir: &Path) -> Result<MergedConfig> {
	let configs = discover_configs(start_dir)?;
	Ok(merge_configs(&configs))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(RxmvError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parser::parse_config_str;
	use std::fs;

	fn loaded(content: &str, path: &str) -> LoadedConfig {
		LoadedConfig {
			config: parse_config_str(content, Path::new(path)).unwrap(),
			path: PathBuf::from(path),
		}
	}

	#[test]
	fn test_is_env_truthy() {
		// SAFETY: These env var operations are safe in single-threaded test context
		unsafe {
			std::env::remove_var("TEST_RXMV_ENV_1");
			assert!(!is_env_truthy("TEST_RXMV_ENV_1"));

			std::env::set_var("TEST_RXMV_ENV_2", "");
			assert!(!is_env_truthy("TEST_RXMV_ENV_2"));

			std::env::set_var("TEST_RXMV_ENV_3", "FALSE");
			assert!(!is_env_truthy("TEST_RXMV_ENV_3"));

			std::env::set_var("TEST_RXMV_ENV_4", "no");
			assert!(!is_env_truthy("TEST_RXMV_ENV_4"));

			std::env::set_var("TEST_RXMV_ENV_5", "1");
			assert!(is_env_truthy("TEST_RXMV_ENV_5"));

			std::env::set_var("TEST_RXMV_ENV_6", "yes");
			assert!(is_env_truthy("TEST_RXMV_ENV_6"));

			for i in 1..=6 {
				std::env::remove_var(format!("TEST_RXMV_ENV_{}", i));
			}
		}
	}

	#[test]
	fn test_merge_most_specific_wins() {
		let near = loaded(
			r#"
[defaults]
verbose = true

[processors]
shout = ["uppercase"]
"#,
			"/a/b/.rxmv.toml",
		);
		let far = loaded(
			r#"
[defaults]
verbose = false
no-overwrite = true

[processors]
SHOUT = ["lowercase"]
quiet = ["lowercase"]
"#,
			"/a/.rxmv.toml",
		);

		let merged = merge_configs(&[near, far]);

		assert_eq!(merged.defaults.verbose, Some(true));
		assert_eq!(merged.defaults.no_overwrite, Some(true));
		assert_eq!(merged.defaults.recursive, None);
		assert_eq!(merged.processors.len(), 2);
		assert_eq!(merged.processors["shout"], vec!["uppercase".to_string()]);
		assert!(!merged.processors.contains_key("SHOUT"));
		assert_eq!(
			merged.sources,
			vec![
				PathBuf::from("/a/b/.rxmv.toml"),
				PathBuf::from("/a/.rxmv.toml")
			]
		);
	}

	#[test]
	fn test_discover_stops_at_root_config() {
		let dir = tempfile::tempdir().unwrap();
		let project = dir.path().join("project");
		let nested = project.join("photos/2024");
		fs::create_dir_all(&nested).unwrap();

		fs::write(dir.path().join(CONFIG_FILE_NAME), "[defaults]\nverbose = true\n").unwrap();
		fs::write(project.join(CONFIG_FILE_NAME), "root = true\n").unwrap();
		fs::write(nested.join(CONFIG_FILE_NAME), "[defaults]\nrecursive = true\n").unwrap();

		let user = dir.path().join("home").join(CONFIG_FILE_NAME);
		let configs = discover_configs_with_user(&nested, &user).unwrap();

		let paths: Vec<_> = configs.iter().map(|c| c.path.clone()).collect();
		assert_eq!(
			paths,
			vec![nested.join(CONFIG_FILE_NAME), project.join(CONFIG_FILE_NAME)]
		);
	}

	#[test]
	fn test_discover_includes_user_config_last() {
		let dir = tempfile::tempdir().unwrap();
		let project = dir.path().join("project");
		let home = dir.path().join("home");
		fs::create_dir_all(&project).unwrap();
		fs::create_dir_all(&home).unwrap();

		fs::write(project.join(CONFIG_FILE_NAME), "root = true\n").unwrap();
		let user = home.join(CONFIG_FILE_NAME);
		fs::write(&user, "[processors]\nshout = [\"uppercase\"]\n").unwrap();

		let configs = discover_configs_with_user(&project, &user).unwrap();
		assert_eq!(configs.len(), 2);
		assert_eq!(configs[1].path, user);
	}

	#[test]
	fn test_discover_propagates_parse_errors() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join(CONFIG_FILE_NAME), "invalid toml [[[").unwrap();
		let user = dir.path().join("home").join(CONFIG_FILE_NAME);
		let result = discover_configs_with_user(dir.path(), &user);
		assert!(matches!(result, Err(RxmvError::ConfigParseError { .. })));
	}

	#[test]
	fn test_user_config_path() {
		let path = user_config_path();
		assert!(path.is_ok());
		assert!(path.unwrap().ends_with(CONFIG_FILE_NAME));
	}
}
