use crate::config::types::Config;
use crate::error::{Result, RxmvError};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| RxmvError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config =
		toml::from_str(content).map_err(|source| RxmvError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	config.validate()?;

	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::Defaults;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_config() {
		let path = PathBuf::from("test.toml");
		let config = parse_config_str("", &path).unwrap();

		assert!(!config.root);
		assert!(config.root_config_lookup_disable_env_var.is_none());
		assert_eq!(config.defaults, Defaults::default());
		assert!(config.processors.is_empty());
	}

	#[test]
	fn test_parse_full_config() {
		let content = r#"
root = true
root-config-lookup-disable-env-var = "CI"

[defaults]
verbose = true
no-overwrite = true
recursive = false

[processors]
snake-pascal-upper = ["snake_to_pascal", "uppercase"]
shout = ["uppercase"]
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(config.root);
		assert_eq!(
			config.root_config_lookup_disable_env_var,
			Some("CI".to_string())
		);
		assert_eq!(config.defaults.verbose, Some(true));
		assert_eq!(config.defaults.no_overwrite, Some(true));
		assert_eq!(config.defaults.recursive, Some(false));
		assert_eq!(config.defaults.confirm, None);
		assert_eq!(
			config.processors.get("snake-pascal-upper"),
			Some(&vec!["snake_to_pascal".to_string(), "uppercase".to_string()])
		);
		assert_eq!(config.processors.len(), 2);
	}

	#[test]
	fn test_unknown_default_is_rejected() {
		let content = r#"
[defaults]
verbos = true
"#;
		let path = PathBuf::from("test.toml");
		match parse_config_str(content, &path).unwrap_err() {
			RxmvError::ConfigParseError { path, .. } => {
				assert_eq!(path, PathBuf::from("test.toml"));
			}
			other => panic!("Expected ConfigParseError, got {other:?}"),
		}
	}

	#[test]
	fn test_processor_name_with_spaces_is_rejected() {
		let content = r#"
[processors]
"two words" = ["uppercase"]
"#;
		let path = PathBuf::from("test.toml");
		let result = parse_config_str(content, &path);
		assert!(matches!(result, Err(RxmvError::InvalidComposite { .. })));
	}

	#[test]
	fn test_invalid_toml() {
		let path = PathBuf::from("test.toml");
		let result = parse_config_str("invalid toml [[[", &path);
		assert!(matches!(result, Err(RxmvError::ConfigParseError { .. })));
	}

	#[test]
	fn test_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let result = parse_config_file(&dir.path().join(".rxmv.toml"));
		assert!(matches!(result, Err(RxmvError::ConfigReadError { .. })));
	}
}
