use std::path::PathBuf;

/// Library-level structured errors for rxmv.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum RxmvError {
	#[error("Unknown processor: {name}")]
	UnknownProcessor { name: String },

	#[error("Invalid composite processor {name}: {reason}")]
	InvalidComposite { name: String, reason: String },

	#[error("Invalid regex pattern: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("No such directory: {path}")]
	DirectoryNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,

	#[error("Reference ${index} is out of range (match has {available} groups)")]
	ReferenceOutOfRange { index: String, available: usize },

	#[error("Failed to move {from} to {to}")]
	MutationFailed {
		from: PathBuf,
		to: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read confirmation")]
	PromptFailed {
		#[source]
		source: std::io::Error,
	},

	#[error("Exception traversing path")]
	TraversalFailed {
		#[source]
		source: walkdir::Error,
	},
}

/// Coarse classification of an [`RxmvError`], deciding how far a failure reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Aborts the run before any file is touched.
	Configuration,
	/// Fails a single file's plan.
	Reference,
	/// Fails a single rename.
	Mutation,
	/// Stops the walk; already processed files stay renamed.
	Traversal,
}

impl RxmvError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			RxmvError::UnknownProcessor { .. }
			| RxmvError::InvalidComposite { .. }
			| RxmvError::InvalidRegex { .. }
			| RxmvError::DirectoryNotFound { .. }
			| RxmvError::ConfigReadError { .. }
			| RxmvError::ConfigParseError { .. }
			| RxmvError::HomeDirectoryNotFound => ErrorKind::Configuration,
			RxmvError::ReferenceOutOfRange { .. } => ErrorKind::Reference,
			RxmvError::MutationFailed { .. } | RxmvError::PromptFailed { .. } => {
				ErrorKind::Mutation
			}
			RxmvError::TraversalFailed { .. } => ErrorKind::Traversal,
		}
	}

	/// Whether this error aborts the whole run.
	pub fn is_fatal(&self) -> bool {
		self.kind() == ErrorKind::Configuration
	}
}

/// Result type alias using RxmvError.
pub type Result<T> = std::result::Result<T, RxmvError>;
