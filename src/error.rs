use std::path::PathBuf;

/// Library-level structured errors for hocon-props.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum HoconPropsError {
	#[error("Resource not found: {path}")]
	ResourceNotFound { path: PathBuf },

	#[error("Failed to read resource: {path}")]
	ResourceReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse HOCON document: {path}")]
	ParseError {
		path: PathBuf,
		#[source]
		source: hocon::Error,
	},

	#[error("Unresolvable value at key: {key}")]
	BadValue {
		key: String,
		#[source]
		source: hocon::Error,
	},

	#[error("Document root is not an object: {path}")]
	RootNotObject { path: PathBuf },

	#[error("Empty key under {path}")]
	EmptyKey { path: String },

	#[error("Options file not found: {path}")]
	OptionsNotFound { path: PathBuf },

	#[error("Failed to read options file: {path}")]
	OptionsReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse options file: {path}")]
	OptionsParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid regex pattern: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using HoconPropsError.
pub type Result<T> = std::result::Result<T, HoconPropsError>;
