//! Loader options, read from an optional `.hocon-props.toml` file.

use crate::error::{HoconPropsError, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name of the per-user options file in the home directory.
pub const USER_OPTIONS_FILE: &str = ".hocon-props.toml";

/// How empty-string keys in a document are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyKeyPolicy {
	/// Fail the load with `HoconPropsError::EmptyKey`.
	#[default]
	Reject,
	/// Keep them; paths are joined literally (`""`, `parent.`).
	Keep,
}

/// Options controlling how documents are parsed and flattened.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LoaderOptions {
	/// Allow `${VAR}` substitutions to resolve from the process environment.
	pub system_env: bool,

	/// Treat values that cannot be resolved as errors.
	pub strict: bool,

	/// Policy for empty-string keys.
	pub empty_keys: EmptyKeyPolicy,
}

impl Default for LoaderOptions {
	fn default() -> Self {
		LoaderOptions {
			system_env: true,
			strict: true,
			empty_keys: EmptyKeyPolicy::Reject,
		}
	}
}

/// Parse an options file from the given path.
pub fn parse_options_file(path: &Path) -> Result<LoaderOptions> {
	let content =
		std::fs::read_to_string(path).map_err(|source| HoconPropsError::OptionsReadError {
			path: path.to_path_buf(),
			source,
		})?;

	parse_options_str(&content, path)
}

/// Parse options from a string (useful for testing).
pub fn parse_options_str(content: &str, path: &Path) -> Result<LoaderOptions> {
	toml::from_str(content).map_err(|source| HoconPropsError::OptionsParseError {
		path: path.to_path_buf(),
		source,
	})
}

/// Resolve the effective options.
///
/// An explicit path must exist. Without one, `~/.hocon-props.toml` is used
/// when present, otherwise the defaults apply.
pub fn load_options(explicit: Option<&Path>) -> Result<LoaderOptions> {
	if let Some(path) = explicit {
		if !path.exists() {
			return Err(HoconPropsError::OptionsNotFound {
				path: path.to_path_buf(),
			});
		}
		debug!("loading options (path={})", path.display());
		return parse_options_file(path);
	}

	let user_path = user_options_path()?;
	if user_path.exists() {
		debug!("loading user options (path={})", user_path.display());
		parse_options_file(&user_path)
	} else {
		Ok(LoaderOptions::default())
	}
}

/// Get the path to the user's options file.
pub fn user_options_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(HoconPropsError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(USER_OPTIONS_FILE))
}
