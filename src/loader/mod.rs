//! Loading HOCON documents into property sources.
//!
//! This module handles:
//! - Parsing documents through the `hocon` crate
//! - Enforcing the empty key policy
//! - Flattening into a named `PropertySource`

pub mod parser;
pub mod source;

pub use parser::{parse_file, parse_str};
pub use source::{PropertySource, compile_filter};

use crate::error::{HoconPropsError, Result};
use crate::flatten::{ConfigNode, Object, flatten, index_path, join_key};
use crate::options::{EmptyKeyPolicy, LoaderOptions};
use log::{debug, info};
use std::path::Path;

/// File extensions handled by the loader (excluding the '.').
pub const FILE_EXTENSIONS: &[&str] = &["conf"];

/// Label for the document root in error messages.
const ROOT_LABEL: &str = "<root>";

/// Strategy to load HOCON files into property sources.
#[derive(Debug, Clone, Default)]
pub struct PropertySourceLoader {
	options: LoaderOptions,
}

impl PropertySourceLoader {
	pub fn new(options: LoaderOptions) -> Self {
		PropertySourceLoader { options }
	}

	pub fn file_extensions(&self) -> &'static [&'static str] {
		FILE_EXTENSIONS
	}

	/// Whether `path` has one of the supported extensions (case-insensitive).
	pub fn supports(&self, path: &Path) -> bool {
		path.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| {
				FILE_EXTENSIONS
					.iter()
					.any(|supported| supported.eq_ignore_ascii_case(ext))
			})
	}

	/// Load the file at `path` into property sources named `name`.
	///
	/// Returns a single source, or none when the document has no properties.
	pub fn load(&self, name: &str, path: &Path) -> Result<Vec<PropertySource>> {
		debug!("loading property source (name={}, path={})", name, path.display());
		let root = parse_file(path, &self.options)?;
		self.build(name, root)
	}

	/// Load HOCON text into property sources named `name`.
	pub fn load_str(&self, name: &str, content: &str) -> Result<Vec<PropertySource>> {
		debug!("loading property source from text (name={})", name);
		let root = parse_str(content, &self.options)?;
		self.build(name, root)
	}

	fn build(&self, name: &str, root: Object) -> Result<Vec<PropertySource>> {
		if self.options.empty_keys == EmptyKeyPolicy::Reject {
			reject_empty_keys(&root)?;
		}

		let properties = flatten(root);
		info!(
			"loaded property source (name={}, properties={})",
			name,
			properties.len()
		);

		if properties.is_empty() {
			return Ok(Vec::new());
		}

		Ok(vec![PropertySource::new(name, properties)])
	}
}

/// Fail on the first empty-string key, naming the path of its parent.
fn reject_empty_keys(root: &Object) -> Result<()> {
	if root.contains_key("") {
		return Err(HoconPropsError::EmptyKey {
			path: ROOT_LABEL.to_string(),
		});
	}

	for (key, value) in root {
		check_node(key, value)?;
	}

	Ok(())
}

fn check_node(path: &str, node: &ConfigNode) -> Result<()> {
	match node {
		ConfigNode::Object(object) => {
			if object.contains_key("") {
				return Err(HoconPropsError::EmptyKey {
					path: path.to_string(),
				});
			}
			for (key, child) in object {
				check_node(&join_key(path, key), child)?;
			}
		}
		ConfigNode::List(items) => {
			for (index, item) in items.iter().enumerate() {
				check_node(&index_path(path, index), item)?;
			}
		}
		ConfigNode::Scalar(_) => {}
	}

	Ok(())
}
