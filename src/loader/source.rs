use crate::error::{HoconPropsError, Result};
use crate::flatten::{FlatMap, Scalar};
use regex::Regex;

/// A named, ordered set of flattened properties loaded from one document.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySource {
	name: String,
	properties: FlatMap,
}

impl PropertySource {
	pub fn new(name: impl Into<String>, properties: FlatMap) -> Self {
		PropertySource {
			name: name.into(),
			properties,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Look up a property by its flattened path, e.g. `server.ports[0]`.
	pub fn get(&self, key: &str) -> Option<&Scalar> {
		self.properties.get(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.properties.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.properties.len()
	}

	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}

	/// Iterate over properties in document order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
		self.properties.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Iterate over the properties whose key matches `filter`.
	pub fn filtered<'a>(
		&'a self,
		filter: &'a Regex,
	) -> impl Iterator<Item = (&'a str, &'a Scalar)> + 'a {
		self.iter().filter(move |(key, _)| filter.is_match(key))
	}
}

/// Compile a key filter pattern.
pub fn compile_filter(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| HoconPropsError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}
