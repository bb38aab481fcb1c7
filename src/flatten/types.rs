use indexmap::IndexMap;
use std::fmt;

/// An ordered mapping from key to child node.
pub type Object = IndexMap<String, ConfigNode>;

/// Flattened properties, in depth-first traversal order of the source tree.
pub type FlatMap = IndexMap<String, Scalar>;

/// A leaf value of a configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	String(String),
	Integer(i64),
	Real(f64),
	Boolean(bool),
	Null,
}

impl fmt::Display for Scalar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Scalar::String(value) => f.write_str(value),
			Scalar::Integer(value) => write!(f, "{}", value),
			// Debug keeps the fraction: 1.0, not 1.
			Scalar::Real(value) => write!(f, "{:?}", value),
			Scalar::Boolean(value) => write!(f, "{}", value),
			Scalar::Null => f.write_str("null"),
		}
	}
}

/// A node of a parsed configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigNode {
	Scalar(Scalar),
	Object(Object),
	List(Vec<ConfigNode>),
}

impl ConfigNode {
	/// Build an object node from `(key, node)` pairs, keeping their order.
	pub fn object<K, I>(entries: I) -> Self
	where
		K: Into<String>,
		I: IntoIterator<Item = (K, ConfigNode)>,
	{
		ConfigNode::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
	}

	/// Build a list node.
	pub fn list<I>(items: I) -> Self
	where
		I: IntoIterator<Item = ConfigNode>,
	{
		ConfigNode::List(items.into_iter().collect())
	}

	pub fn null() -> Self {
		ConfigNode::Scalar(Scalar::Null)
	}

	/// Number of scalar leaves below (and including) this node.
	pub fn leaf_count(&self) -> usize {
		match self {
			ConfigNode::Scalar(_) => 1,
			ConfigNode::Object(object) => object.values().map(ConfigNode::leaf_count).sum(),
			ConfigNode::List(items) => items.iter().map(ConfigNode::leaf_count).sum(),
		}
	}
}

impl From<Scalar> for ConfigNode {
	fn from(value: Scalar) -> Self {
		ConfigNode::Scalar(value)
	}
}

impl From<&str> for ConfigNode {
	fn from(value: &str) -> Self {
		ConfigNode::Scalar(Scalar::String(value.to_string()))
	}
}

impl From<String> for ConfigNode {
	fn from(value: String) -> Self {
		ConfigNode::Scalar(Scalar::String(value))
	}
}

impl From<i64> for ConfigNode {
	fn from(value: i64) -> Self {
		ConfigNode::Scalar(Scalar::Integer(value))
	}
}

impl From<f64> for ConfigNode {
	fn from(value: f64) -> Self {
		ConfigNode::Scalar(Scalar::Real(value))
	}
}

impl From<bool> for ConfigNode {
	fn from(value: bool) -> Self {
		ConfigNode::Scalar(Scalar::Boolean(value))
	}
}
