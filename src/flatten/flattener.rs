use crate::flatten::types::{ConfigNode, FlatMap, Object};

/// Flatten a parsed document into a single-level property map.
///
/// Traversal is depth-first pre-order:
/// - Object children are addressed as `parent.key` (top-level keys as-is)
/// - List elements are addressed as `parent[index]`, zero-based
/// - Scalars, including null, are recorded under their full path
///
/// Empty objects and lists contribute no entries. Keys are joined literally,
/// so an empty key yields `""` at the top level or `parent.` below it.
pub fn flatten(root: Object) -> FlatMap {
	let mut result = FlatMap::new();

	for (key, value) in root {
		flatten_into(&mut result, key, value);
	}

	result
}

fn flatten_into(result: &mut FlatMap, path: String, value: ConfigNode) {
	match value {
		ConfigNode::Object(object) => {
			for (key, child) in object {
				flatten_into(result, join_key(&path, &key), child);
			}
		}
		ConfigNode::List(items) => {
			for (index, item) in items.into_iter().enumerate() {
				flatten_into(result, index_path(&path, index), item);
			}
		}
		ConfigNode::Scalar(scalar) => {
			result.insert(path, scalar);
		}
	}
}

/// Path of an object member below `parent`.
pub fn join_key(parent: &str, key: &str) -> String {
	format!("{}.{}", parent, key)
}

/// Path of a list element below `parent`.
pub fn index_path(parent: &str, index: usize) -> String {
	format!("{}[{}]", parent, index)
}
