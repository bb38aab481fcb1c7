use crate::error::{HoconPropsError, Result};
use crate::flatten::{ConfigNode, Object, Scalar, index_path, join_key};
use crate::options::LoaderOptions;
use hocon::{Hocon, HoconLoader};
use log::{debug, warn};
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Label used for documents parsed from memory.
const INLINE_SOURCE: &str = "<inline>";

/// Matches `${?path}`, capturing the path.
static OPTIONAL_SUBSTITUTION: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"\$\{\?\s*"?([^}"\s]+)"?\s*\}"#).expect("optional substitution pattern")
});

/// Parse a HOCON file into a configuration tree.
///
/// Includes are resolved relative to the file, substitutions are resolved
/// before the tree is returned.
pub fn parse_file(path: &Path, options: &LoaderOptions) -> Result<Object> {
	if !path.exists() {
		return Err(HoconPropsError::ResourceNotFound {
			path: path.to_path_buf(),
		});
	}

	let content =
		std::fs::read_to_string(path).map_err(|source| HoconPropsError::ResourceReadError {
			path: path.to_path_buf(),
			source,
		})?;

	debug!("parsing HOCON file (path={})", path.display());
	let document = hocon_loader(options)
		.load_file(path)
		.and_then(|loader| loader.hocon())
		.map_err(|source| HoconPropsError::ParseError {
			path: path.to_path_buf(),
			source,
		})?;

	Converter::new(options, &content).convert_root(document, path)
}

/// Parse HOCON text into a configuration tree (useful for testing).
pub fn parse_str(content: &str, options: &LoaderOptions) -> Result<Object> {
	let path = PathBuf::from(INLINE_SOURCE);

	let document = hocon_loader(options)
		.load_str(content)
		.and_then(|loader| loader.hocon())
		.map_err(|source| HoconPropsError::ParseError {
			path: path.clone(),
			source,
		})?;

	Converter::new(options, content).convert_root(document, &path)
}

/// Unresolved values come back as `Hocon::BadValue`; `Converter` decides
/// whether they fail the load.
fn hocon_loader(options: &LoaderOptions) -> HoconLoader {
	let loader = HoconLoader::new();
	if options.system_env {
		loader
	} else {
		loader.no_system()
	}
}

/// Optional substitution targets named in `content`.
fn optional_targets(content: &str) -> HashSet<String> {
	OPTIONAL_SUBSTITUTION
		.captures_iter(content)
		.map(|caps| caps[1].to_string())
		.collect()
}

/// Converts `Hocon` values into `ConfigNode`s.
///
/// Values left unresolved by an optional substitution are dropped. Other
/// unresolved values fail the load in strict mode and are dropped with a
/// warning otherwise.
struct Converter {
	strict: bool,
	optional: HashSet<String>,
}

impl Converter {
	fn new(options: &LoaderOptions, content: &str) -> Self {
		Converter {
			strict: options.strict,
			optional: optional_targets(content),
		}
	}

	fn convert_root(&self, document: Hocon, path: &Path) -> Result<Object> {
		match document {
			Hocon::Hash(members) => self.convert_object(members, None),
			_ => Err(HoconPropsError::RootNotObject {
				path: path.to_path_buf(),
			}),
		}
	}

	/// Convert the value at `path`; `None` means the value is left out.
	fn convert(&self, value: Hocon, path: &str) -> Result<Option<ConfigNode>> {
		let node = match value {
			Hocon::Integer(value) => ConfigNode::Scalar(Scalar::Integer(value)),
			Hocon::Real(value) => ConfigNode::Scalar(Scalar::Real(value)),
			Hocon::String(value) => ConfigNode::Scalar(Scalar::String(value)),
			Hocon::Boolean(value) => ConfigNode::Scalar(Scalar::Boolean(value)),
			Hocon::Null => ConfigNode::Scalar(Scalar::Null),
			Hocon::Array(items) => {
				let mut list = Vec::with_capacity(items.len());
				for (index, item) in items.into_iter().enumerate() {
					if let Some(node) = self.convert(item, &index_path(path, index))? {
						list.push(node);
					}
				}
				ConfigNode::List(list)
			}
			Hocon::Hash(members) => ConfigNode::Object(self.convert_object(members, Some(path))?),
			Hocon::BadValue(source) => return self.unresolved(source, path),
		};

		Ok(Some(node))
	}

	/// Convert the members of a `Hocon::Hash`, ordered by key.
	fn convert_object<I>(&self, members: I, path: Option<&str>) -> Result<Object>
	where
		I: IntoIterator<Item = (String, Hocon)>,
	{
		let mut members: Vec<(String, Hocon)> = members.into_iter().collect();
		members.sort_by(|(a, _), (b, _)| a.cmp(b));

		let mut object = Object::with_capacity(members.len());
		for (key, member) in members {
			let child_path = match path {
				Some(parent) => join_key(parent, &key),
				None => key.clone(),
			};
			if let Some(node) = self.convert(member, &child_path)? {
				object.insert(key, node);
			}
		}

		Ok(object)
	}

	fn unresolved(&self, source: hocon::Error, path: &str) -> Result<Option<ConfigNode>> {
		if let hocon::Error::KeyNotFound { ref key } = source
			&& self.optional.contains(key)
		{
			debug!("optional substitution unset, leaving out {} (target={})", path, key);
			return Ok(None);
		}

		if self.strict {
			return Err(HoconPropsError::BadValue {
				key: path.to_string(),
				source,
			});
		}

		warn!("leaving out unresolvable value at {}: {}", path, source);
		Ok(None)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::flatten::flatten;

	fn options() -> LoaderOptions {
		LoaderOptions::default()
	}

	#[test]
	fn test_parse_scalars() {
		let content = r#"
host = localhost
port = 8080
ratio = 0.5
enabled = true
missing = null
"#;
		let root = parse_str(content, &options()).unwrap();

		assert_eq!(root["host"], ConfigNode::from("localhost"));
		assert_eq!(root["port"], ConfigNode::from(8080_i64));
		assert_eq!(root["ratio"], ConfigNode::from(0.5));
		assert_eq!(root["enabled"], ConfigNode::from(true));
		assert_eq!(root["missing"], ConfigNode::null());
	}

	#[test]
	fn test_parse_nested_objects_and_lists() {
		let content = r#"
server {
  ports = [80, 443]
}
"#;
		let root = parse_str(content, &options()).unwrap();

		let expected = ConfigNode::object([(
			"ports",
			ConfigNode::list([ConfigNode::from(80_i64), ConfigNode::from(443_i64)]),
		)]);
		assert_eq!(root["server"], expected);
	}

	#[test]
	fn test_parse_dotted_keys_nest() {
		let root = parse_str("a.b.c = x", &options()).unwrap();
		let flat = flatten(root);

		assert_eq!(flat["a.b.c"], Scalar::String("x".to_string()));
	}

	#[test]
	fn test_parse_sorts_object_members() {
		let root = parse_str("b = 1\na = 2\nc = 3", &options()).unwrap();
		let keys: Vec<_> = root.keys().map(String::as_str).collect();

		assert_eq!(keys, ["a", "b", "c"]);
	}

	#[test]
	fn test_parse_resolves_substitutions() {
		let content = r#"
base = "http://localhost"
api = ${base}
"#;
		let flat = flatten(parse_str(content, &options()).unwrap());

		assert_eq!(flat["api"], Scalar::String("http://localhost".to_string()));
	}

	#[test]
	fn test_parse_empty_document() {
		let root = parse_str("", &options()).unwrap();
		assert!(root.is_empty());
	}

	#[test]
	fn test_parse_invalid_document() {
		let result = parse_str("a = [1, 2", &options());

		match result.unwrap_err() {
			HoconPropsError::ParseError { path, .. } => {
				assert_eq!(path, PathBuf::from(INLINE_SOURCE));
			}
			other => panic!("Expected ParseError, got {other:?}"),
		}
	}

	#[test]
	fn test_parse_file_not_found() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("application.conf");

		let result = parse_file(&path, &options());

		match result.unwrap_err() {
			HoconPropsError::ResourceNotFound { path: missing } => assert_eq!(missing, path),
			other => panic!("Expected ResourceNotFound, got {other:?}"),
		}
	}

	#[test]
	fn test_parse_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("application.conf");
		std::fs::write(&path, "db { url = \"jdbc:h2:mem\" }").unwrap();

		let root = parse_file(&path, &options()).unwrap();

		assert_eq!(
			root["db"],
			ConfigNode::object([("url", ConfigNode::from("jdbc:h2:mem"))])
		);
	}

	#[test]
	fn test_convert_bad_value_names_key() {
		let empty = Hocon::Hash(Default::default());
		let bad = empty["missing"].clone();
		let value = Hocon::Hash(
			[("server".to_string(), Hocon::Array(vec![Hocon::Integer(1), bad]))]
				.into_iter()
				.collect(),
		);

		let converter = Converter::new(&options(), "");
		match converter.convert_root(value, Path::new(INLINE_SOURCE)).unwrap_err() {
			HoconPropsError::BadValue { key, .. } => assert_eq!(key, "server[1]"),
			other => panic!("Expected BadValue, got {other:?}"),
		}
	}

	#[test]
	fn test_lenient_drops_bad_list_element() {
		let empty = Hocon::Hash(Default::default());
		let bad = empty["missing"].clone();
		let value = Hocon::Hash(
			[("server".to_string(), Hocon::Array(vec![Hocon::Integer(1), bad]))]
				.into_iter()
				.collect(),
		);
		let lenient = LoaderOptions {
			strict: false,
			..LoaderOptions::default()
		};

		let root = Converter::new(&lenient, "").convert_root(value, Path::new(INLINE_SOURCE)).unwrap();

		assert_eq!(root["server"], ConfigNode::list([ConfigNode::from(1_i64)]));
	}

	#[test]
	fn test_strict_fails_on_unresolvable_substitution() {
		let result = parse_str("a = 1\nb = ${does_not_exist_zz}", &options());

		match result.unwrap_err() {
			HoconPropsError::BadValue { key, .. } => assert_eq!(key, "b"),
			other => panic!("Expected BadValue, got {other:?}"),
		}
	}

	#[test]
	fn test_lenient_leaves_out_unresolvable_substitution() {
		let lenient = LoaderOptions {
			strict: false,
			..LoaderOptions::default()
		};

		let root = parse_str("a = 1\nb = ${does_not_exist_zz}", &lenient).unwrap();

		assert_eq!(root["a"], ConfigNode::from(1_i64));
		assert!(!root.contains_key("b"));
	}

	#[test]
	fn test_unset_optional_substitution_is_left_out() {
		let content = "a = ${?HOCON_PROPS_UNSET_ZZ}\nb = 1";
		let lenient = LoaderOptions {
			strict: false,
			..LoaderOptions::default()
		};

		for options in [options(), lenient] {
			let root = parse_str(content, &options).unwrap();

			assert!(!root.contains_key("a"));
			assert_eq!(root["b"], ConfigNode::from(1_i64));
		}
	}

	#[test]
	fn test_optional_substitution_from_environment() {
		let content = "home = ${?HOME}\nb = 1";
		let no_env = LoaderOptions {
			system_env: false,
			..LoaderOptions::default()
		};

		let root = parse_str(content, &options()).unwrap();
		let expected = std::env::var("HOME").unwrap();
		assert_eq!(root["home"], ConfigNode::from(expected));

		let root = parse_str(content, &no_env).unwrap();
		assert!(!root.contains_key("home"));
		assert_eq!(root["b"], ConfigNode::from(1_i64));
	}

	#[test]
	fn test_optional_targets() {
		let targets = optional_targets("a = ${?HOME}\nb = ${?\"x.y\"}\nc = ${required}");

		assert!(targets.contains("HOME"));
		assert!(targets.contains("x.y"));
		assert!(!targets.contains("required"));
	}
}
