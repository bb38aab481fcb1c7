//! hocon-props - load HOCON files into flat, ordered property sources.
//!
//! This library provides:
//! - A `ConfigNode` tree model and the flattening routine that turns it into
//!   dotted/indexed property paths (`server.ports[0]`, `db.replicas[2].host`)
//! - A loader that parses HOCON through the `hocon` crate and wraps the
//!   flattened result in a named `PropertySource`
//! - Loader options read from TOML
//!
//! # Example
//!
//! ```no_run
//! use hocon_props::loader::PropertySourceLoader;
//! use hocon_props::options::load_options;
//! use std::path::Path;
//!
//! let options = load_options(None).unwrap();
//! let loader = PropertySourceLoader::new(options);
//! let sources = loader.load("application", Path::new("application.conf")).unwrap();
//!
//! for source in &sources {
//!     for (key, value) in source.iter() {
//!         println!("{key}={value}");
//!     }
//! }
//! ```

pub mod error;
pub mod flatten;
pub mod loader;
pub mod options;

pub use error::{HoconPropsError, Result};
pub use flatten::{ConfigNode, FlatMap, Object, Scalar, flatten};
pub use loader::{PropertySource, PropertySourceLoader};
