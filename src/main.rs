use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use hocon_props::loader::{PropertySource, PropertySourceLoader, compile_filter};
use hocon_props::options::{EmptyKeyPolicy, LoaderOptions, load_options};

#[derive(Parser)]
#[command(name = "hocon-props")]
#[command(
	author,
	version,
	about = "Load HOCON files into flat, ordered property sources"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Options file (defaults to ~/.hocon-props.toml when present)
	#[arg(long, value_name = "FILE", global = true)]
	options: Option<PathBuf>,

	/// Do not resolve substitutions from environment variables
	#[arg(long, global = true)]
	no_system_env: bool,

	/// Tolerate values that cannot be resolved
	#[arg(long, global = true)]
	lenient: bool,

	/// Keep empty keys instead of rejecting the document
	#[arg(long, global = true)]
	keep_empty_keys: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the flattened properties of each file
	Show {
		/// HOCON files to load
		#[arg(required = true)]
		files: Vec<PathBuf>,

		/// Only print keys matching this regex
		#[arg(long, value_name = "REGEX")]
		filter: Option<String>,
	},
	/// Print a single property value
	Get {
		/// HOCON file to load
		file: PathBuf,

		/// Flattened key, e.g. server.ports[0]
		key: String,
	},
	/// Check files for errors without printing properties
	Validate {
		/// HOCON files to check
		#[arg(required = true)]
		files: Vec<PathBuf>,
	},
}

fn main() -> ExitCode {
	let _ = env_logger::builder().parse_default_env().try_init();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	let options = resolve_options(&cli).context("Failed to load options")?;
	debug!("effective options: {:?}", options);
	let loader = PropertySourceLoader::new(options);

	match cli.command {
		Commands::Show { files, filter } => handle_show(&loader, &files, filter.as_deref()),
		Commands::Get { file, key } => handle_get(&loader, &file, &key),
		Commands::Validate { files } => handle_validate(&loader, &files),
	}
}

fn resolve_options(cli: &Cli) -> Result<LoaderOptions> {
	let mut options = load_options(cli.options.as_deref())?;

	if cli.no_system_env {
		options.system_env = false;
	}
	if cli.lenient {
		options.strict = false;
	}
	if cli.keep_empty_keys {
		options.empty_keys = EmptyKeyPolicy::Keep;
	}

	Ok(options)
}

fn load_file(loader: &PropertySourceLoader, path: &Path) -> Result<Vec<PropertySource>> {
	if !loader.supports(path) {
		warn!(
			"{} does not have a .{} extension, loading anyway",
			path.display(),
			loader.file_extensions().join(" / .")
		);
	}

	let name = path.display().to_string();
	loader
		.load(&name, path)
		.with_context(|| format!("Failed to load {}", path.display()))
}

fn handle_show(
	loader: &PropertySourceLoader,
	files: &[PathBuf],
	filter: Option<&str>,
) -> Result<ExitCode> {
	let filter = filter.map(compile_filter).transpose()?;

	for (i, path) in files.iter().enumerate() {
		let sources = load_file(loader, path)?;

		if i > 0 {
			println!();
		}
		println!("# Source: {}", path.display());

		if sources.is_empty() {
			println!("# (no properties)");
			continue;
		}

		for source in &sources {
			match filter {
				Some(ref regex) => {
					for (key, value) in source.filtered(regex) {
						println!("{}={}", key, value);
					}
				}
				None => {
					for (key, value) in source.iter() {
						println!("{}={}", key, value);
					}
				}
			}
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_get(loader: &PropertySourceLoader, path: &Path, key: &str) -> Result<ExitCode> {
	let sources = load_file(loader, path)?;

	match sources.iter().find_map(|source| source.get(key)) {
		Some(value) => {
			println!("{}", value);
			Ok(ExitCode::SUCCESS)
		}
		None => {
			eprintln!("Key not found: {}", key);
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_validate(loader: &PropertySourceLoader, files: &[PathBuf]) -> Result<ExitCode> {
	let mut counts = Vec::with_capacity(files.len());

	for path in files {
		match load_file(loader, path) {
			Ok(sources) => {
				let count: usize = sources.iter().map(PropertySource::len).sum();
				counts.push((path, count));
			}
			Err(e) => {
				eprintln!("Validation error: {:#}", e);
				return Ok(ExitCode::FAILURE);
			}
		}
	}

	println!("All files are valid:");
	for (path, count) in counts {
		println!("  {} ({} properties)", path.display(), count);
	}

	Ok(ExitCode::SUCCESS)
}
