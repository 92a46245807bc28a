use std::path::PathBuf;

use plistdoc::plist::to_dynamic;
use tracing::debug;

use crate::cmd::error::Result;
use crate::cmd::print::{PrintOptions, print_value, value_to_json};
use crate::cmd::util::{emit_json, load_tree};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-array")]
	pub max_array: Option<usize>,
	#[arg(long = "max-print-depth")]
	pub max_print_depth: Option<u32>,
}

/// Materialize a document tree and print it.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		json,
		max_array,
		max_print_depth,
	} = args;

	let tree = load_tree(&path)?;
	debug!(path = %path.display(), root = tree.kind(), "loaded document tree");
	let value = to_dynamic(&tree);

	if json {
		return emit_json(&serde_json::json!({
			"path": path.display().to_string(),
			"root": tree.kind(),
			"value": value_to_json(&value),
		}));
	}

	let mut options = PrintOptions::default();
	if let Some(max_array) = max_array {
		options.max_array_items = max_array;
	}
	if let Some(max_print_depth) = max_print_depth {
		options.max_print_depth = max_print_depth;
	}

	println!("path: {}", path.display());
	println!("root: {}", tree.kind());
	println!("value:");
	print_value(&value, 0, 0, options);
	Ok(())
}
