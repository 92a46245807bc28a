use std::fs;
use std::path::Path;

use plistdoc::plist::Node;

use crate::cmd::error::{CliError, Result};

/// Load a document tree stored as serialized `Node` JSON.
pub(crate) fn load_tree(path: &Path) -> Result<Node> {
	let bytes = fs::read(path).map_err(|source| CliError::Io {
		path: path.to_owned(),
		source,
	})?;
	serde_json::from_slice(&bytes).map_err(|source| CliError::Json {
		path: path.to_owned(),
		source,
	})
}

/// Print a JSON document to stdout.
pub(crate) fn emit_json(value: &serde_json::Value) -> Result<()> {
	let text = serde_json::to_string_pretty(value).map_err(CliError::Render)?;
	println!("{text}");
	Ok(())
}
