use std::path::PathBuf;

use plistdoc::plist::DecodeError;
use thiserror::Error;

/// CLI result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Input file could not be read.
	#[error("io: {}: {source}", path.display())]
	Io {
		/// Offending path.
		path: PathBuf,
		/// Underlying failure.
		source: std::io::Error,
	},
	/// Input file is not a serialized document tree.
	#[error("invalid document tree {}: {source}", path.display())]
	Json {
		/// Offending path.
		path: PathBuf,
		/// Underlying failure.
		source: serde_json::Error,
	},
	/// Output could not be rendered.
	#[error("render: {0}")]
	Render(serde_json::Error),
	/// Root node is not a dictionary.
	#[error("root node is {kind}, expected dictionary")]
	RootNotDictionary {
		/// Kind of the root node.
		kind: &'static str,
	},
	/// Requested key is absent from the root dictionary.
	#[error("key {key:?} not found in root dictionary")]
	KeyNotFound {
		/// Requested key.
		key: String,
	},
	/// Decoding failed.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}
