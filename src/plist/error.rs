use std::fmt;

use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Boxed error returned by user-supplied decode hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while decoding a document tree into a destination.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// Destination kind cannot hold the node kind.
	#[error("type mismatch: tried to decode plist type `{node_kind}' into value of type `{dest_type}'")]
	TypeMismatch {
		/// Declared destination type name.
		dest_type: &'static str,
		/// Kind name of the offending node.
		node_kind: &'static str,
	},
	/// Data payload is larger than a fixed-size byte array.
	#[error("attempted to unmarshal {len} bytes into a byte array of size {capacity}")]
	DataTooLarge {
		/// Payload length in bytes.
		len: usize,
		/// Fixed destination size.
		capacity: usize,
	},
	/// Array node has more elements than a fixed-size destination.
	#[error("attempted to unmarshal {len} values into an array of size {capacity}")]
	ArrayTooLarge {
		/// Source element count.
		len: usize,
		/// Fixed destination size.
		capacity: usize,
	},
	/// Record field is described but cannot be written.
	#[error("field {field:?} not settable")]
	FieldNotSettable {
		/// Document key of the field.
		field: String,
	},
	/// Map destination key type cannot be built from text.
	#[error("attempt to decode dictionary into map with non-string key type `{key_type}'")]
	NonTextKey {
		/// Declared key type name.
		key_type: &'static str,
	},
	/// Lax text-to-scalar conversion failed.
	#[error("cannot parse {text:?} as {target}: {reason}")]
	Coerce {
		/// Source text.
		text: String,
		/// Target kind being parsed.
		target: &'static str,
		/// Parser failure description.
		reason: String,
	},
	/// Field descriptor provider rejected a record type.
	#[error("unsupported record type `{type_name}': {reason}")]
	UnsupportedMetadata {
		/// Record type name.
		type_name: &'static str,
		/// Provider failure description.
		reason: String,
	},
	/// Container nesting exceeded the configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Failure raised by a custom or textual decode hook.
	#[error(transparent)]
	Custom(BoxError),
	/// Independent failures collected while decoding a container.
	#[error(transparent)]
	Multiple(ErrorCollection),
}

impl DecodeError {
	/// Wrap a hook-originated error.
	pub fn custom(err: impl Into<BoxError>) -> Self {
		Self::Custom(err.into())
	}

	/// Aggregated causes, when this error is a collection.
	pub fn causes(&self) -> Option<&ErrorCollection> {
		match self {
			Self::Multiple(causes) => Some(causes),
			_ => None,
		}
	}
}

/// Position of a contained failure inside its parent container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
	/// 0-based sequence index.
	Index(usize),
	/// Record field document key.
	Field(String),
	/// Map key.
	Key(String),
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Index(index) => write!(f, "element {index}"),
			Self::Field(name) => write!(f, "field {name:?}"),
			Self::Key(key) => write!(f, "map key {key:?}"),
		}
	}
}

/// One failure tagged with where it happened.
#[derive(Debug)]
pub struct LocatedError {
	/// Where the failure occurred.
	pub location: Location,
	/// What went wrong.
	pub error: DecodeError,
}

/// Ordered list of independent decode failures.
///
/// An empty collection means success; see [`ErrorCollection::into_result`].
#[derive(Debug, Default)]
pub struct ErrorCollection {
	causes: Vec<LocatedError>,
}

impl ErrorCollection {
	/// Create an empty collection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append one located cause.
	pub fn push(&mut self, location: Location, error: DecodeError) {
		self.causes.push(LocatedError { location, error });
	}

	/// Number of causes.
	pub fn len(&self) -> usize {
		self.causes.len()
	}

	/// Whether no failure was recorded.
	pub fn is_empty(&self) -> bool {
		self.causes.is_empty()
	}

	/// Iterate causes in the order they were recorded.
	pub fn iter(&self) -> std::slice::Iter<'_, LocatedError> {
		self.causes.iter()
	}

	/// Causes recorded at `location`.
	pub fn causes_at<'a>(&'a self, location: &'a Location) -> impl Iterator<Item = &'a DecodeError> + 'a {
		self.causes.iter().filter(move |cause| &cause.location == location).map(|cause| &cause.error)
	}

	/// `Ok(())` when empty, otherwise the collection as an error.
	pub fn into_result(self) -> Result<()> {
		if self.causes.is_empty() { Ok(()) } else { Err(DecodeError::Multiple(self)) }
	}
}

impl IntoIterator for ErrorCollection {
	type Item = LocatedError;
	type IntoIter = std::vec::IntoIter<LocatedError>;

	fn into_iter(self) -> Self::IntoIter {
		self.causes.into_iter()
	}
}

impl<'a> IntoIterator for &'a ErrorCollection {
	type Item = &'a LocatedError;
	type IntoIter = std::slice::Iter<'a, LocatedError>;

	fn into_iter(self) -> Self::IntoIter {
		self.causes.iter()
	}
}

impl fmt::Display for ErrorCollection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.causes.len() {
			1 => write!(f, "1 error occurred:")?,
			n => write!(f, "{n} errors occurred:")?,
		}
		for cause in &self.causes {
			write!(f, "\n\t* {}: {}", cause.location, cause.error)?;
		}
		Ok(())
	}
}

impl std::error::Error for ErrorCollection {}
