use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::plist::Date;

/// One value of a parsed, format-agnostic property-list tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
	/// Text.
	String(String),
	/// Integer magnitude plus the signedness recorded by the source format.
	Number {
		/// Raw 64-bit magnitude.
		value: u64,
		/// Whether the source encoded a signed integer.
		signed: bool,
	},
	/// Floating-point value plus its encoded precision.
	Real {
		/// Value widened to 64 bits.
		value: f64,
		/// `true` for 64-bit encodings, `false` for 32-bit.
		wide: bool,
	},
	/// Boolean.
	Boolean(bool),
	/// Raw bytes.
	Data(Vec<u8>),
	/// Absolute UTC timestamp.
	Date(Date),
	/// Cross-reference marker used by keyed-archive plists.
	Uid(u64),
	/// Ordered children.
	Array(Vec<Node>),
	/// Ordered key/value pairs; keys may repeat.
	Dictionary(Vec<(String, Node)>),
}

impl Node {
	/// Signed integer node.
	pub fn int(value: i64) -> Self {
		Self::Number {
			value: value as u64,
			signed: true,
		}
	}

	/// Unsigned integer node.
	pub fn uint(value: u64) -> Self {
		Self::Number { value, signed: false }
	}

	/// 64-bit real node.
	pub fn real(value: f64) -> Self {
		Self::Real { value, wide: true }
	}

	/// 32-bit real node.
	pub fn real32(value: f32) -> Self {
		Self::Real {
			value: f64::from(value),
			wide: false,
		}
	}

	/// String node.
	pub fn string(text: impl Into<String>) -> Self {
		Self::String(text.into())
	}

	/// Dictionary node from `(key, value)` pairs in document order.
	pub fn dict<K: Into<String>>(entries: impl IntoIterator<Item = (K, Node)>) -> Self {
		Self::Dictionary(entries.into_iter().map(|(key, value)| (key.into(), value)).collect())
	}

	/// Kind name used in diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::String(_) => "string",
			Self::Number { .. } => "integer",
			Self::Real { .. } => "real",
			Self::Boolean(_) => "boolean",
			Self::Data(_) => "data",
			Self::Date(_) => "date",
			Self::Uid(_) => "UID",
			Self::Array(_) => "array",
			Self::Dictionary(_) => "dictionary",
		}
	}

	/// Last value stored under `key` when this is a dictionary.
	pub fn get(&self, key: &str) -> Option<&Node> {
		match self {
			Self::Dictionary(entries) => entries.iter().rev().find(|(name, _)| name == key).map(|(_, value)| value),
			_ => None,
		}
	}
}

/// Build a `key -> node` view where the last occurrence of a key wins.
pub(crate) fn last_wins(entries: &[(String, Node)]) -> HashMap<&str, &Node> {
	let mut out = HashMap::with_capacity(entries.len());
	for (key, value) in entries {
		out.insert(key.as_str(), value);
	}
	out
}
