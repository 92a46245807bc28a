use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::plist::{Date, Node};

/// Keyed-archive object reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Uid(pub u64);

/// Type-erased mirror of a document subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Value {
	/// Absent value.
	#[default]
	Null,
	/// Boolean.
	Bool(bool),
	/// Signed integer.
	I64(i64),
	/// Unsigned integer.
	U64(u64),
	/// 32-bit real.
	F32(f32),
	/// 64-bit real.
	F64(f64),
	/// Text.
	String(String),
	/// Raw bytes.
	Data(Vec<u8>),
	/// Timestamp.
	Date(Date),
	/// Object reference.
	Uid(Uid),
	/// Ordered values.
	Array(Vec<Value>),
	/// Unordered string-keyed values.
	Dictionary(HashMap<String, Value>),
}

impl Value {
	/// Kind name used by printers.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::I64(_) => "i64",
			Self::U64(_) => "u64",
			Self::F32(_) => "f32",
			Self::F64(_) => "f64",
			Self::String(_) => "string",
			Self::Data(_) => "data",
			Self::Date(_) => "date",
			Self::Uid(_) => "uid",
			Self::Array(_) => "array",
			Self::Dictionary(_) => "dictionary",
		}
	}

	/// Rebuild a document node carrying the same scalars and nesting.
	///
	/// `Null` has no node form. Nulls nested in containers are dropped.
	pub fn to_node(&self) -> Option<Node> {
		let node = match self {
			Self::Null => return None,
			Self::Bool(v) => Node::Boolean(*v),
			Self::I64(v) => Node::int(*v),
			Self::U64(v) => Node::uint(*v),
			Self::F32(v) => Node::real32(*v),
			Self::F64(v) => Node::real(*v),
			Self::String(v) => Node::String(v.clone()),
			Self::Data(v) => Node::Data(v.clone()),
			Self::Date(v) => Node::Date(*v),
			Self::Uid(v) => Node::Uid(v.0),
			Self::Array(items) => Node::Array(items.iter().filter_map(Value::to_node).collect()),
			Self::Dictionary(entries) => Node::Dictionary(
				entries
					.iter()
					.filter_map(|(key, value)| value.to_node().map(|node| (key.clone(), node)))
					.collect(),
			),
		};
		Some(node)
	}

	/// Entry of a dictionary value.
	pub fn get(&self, key: &str) -> Option<&Value> {
		match self {
			Self::Dictionary(entries) => entries.get(key),
			_ => None,
		}
	}
}
