use std::collections::HashMap;

use crate::plist::{Node, Uid, Value};

/// Type-erased mirror of `node`; never fails.
///
/// Integers keep the signedness recorded by the source, reals keep their
/// encoded precision, and dictionaries collapse duplicate keys (last wins).
pub fn to_dynamic(node: &Node) -> Value {
	match node {
		Node::String(text) => Value::String(text.clone()),
		Node::Number { value, signed: true } => Value::I64(*value as i64),
		Node::Number { value, signed: false } => Value::U64(*value),
		Node::Real { value, wide: true } => Value::F64(*value),
		Node::Real { value, wide: false } => Value::F32(*value as f32),
		Node::Boolean(value) => Value::Bool(*value),
		Node::Data(bytes) => Value::Data(bytes.clone()),
		Node::Date(at) => Value::Date(*at),
		Node::Uid(id) => Value::Uid(Uid(*id)),
		Node::Array(items) => Value::Array(items.iter().map(to_dynamic).collect()),
		Node::Dictionary(entries) => {
			let mut out = HashMap::with_capacity(entries.len());
			for (key, value) in entries {
				out.insert(key.clone(), to_dynamic(value));
			}
			Value::Dictionary(out)
		}
	}
}

/// Like [`to_dynamic`], mapping an absent node to [`Value::Null`].
pub fn materialize(node: Option<&Node>) -> Value {
	node.map_or(Value::Null, to_dynamic)
}
