use tracing::trace;

use crate::plist::container::{decode_array, decode_dictionary};
use crate::plist::dynamic::to_dynamic;
use crate::plist::lax::coerce_text;
use crate::plist::{Decode, DecodeError, Node, Result, Slot, Uid};

/// Behavior switches for one decode operation.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
	/// Best-effort text-to-scalar coercion when a string meets a non-text slot.
	pub lax: bool,
	/// Maximum container nesting; `None` leaves recursion unbounded.
	pub max_depth: Option<u32>,
}

impl DecodeOptions {
	/// Default options with lax coercion enabled.
	pub fn lax() -> Self {
		Self {
			lax: true,
			max_depth: None,
		}
	}

	/// Strict preset with a nesting bound for untrusted documents.
	pub fn hardened() -> Self {
		Self {
			lax: false,
			max_depth: Some(256),
		}
	}
}

/// Type-directed decoder from document nodes into [`Decode`] destinations.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
	options: DecodeOptions,
}

impl Decoder {
	/// Create a decoder using `options` for every call.
	pub fn new(options: DecodeOptions) -> Self {
		Self { options }
	}

	/// Options this decoder was built with.
	pub fn options(&self) -> &DecodeOptions {
		&self.options
	}

	/// Decode `node` into `dest`.
	///
	/// A missing node leaves `dest` untouched. Failures inside arrays and
	/// dictionaries are collected into [`DecodeError::Multiple`] while the
	/// remaining entries are still decoded.
	pub fn decode(&self, node: Option<&Node>, dest: &mut dyn Decode) -> Result<()> {
		match node {
			Some(node) => self.dispatch(node, dest, 0),
			None => Ok(()),
		}
	}

	pub(crate) fn dispatch(&self, node: &Node, dest: &mut dyn Decode, depth: u32) -> Result<()> {
		if let Some(max_depth) = self.options.max_depth
			&& depth > max_depth
		{
			return Err(DecodeError::DepthExceeded { max_depth });
		}

		let dest_type = dest.type_name();
		trace!(node = node.kind(), dest = dest_type, depth, "dispatch");

		let slot = match dest.slot() {
			Slot::Indirect(inner) => return self.dispatch(node, inner, depth),
			Slot::Any(value) => {
				*value = to_dynamic(node);
				return Ok(());
			}
			Slot::Custom(hook) => {
				let mut cx = HookContext { decoder: self, node, depth };
				return hook.decode_plist(&mut cx);
			}
			slot => slot,
		};

		let mismatch = || DecodeError::TypeMismatch {
			dest_type,
			node_kind: node.kind(),
		};

		match (node, slot) {
			(Node::Date(at), Slot::Date(out)) => *out = *at,
			(Node::Date(_), _) => return Err(mismatch()),
			(Node::String(text), Slot::Text(hook)) => return hook.decode_text(text).map_err(DecodeError::Custom),
			(_, Slot::Text(_)) => return Err(mismatch()),

			(Node::String(text), Slot::Str(out)) => out.clone_from(text),
			(Node::String(text), slot) if self.options.lax => return coerce_text(text, slot, dest_type),

			(Node::Number { value, .. }, Slot::Int(out)) => out.set(*value as i64),
			(Node::Number { value, .. }, Slot::Uint(out)) => out.set(*value),
			(Node::Number { value, .. }, Slot::Uid(out)) => *out = Uid(*value),
			(Node::Real { value, .. }, Slot::Float(out)) => out.set(*value),
			(Node::Boolean(value), Slot::Bool(out)) => *out = *value,

			(Node::Data(bytes), Slot::Seq(seq)) => match seq.bytes() {
				Some(out) => out.clone_from(bytes),
				None => return Err(mismatch()),
			},
			(Node::Data(bytes), Slot::Array(array)) => {
				let Some(out) = array.bytes() else {
					return Err(mismatch());
				};
				if out.len() < bytes.len() {
					return Err(DecodeError::DataTooLarge {
						len: bytes.len(),
						capacity: out.len(),
					});
				}
				out[..bytes.len()].copy_from_slice(bytes);
			}

			(Node::Uid(id), Slot::Uid(out)) => *out = Uid(*id),
			(Node::Uid(id), Slot::Int(out)) => out.set(*id as i64),
			(Node::Uid(id), Slot::Uint(out)) => out.set(*id),

			(Node::Array(items), slot) => return decode_array(self, items, slot, dest_type, depth),
			(Node::Dictionary(entries), slot) => return decode_dictionary(self, entries, slot, dest_type, depth),

			_ => return Err(mismatch()),
		}

		Ok(())
	}
}

/// Handle given to [`DecodePlist`](crate::plist::DecodePlist) hooks.
///
/// It re-enters the decoder on the node the hook was invoked for.
pub struct HookContext<'a> {
	decoder: &'a Decoder,
	node: &'a Node,
	depth: u32,
}

impl HookContext<'_> {
	/// Decode the current node into `target`.
	pub fn decode_into(&self, target: &mut dyn Decode) -> Result<()> {
		self.decoder.dispatch(self.node, target, self.depth)
	}

	/// Kind name of the current node.
	pub fn node_kind(&self) -> &'static str {
		self.node.kind()
	}

	/// Options of the running decode.
	pub fn options(&self) -> &DecodeOptions {
		self.decoder.options()
	}
}

/// Decode `node` into `dest` with default options.
pub fn decode(node: &Node, dest: &mut impl Decode) -> Result<()> {
	Decoder::default().decode(Some(node), dest)
}

/// Decode `node` into `dest` with explicit options.
pub fn decode_with(node: &Node, dest: &mut impl Decode, options: &DecodeOptions) -> Result<()> {
	Decoder::new(options.clone()).decode(Some(node), dest)
}

#[cfg(test)]
mod tests;
