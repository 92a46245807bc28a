use tracing::debug;

use crate::plist::node::last_wins;
use crate::plist::{Decode, DecodeError, Decoder, ErrorCollection, Location, Node, Result, Slot};

/// Capacity below which growable sequences double instead of growing by 25%.
const SMALL_SEQ_CAPACITY: usize = 1024;

/// Next backing capacity for a growable sequence.
pub(crate) fn grow_capacity(capacity: usize) -> usize {
	if capacity == 0 {
		4
	} else if capacity < SMALL_SEQ_CAPACITY {
		capacity * 2
	} else {
		capacity + capacity / 4
	}
}

/// Decode an array node into a growable or fixed-size sequence.
///
/// Growable destinations keep their existing elements and receive the new
/// ones after them.
pub(crate) fn decode_array(decoder: &Decoder, items: &[Node], slot: Slot<'_>, dest_type: &'static str, depth: u32) -> Result<()> {
	let mut errors = ErrorCollection::new();

	match slot {
		Slot::Seq(seq) => {
			let start = seq.len();
			let total = start + items.len();
			if total > seq.capacity() {
				let mut capacity = seq.capacity();
				while capacity < total {
					capacity = grow_capacity(capacity);
				}
				seq.reserve_total(capacity);
			}
			seq.resize(total);

			for (offset, item) in items.iter().enumerate() {
				let index = start + offset;
				if let Some(target) = seq.element(index) {
					contain(&mut errors, Location::Index(index), decoder.dispatch(item, target, depth + 1));
				}
			}
		}
		Slot::Array(array) => {
			if items.len() > array.len() {
				return Err(DecodeError::ArrayTooLarge {
					len: items.len(),
					capacity: array.len(),
				});
			}

			for (index, item) in items.iter().enumerate() {
				if let Some(target) = array.element(index) {
					contain(&mut errors, Location::Index(index), decoder.dispatch(item, target, depth + 1));
				}
			}
		}
		_ => {
			return Err(DecodeError::TypeMismatch {
				dest_type,
				node_kind: "array",
			});
		}
	}

	errors.into_result()
}

/// Decode a dictionary node into a record or a map.
pub(crate) fn decode_dictionary(decoder: &Decoder, entries: &[(String, Node)], slot: Slot<'_>, dest_type: &'static str, depth: u32) -> Result<()> {
	let mut errors = ErrorCollection::new();

	match slot {
		Slot::Record(record) => {
			let fields = record.describe_fields()?;
			let lookup = last_wins(entries);

			for (index, field) in fields.iter().enumerate() {
				let Some(node) = lookup.get(&*field.name) else {
					continue;
				};

				let not_settable = || DecodeError::FieldNotSettable {
					field: field.name.to_string(),
				};
				let result = match record.field_slot(index) {
					Some(target) if field.settable => decoder.dispatch(node, target, depth + 1),
					_ => Err(not_settable()),
				};
				contain(&mut errors, Location::Field(field.name.to_string()), result);
			}
		}
		Slot::Map(map) => {
			if !map.text_keys() {
				return Err(DecodeError::NonTextKey { key_type: map.key_type() });
			}

			for (key, node) in entries {
				let result = map.decode_entry(key, &mut |target: &mut dyn Decode| decoder.dispatch(node, target, depth + 1));
				contain(&mut errors, Location::Key(key.clone()), result);
			}
		}
		_ => {
			return Err(DecodeError::TypeMismatch {
				dest_type,
				node_kind: "dictionary",
			});
		}
	}

	errors.into_result()
}

fn contain(errors: &mut ErrorCollection, location: Location, result: Result<()>) {
	if let Err(err) = result {
		debug!(%location, error = %err, "contained decode failure");
		errors.push(location, err);
	}
}
