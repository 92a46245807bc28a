//! Destination handles.
//!
//! Every type a document can be decoded into implements [`Decode`], which
//! exposes the type's structural kind as a [`Slot`]. The dispatcher in
//! `decode.rs` only ever sees slots, never concrete destination types.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::Arc;

use crate::plist::error::BoxError;
use crate::plist::{Date, DecodeError, FieldInfo, HookContext, Result, Uid, Value};

/// A location a document node can be decoded into.
pub trait Decode {
	/// Structural kind of this destination, borrowing it for writing.
	fn slot(&mut self) -> Slot<'_>;

	/// Declared type name reported in mismatch errors.
	///
	/// Defaults to the full path from [`std::any::type_name`]; the crate's own
	/// types report their short public names.
	fn type_name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}

	#[doc(hidden)]
	fn byte_vec(_items: &mut Vec<Self>) -> Option<&mut Vec<u8>>
	where
		Self: Sized,
	{
		None
	}

	#[doc(hidden)]
	fn byte_slice(_items: &mut [Self]) -> Option<&mut [u8]>
	where
		Self: Sized,
	{
		None
	}
}

/// Structural view of a destination.
pub enum Slot<'a> {
	/// Pointer-like wrapper; resolved before anything else.
	Indirect(&'a mut dyn Decode),
	/// Unconstrained slot filled by the dynamic materializer.
	Any(&'a mut Value),
	/// Type that decodes itself through a [`HookContext`].
	Custom(&'a mut dyn DecodePlist),
	/// Type that decodes itself from raw text.
	Text(&'a mut dyn DecodeText),
	/// Text.
	Str(&'a mut String),
	/// Signed integer of any width.
	Int(IntSlot<'a>),
	/// Unsigned integer of any width.
	Uint(UintSlot<'a>),
	/// Floating point of either precision.
	Float(FloatSlot<'a>),
	/// Boolean.
	Bool(&'a mut bool),
	/// The designated timestamp type.
	Date(&'a mut Date),
	/// The dedicated reference type.
	Uid(&'a mut Uid),
	/// Growable sequence.
	Seq(&'a mut dyn SeqSlot),
	/// Fixed-size sequence.
	Array(&'a mut dyn ArraySlot),
	/// Keyed record with described fields.
	Record(&'a mut dyn RecordSlot),
	/// Keyed dynamic map.
	Map(&'a mut dyn MapSlot),
}

/// Capability of types that take over their own decoding.
///
/// The hook may call [`HookContext::decode_into`] any number of times to let
/// the engine decode the current node into targets of its choosing.
pub trait DecodePlist {
	/// Decode `self` from the node behind `cx`.
	fn decode_plist(&mut self, cx: &mut HookContext<'_>) -> Result<()>;
}

/// Capability of types that parse themselves from string nodes.
pub trait DecodeText {
	/// Replace `self` with the value parsed from `text`.
	fn decode_text(&mut self, text: &str) -> std::result::Result<(), BoxError>;
}

/// Signed integer destination.
pub enum IntSlot<'a> {
	/// `i8`.
	I8(&'a mut i8),
	/// `i16`.
	I16(&'a mut i16),
	/// `i32`.
	I32(&'a mut i32),
	/// `i64`.
	I64(&'a mut i64),
	/// `isize`.
	Isize(&'a mut isize),
}

impl IntSlot<'_> {
	/// Store `value`, truncating to the slot width.
	pub fn set(self, value: i64) {
		match self {
			Self::I8(slot) => *slot = value as i8,
			Self::I16(slot) => *slot = value as i16,
			Self::I32(slot) => *slot = value as i32,
			Self::I64(slot) => *slot = value,
			Self::Isize(slot) => *slot = value as isize,
		}
	}
}

/// Unsigned integer destination.
pub enum UintSlot<'a> {
	/// `u8`.
	U8(&'a mut u8),
	/// `u16`.
	U16(&'a mut u16),
	/// `u32`.
	U32(&'a mut u32),
	/// `u64`.
	U64(&'a mut u64),
	/// `usize`.
	Usize(&'a mut usize),
}

impl UintSlot<'_> {
	/// Store `value`, truncating to the slot width.
	pub fn set(self, value: u64) {
		match self {
			Self::U8(slot) => *slot = value as u8,
			Self::U16(slot) => *slot = value as u16,
			Self::U32(slot) => *slot = value as u32,
			Self::U64(slot) => *slot = value,
			Self::Usize(slot) => *slot = value as usize,
		}
	}
}

/// Floating-point destination.
pub enum FloatSlot<'a> {
	/// `f32`.
	F32(&'a mut f32),
	/// `f64`.
	F64(&'a mut f64),
}

impl FloatSlot<'_> {
	/// Store `value`; narrowing to `f32` is unchecked.
	pub fn set(self, value: f64) {
		match self {
			Self::F32(slot) => *slot = value as f32,
			Self::F64(slot) => *slot = value,
		}
	}
}

/// Growable sequence destination.
pub trait SeqSlot {
	/// Current logical length.
	fn len(&self) -> usize;
	/// Current backing capacity.
	fn capacity(&self) -> usize;
	/// Ensure the backing storage holds at least `capacity` elements.
	fn reserve_total(&mut self, capacity: usize);
	/// Set the logical length, filling new positions with defaults.
	fn resize(&mut self, len: usize);
	/// Element at `index`.
	fn element(&mut self, index: usize) -> Option<&mut dyn Decode>;
	/// Byte-vector view when the element type is `u8`.
	fn bytes(&mut self) -> Option<&mut Vec<u8>>;
}

/// Fixed-size sequence destination.
pub trait ArraySlot {
	/// Fixed element count.
	fn len(&self) -> usize;
	/// Element at `index`.
	fn element(&mut self, index: usize) -> Option<&mut dyn Decode>;
	/// Byte view when the element type is `u8`.
	fn bytes(&mut self) -> Option<&mut [u8]>;
}

/// Record destination backed by the field descriptor cache.
pub trait RecordSlot {
	/// Declared record type name.
	fn record_type(&self) -> &'static str;
	/// Ordered field descriptors for the record type.
	fn describe_fields(&self) -> Result<Arc<[FieldInfo]>>;
	/// Writable destination of the `index`-th described field.
	fn field_slot(&mut self, index: usize) -> Option<&mut dyn Decode>;
}

/// Map destination keyed by text.
pub trait MapSlot {
	/// Declared key type name.
	fn key_type(&self) -> &'static str;
	/// Whether keys can be built from document text.
	fn text_keys(&self) -> bool;
	/// Decode one entry: `fill` populates a fresh value, which is stored under
	/// `key` only when it succeeds.
	fn decode_entry(&mut self, key: &str, fill: &mut dyn FnMut(&mut dyn Decode) -> Result<()>) -> Result<()>;
}

/// Key types accepted by map destinations.
pub trait MapKey: Sized {
	/// Whether document keys convert into this type.
	const TEXTUAL: bool;
	/// Convert a document key.
	fn from_text(text: &str) -> Option<Self>;
}

impl Decode for String {
	fn slot(&mut self) -> Slot<'_> {
		Slot::Str(self)
	}

	fn type_name(&self) -> &'static str {
		"String"
	}
}

impl Decode for bool {
	fn slot(&mut self) -> Slot<'_> {
		Slot::Bool(self)
	}
}

impl Decode for Value {
	fn slot(&mut self) -> Slot<'_> {
		Slot::Any(self)
	}

	fn type_name(&self) -> &'static str {
		"Value"
	}
}

impl Decode for Date {
	fn slot(&mut self) -> Slot<'_> {
		Slot::Date(self)
	}

	fn type_name(&self) -> &'static str {
		"Date"
	}
}

impl Decode for Uid {
	fn slot(&mut self) -> Slot<'_> {
		Slot::Uid(self)
	}

	fn type_name(&self) -> &'static str {
		"Uid"
	}
}

macro_rules! scalar_decode {
	($slot:ident :: $kind:ident { $($ty:ty => $variant:ident),* $(,)? }) => {
		$(
			impl Decode for $ty {
				fn slot(&mut self) -> Slot<'_> {
					Slot::$kind($slot::$variant(self))
				}
			}
		)*
	};
}

scalar_decode!(IntSlot::Int { i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize });
scalar_decode!(UintSlot::Uint { u16 => U16, u32 => U32, u64 => U64, usize => Usize });
scalar_decode!(FloatSlot::Float { f32 => F32, f64 => F64 });

impl Decode for u8 {
	fn slot(&mut self) -> Slot<'_> {
		Slot::Uint(UintSlot::U8(self))
	}

	fn byte_vec(items: &mut Vec<Self>) -> Option<&mut Vec<u8>> {
		Some(items)
	}

	fn byte_slice(items: &mut [Self]) -> Option<&mut [u8]> {
		Some(items)
	}
}

impl<T: Decode + Default> Decode for Option<T> {
	fn slot(&mut self) -> Slot<'_> {
		Slot::Indirect(self.get_or_insert_with(T::default))
	}
}

impl<T: Decode> Decode for Box<T> {
	fn slot(&mut self) -> Slot<'_> {
		Slot::Indirect(&mut **self)
	}
}

impl<T: Decode + Default> Decode for Vec<T> {
	fn slot(&mut self) -> Slot<'_> {
		Slot::Seq(self)
	}
}

impl<T: Decode + Default> SeqSlot for Vec<T> {
	fn len(&self) -> usize {
		Vec::len(self)
	}

	fn capacity(&self) -> usize {
		Vec::capacity(self)
	}

	fn reserve_total(&mut self, capacity: usize) {
		if capacity > Vec::capacity(self) {
			self.reserve_exact(capacity - Vec::len(self));
		}
	}

	fn resize(&mut self, len: usize) {
		self.resize_with(len, T::default);
	}

	fn element(&mut self, index: usize) -> Option<&mut dyn Decode> {
		self.get_mut(index).map(|item| item as &mut dyn Decode)
	}

	fn bytes(&mut self) -> Option<&mut Vec<u8>> {
		T::byte_vec(self)
	}
}

impl<T: Decode, const N: usize> Decode for [T; N] {
	fn slot(&mut self) -> Slot<'_> {
		Slot::Array(self)
	}
}

impl<T: Decode, const N: usize> ArraySlot for [T; N] {
	fn len(&self) -> usize {
		N
	}

	fn element(&mut self, index: usize) -> Option<&mut dyn Decode> {
		self.get_mut(index).map(|item| item as &mut dyn Decode)
	}

	fn bytes(&mut self) -> Option<&mut [u8]> {
		T::byte_slice(self)
	}
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
	K: MapKey + Eq + Hash,
	V: Decode + Default,
	S: BuildHasher,
{
	fn slot(&mut self) -> Slot<'_> {
		Slot::Map(self)
	}
}

impl<K, V, S> MapSlot for HashMap<K, V, S>
where
	K: MapKey + Eq + Hash,
	V: Decode + Default,
	S: BuildHasher,
{
	fn key_type(&self) -> &'static str {
		std::any::type_name::<K>()
	}

	fn text_keys(&self) -> bool {
		K::TEXTUAL
	}

	fn decode_entry(&mut self, key: &str, fill: &mut dyn FnMut(&mut dyn Decode) -> Result<()>) -> Result<()> {
		let mut item = V::default();
		fill(&mut item)?;
		let key = K::from_text(key).ok_or(DecodeError::NonTextKey {
			key_type: std::any::type_name::<K>(),
		})?;
		self.insert(key, item);
		Ok(())
	}
}

impl<K, V> Decode for BTreeMap<K, V>
where
	K: MapKey + Ord,
	V: Decode + Default,
{
	fn slot(&mut self) -> Slot<'_> {
		Slot::Map(self)
	}
}

impl<K, V> MapSlot for BTreeMap<K, V>
where
	K: MapKey + Ord,
	V: Decode + Default,
{
	fn key_type(&self) -> &'static str {
		std::any::type_name::<K>()
	}

	fn text_keys(&self) -> bool {
		K::TEXTUAL
	}

	fn decode_entry(&mut self, key: &str, fill: &mut dyn FnMut(&mut dyn Decode) -> Result<()>) -> Result<()> {
		let mut item = V::default();
		fill(&mut item)?;
		let key = K::from_text(key).ok_or(DecodeError::NonTextKey {
			key_type: std::any::type_name::<K>(),
		})?;
		self.insert(key, item);
		Ok(())
	}
}

macro_rules! text_key {
	($($ty:ty),*) => {
		$(
			impl MapKey for $ty {
				const TEXTUAL: bool = true;

				fn from_text(text: &str) -> Option<Self> {
					Some(<$ty>::from(text))
				}
			}
		)*
	};
}

text_key!(String, Box<str>, Arc<str>, Rc<str>);

macro_rules! non_text_key {
	($($ty:ty),*) => {
		$(
			impl MapKey for $ty {
				const TEXTUAL: bool = false;

				fn from_text(_text: &str) -> Option<Self> {
					None
				}
			}
		)*
	};
}

non_text_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, bool, char);

#[cfg(test)]
mod tests;
