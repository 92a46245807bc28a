mod container;
mod date;
mod decode;
mod dynamic;
mod error;
mod lax;
mod node;
mod record;
mod slot;
mod value;

/// Designated timestamp type.
pub use date::Date;
/// Decoder, its options, hook context, and convenience entry points.
pub use decode::{DecodeOptions, Decoder, HookContext, decode, decode_with};
/// Dynamic materializer entry points.
pub use dynamic::{materialize, to_dynamic};
/// Error, location, and result types.
pub use error::{BoxError, DecodeError, ErrorCollection, LocatedError, Location, Result};
/// Parsed document tree.
pub use node::Node;
/// Record field descriptors and their cache.
pub use record::{FieldInfo, Record, fields_of};
/// Destination handle trait, slot kinds, and hook capabilities.
pub use slot::{ArraySlot, Decode, DecodePlist, DecodeText, FloatSlot, IntSlot, MapKey, MapSlot, RecordSlot, SeqSlot, Slot, UintSlot};
/// Dynamic values and the reference type.
pub use value::{Uid, Value};
