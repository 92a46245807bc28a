use std::any::TypeId;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::plist::{Decode, DecodeError, RecordSlot, Result};

/// Descriptor of one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
	/// Document key the field is read from.
	pub name: Cow<'static, str>,
	/// Whether the field accepts writes.
	pub settable: bool,
}

impl FieldInfo {
	/// Writable field read from `name`.
	pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
		Self {
			name: name.into(),
			settable: true,
		}
	}

	/// Field that is described but never written.
	pub fn read_only(name: impl Into<Cow<'static, str>>) -> Self {
		Self {
			name: name.into(),
			settable: false,
		}
	}
}

/// Record types with an ordered, named field list.
///
/// Most records are declared with [`plist_record!`](crate::plist_record).
pub trait Record: 'static {
	/// Ordered field descriptors; called once per type and cached.
	fn describe() -> std::result::Result<Vec<FieldInfo>, String>;

	/// Destination of the `index`-th described field.
	fn field_mut(&mut self, index: usize) -> Option<&mut dyn Decode>;
}

impl<R: Record> RecordSlot for R {
	fn record_type(&self) -> &'static str {
		std::any::type_name::<R>()
	}

	fn describe_fields(&self) -> Result<Arc<[FieldInfo]>> {
		fields_of::<R>()
	}

	fn field_slot(&mut self, index: usize) -> Option<&mut dyn Decode> {
		Record::field_mut(self, index)
	}
}

type FieldCache = RwLock<HashMap<TypeId, Arc<[FieldInfo]>>>;

static FIELD_CACHE: OnceLock<FieldCache> = OnceLock::new();

/// Validated field descriptors of `R`, cached by type identity.
pub fn fields_of<R: Record>() -> Result<Arc<[FieldInfo]>> {
	let cache = FIELD_CACHE.get_or_init(FieldCache::default);
	let id = TypeId::of::<R>();

	if let Some(fields) = cache.read().unwrap_or_else(PoisonError::into_inner).get(&id) {
		return Ok(Arc::clone(fields));
	}

	let type_name = std::any::type_name::<R>();
	let fields = R::describe().map_err(|reason| DecodeError::UnsupportedMetadata { type_name, reason })?;
	validate_fields(type_name, &fields)?;

	let mut cache = cache.write().unwrap_or_else(PoisonError::into_inner);
	let fields = cache.entry(id).or_insert_with(|| fields.into());
	Ok(Arc::clone(fields))
}

fn validate_fields(type_name: &'static str, fields: &[FieldInfo]) -> Result<()> {
	let mut seen = HashSet::with_capacity(fields.len());
	for field in fields {
		if field.name.is_empty() {
			return Err(DecodeError::UnsupportedMetadata {
				type_name,
				reason: "empty field name".to_owned(),
			});
		}
		if !seen.insert(&*field.name) {
			return Err(DecodeError::UnsupportedMetadata {
				type_name,
				reason: format!("duplicate field name {:?}", field.name),
			});
		}
	}
	Ok(())
}

/// Implement [`Record`] and [`Decode`] for a struct from a field/key list.
///
/// ```
/// use plistdoc::plist_record;
///
/// #[derive(Default)]
/// struct Bundle {
/// 	identifier: String,
/// 	version: Option<u32>,
/// }
///
/// plist_record!(Bundle {
/// 	identifier => "CFBundleIdentifier",
/// 	version => "CFBundleVersion",
/// });
/// ```
#[macro_export]
macro_rules! plist_record {
	($name:ident { $($field:ident => $key:literal),* $(,)? }) => {
		impl $crate::plist::Record for $name {
			fn describe() -> ::std::result::Result<::std::vec::Vec<$crate::plist::FieldInfo>, ::std::string::String> {
				::std::result::Result::Ok(::std::vec![$($crate::plist::FieldInfo::new($key)),*])
			}

			fn field_mut(&mut self, index: usize) -> ::std::option::Option<&mut dyn $crate::plist::Decode> {
				[$(&mut self.$field as &mut dyn $crate::plist::Decode),*].into_iter().nth(index)
			}
		}

		impl $crate::plist::Decode for $name {
			fn slot(&mut self) -> $crate::plist::Slot<'_> {
				$crate::plist::Slot::Record(self)
			}

			fn type_name(&self) -> &'static str {
				::std::stringify!($name)
			}
		}
	};
}
