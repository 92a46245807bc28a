mod slot_kinds {

	use std::collections::HashMap;
	use std::sync::Arc;

	use crate::plist::{Date, Decode, MapKey, Slot, Uid, Value};

	#[test]
	fn byte_views_exist_only_for_u8() {
		let mut bytes: Vec<u8> = vec![1];
		let Slot::Seq(seq) = bytes.slot() else {
			panic!("Vec<u8> is a sequence");
		};
		assert!(seq.bytes().is_some());

		let mut words: Vec<u16> = vec![1];
		let Slot::Seq(seq) = words.slot() else {
			panic!("Vec<u16> is a sequence");
		};
		assert!(seq.bytes().is_none());

		let mut fixed = [0_u8; 3];
		let Slot::Array(array) = fixed.slot() else {
			panic!("[u8; 3] is an array");
		};
		assert_eq!(array.len(), 3);
		assert_eq!(array.bytes().map(|bytes| bytes.len()), Some(3));
	}

	#[test]
	fn wrappers_are_indirect() {
		let mut boxed = Box::new(1_i64);
		assert!(matches!(boxed.slot(), Slot::Indirect(_)));

		let mut missing: Option<String> = None;
		assert!(matches!(missing.slot(), Slot::Indirect(_)));
		assert_eq!(missing.as_deref(), Some(""), "slot allocates a default");
	}

	#[test]
	fn value_is_any_slot() {
		let mut value = Value::Null;
		assert!(matches!(value.slot(), Slot::Any(_)));
	}

	#[test]
	fn map_key_textuality() {
		assert!(<String as MapKey>::TEXTUAL);
		assert!(<Arc<str> as MapKey>::TEXTUAL);
		assert!(!<u32 as MapKey>::TEXTUAL);
		assert_eq!(<Box<str> as MapKey>::from_text("k").as_deref(), Some("k"));
		assert!(<i64 as MapKey>::from_text("1").is_none());

		let mut map: HashMap<u32, String> = HashMap::new();
		let Slot::Map(slot) = map.slot() else {
			panic!("HashMap is a map");
		};
		assert!(!slot.text_keys());
		assert_eq!(slot.key_type(), "u32");
	}

	#[test]
	fn type_names_are_declared_names() {
		assert_eq!(0_u8.type_name(), "u8");
		assert_eq!(String::new().type_name(), "String");
		assert_eq!(Uid::default().type_name(), "Uid");
		assert_eq!(Date::default().type_name(), "Date");
		assert_eq!(Value::Null.type_name(), "Value");
	}
}
