mod dispatch_scalars {

	use crate::plist::{Date, DecodeError, Decoder, Node, Uid, Value, decode};

	fn assert_mismatch(err: DecodeError, dest_suffix: &str, kind: &str) {
		match err {
			DecodeError::TypeMismatch { dest_type, node_kind } => {
				assert!(dest_type.ends_with(dest_suffix), "unexpected destination type {dest_type}");
				assert_eq!(node_kind, kind);
			}
			other => panic!("expected type mismatch, got {other:?}"),
		}
	}

	#[test]
	fn absent_node_leaves_destination_untouched() {
		let mut out = 17_i64;
		Decoder::default().decode(None, &mut out).expect("absent node is not an error");
		assert_eq!(out, 17);
	}

	#[test]
	fn string_decodes_only_into_text() {
		let mut text = String::from("old");
		decode(&Node::string("new"), &mut text).expect("string into String");
		assert_eq!(text, "new");

		let err = decode(&Node::string("5"), &mut 0_i32).expect_err("strict mode rejects string into i32");
		assert_mismatch(err, "i32", "string");
	}

	#[test]
	fn number_decodes_into_every_integer_width() {
		let node = Node::int(-5);

		let mut small = 0_i8;
		decode(&node, &mut small).expect("number into i8");
		assert_eq!(small, -5);

		let mut wide = 0_i64;
		decode(&node, &mut wide).expect("number into i64");
		assert_eq!(wide, -5);

		let mut unsigned = 0_u64;
		decode(&Node::uint(u64::MAX), &mut unsigned).expect("number into u64");
		assert_eq!(unsigned, u64::MAX);

		let mut size = 0_usize;
		decode(&Node::uint(9), &mut size).expect("number into usize");
		assert_eq!(size, 9);
	}

	#[test]
	fn number_is_not_widened_into_other_kinds() {
		assert_mismatch(decode(&Node::int(1), &mut 0.0_f64).expect_err("number into f64"), "f64", "integer");
		assert_mismatch(decode(&Node::int(1), &mut false).expect_err("number into bool"), "bool", "integer");
		assert_mismatch(decode(&Node::int(1), &mut String::new()).expect_err("number into String"), "String", "integer");
	}

	#[test]
	fn real_decodes_into_both_precisions() {
		let mut narrow = 0.0_f32;
		decode(&Node::real(1.5), &mut narrow).expect("real into f32");
		assert_eq!(narrow, 1.5);

		let mut wide = 0.0_f64;
		decode(&Node::real32(0.25), &mut wide).expect("real into f64");
		assert_eq!(wide, 0.25);

		assert_mismatch(decode(&Node::real(1.0), &mut 0_i64).expect_err("real into i64"), "i64", "real");
	}

	#[test]
	fn boolean_decodes_only_into_bool() {
		let mut flag = false;
		decode(&Node::Boolean(true), &mut flag).expect("boolean into bool");
		assert!(flag);

		assert_mismatch(decode(&Node::Boolean(true), &mut 0_u8).expect_err("boolean into u8"), "u8", "boolean");
	}

	#[test]
	fn data_replaces_growable_byte_sequence() {
		let mut bytes = vec![9_u8, 9, 9, 9];
		decode(&Node::Data(vec![1, 2]), &mut bytes).expect("data into Vec<u8>");
		assert_eq!(bytes, vec![1, 2]);
	}

	#[test]
	fn data_fills_prefix_of_fixed_byte_array() {
		let mut bytes = [0xAA_u8; 5];
		decode(&Node::Data(vec![1, 2, 3]), &mut bytes).expect("data into [u8; 5]");
		assert_eq!(&bytes[..3], &[1, 2, 3]);
		assert_eq!(&bytes[3..], &[0xAA, 0xAA], "bytes past the payload are not written");
	}

	#[test]
	fn data_larger_than_fixed_array_is_sizing_error() {
		let mut bytes = [0_u8; 2];
		let err = decode(&Node::Data(vec![1, 2, 3]), &mut bytes).expect_err("payload does not fit");
		assert!(matches!(err, DecodeError::DataTooLarge { len: 3, capacity: 2 }));
		assert_eq!(bytes, [0, 0]);
	}

	#[test]
	fn data_rejects_non_byte_sequences() {
		let err = decode(&Node::Data(vec![1]), &mut Vec::<u16>::new()).expect_err("data into Vec<u16>");
		assert_mismatch(err, "Vec<u16>", "data");

		let err = decode(&Node::Data(vec![1]), &mut String::new()).expect_err("data into String");
		assert_mismatch(err, "String", "data");
	}

	#[test]
	fn date_decodes_only_into_date() {
		let at = Date::parse_text("2011-12-13 14:15:16 +0000").expect("fixture date parses");

		let mut out = Date::default();
		decode(&Node::Date(at), &mut out).expect("date into Date");
		assert_eq!(out, at);

		assert_mismatch(decode(&Node::Date(at), &mut String::new()).expect_err("date into String"), "String", "date");
		assert_mismatch(decode(&Node::Date(at), &mut 0_i64).expect_err("date into i64"), "i64", "date");
	}

	#[test]
	fn uid_decodes_into_reference_type_and_integers() {
		let node = Node::Uid(42);

		let mut uid = Uid::default();
		decode(&node, &mut uid).expect("uid into Uid");
		assert_eq!(uid, Uid(42));

		let mut signed = 0_i32;
		decode(&node, &mut signed).expect("uid into i32");
		assert_eq!(signed, 42);

		let mut unsigned = 0_u16;
		decode(&node, &mut unsigned).expect("uid into u16");
		assert_eq!(unsigned, 42);

		assert_mismatch(decode(&node, &mut String::new()).expect_err("uid into String"), "String", "UID");
	}

	#[test]
	fn plain_number_decodes_into_uid() {
		let mut uid = Uid::default();
		decode(&Node::uint(3), &mut uid).expect("number into Uid");
		assert_eq!(uid, Uid(3));
	}

	#[test]
	fn mismatch_names_public_types() {
		let err = decode(&Node::Boolean(true), &mut Uid::default()).expect_err("boolean into Uid");
		assert_eq!(err.to_string(), "type mismatch: tried to decode plist type `boolean' into value of type `Uid'");

		let err = decode(&Node::int(1), &mut String::new()).expect_err("number into String");
		assert!(matches!(err, DecodeError::TypeMismatch { dest_type: "String", .. }));
	}

	#[test]
	fn any_slot_takes_dynamic_mirror() {
		let mut out = Value::Null;
		decode(&Node::Array(vec![Node::int(-1), Node::string("x")]), &mut out).expect("array into Value");
		assert_eq!(out, Value::Array(vec![Value::I64(-1), Value::String("x".to_owned())]));
	}
}

mod dispatch_compatibility {

	use std::collections::HashMap;

	use crate::plist::{Date, Decode, DecodeError, Decoder, Node, Uid, Value};

	type Make = fn() -> Box<dyn Decode>;

	fn nodes() -> Vec<Node> {
		vec![
			Node::string("1"),
			Node::uint(1),
			Node::real(1.0),
			Node::Boolean(true),
			Node::Data(vec![1, 2]),
			Node::Date(Date::default()),
			Node::Uid(1),
			Node::Array(vec![Node::uint(1)]),
			Node::dict([("k", Node::uint(1))]),
		]
	}

	fn destinations() -> [(&'static str, Make, &'static [&'static str]); 12] {
		[
			("String", || Box::new(String::new()) as Box<dyn Decode>, &["string"]),
			("i64", || Box::new(0_i64) as Box<dyn Decode>, &["integer", "UID"]),
			("u64", || Box::new(0_u64) as Box<dyn Decode>, &["integer", "UID"]),
			("f64", || Box::new(0.0_f64) as Box<dyn Decode>, &["real"]),
			("bool", || Box::new(false) as Box<dyn Decode>, &["boolean"]),
			("Date", || Box::new(Date::default()) as Box<dyn Decode>, &["date"]),
			("Uid", || Box::new(Uid::default()) as Box<dyn Decode>, &["integer", "UID"]),
			("Vec<u8>", || Box::new(Vec::<u8>::new()) as Box<dyn Decode>, &["data", "array"]),
			("[u8; 4]", || Box::new([0_u8; 4]) as Box<dyn Decode>, &["data", "array"]),
			("Vec<i64>", || Box::new(Vec::<i64>::new()) as Box<dyn Decode>, &["array"]),
			("HashMap<String, i64>", || Box::new(HashMap::<String, i64>::new()) as Box<dyn Decode>, &["dictionary"]),
			(
				"Value",
				|| Box::new(Value::Null) as Box<dyn Decode>,
				&["string", "integer", "real", "boolean", "data", "date", "UID", "array", "dictionary"],
			),
		]
	}

	#[test]
	fn strict_decode_accepts_exactly_the_compatible_pairs() {
		let decoder = Decoder::default();
		for node in nodes() {
			for (name, make, accepts) in destinations() {
				let mut dest = make();
				let result = decoder.decode(Some(&node), &mut *dest);
				if accepts.contains(&node.kind()) {
					assert!(result.is_ok(), "{} into {name} should decode: {result:?}", node.kind());
				} else {
					match result {
						Err(DecodeError::TypeMismatch { node_kind, .. }) => assert_eq!(node_kind, node.kind(), "into {name}"),
						other => panic!("{} into {name} should be a type mismatch, got {other:?}", node.kind()),
					}
				}
			}
		}
	}
}

mod dispatch_indirection {

	use crate::plist::{Decoder, Node, decode};

	#[test]
	fn unset_indirection_is_allocated() {
		let mut out: Option<Option<Box<i64>>> = None;
		decode(&Node::int(7), &mut out).expect("nested option allocates");
		assert_eq!(out, Some(Some(Box::new(7))));
	}

	#[test]
	fn absent_node_does_not_allocate() {
		let mut out: Option<String> = None;
		Decoder::default().decode(None, &mut out).expect("absent node is a no-op");
		assert!(out.is_none());
	}

	#[test]
	fn set_indirection_is_reused() {
		let mut out = Some(vec![1_i64]);
		decode(&Node::Array(vec![Node::int(2)]), &mut out).expect("existing vector is appended to");
		assert_eq!(out, Some(vec![1, 2]));
	}
}

mod dispatch_hooks {

	use crate::plist::{BoxError, Decode, DecodeError, DecodePlist, DecodeText, HookContext, Node, Result, Slot, decode};

	#[derive(Debug, Default, PartialEq)]
	struct Hex(u32);

	impl DecodeText for Hex {
		fn decode_text(&mut self, text: &str) -> std::result::Result<(), BoxError> {
			self.0 = u32::from_str_radix(text, 16)?;
			Ok(())
		}
	}

	impl Decode for Hex {
		fn slot(&mut self) -> Slot<'_> {
			Slot::Text(self)
		}
	}

	#[derive(Debug, Default, PartialEq)]
	enum Either {
		#[default]
		Unset,
		Number(i64),
		Text(String),
	}

	impl DecodePlist for Either {
		fn decode_plist(&mut self, cx: &mut HookContext<'_>) -> Result<()> {
			let mut number = 0_i64;
			if cx.decode_into(&mut number).is_ok() {
				*self = Either::Number(number);
				return Ok(());
			}
			let mut text = String::new();
			cx.decode_into(&mut text)?;
			*self = Either::Text(text);
			Ok(())
		}
	}

	impl Decode for Either {
		fn slot(&mut self) -> Slot<'_> {
			Slot::Custom(self)
		}
	}

	#[test]
	fn text_hook_receives_raw_string() {
		let mut out = Hex::default();
		decode(&Node::string("ff"), &mut out).expect("hex text parses");
		assert_eq!(out, Hex(255));
	}

	#[test]
	fn text_hook_rejects_other_node_kinds() {
		let err = decode(&Node::int(255), &mut Hex::default()).expect_err("number into text hook");
		assert!(matches!(err, DecodeError::TypeMismatch { node_kind: "integer", .. }));
	}

	#[test]
	fn text_hook_failure_is_surfaced() {
		let err = decode(&Node::string("zz"), &mut Hex::default()).expect_err("invalid hex");
		assert!(matches!(err, DecodeError::Custom(_)));
	}

	#[test]
	fn custom_hook_reenters_decoder() {
		let mut number = Either::default();
		decode(&Node::int(3), &mut number).expect("number branch");
		assert_eq!(number, Either::Number(3));

		let mut text = Either::default();
		decode(&Node::string("three"), &mut text).expect("text branch");
		assert_eq!(text, Either::Text("three".to_owned()));
	}

	#[test]
	fn custom_hook_result_is_returned_as_is() {
		let err = decode(&Node::Boolean(true), &mut Either::default()).expect_err("neither branch accepts a boolean");
		assert!(matches!(err, DecodeError::TypeMismatch { node_kind: "boolean", .. }));
	}

	#[test]
	fn custom_hook_inside_container() {
		let mut out: Vec<Either> = Vec::new();
		decode(&Node::Array(vec![Node::int(1), Node::string("two")]), &mut out).expect("hooks decode per element");
		assert_eq!(out, vec![Either::Number(1), Either::Text("two".to_owned())]);
	}
}

mod dispatch_options {

	use crate::plist::{Date, DecodeError, DecodeOptions, Decoder, Node, Uid, decode, decode_with};

	#[test]
	fn lax_mode_coerces_text_into_integer() {
		let mut out = 0_i64;
		decode_with(&Node::string("42"), &mut out, &DecodeOptions::lax()).expect("lax integer");
		assert_eq!(out, 42);

		let err = decode(&Node::string("42"), &mut out).expect_err("strict integer");
		assert!(matches!(err, DecodeError::TypeMismatch { node_kind: "string", .. }));
	}

	#[test]
	fn lax_mode_coerces_text_into_date() {
		let mut out = Date::default();
		decode_with(&Node::string("2011-12-13 14:15:16 +0100"), &mut out, &DecodeOptions::lax()).expect("lax date");
		assert_eq!(out, Date::parse_text("2011-12-13 13:15:16 +0000").expect("utc fixture parses"));
	}

	#[test]
	fn lax_mode_coerces_text_into_uid() {
		let mut out = Uid::default();
		decode_with(&Node::string("5"), &mut out, &DecodeOptions::lax()).expect("lax uid");
		assert_eq!(out, Uid(5));

		let err = decode_with(&Node::string("-5"), &mut out, &DecodeOptions::lax()).expect_err("negative uid");
		assert!(matches!(err, DecodeError::Coerce { target: "unsigned integer", .. }));
	}

	#[test]
	fn lax_mode_does_not_apply_to_other_node_kinds() {
		let err = decode_with(&Node::int(1), &mut String::new(), &DecodeOptions::lax()).expect_err("number into String");
		assert!(matches!(err, DecodeError::TypeMismatch { node_kind: "integer", .. }));
	}

	#[test]
	fn depth_limit_bounds_container_nesting() {
		let node = Node::Array(vec![Node::Array(vec![Node::Array(vec![Node::int(1)])])]);
		let decoder = Decoder::new(DecodeOptions {
			lax: false,
			max_depth: Some(1),
		});

		let mut out: Vec<Vec<Vec<i64>>> = Vec::new();
		let err = decoder.decode(Some(&node), &mut out).expect_err("third level exceeds the bound");

		let outer = err.causes().expect("outer array aggregates");
		let first = outer.iter().next().expect("one outer cause");
		let inner = first.error.causes().expect("inner array aggregates");
		let cause = inner.iter().next().expect("one inner cause");
		assert!(matches!(cause.error, DecodeError::DepthExceeded { max_depth: 1 }));
	}

	#[test]
	fn unbounded_by_default() {
		let mut node = Node::int(1);
		for _ in 0..64 {
			node = Node::Array(vec![node]);
		}
		let mut out = crate::plist::Value::Null;
		decode(&node, &mut out).expect("any-slot materializes deep trees");

		let decoder = Decoder::new(DecodeOptions::hardened());
		assert_eq!(decoder.options().max_depth, Some(256));
	}
}
