use plistdoc::plist::Value;

/// Output truncation and formatting limits for materialized values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of entries printed for a single dictionary.
	pub max_entries_per_dict: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested arrays/dictionaries.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_entries_per_dict: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Print one materialized value tree as indented text.
pub fn print_value(value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				println!("{}[... {} items]", pad, items.len());
				return;
			}
			println!("{}[", pad);
			for item in items.iter().take(options.max_array_items) {
				print_value(item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				println!("{}  ... {} more", pad, items.len() - options.max_array_items);
			}
			println!("{}]", pad);
		}
		Value::Dictionary(entries) => {
			if depth >= options.max_print_depth {
				println!("{}{{ ... {} entries }}", pad, entries.len());
				return;
			}
			let mut keys: Vec<&String> = entries.keys().collect();
			keys.sort();

			println!("{}{{", pad);
			for key in keys.iter().take(options.max_entries_per_dict) {
				let item = &entries[*key];
				print!("{}  {} = ", pad, key);
				if matches!(item, Value::Dictionary(_) | Value::Array(_)) {
					println!();
					print_value(item, indent + 4, depth + 1, options);
				} else {
					print_value(item, 0, depth + 1, options);
				}
			}
			if keys.len() > options.max_entries_per_dict {
				println!("{}  ... {} more entries", pad, keys.len() - options.max_entries_per_dict);
			}
			println!("{}}}", pad);
		}
		scalar => println!("{}{}", pad, render_scalar(scalar, options)),
	}
}

/// Render a non-container value on one line.
pub fn render_scalar(value: &Value, options: PrintOptions) -> String {
	match value {
		Value::Null => "null".to_owned(),
		Value::Bool(v) => v.to_string(),
		Value::I64(v) => v.to_string(),
		Value::U64(v) => v.to_string(),
		Value::F32(v) => v.to_string(),
		Value::F64(v) => v.to_string(),
		Value::String(v) => format!("\"{}\"", truncate(v, options.max_string_len)),
		Value::Data(v) => format!("data[{}] {}", v.len(), truncate(&hex(v), options.max_string_len)),
		Value::Date(v) => v.to_string(),
		Value::Uid(v) => format!("uid({})", v.0),
		Value::Array(items) => format!("[{} items]", items.len()),
		Value::Dictionary(entries) => format!("{{{} entries}}", entries.len()),
	}
}

/// Convert a materialized value into plain JSON.
///
/// Data becomes a hex string, dates RFC 3339 text, and UIDs `{"uid": n}`.
/// Non-finite reals become `null`.
pub fn value_to_json(value: &Value) -> serde_json::Value {
	use serde_json::Value as Json;

	match value {
		Value::Null => Json::Null,
		Value::Bool(v) => Json::Bool(*v),
		Value::I64(v) => Json::from(*v),
		Value::U64(v) => Json::from(*v),
		Value::F32(v) => serde_json::Number::from_f64(f64::from(*v)).map_or(Json::Null, Json::Number),
		Value::F64(v) => serde_json::Number::from_f64(*v).map_or(Json::Null, Json::Number),
		Value::String(v) => Json::String(v.clone()),
		Value::Data(v) => Json::String(hex(v)),
		Value::Date(v) => Json::String(v.to_string()),
		Value::Uid(v) => serde_json::json!({ "uid": v.0 }),
		Value::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
		Value::Dictionary(entries) => Json::Object(entries.iter().map(|(key, item)| (key.clone(), value_to_json(item))).collect()),
	}
}

fn hex(bytes: &[u8]) -> String {
	bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}
