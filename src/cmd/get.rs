use std::path::PathBuf;

use clap::ValueEnum;
use plistdoc::plist::{Date, DecodeOptions, Decoder, Node, Uid, Value};

use crate::cmd::error::{CliError, Result};
use crate::cmd::print::{PrintOptions, render_scalar, value_to_json};
use crate::cmd::util::{emit_json, load_tree};

/// Destination type selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
	String,
	Int,
	Uint,
	Float,
	Bool,
	Date,
	Data,
	Uid,
	Any,
}

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub key: String,
	#[arg(long = "as", value_enum, default_value_t = Target::Any)]
	pub target: Target,
	#[arg(long)]
	pub lax: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long)]
	pub json: bool,
}

/// Decode one entry of the root dictionary into a typed destination.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		key,
		target,
		lax,
		max_depth,
		json,
	} = args;

	let tree = load_tree(&path)?;
	if !matches!(tree, Node::Dictionary(_)) {
		return Err(CliError::RootNotDictionary { kind: tree.kind() });
	}
	let node = tree.get(&key).ok_or_else(|| CliError::KeyNotFound { key: key.clone() })?;

	let decoder = Decoder::new(DecodeOptions { lax, max_depth });
	let value = decode_as(&decoder, node, target)?;

	if json {
		return emit_json(&serde_json::json!({
			"key": key,
			"as": format!("{target:?}").to_lowercase(),
			"value": value_to_json(&value),
		}));
	}

	println!("{}", render_scalar(&value, PrintOptions::default()));
	Ok(())
}

/// Decode `node` through the typed destination for `target`.
///
/// The decoded destination is converted to a [`Value`] only for printing.
fn decode_as(decoder: &Decoder, node: &Node, target: Target) -> Result<Value> {
	let value = match target {
		Target::String => {
			let mut out = String::new();
			decoder.decode(Some(node), &mut out)?;
			Value::String(out)
		}
		Target::Int => {
			let mut out = 0_i64;
			decoder.decode(Some(node), &mut out)?;
			Value::I64(out)
		}
		Target::Uint => {
			let mut out = 0_u64;
			decoder.decode(Some(node), &mut out)?;
			Value::U64(out)
		}
		Target::Float => {
			let mut out = 0.0_f64;
			decoder.decode(Some(node), &mut out)?;
			Value::F64(out)
		}
		Target::Bool => {
			let mut out = false;
			decoder.decode(Some(node), &mut out)?;
			Value::Bool(out)
		}
		Target::Date => {
			let mut out = Date::default();
			decoder.decode(Some(node), &mut out)?;
			Value::Date(out)
		}
		Target::Data => {
			let mut out: Vec<u8> = Vec::new();
			decoder.decode(Some(node), &mut out)?;
			Value::Data(out)
		}
		Target::Uid => {
			let mut out = Uid::default();
			decoder.decode(Some(node), &mut out)?;
			Value::Uid(out)
		}
		Target::Any => {
			let mut out = Value::Null;
			decoder.decode(Some(node), &mut out)?;
			out
		}
	};
	Ok(value)
}
