use std::fmt::Display;
use std::str::FromStr;

use crate::plist::{Date, DecodeError, Result, Slot, Uid};

/// Best-effort conversion of a string node into a non-text scalar slot.
pub(crate) fn coerce_text(text: &str, slot: Slot<'_>, dest_type: &'static str) -> Result<()> {
	match slot {
		Slot::Int(out) => out.set(parse::<i64>(text, "integer")?),
		Slot::Uint(out) => out.set(parse::<u64>(text, "unsigned integer")?),
		Slot::Uid(out) => *out = Uid(parse::<u64>(text, "unsigned integer")?),
		Slot::Float(out) => out.set(parse::<f64>(text, "real")?),
		Slot::Bool(out) => *out = parse_bool(text)?,
		Slot::Date(out) => *out = Date::parse_text(text).map_err(|err| coerce_error(text, "date", err))?,
		_ => {
			return Err(DecodeError::TypeMismatch {
				dest_type,
				node_kind: "string",
			});
		}
	}
	Ok(())
}

fn parse<T>(text: &str, target: &'static str) -> Result<T>
where
	T: FromStr,
	T::Err: Display,
{
	text.parse().map_err(|err| coerce_error(text, target, err))
}

/// Accepts the conventional literal set: `1 t T TRUE true True` and `0 f F FALSE false False`.
fn parse_bool(text: &str) -> Result<bool> {
	match text {
		"1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
		"0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
		_ => Err(coerce_error(text, "boolean", "invalid syntax")),
	}
}

fn coerce_error(text: &str, target: &'static str, reason: impl Display) -> DecodeError {
	DecodeError::Coerce {
		text: text.to_owned(),
		target,
		reason: reason.to_string(),
	}
}
