use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Timestamp layout used by text (OpenStep/GNUstep) property lists.
const TEXT_LAYOUT: &[BorrowedFormatItem<'static>] =
	format_description!("[year]-[month]-[day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]");

/// Absolute timestamp, always held in UTC.
///
/// This is the only destination a date node decodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(OffsetDateTime);

impl Date {
	/// Wrap a timestamp, normalizing it to UTC.
	pub fn new(at: OffsetDateTime) -> Self {
		Self(at.to_offset(UtcOffset::UTC))
	}

	/// Parse the text property-list layout (`2006-01-02 15:04:05 -0700`).
	pub fn parse_text(text: &str) -> Result<Self, time::error::Parse> {
		OffsetDateTime::parse(text, TEXT_LAYOUT).map(Self::new)
	}

	/// Underlying UTC timestamp.
	pub fn into_inner(self) -> OffsetDateTime {
		self.0
	}
}

impl Default for Date {
	fn default() -> Self {
		Self(OffsetDateTime::UNIX_EPOCH)
	}
}

impl Deref for Date {
	type Target = OffsetDateTime;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<OffsetDateTime> for Date {
	fn from(at: OffsetDateTime) -> Self {
		Self::new(at)
	}
}

impl From<Date> for OffsetDateTime {
	fn from(date: Date) -> Self {
		date.0
	}
}

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.0.format(&Rfc3339) {
			Ok(text) => f.write_str(&text),
			Err(_) => write!(f, "{}", self.0),
		}
	}
}

impl Serialize for Date {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let text = self.0.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
		serializer.serialize_str(&text)
	}
}

impl<'de> Deserialize<'de> for Date {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let text = String::deserialize(deserializer)?;
		OffsetDateTime::parse(&text, &Rfc3339).map(Self::new).map_err(serde::de::Error::custom)
	}
}
