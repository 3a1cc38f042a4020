//! `YYYY-MM-DD` (de)serialization for [`Date`] fields.

use serde::{Deserialize, Deserializer, Serializer};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Formats a date the way it is stored on disk.
pub fn format(date: &Date) -> String {
    // Infallible: every component of the format is available on a Date.
    date.format(FORMAT).unwrap_or_default()
}

pub(crate) fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    let text = date.format(FORMAT).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&text)
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
    let text = String::deserialize(deserializer)?;
    Date::parse(text.trim(), FORMAT).map_err(serde::de::Error::custom)
}
