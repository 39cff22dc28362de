//!
//! Calendar dates are written as `YYYY-MM-DD` both on the wire and on disk
//!

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn parse(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, FORMAT)
}

pub fn format(date: &Date) -> Result<String, time::error::Format> {
    date.format(FORMAT)
}

pub fn serialize<S: Serializer>(date: &Date, s: S) -> Result<S::Ok, S::Error> {
    let formatted = format(date).map_err(serde::ser::Error::custom)?;

    String::serialize(&formatted, s)
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Date, D::Error> {
    let string = String::deserialize(d)?;

    parse(&string).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod test {
    use super::*;
    use time::macros::date;

    #[test]
    fn parse_iso_date() {
        assert_eq!(parse("2024-06-01").unwrap(), date!(2024 - 06 - 01));
    }

    #[test]
    fn parse_invalid_date() {
        assert!(parse("2024-13-01").is_err());
        assert!(parse("01.06.2024").is_err());
        assert!(parse("2024-6-1").is_err());
    }

    #[test]
    fn format_zero_padded() {
        assert_eq!(format(&date!(2024 - 06 - 01)).unwrap(), "2024-06-01");
    }
}
