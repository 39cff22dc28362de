use crate::dto::date_format;
use serde::Deserialize;
use time::Date;

#[derive(Debug, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(with = "date_format")]
    pub date: Date,
    #[serde(deserialize_with = "de_lenient_integer::deserialize")]
    pub total_tickets: i64,
}

mod de_lenient_integer {
    //!
    //! Older clients send `total_tickets` as a string,
    //! both forms are accepted so they keep working
    //!

    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LenientInteger {
        Integer(i64),
        String(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        match LenientInteger::deserialize(d)? {
            LenientInteger::Integer(value) => Ok(value),
            LenientInteger::String(value) => value
                .trim()
                .parse()
                .map_err(serde::de::Error::custom),
        }
    }
}
