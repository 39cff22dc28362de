use crate::dto::date_format;
use serde::Serialize;
use time::Date;

#[derive(Debug, Serialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(with = "date_format")]
    pub date: Date,
    pub total_tickets: u32,
    pub available_tickets: u32,
}

impl From<reservation_engine::Event> for Event {
    fn from(value: reservation_engine::Event) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            date: value.date,
            total_tickets: value.total_capacity,
            available_tickets: value.available_capacity,
        }
    }
}
