use crate::dto::date_format;
use reservation_engine::{Event, EventId};
use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEntity {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "date_format")]
    pub date: Date,
    pub total_tickets: u32,
    pub available_tickets: u32,
}

impl From<&Event> for EventEntity {
    fn from(value: &Event) -> Self {
        Self {
            id: *value.id.as_uuid(),
            name: value.name.clone(),
            date: value.date,
            total_tickets: value.total_capacity,
            available_tickets: value.available_capacity,
        }
    }
}

impl From<EventEntity> for Event {
    fn from(value: EventEntity) -> Self {
        Self {
            id: EventId::from_uuid(value.id),
            name: value.name,
            date: value.date,
            total_capacity: value.total_tickets,
            available_capacity: value.available_tickets,
        }
    }
}
