use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Ticket {
    pub id: String,
    pub event_id: String,
}

impl From<reservation_engine::Ticket> for Ticket {
    fn from(value: reservation_engine::Ticket) -> Self {
        Self {
            id: value.id.to_string(),
            event_id: value.event_id.to_string(),
        }
    }
}
