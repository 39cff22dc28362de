use reservation_engine::{EventId, Ticket, TicketId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketEntity {
    pub id: Uuid,
    pub event_id: Uuid,
}

impl From<&Ticket> for TicketEntity {
    fn from(value: &Ticket) -> Self {
        Self {
            id: *value.id.as_uuid(),
            event_id: *value.event_id.as_uuid(),
        }
    }
}

impl From<TicketEntity> for Ticket {
    fn from(value: TicketEntity) -> Self {
        Self {
            id: TicketId::from_uuid(value.id),
            event_id: EventId::from_uuid(value.event_id),
        }
    }
}
