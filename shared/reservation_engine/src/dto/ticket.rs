use super::{EventId, TicketId};

///
/// One unit of consumed capacity.
/// `event_id` is a lookup reference only, tickets never touch their event.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub id: TicketId,
    pub event_id: EventId,
}
