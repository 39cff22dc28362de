use crate::dto::{EventId, TicketId};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("event {0} not exist")]
    EventNotExist(EventId),

    #[error("insufficient capacity: requested {requested}, available {available}")]
    InsufficientCapacity { requested: u32, available: u32 },

    #[error("ticket {0} already exists")]
    InsertUniqueViolation(TicketId),

    #[error("releasing {count} tickets would exceed total capacity {total_capacity}")]
    CapacityOverflow { count: u32, total_capacity: u32 },
}
