use crate::{dto::EventId, event_store, id_generator};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("event {0} not found")]
    EventNotFound(EventId),

    #[error(
        "insufficient capacity for event {event_id}: requested {requested}, available {available}"
    )]
    InsufficientCapacity {
        event_id: EventId,
        requested: u32,
        available: u32,
    },

    #[error("id generation failed: {0}")]
    IdGenerationFailed(#[from] id_generator::Error),

    ///
    /// Capacity was reserved but tickets could not be issued.
    /// `compensated` is false only when giving the capacity back failed too,
    /// which leaves the event inconsistent.
    ///
    #[error("booking {count} tickets for event {event_id} failed after reserving capacity (compensated: {compensated}): {cause}")]
    PartialBookingFailure {
        event_id: EventId,
        count: u32,
        compensated: bool,
        cause: PartialBookingCause,
    },

    #[error("inconsistent restore: {0}")]
    InconsistentRestore(String),

    #[error("event store error: {0}")]
    EventStore(#[from] event_store::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum PartialBookingCause {
    #[error("ticket id generation failed: {0}")]
    IdGeneration(#[from] id_generator::Error),

    #[error("ticket storage failed: {0}")]
    TicketStorage(#[from] event_store::Error),
}
