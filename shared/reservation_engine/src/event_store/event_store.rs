use super::Error;
use crate::dto::{Event, EventId, Reservation, Ticket};
use async_trait::async_trait;

#[cfg_attr(any(test, feature = "test_utils"), mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    ///
    /// Inserts event or replaces the one with the same id
    ///
    async fn put(&self, event: Event);

    async fn get(&self, id: EventId) -> Option<Event>;

    ///
    /// Snapshot of all events.
    /// Order is unspecified and may differ between calls
    ///
    async fn list(&self) -> Vec<Event>;

    ///
    /// Inserts all tickets or none of them.
    ///
    /// ### Errors
    /// - [Error::InsertUniqueViolation] when any ticket id is already stored
    /// or repeated inside `tickets`
    ///
    async fn store_tickets(&self, tickets: Vec<Ticket>) -> Result<(), Error>;

    async fn list_tickets(&self, event_id: EventId) -> Vec<Ticket>;

    ///
    /// Atomically checks that `count` tickets are still available
    /// and takes them from the event.
    /// Calls for different events never wait for each other.
    ///
    /// ### Errors
    /// - [Error::EventNotExist] when event with id does not exist
    /// - [Error::InsufficientCapacity] when less than `count` tickets are available,
    /// capacity is left untouched
    ///
    async fn try_reserve(&self, id: EventId, count: u32) -> Result<Reservation, Error>;

    ///
    /// Gives back capacity taken by [EventStore::try_reserve]
    ///
    /// ### Errors
    /// - [Error::EventNotExist] when event with id does not exist
    /// - [Error::CapacityOverflow] when available capacity would exceed total capacity
    ///
    async fn release(&self, id: EventId, count: u32) -> Result<(), Error>;
}
