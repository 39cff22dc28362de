use crate::{
    dto::{Event, EventId, Ticket, TicketId},
    error::Error,
};
use async_trait::async_trait;
use time::Date;

#[cfg_attr(any(test, feature = "test_utils"), mockall::automock)]
#[async_trait]
pub trait ReservationEngine: Send + Sync {
    ///
    /// Creates event with all of its capacity available.
    /// Event is visible to every other call once this one returns.
    ///
    /// ### Errors
    /// - [Error::IdGenerationFailed] when event id could not be generated,
    /// nothing is stored
    ///
    async fn create_event(
        &self,
        name: String,
        date: Date,
        total_capacity: u32,
    ) -> Result<Event, Error>;

    ///
    /// Snapshot of all events.
    /// Order is unspecified, callers that need stable order must sort
    ///
    async fn list_events(&self) -> Vec<Event>;

    async fn get_event(&self, id: EventId) -> Option<Event>;

    ///
    /// Books `count` tickets for the event.
    ///
    /// ### Returns
    /// Exactly `count` ids of new tickets
    ///
    /// ### Errors
    /// - [Error::InvalidInput] when count is zero
    /// - [Error::EventNotFound] when event with id does not exist
    /// - [Error::InsufficientCapacity] when less than `count` tickets are left,
    /// nothing is changed
    /// - [Error::PartialBookingFailure] when capacity was reserved
    /// but tickets could not be issued
    ///
    async fn book_tickets(&self, id: EventId, count: u32) -> Result<Vec<TicketId>, Error>;

    ///
    /// ### Errors
    /// - [Error::EventNotFound] when event with id does not exist
    ///
    async fn list_tickets(&self, id: EventId) -> Result<Vec<Ticket>, Error>;

    ///
    /// Loads previously saved events and tickets.
    /// Available capacity of every event is capped at
    /// `total_capacity - tickets`, so restored state never allows overselling.
    ///
    /// ### Errors
    /// - [Error::InconsistentRestore] when
    ///     - event has more available than total capacity
    ///     - event or ticket id is repeated
    ///     - ticket references unknown event
    ///     - event has more tickets than total capacity
    ///
    async fn restore(&self, events: Vec<Event>, tickets: Vec<Ticket>) -> Result<(), Error>;
}
