use crate::{
    dto::{input, output},
    error::Error,
};
use axum::async_trait;
use reservation_engine::EventId;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventsService: Send + Sync {
    ///
    /// Creates new event with all tickets available.
    ///
    /// ### Returns
    /// created event, with a warning when it could not be saved to storage
    ///
    /// ### Errors
    /// - [Error::Validation] when
    ///     - name is blank
    ///     - total_tickets is negative or too large
    /// - [Error::ValidationNameTooLong] when name is too long
    ///
    async fn create_event(&self, event: input::Event) -> Result<output::CreatedEvent, Error>;

    async fn find_events(&self) -> Result<output::Events, Error>;

    ///
    /// ### Errors
    /// - [Error::EventNotExist] when event with id does not exist
    ///
    async fn find_event(&self, id: EventId) -> Result<output::Event, Error>;

    ///
    /// Books tickets for the event.
    ///
    /// ### Returns
    /// booked ticket ids, with a warning when they could not be saved to storage
    ///
    /// ### Errors
    /// - [Error::Validation] when num_tickets is not positive or too large
    /// - [Error::EventNotExist] when event with id does not exist
    /// - [Error::InsufficientCapacity] when not enough tickets are left
    ///
    async fn book_tickets(
        &self,
        id: EventId,
        reservation: input::Reservation,
    ) -> Result<output::BookedTickets, Error>;

    ///
    /// ### Errors
    /// - [Error::EventNotExist] when event with id does not exist
    ///
    async fn find_tickets(&self, id: EventId) -> Result<Vec<output::Ticket>, Error>;
}
