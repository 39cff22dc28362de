use super::error::Error;
use axum::async_trait;
use reservation_engine::{Event, Ticket};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventsRepository: Send + Sync {
    ///
    /// Finds every saved event.
    /// Nothing saved yet is not an error
    ///
    async fn find_all_events(&self) -> Result<Vec<Event>, Error>;

    async fn find_all_tickets(&self) -> Result<Vec<Ticket>, Error>;

    ///
    /// Inserts event or updates the saved one with the same id.
    /// Available tickets only ever decrease, so when both records exist
    /// the smaller `available_capacity` is kept.
    ///
    async fn save_event(&self, event: &Event) -> Result<(), Error>;

    ///
    /// Appends tickets.
    /// Tickets with an id that is already saved are skipped
    ///
    async fn save_tickets(&self, tickets: &[Ticket]) -> Result<(), Error>;
}
