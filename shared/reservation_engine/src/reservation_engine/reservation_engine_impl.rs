use super::ReservationEngine;
use crate::{
    dto::{Event, EventId, Ticket, TicketId},
    error::{Error, PartialBookingCause},
    event_store::{self, EventStore},
    id_generator::IdGenerator,
};
use async_trait::async_trait;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use time::Date;

pub struct ReservationEngineImpl {
    event_store: Arc<dyn EventStore>,
    id_generator: Arc<dyn IdGenerator>,
}

impl ReservationEngineImpl {
    pub fn new(event_store: Arc<dyn EventStore>, id_generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            event_store,
            id_generator,
        }
    }

    ///
    /// Runs outside of the event's reserve step,
    /// ticket ids are unique on their own so nothing here is serialized per event
    ///
    async fn issue_tickets(
        &self,
        event_id: EventId,
        count: u32,
    ) -> Result<Vec<TicketId>, PartialBookingCause> {
        let tickets = (0..count)
            .map(|_| {
                self.id_generator.generate().map(|id| Ticket {
                    id: TicketId::from_uuid(id),
                    event_id,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let ticket_ids = tickets.iter().map(|ticket| ticket.id).collect();

        self.event_store.store_tickets(tickets).await?;

        Ok(ticket_ids)
    }

    async fn compensate(&self, event_id: EventId, count: u32, cause: PartialBookingCause) -> Error {
        let compensated = match self.event_store.release(event_id, count).await {
            Ok(()) => {
                tracing::warn!(%cause, "released reserved capacity after failed booking");
                true
            }
            Err(err) => {
                tracing::error!(
                    %cause,
                    release_err = %err,
                    "INCONSISTENT STATE: reserved capacity could not be released"
                );
                false
            }
        };

        Error::PartialBookingFailure {
            event_id,
            count,
            compensated,
            cause,
        }
    }

    fn validate_restore(events: &[Event], tickets: &[Ticket]) -> Result<HashMap<EventId, u32>, Error> {
        let mut issued = HashMap::with_capacity(events.len());
        for event in events {
            if event.available_capacity > event.total_capacity {
                return Err(Error::InconsistentRestore(format!(
                    "event {} has {} available of {} total tickets",
                    event.id, event.available_capacity, event.total_capacity
                )));
            }
            if issued.insert(event.id, 0u32).is_some() {
                return Err(Error::InconsistentRestore(format!(
                    "event {} is repeated",
                    event.id
                )));
            }
        }

        let mut ticket_ids = HashSet::with_capacity(tickets.len());
        for ticket in tickets {
            if !ticket_ids.insert(ticket.id) {
                return Err(Error::InconsistentRestore(format!(
                    "ticket {} is repeated",
                    ticket.id
                )));
            }
            let count = issued.get_mut(&ticket.event_id).ok_or_else(|| {
                Error::InconsistentRestore(format!(
                    "ticket {} references unknown event {}",
                    ticket.id, ticket.event_id
                ))
            })?;
            *count += 1;
        }

        for event in events {
            let count = issued.get(&event.id).copied().unwrap_or_default();
            if count > event.total_capacity {
                return Err(Error::InconsistentRestore(format!(
                    "event {} has {count} tickets of {} total",
                    event.id, event.total_capacity
                )));
            }
        }

        Ok(issued)
    }
}

#[async_trait]
impl ReservationEngine for ReservationEngineImpl {
    async fn create_event(
        &self,
        name: String,
        date: Date,
        total_capacity: u32,
    ) -> Result<Event, Error> {
        tracing::info!("creating event");

        let id = EventId::from_uuid(self.id_generator.generate()?);
        let event = Event {
            id,
            name,
            date,
            total_capacity,
            available_capacity: total_capacity,
        };

        self.event_store.put(event.clone()).await;
        tracing::info!(%id, total_capacity, "created event");

        Ok(event)
    }

    async fn list_events(&self) -> Vec<Event> {
        let events = self.event_store.list().await;
        tracing::debug!(count = events.len(), "listed events");

        events
    }

    async fn get_event(&self, id: EventId) -> Option<Event> {
        self.event_store.get(id).await
    }

    #[tracing::instrument(
        name = "Booking",
        skip_all,
        fields(
            event_id = %id,
            count = count,
        )
    )]
    async fn book_tickets(&self, id: EventId, count: u32) -> Result<Vec<TicketId>, Error> {
        tracing::info!("booking tickets");

        if count == 0 {
            return Err(Error::InvalidInput("ticket count must be positive"));
        }

        let reservation = self
            .event_store
            .try_reserve(id, count)
            .await
            .map_err(|err| match err {
                event_store::Error::EventNotExist(id) => Error::EventNotFound(id),
                event_store::Error::InsufficientCapacity {
                    requested,
                    available,
                } => {
                    tracing::debug!(available, "not enough tickets");
                    Error::InsufficientCapacity {
                        event_id: id,
                        requested,
                        available,
                    }
                }
                err => Error::EventStore(err),
            })?;

        match self.issue_tickets(id, count).await {
            Ok(ticket_ids) => {
                tracing::info!(remaining = reservation.remaining, "booked tickets");
                Ok(ticket_ids)
            }
            Err(cause) => Err(self.compensate(id, count, cause).await),
        }
    }

    async fn list_tickets(&self, id: EventId) -> Result<Vec<Ticket>, Error> {
        if self.event_store.get(id).await.is_none() {
            return Err(Error::EventNotFound(id));
        }

        Ok(self.event_store.list_tickets(id).await)
    }

    async fn restore(&self, events: Vec<Event>, tickets: Vec<Ticket>) -> Result<(), Error> {
        tracing::info!(
            events = events.len(),
            tickets = tickets.len(),
            "restoring events"
        );

        let issued = Self::validate_restore(&events, &tickets)?;

        self.event_store
            .store_tickets(tickets)
            .await
            .map_err(|err| Error::InconsistentRestore(err.to_string()))?;

        for mut event in events {
            let count = issued.get(&event.id).copied().unwrap_or_default();
            let available = event.total_capacity - count;
            if event.available_capacity > available {
                tracing::warn!(
                    id = %event.id,
                    stored = event.available_capacity,
                    available,
                    "available capacity capped by issued tickets"
                );
                event.available_capacity = available;
            }

            self.event_store.put(event).await;
        }

        tracing::info!("restored events");

        Ok(())
    }
}
