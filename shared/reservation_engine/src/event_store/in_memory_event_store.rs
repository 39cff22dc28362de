use super::{Error, EventStore};
use crate::dto::{Event, EventId, Reservation, Ticket, TicketId};
use async_trait::async_trait;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    },
};
use time::Date;
use tokio::sync::RwLock;

///
/// Event with its own capacity counter.
/// Only `available_capacity` is mutable and it is changed with
/// compare-and-swap, so no lock is ever held while reserving.
///
struct EventRecord {
    id: EventId,
    name: String,
    date: Date,
    total_capacity: u32,
    available_capacity: AtomicU32,
}

impl EventRecord {
    fn snapshot(&self) -> Event {
        Event {
            id: self.id,
            name: self.name.clone(),
            date: self.date,
            total_capacity: self.total_capacity,
            available_capacity: self.available_capacity.load(Ordering::Acquire),
        }
    }
}

impl From<Event> for EventRecord {
    fn from(value: Event) -> Self {
        Self {
            id: value.id,
            name: value.name,
            date: value.date,
            total_capacity: value.total_capacity,
            available_capacity: AtomicU32::new(value.available_capacity),
        }
    }
}

pub struct InMemoryEventStore {
    events: RwLock<HashMap<EventId, Arc<EventRecord>>>,
    tickets: RwLock<HashMap<TicketId, Ticket>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        let events = HashMap::new();
        let events = RwLock::new(events);

        let tickets = HashMap::new();
        let tickets = RwLock::new(tickets);

        Self { events, tickets }
    }

    async fn record(&self, id: EventId) -> Result<Arc<EventRecord>, Error> {
        self.events
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(Error::EventNotExist(id))
    }
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn put(&self, event: Event) {
        let record = Arc::new(EventRecord::from(event));
        self.events.write().await.insert(record.id, record);
    }

    async fn get(&self, id: EventId) -> Option<Event> {
        self.events
            .read()
            .await
            .get(&id)
            .map(|record| record.snapshot())
    }

    async fn list(&self) -> Vec<Event> {
        self.events
            .read()
            .await
            .values()
            .map(|record| record.snapshot())
            .collect()
    }

    async fn store_tickets(&self, tickets: Vec<Ticket>) -> Result<(), Error> {
        let mut stored = self.tickets.write().await;

        let mut batch_ids = HashSet::with_capacity(tickets.len());
        for ticket in &tickets {
            if stored.contains_key(&ticket.id) || !batch_ids.insert(ticket.id) {
                return Err(Error::InsertUniqueViolation(ticket.id));
            }
        }

        stored.extend(tickets.into_iter().map(|ticket| (ticket.id, ticket)));

        Ok(())
    }

    async fn list_tickets(&self, event_id: EventId) -> Vec<Ticket> {
        self.tickets
            .read()
            .await
            .values()
            .filter(|ticket| ticket.event_id == event_id)
            .copied()
            .collect()
    }

    async fn try_reserve(&self, id: EventId, count: u32) -> Result<Reservation, Error> {
        let record = self.record(id).await?;

        record
            .available_capacity
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |available| {
                available.checked_sub(count)
            })
            .map(|previous| Reservation {
                event_id: id,
                count,
                remaining: previous - count,
            })
            .map_err(|available| Error::InsufficientCapacity {
                requested: count,
                available,
            })
    }

    async fn release(&self, id: EventId, count: u32) -> Result<(), Error> {
        let record = self.record(id).await?;
        let total_capacity = record.total_capacity;

        record
            .available_capacity
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |available| {
                available
                    .checked_add(count)
                    .filter(|released| *released <= total_capacity)
            })
            .map(|_| ())
            .map_err(|_| Error::CapacityOverflow {
                count,
                total_capacity,
            })
    }
}
