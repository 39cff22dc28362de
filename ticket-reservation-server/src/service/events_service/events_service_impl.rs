use super::{EventsService, EventsServiceConfig};
use crate::{
    dto::{input, output},
    error::Error,
    repository::EventsRepository,
};
use axum::async_trait;
use reservation_engine::{EventId, ReservationEngine, Ticket};
use std::sync::Arc;

const WARNING_EVENT_NOT_SAVED: &str = "event was created but could not be saved to storage";
const WARNING_TICKETS_NOT_SAVED: &str = "tickets were booked but could not be saved to storage";

pub struct EventsServiceImpl {
    config: EventsServiceConfig,
    reservation_engine: Arc<dyn ReservationEngine>,
    events_repository: Arc<dyn EventsRepository>,
}

impl EventsServiceImpl {
    pub fn new(
        config: EventsServiceConfig,
        reservation_engine: Arc<dyn ReservationEngine>,
        events_repository: Arc<dyn EventsRepository>,
    ) -> Self {
        Self {
            config,
            reservation_engine,
            events_repository,
        }
    }

    fn validate_name(&self, name: &str) -> Result<(), Error> {
        if name.trim().is_empty() {
            return Err(Error::Validation("name must not be blank"));
        }

        let len = name.chars().count();
        if len > self.config.max_name_len {
            return Err(Error::ValidationNameTooLong {
                len,
                max_len: self.config.max_name_len,
            });
        }

        Ok(())
    }

    fn validate_total_tickets(total_tickets: i64) -> Result<u32, Error> {
        if total_tickets < 0 {
            return Err(Error::Validation("total_tickets must not be negative"));
        }

        u32::try_from(total_tickets).map_err(|_| Error::Validation("total_tickets too large"))
    }

    fn validate_num_tickets(num_tickets: i64) -> Result<u32, Error> {
        if num_tickets < 1 {
            return Err(Error::Validation("num_tickets must be at least 1"));
        }

        u32::try_from(num_tickets).map_err(|_| Error::Validation("num_tickets too large"))
    }

    ///
    /// Storage failures never undo a booking, the engine stays the source of truth
    ///
    async fn save_booking(&self, id: EventId, tickets: &[Ticket]) -> Option<String> {
        if let Err(err) = self.events_repository.save_tickets(tickets).await {
            tracing::warn!(%err, "failed to save tickets");
            return Some(WARNING_TICKETS_NOT_SAVED.to_string());
        }

        let event = self.reservation_engine.get_event(id).await?;
        if let Err(err) = self.events_repository.save_event(&event).await {
            tracing::warn!(%err, "failed to save event");
            return Some(WARNING_TICKETS_NOT_SAVED.to_string());
        }

        None
    }
}

#[async_trait]
impl EventsService for EventsServiceImpl {
    async fn create_event(&self, event: input::Event) -> Result<output::CreatedEvent, Error> {
        tracing::info!("creating event");
        tracing::trace!(?event);

        self.validate_name(&event.name)?;
        let total_tickets = Self::validate_total_tickets(event.total_tickets)?;

        let event = self
            .reservation_engine
            .create_event(event.name, event.date, total_tickets)
            .await?;
        tracing::info!(id = %event.id, "created event");

        let warning = match self.events_repository.save_event(&event).await {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(%err, "failed to save event");
                Some(WARNING_EVENT_NOT_SAVED.to_string())
            }
        };

        Ok(output::CreatedEvent {
            event: output::Event::from(event),
            warning,
        })
    }

    async fn find_events(&self) -> Result<output::Events, Error> {
        tracing::info!("finding events");

        let events = self.reservation_engine.list_events().await;
        tracing::info!(count = events.len(), "found events");

        let events = events.into_iter().map(output::Event::from).collect();

        Ok(output::Events { events })
    }

    async fn find_event(&self, id: EventId) -> Result<output::Event, Error> {
        tracing::info!(%id, "finding event");

        let event = self
            .reservation_engine
            .get_event(id)
            .await
            .ok_or(Error::EventNotExist(id))?;

        Ok(output::Event::from(event))
    }

    async fn book_tickets(
        &self,
        id: EventId,
        reservation: input::Reservation,
    ) -> Result<output::BookedTickets, Error> {
        tracing::info!(%id, "booking tickets");

        let count = Self::validate_num_tickets(reservation.num_tickets)?;

        let ticket_ids = self.reservation_engine.book_tickets(id, count).await?;
        tracing::info!(count = ticket_ids.len(), "booked tickets");

        let tickets = ticket_ids
            .iter()
            .map(|ticket_id| Ticket {
                id: *ticket_id,
                event_id: id,
            })
            .collect::<Vec<_>>();
        let warning = self.save_booking(id, &tickets).await;

        Ok(output::BookedTickets {
            tickets: output::Booking {
                event_id: id.to_string(),
                ticket_ids: ticket_ids.iter().map(ToString::to_string).collect(),
            },
            warning,
        })
    }

    async fn find_tickets(&self, id: EventId) -> Result<Vec<output::Ticket>, Error> {
        tracing::info!(%id, "finding tickets");

        let tickets = self.reservation_engine.list_tickets(id).await?;
        tracing::info!(count = tickets.len(), "found tickets");

        let tickets = tickets.into_iter().map(output::Ticket::from).collect();

        Ok(tickets)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::repository::{self, MockEventsRepository};
    use reservation_engine::{Event, MockReservationEngine, TicketId};
    use time::macros::date;
    use uuid::Uuid;

    fn event_id() -> EventId {
        EventId::from_uuid(Uuid::from_u128(1))
    }

    fn event(available_capacity: u32) -> Event {
        Event {
            id: event_id(),
            name: "Concert".to_string(),
            date: date!(2024 - 06 - 01),
            total_capacity: 3,
            available_capacity,
        }
    }

    fn input_event(name: &str, total_tickets: i64) -> input::Event {
        input::Event {
            name: name.to_string(),
            date: date!(2024 - 06 - 01),
            total_tickets,
        }
    }

    fn service(
        reservation_engine: MockReservationEngine,
        events_repository: MockEventsRepository,
    ) -> EventsServiceImpl {
        EventsServiceImpl::new(
            EventsServiceConfig { max_name_len: 16 },
            Arc::new(reservation_engine),
            Arc::new(events_repository),
        )
    }

    fn storage_error() -> repository::Error {
        repository::Error::Io(std::io::Error::other("disk full"))
    }

    #[tokio::test]
    async fn create_event_ok() {
        let mut reservation_engine = MockReservationEngine::new();
        reservation_engine
            .expect_create_event()
            .withf(|name, date, total_capacity| {
                name == "Concert" && *date == date!(2024 - 06 - 01) && *total_capacity == 3
            })
            .return_once(|_, _, _| Ok(event(3)));
        let mut events_repository = MockEventsRepository::new();
        events_repository
            .expect_save_event()
            .times(1)
            .returning(|_| Ok(()));
        let service = service(reservation_engine, events_repository);

        let created = service
            .create_event(input_event("Concert", 3))
            .await
            .unwrap();

        assert_eq!(created.event.name, "Concert");
        assert_eq!(created.event.available_tickets, 3);
        assert!(created.warning.is_none());
    }

    #[tokio::test]
    async fn create_event_zero_tickets_ok() {
        let mut reservation_engine = MockReservationEngine::new();
        reservation_engine
            .expect_create_event()
            .withf(|_, _, total_capacity| *total_capacity == 0)
            .return_once(|_, _, _| {
                Ok(Event {
                    total_capacity: 0,
                    available_capacity: 0,
                    ..event(0)
                })
            });
        let mut events_repository = MockEventsRepository::new();
        events_repository.expect_save_event().returning(|_| Ok(()));
        let service = service(reservation_engine, events_repository);

        let created = service.create_event(input_event("Concert", 0)).await;

        assert!(created.is_ok());
    }

    #[tokio::test]
    async fn create_event_validation_blank_name() {
        let mut reservation_engine = MockReservationEngine::new();
        reservation_engine.expect_create_event().never();
        let service = service(reservation_engine, MockEventsRepository::new());

        let result = service.create_event(input_event("  ", 3)).await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn create_event_validation_name_too_long() {
        let mut reservation_engine = MockReservationEngine::new();
        reservation_engine.expect_create_event().never();
        let service = service(reservation_engine, MockEventsRepository::new());

        let name = "Grand Opéra de Printemps";
        let result = service.create_event(input_event(name, 3)).await;

        assert!(matches!(
            result,
            Err(Error::ValidationNameTooLong {
                len,
                max_len: 16
            }) if len == name.chars().count()
        ));
        assert_eq!(name.chars().count(), 24);
    }

    #[tokio::test]
    async fn create_event_validation_negative_total() {
        let mut reservation_engine = MockReservationEngine::new();
        reservation_engine.expect_create_event().never();
        let service = service(reservation_engine, MockEventsRepository::new());

        let result = service.create_event(input_event("Concert", -1)).await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn create_event_validation_total_too_large() {
        let mut reservation_engine = MockReservationEngine::new();
        reservation_engine.expect_create_event().never();
        let service = service(reservation_engine, MockEventsRepository::new());

        let result = service
            .create_event(input_event("Concert", i64::from(u32::MAX) + 1))
            .await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn create_event_storage_failed_warning() {
        let mut reservation_engine = MockReservationEngine::new();
        reservation_engine
            .expect_create_event()
            .return_once(|_, _, _| Ok(event(3)));
        let mut events_repository = MockEventsRepository::new();
        events_repository
            .expect_save_event()
            .returning(|_| Err(storage_error()));
        let service = service(reservation_engine, events_repository);

        let created = service
            .create_event(input_event("Concert", 3))
            .await
            .unwrap();

        assert_eq!(created.warning.as_deref(), Some(WARNING_EVENT_NOT_SAVED));
    }

    #[tokio::test]
    async fn find_event_not_exist() {
        let mut reservation_engine = MockReservationEngine::new();
        reservation_engine.expect_get_event().return_once(|_| None);
        let service = service(reservation_engine, MockEventsRepository::new());

        let result = service.find_event(event_id()).await;

        assert!(matches!(result, Err(Error::EventNotExist(_))));
    }

    #[tokio::test]
    async fn find_events_ok() {
        let mut reservation_engine = MockReservationEngine::new();
        reservation_engine
            .expect_list_events()
            .return_once(|| vec![event(3), event(1)]);
        let service = service(reservation_engine, MockEventsRepository::new());

        let events = service.find_events().await.unwrap();

        assert_eq!(events.events.len(), 2);
    }

    #[tokio::test]
    async fn book_tickets_ok() {
        let ticket_id = TicketId::from_uuid(Uuid::from_u128(10));
        let mut reservation_engine = MockReservationEngine::new();
        reservation_engine
            .expect_book_tickets()
            .withf(|_, count| *count == 1)
            .return_once(move |_, _| Ok(vec![ticket_id]));
        reservation_engine
            .expect_get_event()
            .return_once(|_| Some(event(2)));
        let mut events_repository = MockEventsRepository::new();
        events_repository
            .expect_save_tickets()
            .withf(move |tickets| tickets.len() == 1 && tickets[0].id == ticket_id)
            .times(1)
            .returning(|_| Ok(()));
        events_repository
            .expect_save_event()
            .withf(|event| event.available_capacity == 2)
            .times(1)
            .returning(|_| Ok(()));
        let service = service(reservation_engine, events_repository);

        let booked = service
            .book_tickets(event_id(), input::Reservation { num_tickets: 1 })
            .await
            .unwrap();

        assert_eq!(booked.tickets.event_id, event_id().to_string());
        assert_eq!(booked.tickets.ticket_ids, vec![ticket_id.to_string()]);
        assert!(booked.warning.is_none());
    }

    #[tokio::test]
    async fn book_tickets_validation_zero() {
        let mut reservation_engine = MockReservationEngine::new();
        reservation_engine.expect_book_tickets().never();
        let service = service(reservation_engine, MockEventsRepository::new());

        let result = service
            .book_tickets(event_id(), input::Reservation { num_tickets: 0 })
            .await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn book_tickets_insufficient_capacity_nothing_saved() {
        let mut reservation_engine = MockReservationEngine::new();
        reservation_engine.expect_book_tickets().return_once(|id, count| {
            Err(reservation_engine::Error::InsufficientCapacity {
                event_id: id,
                requested: count,
                available: 0,
            })
        });
        let mut events_repository = MockEventsRepository::new();
        events_repository.expect_save_tickets().never();
        events_repository.expect_save_event().never();
        let service = service(reservation_engine, events_repository);

        let result = service
            .book_tickets(event_id(), input::Reservation { num_tickets: 1 })
            .await;

        assert!(matches!(
            result,
            Err(Error::InsufficientCapacity {
                requested: 1,
                available: 0
            })
        ));
    }

    #[tokio::test]
    async fn book_tickets_storage_failed_warning() {
        let mut reservation_engine = MockReservationEngine::new();
        reservation_engine
            .expect_book_tickets()
            .return_once(|_, _| Ok(vec![TicketId::from_uuid(Uuid::from_u128(10))]));
        let mut events_repository = MockEventsRepository::new();
        events_repository
            .expect_save_tickets()
            .returning(|_| Err(storage_error()));
        events_repository.expect_save_event().never();
        let service = service(reservation_engine, events_repository);

        let booked = service
            .book_tickets(event_id(), input::Reservation { num_tickets: 1 })
            .await
            .unwrap();

        assert_eq!(booked.warning.as_deref(), Some(WARNING_TICKETS_NOT_SAVED));
    }

    #[tokio::test]
    async fn find_tickets_event_not_exist() {
        let mut reservation_engine = MockReservationEngine::new();
        reservation_engine
            .expect_list_tickets()
            .return_once(|id| Err(reservation_engine::Error::EventNotFound(id)));
        let service = service(reservation_engine, MockEventsRepository::new());

        let result = service.find_tickets(event_id()).await;

        assert!(matches!(result, Err(Error::EventNotExist(_))));
    }
}
