use super::ApplicationEnv;
use crate::{
    repository::{EventsRepository, JsonFileEventsRepository},
    service::events_service::{EventsService, EventsServiceConfig, EventsServiceImpl},
};
use axum::extract::FromRef;
use reservation_engine::{
    Event, InMemoryEventStore, OsRandomIdGenerator, ReservationEngine, ReservationEngineImpl,
    Ticket,
};
use std::{collections::HashSet, sync::Arc};

#[derive(Clone, FromRef)]
pub struct ApplicationState {
    pub events_service: Arc<dyn EventsService>,
}

pub struct ApplicationStateToClose {
    pub reservation_engine: Arc<dyn ReservationEngine>,
    pub events_repository: Arc<dyn EventsRepository>,
}

pub async fn create_state(
    env: &ApplicationEnv,
) -> anyhow::Result<(ApplicationState, ApplicationStateToClose)> {
    tracing::info!(directory = %env.data_directory.display(), "opening storage");
    let events_repository = JsonFileEventsRepository::new(&env.data_directory).await?;
    let events_repository: Arc<dyn EventsRepository> = Arc::new(events_repository);

    tracing::info!("creating reservation engine");
    let event_store = Arc::new(InMemoryEventStore::new());
    let id_generator = Arc::new(OsRandomIdGenerator::new());
    let reservation_engine = ReservationEngineImpl::new(event_store, id_generator);
    let reservation_engine: Arc<dyn ReservationEngine> = Arc::new(reservation_engine);

    tracing::info!("loading saved events");
    let events = events_repository.find_all_events().await?;
    let tickets = events_repository.find_all_tickets().await?;
    let tickets = discard_orphan_tickets(&events, tickets);
    reservation_engine.restore(events, tickets).await?;

    tracing::info!("creating services");
    let config = EventsServiceConfig {
        max_name_len: env.max_event_name_len,
    };
    let events_service = EventsServiceImpl::new(
        config,
        reservation_engine.clone(),
        events_repository.clone(),
    );
    let events_service = Arc::new(events_service);

    Ok((
        ApplicationState { events_service },
        ApplicationStateToClose {
            reservation_engine,
            events_repository,
        },
    ))
}

///
/// Ticket is saved before its event, so a failed event write
/// leaves tickets of an event that storage does not know about
///
fn discard_orphan_tickets(events: &[Event], tickets: Vec<Ticket>) -> Vec<Ticket> {
    let event_ids = events.iter().map(|event| event.id).collect::<HashSet<_>>();
    let (tickets, orphans): (Vec<_>, Vec<_>) = tickets
        .into_iter()
        .partition(|ticket| event_ids.contains(&ticket.event_id));

    for orphan in &orphans {
        tracing::error!(
            id = %orphan.id,
            event_id = %orphan.event_id,
            "discarding saved ticket of unknown event"
        );
    }

    tickets
}
