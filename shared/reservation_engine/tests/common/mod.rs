use reservation_engine::{InMemoryEventStore, OsRandomIdGenerator, ReservationEngineImpl};
use std::sync::Arc;

pub fn create_engine() -> Arc<ReservationEngineImpl> {
    let event_store = Arc::new(InMemoryEventStore::new());
    let id_generator = Arc::new(OsRandomIdGenerator::new());

    Arc::new(ReservationEngineImpl::new(event_store, id_generator))
}
