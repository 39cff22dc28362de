//!
//! In-memory ticket inventory.
//!
//! [EventStore] keeps every event's remaining capacity in its own atomic counter,
//! so bookings on one event never wait for bookings on another.
//! [ReservationEngine] is the surface used by transports: it validates input,
//! generates identifiers and turns a successful capacity reservation into tickets.
//!

pub mod dto;
pub mod error;
pub mod event_store;
pub mod id_generator;
pub mod reservation_engine;

pub use dto::*;
pub use error::*;
pub use event_store::{EventStore, InMemoryEventStore};
pub use id_generator::{IdGenerator, OsRandomIdGenerator, RandomSourceError};
pub use reservation_engine::*;
