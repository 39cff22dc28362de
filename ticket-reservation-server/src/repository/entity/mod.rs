mod event_entity;
mod ticket_entity;

pub use event_entity::*;
pub use ticket_entity::*;
