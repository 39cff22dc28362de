mod event;
mod event_id;
mod reservation;
mod ticket;
mod ticket_id;

pub use event::*;
pub use event_id::*;
pub use reservation::*;
pub use ticket::*;
pub use ticket_id::*;
