mod booked_tickets;
mod created_event;
mod event;
mod events;
mod ticket;

pub use booked_tickets::*;
pub use created_event::*;
pub use event::*;
pub use events::*;
pub use ticket::*;
