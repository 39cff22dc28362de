mod event;
mod reservation;

pub use event::*;
pub use reservation::*;
