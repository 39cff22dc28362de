mod error;
mod event_store;
mod in_memory_event_store;

pub use error::*;
pub use event_store::*;
pub use in_memory_event_store::*;
