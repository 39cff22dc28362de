use super::EventId;
use time::Date;

///
/// Snapshot of an event.
///
/// Every field comes from one coherent state of the event,
/// `available_capacity` is the only one that ever changes in the store.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub date: Date,
    pub total_capacity: u32,
    pub available_capacity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Open,
    Exhausted,
}

impl Event {
    pub fn status(&self) -> EventStatus {
        match self.available_capacity {
            0 => EventStatus::Exhausted,
            _ => EventStatus::Open,
        }
    }
}
