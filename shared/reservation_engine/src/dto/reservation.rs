use super::EventId;

///
/// Capacity taken from an event by a single successful reserve step
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    pub event_id: EventId,
    pub count: u32,
    /// available capacity right after this reservation was applied
    pub remaining: u32,
}
