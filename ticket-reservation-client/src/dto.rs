//!
//! Response bodies of the reservation server
//!

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: String,
    pub total_tickets: u32,
    pub available_tickets: u32,
}

#[derive(Debug, Deserialize)]
pub struct Events {
    pub events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedEvent {
    pub event: Event,
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookedTickets {
    pub tickets: Booking,
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Booking {
    pub event_id: String,
    pub ticket_ids: Vec<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SimulationReport {
    pub succeeded: u32,
    pub sold_out: u32,
    pub failed: u32,
}
