use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BookedTickets {
    pub tickets: Booking,

    ///
    /// Set when tickets were booked but could not be saved to storage
    ///
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Booking {
    pub event_id: String,
    pub ticket_ids: Vec<String>,
}
