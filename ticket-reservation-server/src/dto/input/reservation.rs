use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Reservation {
    pub num_tickets: i64,
}
