use super::Event;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Events {
    pub events: Vec<Event>,
}
