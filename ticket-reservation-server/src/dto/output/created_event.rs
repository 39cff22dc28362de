use super::Event;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CreatedEvent {
    pub event: Event,

    ///
    /// Set when the event was created but could not be saved to storage
    ///
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
