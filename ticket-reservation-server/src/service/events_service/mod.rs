mod dto;
mod events_service;
mod events_service_impl;

pub use dto::EventsServiceConfig;
pub use events_service::*;
pub use events_service_impl::*;
