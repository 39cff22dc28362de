mod events_service_config;

pub use events_service_config::*;
