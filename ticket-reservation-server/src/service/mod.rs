pub mod events_service;
