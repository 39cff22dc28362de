mod entity;
mod error;
mod events_repository;
mod events_repository_impl;

pub use error::*;
pub use events_repository::*;
pub use events_repository_impl::*;
