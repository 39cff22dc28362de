//!
//! Module with all dtos that are passed between server and users
//!

pub mod date_format;
pub mod input;
pub mod output;
