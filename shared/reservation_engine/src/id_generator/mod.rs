mod error;
mod id_generator;
mod os_random_id_generator;

pub use error::*;
pub use id_generator::*;
pub use os_random_id_generator::*;
