mod reservation_engine;
mod reservation_engine_impl;

pub use reservation_engine::*;
pub use reservation_engine_impl::*;
