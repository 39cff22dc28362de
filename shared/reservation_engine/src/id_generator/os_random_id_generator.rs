use super::{Error, IdGenerator};
use rand::{rngs::OsRng, RngCore};
use uuid::{Builder, Uuid};

///
/// Identifiers built from operating system randomness,
/// formatted as version 4 UUIDs
///
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomIdGenerator;

impl OsRandomIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for OsRandomIdGenerator {
    fn generate(&self) -> Result<Uuid, Error> {
        let mut bytes = [0u8; 16];
        OsRng.try_fill_bytes(&mut bytes)?;

        Ok(Builder::from_random_bytes(bytes).into_uuid())
    }
}
