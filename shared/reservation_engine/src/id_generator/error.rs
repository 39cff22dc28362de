pub use rand::Error as RandomSourceError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("random source error: {0}")]
    RandomSource(#[from] RandomSourceError),
}
