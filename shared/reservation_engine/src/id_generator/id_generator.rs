use super::Error;
use uuid::Uuid;

#[cfg_attr(any(test, feature = "test_utils"), mockall::automock)]
pub trait IdGenerator: Send + Sync {
    ///
    /// Generates new 128-bit identifier.
    ///
    /// ### Errors
    /// - [Error::RandomSource] when the underlying random source fails.
    /// No placeholder identifier is ever returned instead
    ///
    fn generate(&self) -> Result<Uuid, Error>;
}
