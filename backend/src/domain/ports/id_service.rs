//! Port for generating and recognising resource identifiers.

use uuid::Uuid;

use super::define_port_error;

define_port_error! {
    /// Errors raised while minting identifiers.
    pub enum IdServiceError {
        /// The generator could not produce an identifier.
        Generation { message: String } => "failed to generate identifier: {message}",
    }
}

/// Source of fresh identifiers for new aggregates.
#[cfg_attr(test, mockall::automock)]
pub trait IdService: Send + Sync {
    /// Mint a new identifier.
    fn generate(&self) -> Result<Uuid, IdServiceError>;

    /// Whether `candidate` is an identifier this service would accept.
    fn is_valid(&self, candidate: &str) -> bool;
}
