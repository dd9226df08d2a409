//! Error shared by every persistence port.

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by repository adapters.
    pub enum RepositoryError {
        /// A connection could not be obtained from the store.
        Connection { message: String } => "repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// The write collided with an existing row on a unique key.
        Conflict { message: String } => "repository write conflicted: {message}",
    }
}
