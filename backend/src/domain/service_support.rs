//! Helpers shared by the domain services.

use tracing::debug;

use super::Error;
use super::ports::{IdService, RepositoryError};

/// Parse a caller-supplied identifier, reporting `message` when it is not one.
pub(crate) fn parse_id<T>(ids: &dyn IdService, raw: &str, message: &str) -> Result<T, Error>
where
    T: TryFrom<String>,
{
    if !ids.is_valid(raw) {
        return Err(Error::invalid_input(message));
    }
    T::try_from(raw.to_owned()).map_err(|_| Error::invalid_input(message))
}

/// Map a failed read to a system error carrying `message`.
pub(crate) fn read_failed(message: &'static str) -> impl FnOnce(RepositoryError) -> Error {
    move |err| {
        debug!(error = %err, "{message}");
        Error::system(message).with_cause(err)
    }
}

/// Map a failed write, surfacing uniqueness clashes as `conflict`.
pub(crate) fn write_failed(
    message: &'static str,
    conflict: &'static str,
) -> impl FnOnce(RepositoryError) -> Error {
    move |err| match err {
        RepositoryError::Conflict { .. } => Error::conflict(conflict).with_cause(err),
        other => {
            debug!(error = %other, "{message}");
            Error::system(message).with_cause(other)
        }
    }
}
