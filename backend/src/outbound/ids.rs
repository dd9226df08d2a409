//! UUID v4 identifier adapter.

use uuid::Uuid;

use crate::domain::ports::{IdService, IdServiceError};

/// Mints random (v4) UUIDs and accepts any canonical UUID string.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4IdService;

impl IdService for UuidV4IdService {
    fn generate(&self) -> Result<Uuid, IdServiceError> {
        Ok(Uuid::new_v4())
    }

    fn is_valid(&self, candidate: &str) -> bool {
        !candidate.is_empty() && Uuid::parse_str(candidate).is_ok_and(|id| !id.is_nil())
    }
}
