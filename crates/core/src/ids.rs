//! Identity and version id generation.
//!
//! Both identifiers are random UUIDv4 values drawn from the OS-seeded
//! generator. No uniqueness check against storage happens here; collisions
//! surface as [`CoreError::ConstraintViolation`](crate::error::CoreError)
//! when the store enforces its unique constraints.

use uuid::Uuid;

use crate::types::{VersionId, VersionIdentity};

/// Generate a new identity for a logical entity's very first draft.
pub fn generate_new_identity() -> VersionIdentity {
    Uuid::new_v4()
}

/// Generate a new id for a physical revision.
pub fn generate_new_version_id() -> VersionId {
    Uuid::new_v4()
}
