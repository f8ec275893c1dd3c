//! Version metadata embedded in every versioned entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::ids::generate_new_version_id;
use crate::state::VersionState;
use crate::types::{DbId, Timestamp, VersionId, VersionIdentity};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum allowed length (in characters) of a revision description.
pub const MAX_DESCRIPTION_LENGTH: usize = 150;

/// Description written onto every freshly minted draft.
pub const DRAFT_CREATED_NOTE: &str = "New Draft object created";

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Identity, revision and lifecycle fields of one physical revision.
///
/// `id` is the storage primary key and stays `None` until the record has
/// been saved. `created_at` and `last_updated_at` are stamped by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionMetadata {
    pub id: Option<DbId>,
    pub identity: VersionIdentity,
    pub version_id: VersionId,
    pub state: VersionState,
    pub created_at: Option<Timestamp>,
    pub last_updated_at: Option<Timestamp>,
    pub description: String,
}

impl VersionMetadata {
    /// Metadata for a brand-new logical entity with the given identity.
    pub fn with_identity(identity: VersionIdentity) -> Self {
        Self {
            identity,
            ..Self::default()
        }
    }

    /// Whether the store has assigned a primary key.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Forget the storage primary key so the next save inserts a new row.
    pub fn detach(&mut self) {
        self.id = None;
    }

    /// Replace `version_id` with a freshly generated one.
    pub fn assign_new_version_id(&mut self) {
        self.version_id = generate_new_version_id();
    }

    /// Put the metadata in the shape of a new draft revision: draft state,
    /// cleared timestamps, the fixed draft note and a fresh `version_id`.
    pub fn reset_for_draft(&mut self) {
        self.state = VersionState::Draft;
        self.created_at = None;
        self.last_updated_at = None;
        self.description = DRAFT_CREATED_NOTE.to_string();
        self.assign_new_version_id();
    }

    /// Validate fields that the store would otherwise reject.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.identity == Uuid::nil() {
            return Err(CoreError::Validation(
                "Version identity must be assigned".to_string(),
            ));
        }
        validate_description(&self.description)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a description: at most [`MAX_DESCRIPTION_LENGTH`] characters.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description must not exceed {MAX_DESCRIPTION_LENGTH} characters, got {len}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
