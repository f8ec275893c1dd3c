//! The "has version metadata" capability.
//!
//! Concrete entities embed a [`VersionMetadata`] next to their own payload
//! fields and implement [`Versioned`]; the lifecycle controller and the
//! storage collaborators work generically over that trait.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::metadata::VersionMetadata;
use crate::state::VersionState;
use crate::types::{VersionId, VersionIdentity};

/// How [`Versioned::clone_row`] treats many-to-many style relations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationCloneStrategy {
    /// Refuse to clone a record that carries relations.
    #[default]
    Reject,
    /// The clone references the same related rows as the source.
    Share,
    /// The clone starts without relations.
    Drop,
}

/// An entity made of version metadata plus a typed payload.
pub trait Versioned: Clone + Default + Send + Sync + 'static {
    /// Typed payload overrides applied when a brand-new entity is drafted.
    type Overrides: Default + Send;

    fn metadata(&self) -> &VersionMetadata;

    fn metadata_mut(&mut self) -> &mut VersionMetadata;

    /// Apply caller-supplied overrides onto a freshly created instance.
    fn apply_overrides(&mut self, overrides: Self::Overrides);

    /// Whether the record currently references related rows.
    fn has_relations(&self) -> bool {
        false
    }

    /// Remove all relation references from the record.
    fn clear_relations(&mut self) {}

    fn identity(&self) -> VersionIdentity {
        self.metadata().identity
    }

    fn version_id(&self) -> VersionId {
        self.metadata().version_id
    }

    fn state(&self) -> VersionState {
        self.metadata().state
    }

    /// Mint a fresh `version_id` for this record in place.
    fn assign_new_version_id(&mut self) {
        self.metadata_mut().assign_new_version_id();
    }

    /// Duplicate a persisted record, detached from its storage row so that
    /// the next save inserts a new row.
    ///
    /// Fails with [`CoreError::UnsavedRecord`] if the record has no primary
    /// key yet, and with [`CoreError::UnsupportedRelationClone`] if it
    /// carries relations and `strategy` is [`RelationCloneStrategy::Reject`].
    fn clone_row(&self, strategy: RelationCloneStrategy) -> Result<Self, CoreError> {
        if !self.metadata().is_persisted() {
            return Err(CoreError::UnsavedRecord);
        }

        let mut cloned = self.clone();
        cloned.metadata_mut().detach();
        cloned.resolve_relations(strategy)?;
        Ok(cloned)
    }

    /// Apply `strategy` to the relations of a record about to become a new
    /// row. Leaves the record untouched when it fails.
    fn resolve_relations(&mut self, strategy: RelationCloneStrategy) -> Result<(), CoreError> {
        if !self.has_relations() {
            return Ok(());
        }
        match strategy {
            RelationCloneStrategy::Reject => Err(CoreError::UnsupportedRelationClone(format!(
                "version {} references related rows",
                self.version_id()
            ))),
            RelationCloneStrategy::Share => Ok(()),
            RelationCloneStrategy::Drop => {
                self.clear_relations();
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
