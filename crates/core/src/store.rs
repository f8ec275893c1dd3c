//! Storage collaborator interface.
//!
//! Defines [`VersionStore`], the trait every persistence backend implements
//! for a given versioned entity type.

use std::future::Future;

use crate::error::CoreError;
use crate::state::VersionState;
use crate::types::{VersionId, VersionIdentity};
use crate::versioned::Versioned;

/// Persists and loads revisions of one versioned entity type.
///
/// `save` contract:
/// - A record without a primary key is inserted as a new row. The store
///   assigns the key and stamps `created_at` / `last_updated_at` when they
///   are unset.
/// - A record with a primary key updates that row in place. Timestamps are
///   left as they are.
/// - A duplicate `(identity, version_id)` pair or `version_id` fails with
///   [`CoreError::ConstraintViolation`]; other backend failures surface as
///   [`CoreError::Storage`].
///
/// The record is taken by value and returned with its storage fields
/// populated. On error it is dropped, never partially persisted.
pub trait VersionStore<R: Versioned>: Send + Sync {
    fn save(&self, record: R) -> impl Future<Output = Result<R, CoreError>> + Send;

    /// Find the revision with the given `version_id`.
    fn find_by_version_id(
        &self,
        version_id: VersionId,
    ) -> impl Future<Output = Result<Option<R>, CoreError>> + Send;

    /// List every revision of an identity, newest first.
    fn list_by_identity(
        &self,
        identity: VersionIdentity,
    ) -> impl Future<Output = Result<Vec<R>, CoreError>> + Send;

    /// Find the newest revision of an identity in the given state.
    fn find_latest_in_state(
        &self,
        identity: VersionIdentity,
        state: VersionState,
    ) -> impl Future<Output = Result<Option<R>, CoreError>> + Send;
}
