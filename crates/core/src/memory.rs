//! In-process [`VersionStore`] backed by a vector of rows.
//!
//! Enforces the same uniqueness rules as the relational schema and stamps
//! timestamps the same way, so the lifecycle controller behaves identically
//! against it. Used by unit tests and by embedders that do not need a
//! database.

use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::CoreError;
use crate::state::VersionState;
use crate::store::VersionStore;
use crate::types::{DbId, VersionId, VersionIdentity};
use crate::versioned::Versioned;

/// Constraint name reported for a duplicate `(identity, version_id)` pair.
pub const IDENTITY_VERSION_CONSTRAINT: &str = "uq_identity_version";

/// Constraint name reported for a duplicate `version_id`.
pub const VERSION_ID_CONSTRAINT: &str = "uq_version_id";

struct Rows<R> {
    rows: Vec<R>,
    next_id: DbId,
}

/// Vector-backed store. Rows are kept in insertion order.
pub struct InMemoryStore<R> {
    inner: Mutex<Rows<R>>,
}

impl<R> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Rows {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl<R: Versioned> InMemoryStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored row in insertion order.
    pub async fn rows(&self) -> Vec<R> {
        self.inner.lock().await.rows.clone()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Check `record` against every other stored row for a version id clash.
fn check_unique<R: Versioned>(rows: &[R], record: &R) -> Result<(), CoreError> {
    let meta = record.metadata();
    let clash = rows.iter().find(|row| {
        let other = row.metadata();
        other.id != meta.id && other.version_id == meta.version_id
    });

    match clash {
        Some(row) if row.identity() == meta.identity => Err(CoreError::ConstraintViolation(
            IDENTITY_VERSION_CONSTRAINT.to_string(),
        )),
        Some(_) => Err(CoreError::ConstraintViolation(
            VERSION_ID_CONSTRAINT.to_string(),
        )),
        None => Ok(()),
    }
}

impl<R: Versioned> VersionStore<R> for InMemoryStore<R> {
    async fn save(&self, mut record: R) -> Result<R, CoreError> {
        let mut inner = self.inner.lock().await;

        match record.metadata().id {
            Some(id) => {
                // Identity and version id are never rewritten by an update.
                let (identity, version_id) = (record.identity(), record.version_id());
                let slot = inner
                    .rows
                    .iter_mut()
                    .find(|row| {
                        row.metadata().id == Some(id)
                            && row.identity() == identity
                            && row.version_id() == version_id
                    })
                    .ok_or_else(|| {
                        CoreError::Storage(format!(
                            "Row {id} with version {version_id} does not exist"
                        ))
                    })?;
                *slot = record.clone();
            }
            None => {
                check_unique(&inner.rows, &record)?;

                let id = inner.next_id;
                inner.next_id += 1;

                let now = Utc::now();
                let meta = record.metadata_mut();
                meta.id = Some(id);
                meta.created_at.get_or_insert(now);
                meta.last_updated_at.get_or_insert(now);

                inner.rows.push(record.clone());
            }
        }

        Ok(record)
    }

    async fn find_by_version_id(&self, version_id: VersionId) -> Result<Option<R>, CoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .rows
            .iter()
            .find(|row| row.version_id() == version_id)
            .cloned())
    }

    async fn list_by_identity(&self, identity: VersionIdentity) -> Result<Vec<R>, CoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .rows
            .iter()
            .rev()
            .filter(|row| row.identity() == identity)
            .cloned()
            .collect())
    }

    async fn find_latest_in_state(
        &self,
        identity: VersionIdentity,
        state: VersionState,
    ) -> Result<Option<R>, CoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .rows
            .iter()
            .rev()
            .find(|row| row.identity() == identity && row.state() == state)
            .cloned())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::ids::generate_new_identity;
    use crate::test_support::Note;

    fn note_for(identity: VersionIdentity) -> Note {
        let mut note = Note::default();
        note.meta.identity = identity;
        note.meta.state = VersionState::Draft;
        note.assign_new_version_id();
        note
    }

    #[tokio::test]
    async fn insert_assigns_id_and_stamps_timestamps() {
        let store = InMemoryStore::new();
        let saved = store.save(note_for(generate_new_identity())).await.unwrap();

        assert_eq!(saved.meta.id, Some(1));
        assert!(saved.meta.created_at.is_some());
        assert_eq!(saved.meta.created_at, saved.meta.last_updated_at);
    }

    #[tokio::test]
    async fn update_keeps_timestamps() {
        let store = InMemoryStore::new();
        let saved = store.save(note_for(generate_new_identity())).await.unwrap();
        let stamped = saved.meta.created_at;

        let mut edited = saved.clone();
        edited.body = "edited".to_string();
        let updated = store.save(edited).await.unwrap();

        assert_eq!(updated.meta.created_at, stamped);
        assert_eq!(updated.meta.last_updated_at, stamped);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.rows().await[0].body, "edited");
    }

    #[tokio::test]
    async fn duplicate_identity_and_version_is_rejected() {
        let store = InMemoryStore::new();
        let first = note_for(generate_new_identity());
        let mut second = Note::default();
        second.meta.identity = first.identity();
        second.meta.version_id = first.version_id();

        store.save(first).await.unwrap();
        let err = store.save(second).await.unwrap_err();

        assert_matches!(
            err,
            CoreError::ConstraintViolation(ref name) if name == IDENTITY_VERSION_CONSTRAINT
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn duplicate_version_id_across_identities_is_rejected() {
        let store = InMemoryStore::new();
        let first = note_for(generate_new_identity());
        let mut second = note_for(generate_new_identity());
        second.meta.version_id = first.version_id();

        store.save(first).await.unwrap();
        assert_matches!(
            store.save(second).await,
            Err(CoreError::ConstraintViolation(ref name)) if name == VERSION_ID_CONSTRAINT
        );
    }

    #[tokio::test]
    async fn same_identity_distinct_versions_both_persist() {
        let store = InMemoryStore::new();
        let identity = generate_new_identity();

        store.save(note_for(identity)).await.unwrap();
        store.save(note_for(identity)).await.unwrap();

        assert_eq!(store.list_by_identity(identity).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_of_missing_row_is_storage_error() {
        let store = InMemoryStore::new();
        let mut note = note_for(generate_new_identity());
        note.meta.id = Some(99);
        assert_matches!(store.save(note).await, Err(CoreError::Storage(_)));
    }

    #[tokio::test]
    async fn update_cannot_change_identity() {
        let store = InMemoryStore::new();
        let saved = store.save(note_for(generate_new_identity())).await.unwrap();
        let identity = saved.identity();

        let mut tampered = saved.clone();
        tampered.meta.identity = generate_new_identity();
        assert_matches!(store.save(tampered).await, Err(CoreError::Storage(_)));

        assert_eq!(store.rows().await[0].identity(), identity);
    }

    #[tokio::test]
    async fn update_cannot_change_version_id() {
        let store = InMemoryStore::new();
        let saved = store.save(note_for(generate_new_identity())).await.unwrap();
        let version_id = saved.version_id();

        let mut tampered = saved.clone();
        tampered.assign_new_version_id();
        assert_matches!(store.save(tampered).await, Err(CoreError::Storage(_)));

        assert_eq!(store.rows().await[0].version_id(), version_id);
    }

    #[tokio::test]
    async fn list_and_latest_are_newest_first() {
        let store = InMemoryStore::new();
        let identity = generate_new_identity();

        let mut older = note_for(identity);
        older.meta.state = VersionState::Published;
        let older = store.save(older).await.unwrap();
        let mut newer = note_for(identity);
        newer.meta.state = VersionState::Published;
        let newer = store.save(newer).await.unwrap();
        store.save(note_for(generate_new_identity())).await.unwrap();

        let history = store.list_by_identity(identity).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].version_id(), newer.version_id());
        assert_eq!(history[1].version_id(), older.version_id());

        let latest = store
            .find_latest_in_state(identity, VersionState::Published)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.version_id(), newer.version_id());
        assert!(store
            .find_latest_in_state(identity, VersionState::Archived)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn find_by_version_id() {
        let store = InMemoryStore::new();
        let saved = store.save(note_for(generate_new_identity())).await.unwrap();

        let found = store.find_by_version_id(saved.version_id()).await.unwrap();
        assert_eq!(found, Some(saved));
        assert!(store
            .find_by_version_id(uuid::Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
    }
}
