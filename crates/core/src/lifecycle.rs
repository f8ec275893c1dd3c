//! Version lifecycle controller.
//!
//! [`Lifecycle`] creates drafts, clones rows and moves records between
//! states, persisting every change through a [`VersionStore`]. It holds no
//! mutable state of its own; callers that need several operations to be
//! atomic wrap them in a storage transaction.
//!
//! Operations that act on an existing record borrow it mutably and only
//! write the persisted result back once the store accepted it. A rejected
//! or failed call leaves the caller's record as it was.

use crate::error::CoreError;
use crate::ids::generate_new_identity;
use crate::policy::{AnyTransition, TransitionPolicy};
use crate::state::VersionState;
use crate::store::VersionStore;
use crate::types::VersionIdentity;
use crate::versioned::{RelationCloneStrategy, Versioned};

/// Draft creation and state transitions over a storage collaborator.
pub struct Lifecycle<S, P = AnyTransition> {
    store: S,
    policy: P,
    relations: RelationCloneStrategy,
}

impl<S> Lifecycle<S> {
    /// Controller with the permissive base guard that refuses to copy
    /// relations into new rows.
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: AnyTransition,
            relations: RelationCloneStrategy::default(),
        }
    }
}

impl<S, P> Lifecycle<S, P> {
    /// Replace the transition policy layered over the base guard.
    pub fn with_policy<Q: TransitionPolicy>(self, policy: Q) -> Lifecycle<S, Q> {
        Lifecycle {
            store: self.store,
            policy,
            relations: self.relations,
        }
    }

    /// Set how relations are treated when a record is copied into a new row.
    pub fn with_relation_strategy(mut self, relations: RelationCloneStrategy) -> Self {
        self.relations = relations;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn relation_strategy(&self) -> RelationCloneStrategy {
        self.relations
    }
}

impl<S, P: TransitionPolicy> Lifecycle<S, P> {
    /// Create and persist a new draft revision.
    ///
    /// With no `source` a brand-new logical entity is created: an empty
    /// record gets a fresh identity and `overrides` applied. With a
    /// `source`, that record becomes the draft (overrides are ignored) and
    /// must not already be a draft. The draft is saved as a new row, so the
    /// source row in storage is left untouched; its relations follow the
    /// controller's [`RelationCloneStrategy`].
    ///
    /// In both cases the record is put in draft state with cleared
    /// timestamps, the fixed draft note and a new `version_id`. On success
    /// `source` is overwritten with the persisted draft.
    pub async fn create_draft<R>(
        &self,
        source: Option<&mut R>,
        overrides: R::Overrides,
    ) -> Result<R, CoreError>
    where
        R: Versioned,
        S: VersionStore<R>,
    {
        match source {
            None => {
                let mut record = R::default();
                record.metadata_mut().identity = generate_new_identity();
                record.apply_overrides(overrides);
                tracing::debug!(identity = %record.identity(), "Creating new versioned entity");
                self.persist_draft(record).await
            }
            Some(source) => {
                if source.state() == VersionState::Draft {
                    return Err(CoreError::InvalidStateTransition {
                        from: VersionState::Draft,
                        to: VersionState::Draft,
                    });
                }
                tracing::debug!(
                    identity = %source.identity(),
                    version_id = %source.version_id(),
                    state = %source.state(),
                    "Branching draft from existing version",
                );

                let mut record = source.clone();
                record.metadata_mut().detach();
                record.resolve_relations(self.relations)?;

                let saved = self.persist_draft(record).await?;
                *source = saved.clone();
                Ok(saved)
            }
        }
    }

    /// Move `record` to `new_state` and persist it.
    ///
    /// Fails with [`CoreError::NoOpTransition`] if the record is already in
    /// `new_state`, and with whatever the policy returns for disallowed
    /// edges. Nothing is persisted and `record` is unchanged on failure.
    pub async fn change_state<R>(
        &self,
        record: &mut R,
        new_state: VersionState,
    ) -> Result<(), CoreError>
    where
        R: Versioned,
        S: VersionStore<R>,
    {
        let from = record.state();
        if from == new_state {
            return Err(CoreError::NoOpTransition { state: from });
        }
        self.policy.check(from, new_state)?;

        let mut updated = record.clone();
        updated.metadata_mut().state = new_state;
        updated.metadata().validate()?;

        *record = self.persist(updated).await?;
        tracing::info!(
            identity = %record.identity(),
            version_id = %record.version_id(),
            %from,
            to = %new_state,
            "Version state changed",
        );
        Ok(())
    }

    /// Clone a persisted record into a new row and save it.
    pub async fn clone_and_save<R>(&self, record: &R) -> Result<R, CoreError>
    where
        R: Versioned,
        S: VersionStore<R>,
    {
        let cloned = record.clone_row(self.relations)?;
        self.persist(cloned).await
    }

    /// Every stored revision of `identity`, newest first.
    pub async fn history<R>(&self, identity: VersionIdentity) -> Result<Vec<R>, CoreError>
    where
        R: Versioned,
        S: VersionStore<R>,
    {
        self.store.list_by_identity(identity).await
    }

    async fn persist_draft<R>(&self, mut record: R) -> Result<R, CoreError>
    where
        R: Versioned,
        S: VersionStore<R>,
    {
        record.metadata_mut().reset_for_draft();
        record.metadata().validate()?;

        let saved = self.persist(record).await?;
        tracing::info!(
            identity = %saved.identity(),
            version_id = %saved.version_id(),
            "Draft version created",
        );
        Ok(saved)
    }

    async fn persist<R>(&self, record: R) -> Result<R, CoreError>
    where
        R: Versioned,
        S: VersionStore<R>,
    {
        let version_id = record.version_id();
        self.store.save(record).await.inspect_err(|err| {
            if let CoreError::ConstraintViolation(constraint) = err {
                tracing::warn!(%version_id, %constraint, "Version id collided on save");
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
