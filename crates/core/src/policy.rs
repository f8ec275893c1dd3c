//! Pluggable state-transition policies.
//!
//! The lifecycle controller always rejects self-transitions. A policy adds
//! any further restriction on which edges of the state graph are allowed.

use crate::error::CoreError;
use crate::state::VersionState;

/// Decides whether a record may move from one state to another.
pub trait TransitionPolicy: Send + Sync {
    fn check(&self, from: VersionState, to: VersionState) -> Result<(), CoreError>;
}

/// Allows every edge; only the controller's self-transition rule applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyTransition;

impl TransitionPolicy for AnyTransition {
    fn check(&self, _from: VersionState, _to: VersionState) -> Result<(), CoreError> {
        Ok(())
    }
}

/// Enforces Draft -> Published -> Archived ordering.
///
/// Published and archived revisions may return to draft so that a new
/// revision can be branched off them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearTransition;

impl LinearTransition {
    /// Returns `true` if the edge `from -> to` is part of the linear graph.
    pub fn allows(from: VersionState, to: VersionState) -> bool {
        use VersionState::*;
        matches!(
            (from, to),
            (Invalid, Draft)
                | (Draft, Published)
                | (Published, Archived)
                | (Published, Draft)
                | (Archived, Draft)
        )
    }
}

impl TransitionPolicy for LinearTransition {
    fn check(&self, from: VersionState, to: VersionState) -> Result<(), CoreError> {
        if Self::allows(from, to) {
            Ok(())
        } else {
            Err(CoreError::InvalidStateTransition { from, to })
        }
    }
}
