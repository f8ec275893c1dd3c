//! Version lifecycle states.
//!
//! Discriminants match the SMALLINT codes stored in the `state` column.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// State code type matching SMALLINT in the database.
pub type StateId = i16;

/// Lifecycle state of one revision.
#[repr(i16)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionState {
    /// Not yet placed in the lifecycle.
    #[default]
    Invalid = 0,
    Draft = 100,
    Published = 200,
    Archived = 300,
}

impl VersionState {
    /// All states in lifecycle order.
    pub const ALL: [VersionState; 4] = [
        VersionState::Invalid,
        VersionState::Draft,
        VersionState::Published,
        VersionState::Archived,
    ];

    /// Return the stored state code.
    pub fn id(self) -> StateId {
        self as StateId
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Invalid => "Invalid",
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::Archived => "Archived",
        }
    }
}

impl fmt::Display for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<VersionState> for StateId {
    fn from(value: VersionState) -> Self {
        value as StateId
    }
}

impl TryFrom<StateId> for VersionState {
    type Error = CoreError;

    fn try_from(value: StateId) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|state| state.id() == value)
            .ok_or_else(|| CoreError::Validation(format!("Unknown version state code {value}")))
    }
}
