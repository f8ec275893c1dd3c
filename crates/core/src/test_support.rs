//! Versioned entity used by unit tests.

use crate::metadata::VersionMetadata;
use crate::types::DbId;
use crate::versioned::Versioned;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Note {
    pub meta: VersionMetadata,
    pub body: String,
    pub tag_ids: Vec<DbId>,
}

#[derive(Debug, Default)]
pub struct NoteOverrides {
    pub body: Option<String>,
    pub description: Option<String>,
}

impl Versioned for Note {
    type Overrides = NoteOverrides;

    fn metadata(&self) -> &VersionMetadata {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut VersionMetadata {
        &mut self.meta
    }

    fn apply_overrides(&mut self, overrides: NoteOverrides) {
        if let Some(body) = overrides.body {
            self.body = body;
        }
        if let Some(description) = overrides.description {
            self.meta.description = description;
        }
    }

    fn has_relations(&self) -> bool {
        !self.tag_ids.is_empty()
    }

    fn clear_relations(&mut self) {
        self.tag_ids.clear();
    }
}
