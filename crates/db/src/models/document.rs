//! Versioned document model (one row per revision).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trail_core::error::CoreError;
use trail_core::metadata::VersionMetadata;
use trail_core::state::{StateId, VersionState};
use trail_core::types::{DbId, Timestamp, VersionId, VersionIdentity};
use trail_core::versioned::Versioned;

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// A row from the `documents` table.
#[derive(Debug, Clone, FromRow)]
pub struct DocumentRow {
    pub id: DbId,
    pub identity: VersionIdentity,
    pub version_id: VersionId,
    pub state: StateId,
    pub description: String,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub last_updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// One revision of a document: version metadata plus payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    #[serde(flatten)]
    pub meta: VersionMetadata,
    pub title: String,
    pub body: String,
}

impl TryFrom<DocumentRow> for Document {
    type Error = CoreError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            meta: VersionMetadata {
                id: Some(row.id),
                identity: row.identity,
                version_id: row.version_id,
                state: VersionState::try_from(row.state)?,
                created_at: Some(row.created_at),
                last_updated_at: Some(row.last_updated_at),
                description: row.description,
            },
            title: row.title,
            body: row.body,
        })
    }
}

// ---------------------------------------------------------------------------
// Overrides DTO
// ---------------------------------------------------------------------------

/// Fields a caller may set when drafting a brand-new document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentOverrides {
    pub title: Option<String>,
    pub body: Option<String>,
    pub description: Option<String>,
}

impl Versioned for Document {
    type Overrides = DocumentOverrides;

    fn metadata(&self) -> &VersionMetadata {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut VersionMetadata {
        &mut self.meta
    }

    fn apply_overrides(&mut self, overrides: DocumentOverrides) {
        if let Some(title) = overrides.title {
            self.title = title;
        }
        if let Some(body) = overrides.body {
            self.body = body;
        }
        if let Some(description) = overrides.description {
            self.meta.description = description;
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn row(state: StateId) -> DocumentRow {
        DocumentRow {
            id: 4,
            identity: uuid::Uuid::new_v4(),
            version_id: uuid::Uuid::new_v4(),
            state,
            description: "note".to_string(),
            title: "Title".to_string(),
            body: "Body".to_string(),
            created_at: chrono::Utc::now(),
            last_updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn converts_row_into_document() {
        let row = row(200);
        let identity = row.identity;
        let doc = Document::try_from(row).unwrap();
        assert_eq!(doc.meta.id, Some(4));
        assert_eq!(doc.identity(), identity);
        assert_eq!(doc.state(), VersionState::Published);
        assert_eq!(doc.title, "Title");
    }

    #[test]
    fn rejects_unknown_state_code() {
        assert_matches!(Document::try_from(row(7)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overrides_apply_only_given_fields() {
        let mut doc = Document {
            title: "Keep".to_string(),
            ..Document::default()
        };
        doc.apply_overrides(DocumentOverrides {
            body: Some("New body".to_string()),
            ..DocumentOverrides::default()
        });
        assert_eq!(doc.title, "Keep");
        assert_eq!(doc.body, "New body");
    }
}
