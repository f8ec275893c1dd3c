//! [`VersionStore`] implementation over the `documents` table.

use sqlx::PgPool;
use trail_core::error::CoreError;
use trail_core::state::VersionState;
use trail_core::store::VersionStore;
use trail_core::types::{VersionId, VersionIdentity};

use crate::error::classify_sqlx_error;
use crate::models::document::{Document, DocumentRow};
use crate::repositories::DocumentRepo;

/// PostgreSQL-backed store for [`Document`] revisions.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn into_documents(rows: Vec<DocumentRow>) -> Result<Vec<Document>, CoreError> {
    rows.into_iter().map(Document::try_from).collect()
}

impl VersionStore<Document> for PgDocumentStore {
    async fn save(&self, doc: Document) -> Result<Document, CoreError> {
        let row = match doc.meta.id {
            None => DocumentRepo::insert(&self.pool, &doc)
                .await
                .map_err(classify_sqlx_error)?,
            Some(id) => DocumentRepo::update(&self.pool, id, &doc)
                .await
                .map_err(classify_sqlx_error)?
                .ok_or_else(|| {
                    CoreError::Storage(format!(
                        "Document row {id} with version {} does not exist",
                        doc.meta.version_id
                    ))
                })?,
        };
        tracing::debug!(id = row.id, version_id = %row.version_id, "Document revision saved");
        Document::try_from(row)
    }

    async fn find_by_version_id(
        &self,
        version_id: VersionId,
    ) -> Result<Option<Document>, CoreError> {
        DocumentRepo::find_by_version_id(&self.pool, version_id)
            .await
            .map_err(classify_sqlx_error)?
            .map(Document::try_from)
            .transpose()
    }

    async fn list_by_identity(
        &self,
        identity: VersionIdentity,
    ) -> Result<Vec<Document>, CoreError> {
        let rows = DocumentRepo::list_by_identity(&self.pool, identity)
            .await
            .map_err(classify_sqlx_error)?;
        into_documents(rows)
    }

    async fn find_latest_in_state(
        &self,
        identity: VersionIdentity,
        state: VersionState,
    ) -> Result<Option<Document>, CoreError> {
        DocumentRepo::find_latest_in_state(&self.pool, identity, state)
            .await
            .map_err(classify_sqlx_error)?
            .map(Document::try_from)
            .transpose()
    }
}
