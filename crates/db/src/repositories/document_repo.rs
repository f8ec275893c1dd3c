//! Repository for the `documents` table.
//!
//! Rows are revisions; `identity` groups the revisions of one document.

use sqlx::PgPool;
use trail_core::state::VersionState;
use trail_core::types::{DbId, VersionId, VersionIdentity};

use crate::models::document::{Document, DocumentRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, identity, version_id, state, description, title, body, \
    created_at, last_updated_at";

/// Provides insert, update and lookup operations for document revisions.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert a new revision row. Unset timestamps are stamped with `NOW()`.
    pub async fn insert(pool: &PgPool, doc: &Document) -> Result<DocumentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents
                (identity, version_id, state, description, title, body,
                 created_at, last_updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, NOW()), COALESCE($8, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DocumentRow>(&query)
            .bind(doc.meta.identity)
            .bind(doc.meta.version_id)
            .bind(doc.meta.state.id())
            .bind(&doc.meta.description)
            .bind(&doc.title)
            .bind(&doc.body)
            .bind(doc.meta.created_at)
            .bind(doc.meta.last_updated_at)
            .fetch_one(pool)
            .await
    }

    /// Update the state, description and payload of an existing revision.
    ///
    /// `identity` and `version_id` are never rewritten and timestamps are
    /// left untouched. Returns `None` if no row matches `id` together with
    /// the document's identity and version id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        doc: &Document,
    ) -> Result<Option<DocumentRow>, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET
                state = $4,
                description = $5,
                title = $6,
                body = $7
             WHERE id = $1 AND identity = $2 AND version_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DocumentRow>(&query)
            .bind(id)
            .bind(doc.meta.identity)
            .bind(doc.meta.version_id)
            .bind(doc.meta.state.id())
            .bind(&doc.meta.description)
            .bind(&doc.title)
            .bind(&doc.body)
            .fetch_optional(pool)
            .await
    }

    /// Find a revision by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DocumentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, DocumentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a revision by its version id.
    pub async fn find_by_version_id(
        pool: &PgPool,
        version_id: VersionId,
    ) -> Result<Option<DocumentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE version_id = $1");
        sqlx::query_as::<_, DocumentRow>(&query)
            .bind(version_id)
            .fetch_optional(pool)
            .await
    }

    /// List all revisions of a document, newest first.
    pub async fn list_by_identity(
        pool: &PgPool,
        identity: VersionIdentity,
    ) -> Result<Vec<DocumentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents
             WHERE identity = $1
             ORDER BY id DESC"
        );
        sqlx::query_as::<_, DocumentRow>(&query)
            .bind(identity)
            .fetch_all(pool)
            .await
    }

    /// Find the newest revision of a document in the given state.
    pub async fn find_latest_in_state(
        pool: &PgPool,
        identity: VersionIdentity,
        state: VersionState,
    ) -> Result<Option<DocumentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents
             WHERE identity = $1 AND state = $2
             ORDER BY id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, DocumentRow>(&query)
            .bind(identity)
            .bind(state.id())
            .fetch_optional(pool)
            .await
    }

    /// Count the revisions of a document.
    pub async fn count_by_identity(
        pool: &PgPool,
        identity: VersionIdentity,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM documents WHERE identity = $1")
            .bind(identity)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
