/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Stable identifier shared by every revision of one logical entity.
pub type VersionIdentity = uuid::Uuid;

/// Unique identifier of one physical revision.
pub type VersionId = uuid::Uuid;
