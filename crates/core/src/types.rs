/// Reference, lot, and history primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Assets are keyed by UUID (`gen_random_uuid()` on insert).
pub type AssetId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
