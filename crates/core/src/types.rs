/// All record primary keys are UUIDs.
///
/// Clients may supply their own ID on create; otherwise the service
/// generates a time-ordered UUIDv7.
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
