use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// Identity, audit and optimistic-concurrency fields shared by every
/// persisted record.
///
/// Concrete entities embed this struct (flattened into their document) rather
/// than extending a base type. Two `RecordMeta` values are equal exactly when
/// their ids are equal; no other field takes part in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    id: Uuid,

    /// Not stored. Anything rebuilt from a document was, by definition, loaded.
    #[serde(skip, default = "loaded_from_storage")]
    persisted: bool,

    /// Tenant/owner reference.
    pub client_id: Option<Uuid>,

    /// Who created this record (user name, not an id).
    pub created_by: Option<String>,

    /// When this record was created.
    pub created: Option<DateTime<Utc>>,

    /// Who last modified this record (user name, not an id).
    pub modified_by: Option<String>,

    /// When this record was last modified.
    pub modified: Option<DateTime<Utc>>,

    /// Optimistic-concurrency token, advanced on every successful save.
    pub version: Option<u64>,

    /// Deactivate instead of delete.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn loaded_from_storage() -> bool {
    true
}

fn default_active() -> bool {
    true
}

impl RecordMeta {
    /// Adopt `id` as a record that already exists in storage, or generate a
    /// fresh identity for a new record when `id` is `None`.
    pub fn new(id: Option<Uuid>) -> Self {
        Self {
            persisted: id.is_some(),
            id: id.unwrap_or_else(Uuid::new_v4),
            client_id: None,
            created_by: None,
            created: None,
            modified_by: None,
            modified: None,
            version: None,
            is_active: true,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Replace the identity. Reserved for the persistence layer when it
    /// attaches an id it generated itself.
    pub fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    pub fn is_new(&self) -> bool {
        !self.persisted
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Called by the persistence layer once the record has been written.
    pub fn mark_persisted(&mut self) {
        self.persisted = true;
    }

    /// Apply the audit fields and version bump of one save.
    pub fn stamp(&mut self, stamp: &AuditStamp) {
        if stamp.insert {
            self.created_by = stamp.by.clone();
            self.created = Some(stamp.at);
        }
        self.modified_by = stamp.by.clone();
        self.modified = Some(stamp.at);
        self.version = Some(self.version.map_or(1, |v| v + 1));
    }
}

impl Default for RecordMeta {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PartialEq for RecordMeta {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RecordMeta {}

impl Hash for RecordMeta {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// What the persistence layer writes into a record's audit fields on a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditStamp {
    /// Acting user name.
    pub by: Option<String>,
    pub at: DateTime<Utc>,
    /// First write of this record; creation fields are only set then.
    pub insert: bool,
}

impl AuditStamp {
    pub fn new(by: Option<String>, insert: bool) -> Self {
        Self {
            by,
            at: Utc::now(),
            insert,
        }
    }
}

/// A record that lives in a named document collection.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Name of the collection holding documents of this type.
    const COLLECTION: &'static str;

    fn meta(&self) -> &RecordMeta;
    fn meta_mut(&mut self) -> &mut RecordMeta;

    fn id(&self) -> Uuid {
        self.meta().id()
    }

    fn is_new(&self) -> bool {
        self.meta().is_new()
    }

    fn is_active(&self) -> bool {
        self.meta().is_active
    }

    /// Soft delete.
    fn deactivate(&mut self) {
        self.meta_mut().is_active = false;
    }
}
