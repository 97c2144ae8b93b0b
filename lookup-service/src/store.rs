//! In-memory record store.
//!
//! The store is filled once at startup and never mutated afterwards, so it is
//! shared between request tasks behind an `Arc` without any locking.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i32,
    pub value: String,
}

impl Record {
    pub fn new(id: i32, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Duplicate record id: {0}")]
    DuplicateId(i32),
}

/// Records every lookup service process starts with.
pub fn seed_records() -> Vec<Record> {
    vec![
        Record::new(1, "valor uno"),
        Record::new(2, "valor dos"),
        Record::new(3, "valor tres"),
    ]
}

static SEEDED: OnceLock<Result<Arc<RecordStore>, StoreError>> = OnceLock::new();

#[derive(Debug, Default)]
pub struct RecordStore {
    records: HashMap<i32, Record>,
}

impl RecordStore {
    /// Builds a store holding exactly `records`. Ids must be unique.
    pub fn initialize(records: impl IntoIterator<Item = Record>) -> Result<Self, StoreError> {
        let mut by_id = HashMap::new();
        for record in records {
            if by_id.contains_key(&record.id) {
                return Err(StoreError::DuplicateId(record.id));
            }
            by_id.insert(record.id, record);
        }

        Ok(Self { records: by_id })
    }

    /// Process-wide store holding [`seed_records`]. Built through
    /// [`RecordStore::initialize`] on first call; every later call returns the
    /// same instance (or the same error).
    pub fn seeded() -> Result<Arc<RecordStore>, StoreError> {
        SEEDED
            .get_or_init(|| Self::initialize(seed_records()).map(Arc::new))
            .clone()
    }

    pub fn get(&self, id: i32) -> Option<&Record> {
        self.records.get(&id)
    }

    /// Snapshot of all records, in no particular order.
    pub fn all(&self) -> Vec<Record> {
        self.records.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
