use crate::classifier::Failure;
use crate::store::{Record, RecordStore};
use metrics::counter;
use std::sync::Arc;

/// Result of looking a record up by id. Absence is a value, not an error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Record),
    NotFound(i32),
}

impl LookupOutcome {
    pub fn into_result(self) -> Result<Record, Failure> {
        match self {
            LookupOutcome::Found(record) => Ok(record),
            LookupOutcome::NotFound(id) => Err(Failure::NotFound { id }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LookupService {
    store: Arc<RecordStore>,
}

impl LookupService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn find_by_id(&self, id: i32) -> LookupOutcome {
        match self.store.get(id) {
            Some(record) => {
                counter!("record_lookups_total", "outcome" => "found").increment(1);
                tracing::debug!(record_id = id, "Record found");
                LookupOutcome::Found(record.clone())
            }
            None => {
                counter!("record_lookups_total", "outcome" => "not_found").increment(1);
                tracing::debug!(record_id = id, "Record not found");
                LookupOutcome::NotFound(id)
            }
        }
    }
}
