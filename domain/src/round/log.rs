//! Append-only log of finalized round records.

use super::record::RoundRecord;
use serde::{Deserialize, Serialize};

/// Ordered, append-only sequence of [`RoundRecord`]s.
///
/// Records appear in the order full rounds and injections completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultLog {
    records: Vec<RoundRecord>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: RoundRecord) -> &RoundRecord {
        self.records.push(record);
        let last = self.records.len() - 1;
        &self.records[last]
    }

    /// The most recently finalized record, if any.
    pub fn latest(&self) -> Option<&RoundRecord> {
        self.records.last()
    }

    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoundRecord> {
        self.records.iter()
    }
}
