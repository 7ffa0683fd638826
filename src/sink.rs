//! Append-only accumulator for change records.

use crate::change::{Change, ChangeRecord};

/// Collects records for one comparison run and stamps each with a sequence
/// number and an id derived from it. A fresh sink is used per run.
#[derive(Debug, Default)]
pub struct ChangeSink {
    records: Vec<ChangeRecord>,
}

impl ChangeSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    ///
    /// # Arguments
    ///
    /// * `path` - Locator of the changed element, e.g. `/pets.get.parameters.limit`
    /// * `change` - The typed payload; it also fixes the record's label and category
    /// * `is_breaking` - The verdict from [`crate::policy`]
    ///
    /// The record's `sequence` is one more than the number of records already
    /// held, and its `id` is `chg-` followed by the zero-padded sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use oapi_diff::sink::ChangeSink;
    /// use oapi_diff::Change;
    ///
    /// let mut sink = ChangeSink::new();
    /// sink.record("/pets", Change::PathRemoved { methods: vec!["get".to_string()] }, true);
    /// sink.record("info.title", Change::TitleChanged { old: None, new: None }, false);
    ///
    /// let records = sink.all();
    /// assert_eq!(records[0].id, "chg-00001");
    /// assert_eq!(records[1].sequence, 2);
    /// assert_eq!(records[1].id, "chg-00002");
    /// ```
    pub fn record(&mut self, path: impl Into<String>, change: Change, is_breaking: bool) {
        let sequence = self.records.len() as u64 + 1;
        let record = ChangeRecord {
            id: format!("chg-{:05}", sequence),
            sequence,
            path: path.into(),
            is_breaking,
            change,
        };
        tracing::trace!(
            id = %record.id,
            path = %record.path,
            breaking = is_breaking,
            "{}",
            record.label()
        );
        self.records.push(record);
    }

    /// Records in emission order.
    pub fn all(&self) -> &[ChangeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the sink, ending the run.
    pub fn into_records(self) -> Vec<ChangeRecord> {
        self.records
    }
}
