//! Intake registry: the single source of truth for staged file records.
//!
//! Insertion order is significant — it defines the pairing index used against
//! the response sequence at submission time. Indices are only meaningful at
//! point of use, so removal shifting later entries down is safe.

use dealscan_core::{AppError, FileRecord};

#[derive(Debug, Default)]
pub struct IntakeRegistry {
    records: Vec<FileRecord>,
}

impl IntakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the batch.
    pub fn add(&mut self, record: FileRecord) {
        self.records.push(record);
    }

    /// Remove the record at `index`, shifting subsequent indices down.
    pub fn remove(&mut self, index: usize) -> Result<FileRecord, AppError> {
        if index >= self.records.len() {
            return Err(AppError::NotFound(format!(
                "no staged file at index {} (batch size {})",
                index,
                self.records.len()
            )));
        }
        Ok(self.records.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    /// Hand the whole batch to the submission orchestrator, leaving the
    /// registry empty.
    pub fn drain(&mut self) -> Vec<FileRecord> {
        std::mem::take(&mut self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealscan_core::{DocumentType, PropertyType};

    fn record(name: &str) -> FileRecord {
        FileRecord::new(
            name,
            name.as_bytes().to_vec(),
            PropertyType::Commercial,
            DocumentType::Lease,
        )
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut registry = IntakeRegistry::new();
        registry.add(record("a.pdf"));
        registry.add(record("b.pdf"));
        registry.add(record("c.pdf"));

        let names: Vec<_> = registry.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a.pdf", "b.pdf", "c.pdf"]);
    }

    #[test]
    fn test_remove_shifts_subsequent_indices_down() {
        let mut registry = IntakeRegistry::new();
        for name in ["a.pdf", "b.pdf", "c.pdf", "d.pdf"] {
            registry.add(record(name));
        }

        let removed = registry.remove(1).unwrap();
        assert_eq!(removed.name, "b.pdf");
        assert_eq!(registry.len(), 3);

        let names: Vec<_> = registry.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a.pdf", "c.pdf", "d.pdf"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut registry = IntakeRegistry::new();
        registry.add(record("a.pdf"));
        let err = registry.remove(1).unwrap_err();
        assert_eq!(err.error_type(), "NotFound");
    }

    #[test]
    fn test_drain_empties_registry() {
        let mut registry = IntakeRegistry::new();
        registry.add(record("a.pdf"));
        registry.add(record("b.pdf"));

        let batch = registry.drain();
        assert_eq!(batch.len(), 2);
        assert!(registry.is_empty());
        assert_eq!(batch[0].name, "a.pdf");
        assert_eq!(batch[1].name, "b.pdf");
    }
}
