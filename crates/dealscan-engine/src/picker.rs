//! Metadata picker: collects files and classification for a batch before the
//! records enter the intake registry.
//!
//! Commit is all-or-nothing: it requires a non-empty pending list and both
//! classification selections, and on failure performs no state change. The
//! classification selections persist across commits; only the pending file
//! list is cleared.

use dealscan_core::validation::validate_file_name;
use dealscan_core::{AppError, DocumentType, FileRecord, PropertyType};

use crate::intake::IntakeRegistry;

/// A raw file selection that has not been tagged into the registry yet.
#[derive(Debug, Clone)]
struct PendingFile {
    name: String,
    contents: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct MetadataPicker {
    pending: Vec<PendingFile>,
    property_type: Option<PropertyType>,
    document_type: Option<DocumentType>,
}

impl MetadataPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw file selection to the pending list.
    pub fn add_file(&mut self, name: impl Into<String>, contents: Vec<u8>) -> Result<(), AppError> {
        let name = name.into();
        validate_file_name(&name)?;
        self.pending.push(PendingFile { name, contents });
        Ok(())
    }

    /// Remove a pending file by index before commit.
    pub fn remove_file(&mut self, index: usize) -> Result<(), AppError> {
        if index >= self.pending.len() {
            return Err(AppError::NotFound(format!(
                "no pending file at index {} (pending {})",
                index,
                self.pending.len()
            )));
        }
        self.pending.remove(index);
        Ok(())
    }

    pub fn set_property_type(&mut self, property_type: PropertyType) {
        self.property_type = Some(property_type);
    }

    pub fn set_document_type(&mut self, document_type: DocumentType) {
        self.document_type = Some(document_type);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_names(&self) -> Vec<&str> {
        self.pending.iter().map(|f| f.name.as_str()).collect()
    }

    /// Commit the pending batch into the registry.
    ///
    /// Requires a non-empty pending list and both classification selections;
    /// on failure nothing changes. On success one staged record per pending
    /// file is appended in pending order and the pending list is cleared.
    pub fn commit(&mut self, registry: &mut IntakeRegistry) -> Result<usize, AppError> {
        if self.pending.is_empty() {
            return Err(AppError::Validation(
                "no files selected; add at least one file before committing".to_string(),
            ));
        }
        let (Some(property_type), Some(document_type)) = (self.property_type, self.document_type)
        else {
            return Err(AppError::Validation(
                "both property type and document type must be selected".to_string(),
            ));
        };

        let count = self.pending.len();
        for file in self.pending.drain(..) {
            registry.add(FileRecord::new(
                file.name,
                file.contents,
                property_type,
                document_type,
            ));
        }

        tracing::info!(files = count, %property_type, %document_type, "Committed batch to intake");
        Ok(count)
    }
}
