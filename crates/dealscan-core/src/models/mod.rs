pub mod extraction;
pub mod file_record;

pub use extraction::{normalize_response, ExtractionResult, FieldMap};
pub use file_record::{DocumentType, FileMeta, FileRecord, FileStatus, PropertyType};
