//! Dealscan workflow engine.
//!
//! The staged collection of documents with classification metadata, the
//! select -> submit -> processing -> review transitions, the per-result
//! committed/buffer edit state, and deterministic export naming. The
//! extraction service itself sits behind
//! [`dealscan_api_client::ExtractionBackend`].

pub mod export;
pub mod intake;
pub mod picker;
pub mod progress;
pub mod review;
pub mod submit;

// Re-export commonly used types
pub use export::{export_all, export_filename, export_one};
pub use intake::IntakeRegistry;
pub use picker::MetadataPicker;
pub use progress::{ProgressGauge, ProgressReporter};
pub use review::{ReviewEntry, ReviewSession};
pub use submit::{ReviewHandoff, SubmissionOrchestrator};
