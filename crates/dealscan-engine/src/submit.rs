//! Submission orchestrator: drains the staged batch, invokes the extraction
//! service once, and produces the handoff to the review stage.
//!
//! Failure is all-or-nothing for the batch: a transport or parse failure
//! yields no partial results, and the review stage is never entered.

use std::sync::Arc;
use std::time::Duration;

use dealscan_api_client::{ExtractionBackend, FilePart};
use dealscan_core::models::normalize_response;
use dealscan_core::{AppError, ExtractionResult, FileMeta, FileRecord, FileStatus};
use uuid::Uuid;

/// The payload carried across the processing -> review transition: normalized
/// results plus the original per-file metadata, in matching order. Losing
/// this pairing makes correct filename synthesis impossible.
#[derive(Debug, Clone)]
pub struct ReviewHandoff {
    pub batch_id: Uuid,
    pub results: Vec<ExtractionResult>,
    pub metas: Vec<FileMeta>,
}

pub struct SubmissionOrchestrator {
    backend: Arc<dyn ExtractionBackend>,
    settle_delay: Duration,
}

impl SubmissionOrchestrator {
    pub fn new(backend: Arc<dyn ExtractionBackend>, settle_delay: Duration) -> Self {
        Self {
            backend,
            settle_delay,
        }
    }

    /// Submit the batch to the extraction service, exactly once.
    ///
    /// The outbound parts carry file bytes, document types, and property
    /// types in strict positional correspondence with `records`. On success
    /// the response is normalized to one result per record and, after a short
    /// settling delay, the review handoff is returned.
    pub async fn submit(&self, mut records: Vec<FileRecord>) -> Result<ReviewHandoff, AppError> {
        if records.is_empty() {
            return Err(AppError::EmptyBatch);
        }

        let batch_id = Uuid::new_v4();
        let metas: Vec<FileMeta> = records.iter().map(|r| r.meta()).collect();

        set_status(&mut records, FileStatus::Uploading);
        // The bytes are read exactly once; move them out of the records.
        let parts: Vec<FilePart> = records
            .iter_mut()
            .map(|record| FilePart {
                file_name: record.name.clone(),
                bytes: std::mem::take(&mut record.contents),
                doc_type: record.document_type.to_string(),
                property_type: record.property_type.to_string(),
            })
            .collect();
        tracing::info!(%batch_id, files = records.len(), "Submitting batch for extraction");

        let raw = match self.backend.extract(parts).await {
            Ok(raw) => raw,
            Err(err) => {
                set_status(&mut records, FileStatus::Failed);
                tracing::warn!(%batch_id, error = %err, "Extraction request failed");
                return Err(err.into());
            }
        };

        let results = match normalize_response(raw, records.len()) {
            Ok(results) => results,
            Err(err) => {
                set_status(&mut records, FileStatus::Failed);
                tracing::warn!(%batch_id, error = %err, "Extraction response rejected");
                return Err(err);
            }
        };

        set_status(&mut records, FileStatus::Done);
        tracing::info!(%batch_id, results = results.len(), "Extraction complete");

        // Presentational pacing before the review transition becomes visible.
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }

        Ok(ReviewHandoff {
            batch_id,
            results,
            metas,
        })
    }
}

fn set_status(records: &mut [FileRecord], status: FileStatus) {
    for record in records {
        record.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use dealscan_core::{DocumentType, PropertyType};
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Backend double that records the parts it was handed and replies with a
    /// canned response (or error).
    struct MockBackend {
        response: Result<Value, String>,
        seen: Mutex<Vec<Vec<FilePart>>>,
    }

    impl MockBackend {
        fn ok(response: Value) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(response),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Vec<FilePart>> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ExtractionBackend for MockBackend {
        async fn extract(&self, parts: Vec<FilePart>) -> Result<Value> {
            self.seen.lock().unwrap().push(parts);
            match &self.response {
                Ok(value) => Ok(value.clone()),
                Err(message) => Err(anyhow::anyhow!("{}", message)),
            }
        }
    }

    fn batch() -> Vec<FileRecord> {
        vec![
            FileRecord::new(
                "a.pdf",
                b"aaa".to_vec(),
                PropertyType::MultiFamily,
                DocumentType::RentRoll,
            ),
            FileRecord::new(
                "b.pdf",
                b"bbb".to_vec(),
                PropertyType::Commercial,
                DocumentType::Lease,
            ),
        ]
    }

    fn orchestrator(backend: Arc<dyn ExtractionBackend>) -> SubmissionOrchestrator {
        SubmissionOrchestrator::new(backend, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_empty_batch_rejected_before_network() {
        let backend = MockBackend::ok(json!([]));
        let err = orchestrator(backend.clone())
            .submit(Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), "EmptyBatch");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_positional_pairing_of_outbound_parts() {
        let backend = MockBackend::ok(json!([{"x": 1}, {"y": 2}]));
        orchestrator(backend.clone()).submit(batch()).await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        let parts = &calls[0];
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].file_name, "a.pdf");
        assert_eq!(parts[0].doc_type, "rent-roll");
        assert_eq!(parts[0].property_type, "multi-family");
        assert_eq!(parts[1].file_name, "b.pdf");
        assert_eq!(parts[1].doc_type, "lease");
        assert_eq!(parts[1].property_type, "commercial");
    }

    #[tokio::test]
    async fn test_success_handoff_pairs_results_with_metas() {
        let backend = MockBackend::ok(json!([{"rent": "1000"}, {"tenant": "Acme"}]));
        let handoff = orchestrator(backend).submit(batch()).await.unwrap();

        assert_eq!(handoff.results.len(), 2);
        assert_eq!(handoff.metas.len(), 2);
        assert_eq!(handoff.metas[0].name, "a.pdf");
        assert_eq!(handoff.metas[1].name, "b.pdf");
        assert_eq!(handoff.results[0].get("rent"), Some(&json!("1000")));
        assert_eq!(handoff.results[1].get("tenant"), Some(&json!("Acme")));
    }

    #[tokio::test]
    async fn test_single_file_object_response() {
        let backend = MockBackend::ok(json!({"draft_json": {"rent": "900"}}));
        let records = vec![FileRecord::new(
            "solo.pdf",
            b"solo".to_vec(),
            PropertyType::MultiFamily,
            DocumentType::Om,
        )];
        let handoff = orchestrator(backend).submit(records).await.unwrap();
        assert_eq!(handoff.results.len(), 1);
        assert_eq!(handoff.results[0].get("rent"), Some(&json!("900")));
    }

    #[tokio::test]
    async fn test_transport_failure_is_all_or_nothing() {
        let backend = MockBackend::failing("connection refused");
        let err = orchestrator(backend.clone()).submit(batch()).await.unwrap_err();
        assert_eq!(err.error_type(), "Transport");
        // exactly one attempt, no retry
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_length_mismatch_is_malformed_response() {
        let backend = MockBackend::ok(json!([{"only": "one"}]));
        let err = orchestrator(backend).submit(batch()).await.unwrap_err();
        assert_eq!(err.error_type(), "MalformedResponse");
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_delay_elapses_before_handoff() {
        let backend = MockBackend::ok(json!([{"x": 1}, {"y": 2}]));
        let orchestrator = SubmissionOrchestrator::new(backend, Duration::from_secs(1));

        let started = tokio::time::Instant::now();
        orchestrator.submit(batch()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(1));
    }
}
