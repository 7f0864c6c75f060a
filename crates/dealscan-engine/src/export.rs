//! Export engine: deterministic filename synthesis and JSON materialization.
//!
//! One UTF-8 JSON file per document, pretty-printed with 2-space indentation,
//! named `{propertyAbbrev}_{docAbbrev}_{baseName}.json`. Only committed
//! review data is exported; buffers never leave the session.

use std::fs;
use std::path::{Path, PathBuf};

use dealscan_core::{AppError, FieldMap, FileMeta};

use crate::review::ReviewSession;

/// Abbreviation table keyed on the classification's wire form, with a
/// fallback for values outside the table (portfolio has no abbreviation and
/// gets the generic document marker).
fn property_abbreviation(property_type: &str) -> &'static str {
    match property_type {
        "multi-family" => "MF",
        "commercial" => "Com",
        _ => "UNK",
    }
}

fn document_abbreviation(document_type: &str) -> &'static str {
    match document_type {
        "om" => "OM",
        "rent-roll" => "RR",
        "lease" => "Lease",
        _ => "DOC",
    }
}

/// Strip the final extension, if any. A leading dot alone (".env") is not
/// treated as an extension.
fn base_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i > 0 => &name[..i],
        _ => name,
    }
}

/// Synthesize the export filename for one document's metadata.
pub fn export_filename(meta: &FileMeta) -> String {
    format!(
        "{}_{}_{}.json",
        property_abbreviation(&meta.property_type.to_string()),
        document_abbreviation(&meta.document_type.to_string()),
        base_name(&meta.name)
    )
}

/// Write one entry's committed data as pretty-printed JSON under `dir`,
/// returning the written path. The directory is created if missing; the
/// synthesized name must stay inside it.
pub fn export_one(dir: &Path, committed: &FieldMap, meta: &FileMeta) -> Result<PathBuf, AppError> {
    let file_name = export_filename(meta);
    if file_name.contains('/') || file_name.contains('\\') {
        return Err(AppError::InvalidInput(format!(
            "export name escapes the output directory: {}",
            file_name
        )));
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(&file_name);
    let body = serde_json::to_string_pretty(committed)?;
    fs::write(&path, body)?;

    tracing::info!(path = %path.display(), "Exported review data");
    Ok(path)
}

/// Export every entry's committed data, in batch order. Each file is written
/// independently; no combined archive.
pub fn export_all(dir: &Path, session: &ReviewSession) -> Result<Vec<PathBuf>, AppError> {
    let mut paths = Vec::with_capacity(session.len());
    for (index, meta) in session.metas().iter().enumerate() {
        let committed = session.committed(index)?;
        paths.push(export_one(dir, committed, meta)?);
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealscan_core::{DocumentType, PropertyType};
    use serde_json::json;

    fn meta(name: &str, property_type: PropertyType, document_type: DocumentType) -> FileMeta {
        FileMeta {
            name: name.to_string(),
            property_type,
            document_type,
        }
    }

    #[test]
    fn test_filename_determinism() {
        let m = meta("q1.pdf", PropertyType::MultiFamily, DocumentType::RentRoll);
        assert_eq!(export_filename(&m), "MF_RR_q1.json");

        let m = meta("deal.xlsx", PropertyType::Commercial, DocumentType::Lease);
        assert_eq!(export_filename(&m), "Com_Lease_deal.json");

        let m = meta("memo.pdf", PropertyType::Commercial, DocumentType::Om);
        assert_eq!(export_filename(&m), "Com_OM_memo.json");
    }

    #[test]
    fn test_unrecognized_values_fall_back_to_unk_and_doc() {
        assert_eq!(property_abbreviation("industrial"), "UNK");
        assert_eq!(property_abbreviation(""), "UNK");
        assert_eq!(document_abbreviation("deed"), "DOC");
    }

    #[test]
    fn test_portfolio_falls_back_to_doc() {
        let m = meta(
            "holdings.pdf",
            PropertyType::MultiFamily,
            DocumentType::Portfolio,
        );
        assert_eq!(export_filename(&m), "MF_DOC_holdings.json");
    }

    #[test]
    fn test_base_name_strips_final_extension_only() {
        assert_eq!(base_name("q1.pdf"), "q1");
        assert_eq!(base_name("archive.tar.gz"), "archive.tar");
        assert_eq!(base_name("no-extension"), "no-extension");
        assert_eq!(base_name(".env"), ".env");
    }

    #[test]
    fn test_export_one_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut committed = FieldMap::new();
        committed.insert("rent".to_string(), json!("1000"));
        committed.insert("tenant".to_string(), json!("Acme"));

        let m = meta("q1.pdf", PropertyType::MultiFamily, DocumentType::RentRoll);
        let path = export_one(dir.path(), &committed, &m).unwrap();

        assert_eq!(path.file_name().unwrap(), "MF_RR_q1.json");
        let body = std::fs::read_to_string(&path).unwrap();
        // 2-space indentation
        assert!(body.contains("{\n  \"rent\": \"1000\""));

        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["tenant"], json!("Acme"));
    }

    #[test]
    fn test_export_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("2026");
        let m = meta("q1.pdf", PropertyType::Commercial, DocumentType::Om);
        let path = export_one(&nested, &FieldMap::new(), &m).unwrap();
        assert!(path.exists());
    }
}
