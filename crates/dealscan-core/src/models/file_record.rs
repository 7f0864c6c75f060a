use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    MultiFamily,
    Commercial,
}

impl Display for PropertyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PropertyType::MultiFamily => write!(f, "multi-family"),
            PropertyType::Commercial => write!(f, "commercial"),
        }
    }
}

impl FromStr for PropertyType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multi-family" => Ok(PropertyType::MultiFamily),
            "commercial" => Ok(PropertyType::Commercial),
            _ => Err(anyhow::anyhow!("Invalid property type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    Om,
    RentRoll,
    Lease,
    Portfolio,
}

impl Display for DocumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DocumentType::Om => write!(f, "om"),
            DocumentType::RentRoll => write!(f, "rent-roll"),
            DocumentType::Lease => write!(f, "lease"),
            DocumentType::Portfolio => write!(f, "portfolio"),
        }
    }
}

impl FromStr for DocumentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "om" => Ok(DocumentType::Om),
            "rent-roll" => Ok(DocumentType::RentRoll),
            "lease" => Ok(DocumentType::Lease),
            "portfolio" => Ok(DocumentType::Portfolio),
            _ => Err(anyhow::anyhow!("Invalid document type: {}", s)),
        }
    }
}

/// Advisory per-file status, set by the submission orchestrator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Staged,
    Uploading,
    Done,
    Failed,
}

impl Display for FileStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FileStatus::Staged => write!(f, "staged"),
            FileStatus::Uploading => write!(f, "uploading"),
            FileStatus::Done => write!(f, "done"),
            FileStatus::Failed => write!(f, "failed"),
        }
    }
}

/// The per-file metadata that survives submission: everything the review and
/// export stages need to pair a result back to its source document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub property_type: PropertyType,
    pub document_type: DocumentType,
}

/// One staged document: classification metadata plus the raw bytes. The bytes
/// are exclusively owned; only the submission orchestrator reads them, once.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub name: String,
    pub contents: Vec<u8>,
    pub property_type: PropertyType,
    pub document_type: DocumentType,
    pub status: FileStatus,
    pub staged_at: DateTime<Utc>,
}

impl FileRecord {
    pub fn new(
        name: impl Into<String>,
        contents: Vec<u8>,
        property_type: PropertyType,
        document_type: DocumentType,
    ) -> Self {
        Self {
            name: name.into(),
            contents,
            property_type,
            document_type,
            status: FileStatus::Staged,
            staged_at: Utc::now(),
        }
    }

    pub fn meta(&self) -> FileMeta {
        FileMeta {
            name: self.name.clone(),
            property_type: self.property_type,
            document_type: self.document_type,
        }
    }
}
