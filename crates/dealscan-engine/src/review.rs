//! Review & edit session: two-layer committed/buffer state per result.
//!
//! Field edits write into the buffer only; committed data changes on save and
//! is the sole input to the export engine. Each entry's session is
//! independent — multiple entries may be open at once, but never the same
//! entry twice.

use dealscan_core::{AppError, FieldMap, FileMeta};
use serde_json::Value;

use crate::submit::ReviewHandoff;

/// Per-result review state. `committed` is the last explicitly saved data;
/// `buffer` is the working copy while an edit session is open.
#[derive(Debug, Clone)]
pub struct ReviewEntry {
    committed: FieldMap,
    buffer: FieldMap,
    is_editing: bool,
    show_all_fields: bool,
}

impl ReviewEntry {
    fn new(committed: FieldMap) -> Self {
        Self {
            committed,
            buffer: FieldMap::new(),
            is_editing: false,
            show_all_fields: false,
        }
    }

    pub fn committed(&self) -> &FieldMap {
        &self.committed
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn show_all_fields(&self) -> bool {
        self.show_all_fields
    }

    /// The fields the edit view renders: the buffer while a session is open,
    /// committed data otherwise. Null and empty-string values are hidden
    /// unless `show_all_fields` is set. Display filter only — neither layer
    /// is modified.
    pub fn visible_fields(&self) -> Vec<(&String, &Value)> {
        let source = if self.is_editing {
            &self.buffer
        } else {
            &self.committed
        };
        source
            .iter()
            .filter(|(_, value)| {
                self.show_all_fields
                    || (!matches!(value, Value::Null) && value.as_str() != Some(""))
            })
            .collect()
    }
}

/// The review stage for one submitted batch. Constructed from the submission
/// handoff; every entry starts closed.
#[derive(Debug, Default)]
pub struct ReviewSession {
    entries: Vec<ReviewEntry>,
    metas: Vec<FileMeta>,
}

impl ReviewSession {
    pub fn new(handoff: ReviewHandoff) -> Self {
        let entries = handoff
            .results
            .into_iter()
            .map(|result| ReviewEntry::new(result.fields))
            .collect();
        Self {
            entries,
            metas: handoff.metas,
        }
    }

    /// The benign state for entering the review stage without an upstream
    /// submission (e.g. a bookmarked URL): an empty session, not an error.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn metas(&self) -> &[FileMeta] {
        &self.metas
    }

    pub fn entry(&self, index: usize) -> Result<&ReviewEntry, AppError> {
        self.entries.get(index).ok_or_else(|| {
            AppError::NotFound(format!(
                "no review entry at index {} ({} entries)",
                index,
                self.entries.len()
            ))
        })
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut ReviewEntry, AppError> {
        let len = self.entries.len();
        self.entries.get_mut(index).ok_or_else(|| {
            AppError::NotFound(format!("no review entry at index {} ({} entries)", index, len))
        })
    }

    pub fn committed(&self, index: usize) -> Result<&FieldMap, AppError> {
        Ok(self.entry(index)?.committed())
    }

    /// Open an edit session: the buffer becomes a fresh copy of committed
    /// data, discarding anything a previous session left behind.
    pub fn begin_edit(&mut self, index: usize) -> Result<(), AppError> {
        let entry = self.entry_mut(index)?;
        if entry.is_editing {
            return Err(AppError::InvalidState(format!(
                "entry {} already has an open edit session",
                index
            )));
        }
        entry.buffer = entry.committed.clone();
        entry.is_editing = true;
        Ok(())
    }

    /// Write one field into the open session's buffer. Committed data is
    /// untouched and the session stays open.
    pub fn set_field(
        &mut self,
        index: usize,
        key: impl Into<String>,
        value: Value,
    ) -> Result<(), AppError> {
        let entry = self.entry_mut(index)?;
        if !entry.is_editing {
            return Err(AppError::InvalidState(format!(
                "entry {} has no open edit session",
                index
            )));
        }
        entry.buffer.insert(key.into(), value);
        Ok(())
    }

    /// Merge the buffer into committed data and close the session.
    pub fn save(&mut self, index: usize) -> Result<(), AppError> {
        let entry = self.entry_mut(index)?;
        if !entry.is_editing {
            return Err(AppError::InvalidState(format!(
                "entry {} has no open edit session",
                index
            )));
        }
        entry.committed = entry.buffer.clone();
        entry.is_editing = false;
        Ok(())
    }

    /// Discard the buffer and close the session without committing.
    pub fn cancel(&mut self, index: usize) -> Result<(), AppError> {
        let entry = self.entry_mut(index)?;
        if !entry.is_editing {
            return Err(AppError::InvalidState(format!(
                "entry {} has no open edit session",
                index
            )));
        }
        entry.buffer.clear();
        entry.is_editing = false;
        Ok(())
    }

    /// Flip the empty-field display filter. Does not touch committed data,
    /// the buffer, or an open session.
    pub fn toggle_show_all(&mut self, index: usize) -> Result<bool, AppError> {
        let entry = self.entry_mut(index)?;
        entry.show_all_fields = !entry.show_all_fields;
        Ok(entry.show_all_fields)
    }
}
