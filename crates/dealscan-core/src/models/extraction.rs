use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Flat field -> value mapping. Values are scalars (string, number, or null);
/// nothing deeper than one level is assumed.
pub type FieldMap = Map<String, Value>;

/// One server-returned structured object, positionally paired with the
/// file batch that was sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ExtractionResult {
    pub fields: FieldMap,
}

impl ExtractionResult {
    pub fn new(fields: FieldMap) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Normalize the extraction service response into one result per submitted
/// file.
///
/// The service returns a bare object when one file was sent and an array of
/// objects otherwise. Each object may nest its data one level under a
/// `draft_json` key; when present (and an object), that nested object is the
/// actual data. An array whose length disagrees with the batch breaks the
/// positional pairing and is rejected as malformed.
pub fn normalize_response(
    value: Value,
    expected_len: usize,
) -> Result<Vec<ExtractionResult>, AppError> {
    let items = match value {
        Value::Array(items) => items,
        other => vec![other],
    };

    if items.len() != expected_len {
        return Err(AppError::MalformedResponse(format!(
            "expected {} extraction results, got {}",
            expected_len,
            items.len()
        )));
    }

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| unwrap_result_object(item, i))
        .collect()
}

fn unwrap_result_object(item: Value, index: usize) -> Result<ExtractionResult, AppError> {
    let Value::Object(mut obj) = item else {
        return Err(AppError::MalformedResponse(format!(
            "extraction result {} is not a JSON object",
            index
        )));
    };

    if let Some(draft) = obj.remove("draft_json") {
        match draft {
            Value::Object(inner) => return Ok(ExtractionResult::new(inner)),
            // A draft_json that is not an object is put back; the outer
            // object is then the data, as the service intended.
            other => {
                obj.insert("draft_json".to_string(), other);
            }
        }
    }

    Ok(ExtractionResult::new(obj))
}
