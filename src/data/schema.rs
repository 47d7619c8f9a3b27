use super::model::Dataset;
use crate::error::SchemaError;

/// Check that `dataset` can be plotted at all.
///
/// Rows may carry different key sets; a key counts as present if any row has
/// it. Returns the candidate fields that appear somewhere, in candidate order.
pub fn validate(
    dataset: &Dataset,
    timestamp_key: &str,
    candidate_fields: &[String],
) -> Result<Vec<String>, SchemaError> {
    if !dataset.has_column(timestamp_key) {
        return Err(SchemaError::MissingTimestamp(timestamp_key.to_string()));
    }

    let available: Vec<String> = candidate_fields
        .iter()
        .filter(|field| dataset.has_column(field))
        .cloned()
        .collect();

    if available.is_empty() {
        return Err(SchemaError::NoRecognizedFields(candidate_fields.to_vec()));
    }
    Ok(available)
}
