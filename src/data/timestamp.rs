use super::model::{Dataset, FieldValue, TimeAxis, Timestamp};
use crate::error::TimestampError;

/// Build the time axis for `dataset` from the microsecond ticks in
/// `timestamp_key`.
///
/// The axis always has one entry per row. Rows without a usable tick get
/// `None`; only a dataset where no row is usable is an error.
pub fn normalize(dataset: &Dataset, timestamp_key: &str) -> Result<TimeAxis, TimestampError> {
    let entries: Vec<Option<Timestamp>> = dataset
        .records()
        .iter()
        .map(|rec| rec.get(timestamp_key).and_then(parse_ticks))
        .collect();

    let axis = TimeAxis::new(entries);
    let valid = axis.valid_count();
    if valid == 0 {
        return Err(TimestampError::Unparseable {
            key: timestamp_key.to_string(),
        });
    }
    if valid < axis.len() {
        log::warn!(
            "{} of {} rows have no usable '{}' value",
            axis.len() - valid,
            axis.len(),
            timestamp_key
        );
    }
    Ok(axis)
}

/// Interpret one raw value as integer microseconds since the epoch.
fn parse_ticks(value: &FieldValue) -> Option<Timestamp> {
    let micros = match value {
        FieldValue::Integer(i) => *i,
        FieldValue::Float(f) if f.fract() == 0.0 && f.is_finite() => {
            if *f < i64::MIN as f64 || *f >= i64::MAX as f64 {
                return None;
            }
            *f as i64
        }
        FieldValue::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    Timestamp::from_micros(micros)
}
