use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// FieldValue – a single decoded JSON value
// ---------------------------------------------------------------------------

/// A dynamically-typed value for one key of a log record.
///
/// Nested objects and arrays are kept as their JSON text in `Opaque`; they
/// are carried through but never plotted.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Opaque(String),
}

// -- Manual Eq/Ord so FieldValue can be counted in BTreeMap/BTreeSet --

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn rank(v: &FieldValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
                Opaque(_) => 5,
            }
        }
        let ra = rank(self);
        let rb = rank(other);
        if ra != rb {
            return ra.cmp(&rb);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) | (Opaque(a), Opaque(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "<null>"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v:.4}"),
            FieldValue::String(s) | FieldValue::Opaque(s) => write!(f, "{s}"),
        }
    }
}

impl FieldValue {
    /// Interpret the value as a plottable number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(v) => Some(*v),
            FieldValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Record / Defect – one decoded line, or the reason it was rejected
// ---------------------------------------------------------------------------

/// One decoded log line. Keys are whatever the line carried.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based line number in the source file.
    pub line_number: usize,
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}

/// A line that failed to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defect {
    pub line_number: usize,
    pub message: String,
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.message)
    }
}

// ---------------------------------------------------------------------------
// Dataset – all records of one load, in file order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    /// Union of every key seen, in first-seen order.
    column_names: Vec<String>,
}

impl Dataset {
    /// Build the column index from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut column_names = Vec::new();
        for rec in &records {
            for key in rec.fields.keys() {
                if seen.insert(key.as_str()) {
                    column_names.push(key.clone());
                }
            }
        }
        Dataset {
            records,
            column_names,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Whether any row carries `key`.
    pub fn has_column(&self, key: &str) -> bool {
        self.column_names.iter().any(|c| c == key)
    }

    /// The first `n` records.
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Time axis
// ---------------------------------------------------------------------------

/// Microseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// `None` if the tick count falls outside the representable calendar.
    pub fn from_micros(micros: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_micros(micros).map(|_| Timestamp(micros))
    }

    pub fn as_micros(self) -> i64 {
        self.0
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_micros(self.0)
    }

    /// Seconds since the epoch, for plotting only.
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.6f")),
            None => write!(f, "{}us", self.0),
        }
    }
}

/// One entry per dataset row; `None` where the row had no usable timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeAxis {
    entries: Vec<Option<Timestamp>>,
}

impl TimeAxis {
    pub fn new(entries: Vec<Option<Timestamp>>) -> Self {
        TimeAxis { entries }
    }

    pub fn entries(&self) -> &[Option<Timestamp>] {
        &self.entries
    }

    pub fn get(&self, row: usize) -> Option<Timestamp> {
        self.entries.get(row).copied().flatten()
    }

    /// Number of rows with a usable timestamp.
    pub fn valid_count(&self) -> usize {
        self.entries.iter().filter(|t| t.is_some()).count()
    }

    /// Earliest and latest timestamps, regardless of row order.
    pub fn bounds(&self) -> Option<TimeWindow> {
        let mut valid = self.entries.iter().flatten().copied();
        let first = valid.next()?;
        let (start, end) = valid.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some(TimeWindow { start, end })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Inclusive `[start, end]` restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        TimeWindow { start, end }
    }

    pub fn contains(&self, t: Timestamp) -> bool {
        self.start <= t && t <= self.end
    }

    /// Pull both ends inside `bounds`.
    pub fn clamp_to(&self, bounds: &TimeWindow) -> TimeWindow {
        TimeWindow {
            start: self.start.clamp(bounds.start, bounds.end),
            end: self.end.clamp(bounds.start, bounds.end),
        }
    }
}

// ---------------------------------------------------------------------------
// FieldSeries – the (timestamp, value) pairs for one field
// ---------------------------------------------------------------------------

/// Every non-null value of one field, with its timestamp. Values keep their
/// decoded type; only numeric ones end up on a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSeries {
    pub field: String,
    pub points: Vec<(Timestamp, FieldValue)>,
}

impl FieldSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pairs whose value is a number, for plotting.
    pub fn numeric_points(&self) -> impl Iterator<Item = (Timestamp, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|(t, v)| v.as_f64().map(|n| (*t, n)))
    }

    /// Smallest and largest numeric value in the series.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.numeric_points().map(|(_, v)| v).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line_number: usize, pairs: &[(&str, FieldValue)]) -> Record {
        Record {
            line_number,
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn test_column_names_keep_first_seen_order() {
        let ds = Dataset::from_records(vec![
            record(1, &[("timestamp", FieldValue::Integer(1))]),
            record(2, &[("gear_avg", FieldValue::Integer(2)), ("timestamp", FieldValue::Integer(2))]),
        ]);
        assert_eq!(ds.column_names(), &["timestamp".to_string(), "gear_avg".to_string()]);
        assert!(ds.has_column("gear_avg"));
        assert!(!ds.has_column("speed_avg"));
    }

    #[test]
    fn test_head_is_clamped() {
        let ds = Dataset::from_records(vec![record(1, &[])]);
        assert_eq!(ds.head(5).len(), 1);
        assert_eq!(ds.head(0).len(), 0);
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(FieldValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(FieldValue::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(FieldValue::Bool(true).as_f64(), Some(1.0));
        assert_eq!(FieldValue::String("3".into()).as_f64(), None);
        assert_eq!(FieldValue::Null.as_f64(), None);
    }

    #[test]
    fn test_timestamp_display() {
        let t = Timestamp::from_micros(1_000_001).unwrap();
        assert_eq!(t.to_string(), "1970-01-01 00:00:01.000001");
        assert!(Timestamp::from_micros(i64::MAX).is_none());
    }

    #[test]
    fn test_bounds_ignore_order_and_nulls() {
        let t = |us| Timestamp::from_micros(us);
        let axis = TimeAxis::new(vec![t(3000), None, t(1000), t(2000)]);
        let bounds = axis.bounds().unwrap();
        assert_eq!(bounds.start.as_micros(), 1000);
        assert_eq!(bounds.end.as_micros(), 3000);
        assert_eq!(axis.valid_count(), 3);
        assert!(TimeAxis::new(vec![None]).bounds().is_none());
    }

    #[test]
    fn test_window_contains_is_inclusive() {
        let t = |us| Timestamp::from_micros(us).unwrap();
        let w = TimeWindow::new(t(10), t(20));
        assert!(w.contains(t(10)));
        assert!(w.contains(t(20)));
        assert!(!w.contains(t(21)));

        let clamped = TimeWindow::new(t(0), t(100)).clamp_to(&w);
        assert_eq!(clamped, w);
    }

    #[test]
    fn test_value_range() {
        let t = |us| Timestamp::from_micros(us).unwrap();
        let series = FieldSeries {
            field: "gear_avg".into(),
            points: vec![
                (t(1), FieldValue::Integer(2)),
                (t(2), FieldValue::String("D".into())),
                (t(3), FieldValue::Float(-1.0)),
                (t(4), FieldValue::Integer(5)),
            ],
        };
        assert_eq!(series.value_range(), Some((-1.0, 5.0)));
        assert_eq!(series.numeric_points().count(), 3);
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn test_has_column_matches_any_row() {
        let ds = Dataset::from_records(vec![
            record(1, &[("timestamp", FieldValue::Integer(1))]),
            record(2, &[("gear_avg", FieldValue::Null)]),
            record(3, &[("timestamp", FieldValue::Integer(3))]),
        ]);
        assert!(ds.has_column("timestamp"));
        assert!(ds.has_column("gear_avg"));
        assert!(!ds.has_column("speed_avg"));
        assert!(!Dataset::from_records(Vec::new()).has_column("timestamp"));
    }
}
