use super::model::{Dataset, FieldSeries, TimeAxis, TimeWindow};

// ---------------------------------------------------------------------------
// Field extraction: (timestamp, value) pairs for one field
// ---------------------------------------------------------------------------

/// Project `field` out of `dataset` as a time series.
///
/// A row contributes a pair only when it has both a timestamp on `time_axis`
/// and a non-null value for `field`. Values keep their decoded type, so a
/// gear reported as `"D"` is still a pair. With a `window`, pairs outside
/// `[start, end]` are dropped as well. Row order is preserved as-is, even if
/// the log itself is out of order.
///
/// No matching row is not an error: the series is simply empty.
pub fn extract(
    dataset: &Dataset,
    time_axis: &TimeAxis,
    field: &str,
    window: Option<&TimeWindow>,
) -> FieldSeries {
    let points = dataset
        .records()
        .iter()
        .enumerate()
        .filter_map(|(row, rec)| {
            let t = time_axis.get(row)?;
            let value = rec.get(field).filter(|v| !v.is_null())?;
            Some((t, value.clone()))
        })
        .filter(|&(t, _)| window.map_or(true, |w| w.contains(t)))
        .collect();

    FieldSeries {
        field: field.to_string(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_from_reader;
    use crate::data::model::{FieldValue, Timestamp};
    use crate::data::timestamp::normalize;

    fn prepare(text: &str) -> (Dataset, TimeAxis) {
        let ds = load_from_reader(text.as_bytes()).unwrap().dataset;
        let axis = normalize(&ds, "timestamp").unwrap();
        (ds, axis)
    }

    fn micros(series: &FieldSeries) -> Vec<(i64, f64)> {
        series
            .points
            .iter()
            .map(|(t, v)| (t.as_micros(), v.as_f64().unwrap()))
            .collect()
    }

    fn window(start: i64, end: i64) -> TimeWindow {
        TimeWindow::new(
            Timestamp::from_micros(start).unwrap(),
            Timestamp::from_micros(end).unwrap(),
        )
    }

    #[test]
    fn test_drop_is_conjunctive() {
        let (ds, axis) = prepare(
            "{\"timestamp\":1000,\"gear_avg\":2}\n\
             {\"timestamp\":2000,\"gear_avg\":null}\n\
             {\"gear_avg\":4}\n\
             {\"timestamp\":\"x\",\"gear_avg\":5}\n\
             {\"timestamp\":3000}\n\
             {\"timestamp\":4000,\"gear_avg\":\"P\"}\n\
             {\"timestamp\":5000,\"gear_avg\":6.5}\n",
        );
        let series = extract(&ds, &axis, "gear_avg", None);
        let got: Vec<(i64, FieldValue)> = series
            .points
            .iter()
            .map(|(t, v)| (t.as_micros(), v.clone()))
            .collect();
        assert_eq!(
            got,
            vec![
                (1000, FieldValue::Integer(2)),
                (4000, FieldValue::String("P".into())),
                (5000, FieldValue::Float(6.5)),
            ]
        );
    }

    #[test]
    fn test_non_numeric_values_are_kept() {
        let (ds, axis) = prepare(
            "{\"timestamp\":1000,\"gear_avg\":\"3\"}\n{\"timestamp\":2000,\"gear_avg\":\"D\"}\n",
        );
        let series = extract(&ds, &axis, "gear_avg", None);
        assert_eq!(series.len(), 2);
        assert_eq!(series.points[1].1, FieldValue::String("D".into()));
        // Neither value is a number, so nothing is drawn.
        assert_eq!(series.numeric_points().count(), 0);
        assert_eq!(series.value_range(), None);
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let (ds, axis) = prepare(
            "{\"timestamp\":1000,\"v\":1}\n{\"timestamp\":2000,\"v\":2}\n{\"timestamp\":3000,\"v\":3}\n",
        );
        let series = extract(&ds, &axis, "v", Some(&window(1000, 2000)));
        assert_eq!(micros(&series), vec![(1000, 1.0), (2000, 2.0)]);
    }

    #[test]
    fn test_window_beyond_data_is_harmless() {
        let (ds, axis) = prepare("{\"timestamp\":1000,\"v\":1}\n{\"timestamp\":2000,\"v\":2}\n");
        let all = extract(&ds, &axis, "v", None);
        let wide = extract(&ds, &axis, "v", Some(&window(-5_000_000, 5_000_000)));
        assert_eq!(all, wide);
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let (ds, axis) = prepare("{\"timestamp\":1000,\"v\":1}\n");
        assert!(extract(&ds, &axis, "v", Some(&window(2000, 0))).is_empty());
    }

    #[test]
    fn test_out_of_order_rows_are_not_sorted() {
        let (ds, axis) = prepare(
            "{\"timestamp\":3000,\"v\":3}\n{\"timestamp\":1000,\"v\":1}\n{\"timestamp\":2000,\"v\":2}\n",
        );
        let series = extract(&ds, &axis, "v", None);
        assert_eq!(micros(&series), vec![(3000, 3.0), (1000, 1.0), (2000, 2.0)]);
    }

    #[test]
    fn test_unknown_field_is_empty_not_error() {
        let (ds, axis) = prepare("{\"timestamp\":1000,\"v\":1}\n");
        let series = extract(&ds, &axis, "speed_avg", None);
        assert!(series.is_empty());
        assert_eq!(series.field, "speed_avg");
    }
}
