use std::collections::BTreeMap;

use super::model::{Dataset, FieldValue};

/// Describe-style statistics for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    /// Rows where the column is present and not null.
    pub count: usize,
    pub stats: ColumnStats,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnStats {
    /// Every non-null value is a number.
    Numeric {
        mean: f64,
        /// Sample standard deviation; `None` below two values.
        std: Option<f64>,
        min: f64,
        q25: f64,
        median: f64,
        q75: f64,
        max: f64,
    },
    /// Anything else, including columns with no non-null values.
    Categorical {
        unique: usize,
        top: Option<FieldValue>,
        freq: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub defects: usize,
    pub columns: Vec<ColumnSummary>,
}

/// Summarize every column of `dataset`, in column order.
pub fn summarize(dataset: &Dataset, defects: usize) -> DatasetSummary {
    let columns = dataset
        .column_names()
        .iter()
        .map(|name| summarize_column(dataset, name))
        .collect();

    DatasetSummary {
        rows: dataset.len(),
        defects,
        columns,
    }
}

fn summarize_column(dataset: &Dataset, name: &str) -> ColumnSummary {
    let values: Vec<&FieldValue> = dataset
        .records()
        .iter()
        .filter_map(|rec| rec.get(name))
        .filter(|v| !v.is_null())
        .collect();

    let numbers: Option<Vec<f64>> = values
        .iter()
        .map(|v| match v {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        })
        .collect();

    let stats = match numbers {
        Some(nums) if !nums.is_empty() => numeric_stats(nums),
        _ => categorical_stats(&values),
    };

    ColumnSummary {
        name: name.to_string(),
        count: values.len(),
        stats,
    }
}

fn numeric_stats(mut nums: Vec<f64>) -> ColumnStats {
    nums.sort_by(f64::total_cmp);
    let n = nums.len() as f64;
    let mean = nums.iter().sum::<f64>() / n;
    let std = (nums.len() > 1).then(|| {
        let var = nums.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        var.sqrt()
    });

    ColumnStats::Numeric {
        mean,
        std,
        min: nums[0],
        q25: quantile(&nums, 0.25),
        median: quantile(&nums, 0.5),
        q75: quantile(&nums, 0.75),
        max: nums[nums.len() - 1],
    }
}

/// Linear-interpolation quantile over sorted, non-empty input.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

fn categorical_stats(values: &[&FieldValue]) -> ColumnStats {
    // value -> (count, first index seen)
    let mut counts: BTreeMap<&FieldValue, (usize, usize)> = BTreeMap::new();
    for (idx, v) in values.iter().enumerate() {
        counts.entry(*v).or_insert((0, idx)).0 += 1;
    }

    let top = counts
        .iter()
        .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
        .map(|(v, (n, _))| ((*v).clone(), *n));

    ColumnStats::Categorical {
        unique: counts.len(),
        freq: top.as_ref().map_or(0, |(_, n)| *n),
        top: top.map(|(v, _)| v),
    }
}
