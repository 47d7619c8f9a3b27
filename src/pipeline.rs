use crate::config::DashboardConfig;
use crate::data::extract::extract;
use crate::data::loader::load_log;
use crate::data::model::{Dataset, Defect, FieldSeries, TimeAxis, TimeWindow};
use crate::data::schema::validate;
use crate::data::summary::{DatasetSummary, summarize};
use crate::data::timestamp::normalize;
use crate::error::PipelineResult;

/// Everything the dashboard draws from one read of the log.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub dataset: Dataset,
    pub defects: Vec<Defect>,
    pub time_axis: TimeAxis,
    /// Configured target fields found in the data, in configured order.
    pub available_fields: Vec<String>,
    pub summary: DatasetSummary,
}

/// Run load → validate → normalize against the configured log.
///
/// Each call reads the file from scratch; nothing is carried over from a
/// previous run.
pub fn run(config: &DashboardConfig) -> PipelineResult<DashboardData> {
    let loaded = load_log(&config.log_path)?;
    let available_fields = validate(&loaded.dataset, &config.timestamp_key, &config.target_fields)?;
    let time_axis = normalize(&loaded.dataset, &config.timestamp_key)?;
    let summary = summarize(&loaded.dataset, loaded.defects.len());

    log::info!("Plotting fields {available_fields:?}");

    Ok(DashboardData {
        dataset: loaded.dataset,
        defects: loaded.defects,
        time_axis,
        available_fields,
        summary,
    })
}

impl DashboardData {
    /// Series for one field, optionally restricted to `window`.
    pub fn series(&self, field: &str, window: Option<&TimeWindow>) -> FieldSeries {
        extract(&self.dataset, &self.time_axis, field, window)
    }

    /// Series for every available field, in configured order.
    pub fn all_series(&self, window: Option<&TimeWindow>) -> Vec<FieldSeries> {
        self.available_fields
            .iter()
            .map(|field| self.series(field, window))
            .collect()
    }

    /// Full time span of the log; the default selection window.
    pub fn time_bounds(&self) -> Option<TimeWindow> {
        self.time_axis.bounds()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::{LoadError, PipelineError, SchemaError};

    fn config_for(text: &str) -> (tempfile::NamedTempFile, DashboardConfig) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        let config = DashboardConfig {
            log_path: file.path().to_path_buf(),
            ..DashboardConfig::default()
        };
        (file, config)
    }

    #[test]
    fn test_run_collects_fields_and_defects() {
        let (_file, config) = config_for(
            "{\"timestamp\":1000,\"gear_avg\":2,\"speed_avg\":null}\n{oops\n{\"timestamp\":2000,\"gear_avg\":3}\n",
        );
        let data = run(&config).unwrap();
        assert_eq!(data.available_fields, vec!["speed_avg", "gear_avg"]);
        assert_eq!(data.defects.len(), 1);

        let series = data.all_series(None);
        assert!(series[0].is_empty());
        assert_eq!(series[1].len(), 2);
    }

    #[test]
    fn test_fully_malformed_file_is_empty_dataset() {
        let (_file, config) = config_for("nope\n{\n");
        let err = run(&config).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Load(LoadError::EmptyDataset { defects: 2 })
        ));
    }

    #[test]
    fn test_schema_failure_stops_pipeline() {
        let (_file, config) = config_for("{\"gear_avg\":1}\n");
        let err = run(&config).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Schema(SchemaError::MissingTimestamp(_))
        ));
        assert_eq!(err.to_string(), "Missing required column: 'timestamp'");
    }

    #[test]
    fn test_time_bounds() {
        let (_file, config) = config_for(
            "{\"timestamp\":2000,\"gear_avg\":1}\n{\"timestamp\":1000,\"gear_avg\":1}\n",
        );
        let bounds = run(&config).unwrap().time_bounds().unwrap();
        assert_eq!(bounds.start.as_micros(), 1000);
        assert_eq!(bounds.end.as_micros(), 2000);
    }
}
