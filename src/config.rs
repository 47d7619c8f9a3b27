use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Optional `[min, max]` y-axis clamp for one field. Used by the plots only.
pub type DisplayRange = [f64; 2];

/// One dashboard deployment.
///
/// Every key is optional in the JSON file; missing keys fall back to the
/// defaults below.
///
/// ```json
/// {
///   "log_path": "metrics_logs/ato_log.log",
///   "target_fields": ["gear_avg", "speed_avg"],
///   "display_ranges": { "gear_avg": [-1, 6] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub log_path: PathBuf,
    pub timestamp_key: String,
    pub target_fields: Vec<String>,
    pub display_ranges: BTreeMap<String, DisplayRange>,
    pub title: String,
    pub logo_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("ato_log.log"),
            timestamp_key: "timestamp".to_string(),
            target_fields: [
                "vehicle_state_avg",
                "speed_avg",
                "gear_avg",
                "gas_pedal_avg",
                "steering_wheel_avg",
                "hazard_signal_avg",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            display_ranges: BTreeMap::new(),
            title: "Teleops Signal Dashboard".to_string(),
            logo_path: None,
        }
    }
}

impl DashboardConfig {
    /// Read and check a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(text).context("parsing JSON")?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.timestamp_key.is_empty() {
            bail!("timestamp_key must not be empty");
        }
        if self.target_fields.is_empty() {
            bail!("target_fields must list at least one field");
        }
        for (field, [min, max]) in &self.display_ranges {
            if min > max {
                bail!("display range for '{field}' has min {min} > max {max}");
            }
        }
        Ok(())
    }

    pub fn display_range(&self, field: &str) -> Option<DisplayRange> {
        self.display_ranges.get(field).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config = DashboardConfig::from_json(r#"{"log_path": "dv9/ato_log.log"}"#).unwrap();
        assert_eq!(config.log_path, PathBuf::from("dv9/ato_log.log"));
        assert_eq!(config.timestamp_key, "timestamp");
        assert_eq!(config.target_fields.len(), 6);
        assert!(config.logo_path.is_none());
    }

    #[test]
    fn test_display_ranges() {
        let config = DashboardConfig::from_json(
            r#"{"target_fields": ["gear_avg"], "display_ranges": {"gear_avg": [-1, 6]}}"#,
        )
        .unwrap();
        assert_eq!(config.display_range("gear_avg"), Some([-1.0, 6.0]));
        assert_eq!(config.display_range("speed_avg"), None);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = DashboardConfig::from_json(r#"{"display_ranges": {"gear_avg": [6, -1]}}"#)
            .unwrap_err();
        assert!(format!("{err:#}").contains("gear_avg"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(DashboardConfig::from_json(r#"{"log_file": "x.log"}"#).is_err());
    }

    #[test]
    fn test_shipped_configs_parse() {
        let signal =
            DashboardConfig::from_json(include_str!("../configs/signal_dashboard.json")).unwrap();
        assert_eq!(signal.target_fields.len(), 4);
        assert!(signal.display_ranges.is_empty());

        let teleops =
            DashboardConfig::from_json(include_str!("../configs/teleops_dashboard.json")).unwrap();
        assert_eq!(teleops.target_fields.len(), 6);
        assert_eq!(teleops.display_range("gas_pedal_avg"), Some([0.0, 100.0]));
        assert_eq!(teleops.logo_path, Some(PathBuf::from("logo.png")));
    }

    #[test]
    fn test_empty_field_list_is_rejected() {
        assert!(DashboardConfig::from_json(r#"{"target_fields": []}"#).is_err());
    }
}
