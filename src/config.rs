use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Environment variable overriding the reference table location.
pub const REFERENCE_TABLE_ENV: &str = "ISOTOPE_REFERENCE_TABLE";

/// Default reference table, resolved relative to the working directory.
pub const DEFAULT_REFERENCE_TABLE: &str = "leaf13C_database.csv";

/// Known delta 13C offset of the glucose standard material.
pub const STANDARD_OFFSET: f64 = 11.768;

/// Column layout and constants used to calibrate an analyzer export.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationConfig {
    pub sample_id_column: String,
    pub measurement_column: String,
    /// Number of leading rows that are standards rather than samples.
    pub standard_count: usize,
    pub standard_offset: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            sample_id_column: "Sample Id".to_string(),
            measurement_column: "Delta CRDS".to_string(),
            standard_count: 3,
            standard_offset: STANDARD_OFFSET,
        }
    }
}

/// Session-wide settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub reference_table: PathBuf,
    pub calibration: CalibrationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_table: PathBuf::from(DEFAULT_REFERENCE_TABLE),
            calibration: CalibrationConfig::default(),
        }
    }
}

impl Config {
    /// Defaults, with the reference table path taken from
    /// `ISOTOPE_REFERENCE_TABLE` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = std::env::var_os(REFERENCE_TABLE_ENV).filter(|p| !p.is_empty()) {
            config.reference_table = PathBuf::from(path);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_analyzer_export() {
        let config = Config::default();
        assert_eq!(config.reference_table, PathBuf::from("leaf13C_database.csv"));
        assert_eq!(config.calibration.sample_id_column, "Sample Id");
        assert_eq!(config.calibration.measurement_column, "Delta CRDS");
        assert_eq!(config.calibration.standard_count, 3);
        assert_eq!(config.calibration.standard_offset, 11.768);
    }
}
