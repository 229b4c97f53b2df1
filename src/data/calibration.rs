//! Standard-based calibration of raw analyzer readings.
//!
//! The first `standard_count` rows of an export are glucose standards. Their
//! mean reading plus the standard's known offset gives the adjustment that is
//! subtracted from every sample row that follows.

use crate::config::CalibrationConfig;
use crate::error::{Error, Result};

use super::model::{CorrectedSample, Record};

/// Mean measurement of the leading standard rows.
pub fn compute_calibration_average(records: &[Record], config: &CalibrationConfig) -> Result<f64> {
    if config.standard_count == 0 || records.len() < config.standard_count {
        return Err(Error::InsufficientData {
            required: config.standard_count.max(1),
            found: records.len(),
        });
    }

    let standards = &records[..config.standard_count];
    let mut sum = 0.0;
    for (row, record) in standards.iter().enumerate() {
        sum += measurement(record, row + 1, &config.measurement_column)?;
    }
    Ok(sum / standards.len() as f64)
}

/// Apply `average + standard_offset` to every row after the standards.
pub fn compute_corrected_values(
    records: &[Record],
    average: f64,
    config: &CalibrationConfig,
) -> Result<Vec<CorrectedSample>> {
    let adjustment = average + config.standard_offset;

    let mut corrected = Vec::with_capacity(records.len().saturating_sub(config.standard_count));
    for (row, record) in records.iter().enumerate().skip(config.standard_count) {
        let raw = measurement(record, row + 1, &config.measurement_column)?;
        let sample_id = record
            .get(&config.sample_id_column)
            .ok_or_else(|| Error::MissingColumn(config.sample_id_column.clone()))?
            .trim()
            .to_string();

        let sample = CorrectedSample::new(sample_id, raw - adjustment);
        log::info!("{sample}");
        corrected.push(sample);
    }
    Ok(corrected)
}

/// Both calibration steps in one go.
pub fn calibrate(records: &[Record], config: &CalibrationConfig) -> Result<Vec<CorrectedSample>> {
    let average = compute_calibration_average(records, config)?;
    log::debug!(
        "Standard average {average:.4} over {} rows, adjustment {:.4}",
        config.standard_count,
        average + config.standard_offset
    );
    compute_corrected_values(records, average, config)
}

/// Parse the measurement column of a record. `row` is 1-based for messages.
fn measurement(record: &Record, row: usize, column: &str) -> Result<f64> {
    let raw = record
        .get(column)
        .ok_or_else(|| Error::MissingColumn(column.to_string()))?;
    raw.trim().parse::<f64>().map_err(|_| Error::Parse {
        row,
        column: column.to_string(),
        value: raw.clone(),
    })
}
