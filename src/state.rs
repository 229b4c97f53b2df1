use std::path::Path;

use crate::config::Config;
use crate::data::calibration::calibrate;
use crate::data::grouping::GroupAssignment;
use crate::data::model::{CorrectedSample, LookupResult};
use crate::data::reader::read_records;
use crate::data::reference::{ReferenceTable, SpeciesCache};
use crate::error::Result;
use crate::stats::StatisticsReport;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything an analysis session carries between operations, independent of
/// how it is driven.
pub struct Session {
    pub config: Config,

    /// Calibrated samples of the last successful load, in file order.
    samples: Vec<CorrectedSample>,

    /// Reference table (None when it could not be loaded).
    reference: Option<ReferenceTable>,

    /// Species searched so far; only ever grows.
    species: SpeciesCache,

    /// Grouping confirmed by the last statistical analysis.
    pub grouping: Option<GroupAssignment>,

    /// Report of the last statistical analysis.
    pub report: Option<StatisticsReport>,
}

impl Session {
    /// Start a session without a reference table.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            samples: Vec::new(),
            reference: None,
            species: SpeciesCache::default(),
            grouping: None,
            report: None,
        }
    }

    /// Load the configured reference table. A failure is logged and returned
    /// so the caller can warn the operator; the session stays usable and
    /// every species lookup reports "not found".
    pub fn load_reference_table(&mut self) -> Result<()> {
        match ReferenceTable::load(&self.config.reference_table) {
            Ok(table) => {
                self.reference = Some(table);
                Ok(())
            }
            Err(e) => {
                log::warn!("Reference table unavailable: {e}");
                self.reference = None;
                Err(e)
            }
        }
    }

    pub fn has_reference_table(&self) -> bool {
        self.reference.is_some()
    }

    /// Read and calibrate an analyzer export. On success the previous samples
    /// and any grouping built on them are replaced; on failure nothing changes.
    pub fn load_measurements(&mut self, path: &Path) -> Result<&[CorrectedSample]> {
        let records = read_records(path)?;
        let samples = calibrate(&records, &self.config.calibration)?;
        log::info!(
            "Loaded {} rows from {}, {} corrected samples",
            records.len(),
            path.display(),
            samples.len()
        );
        self.set_samples(samples);
        Ok(&self.samples)
    }

    /// Replace the working set of corrected samples.
    pub fn set_samples(&mut self, samples: Vec<CorrectedSample>) {
        self.samples = samples;
        self.grouping = None;
        self.report = None;
    }

    pub fn samples(&self) -> &[CorrectedSample] {
        &self.samples
    }

    /// Look a species up, memoizing the outcome for the rest of the session.
    pub fn lookup_species(&mut self, name: &str) -> Result<LookupResult> {
        self.species.lookup(&self.reference, name)
    }

    pub fn species(&self) -> &SpeciesCache {
        &self.species
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::data::model::SpeciesLookup;
    use crate::error::Error;

    fn export(rows: &[(&str, &str)]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Sample Id,Delta CRDS").unwrap();
        for (id, delta) in rows {
            writeln!(file, "{id},{delta}").unwrap();
        }
        file
    }

    #[test]
    fn successful_load_replaces_samples() {
        let mut session = Session::new(Config::default());
        let first = export(&[("1", "-6.7"), ("2", "-6.8"), ("3", "-6.7"), ("4", "-10.3")]);
        session.load_measurements(first.path()).unwrap();
        assert_eq!(session.samples().len(), 1);

        session.grouping = Some(GroupAssignment::single(1));
        let second = export(&[
            ("1", "-6.7"),
            ("2", "-6.8"),
            ("3", "-6.7"),
            ("7", "-10.3"),
            ("8", "-9.4"),
        ]);
        session.load_measurements(second.path()).unwrap();
        let ids: Vec<&str> = session.samples().iter().map(|s| s.sample_id.as_str()).collect();
        assert_eq!(ids, ["7", "8"]);
        assert!(session.grouping.is_none());
    }

    #[test]
    fn failed_load_keeps_previous_samples() {
        let mut session = Session::new(Config::default());
        let good = export(&[("1", "-6.7"), ("2", "-6.8"), ("3", "-6.7"), ("4", "-10.3")]);
        session.load_measurements(good.path()).unwrap();

        let short = export(&[("1", "-6.7")]);
        assert!(matches!(
            session.load_measurements(short.path()),
            Err(Error::InsufficientData { .. })
        ));
        assert!(matches!(
            session.load_measurements(Path::new("no/such/export.csv")),
            Err(Error::FileNotFound(_))
        ));
        assert_eq!(session.samples().len(), 1);
        assert_eq!(session.samples()[0].sample_id, "4");
    }

    #[test]
    fn missing_reference_table_is_not_fatal() {
        let mut config = Config::default();
        config.reference_table = "no/such/leaf13C_database.csv".into();
        let mut session = Session::new(config);

        assert!(session.load_reference_table().is_err());
        assert!(!session.has_reference_table());
        let result = session.lookup_species("Zea mays").unwrap();
        assert_eq!(result.outcome, SpeciesLookup::NotFound);
    }
}
