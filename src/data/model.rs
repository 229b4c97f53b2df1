use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Record – one row of a delimited text file
// ---------------------------------------------------------------------------

/// A single data row keyed by trimmed column name. Values are kept as the raw
/// text found in the file.
pub type Record = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// CorrectedSample – one calibrated measurement
// ---------------------------------------------------------------------------

/// A sample identifier paired with its calibrated delta 13C value.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedSample {
    pub sample_id: String,
    pub value: f64,
}

impl CorrectedSample {
    pub fn new(sample_id: impl Into<String>, value: f64) -> Self {
        Self {
            sample_id: sample_id.into(),
            value,
        }
    }
}

impl fmt::Display for CorrectedSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sample ID: {}, Adjusted Delta value = {:.3}",
            self.sample_id, self.value
        )
    }
}

// ---------------------------------------------------------------------------
// SpeciesRecord – one row of the reference table
// ---------------------------------------------------------------------------

/// A reference species with its published leaf delta 13C value, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesRecord {
    pub species: String,
    /// `None` when the table carries the `NA` sentinel.
    pub literature_value: Option<f64>,
}

// ---------------------------------------------------------------------------
// SpeciesLookup – outcome of a species search
// ---------------------------------------------------------------------------

/// What a species search resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeciesLookup {
    /// Found, with a literature value.
    Value(f64),
    /// Found, but the table has no value for it.
    NoValue,
    /// No matching row.
    NotFound,
}

impl SpeciesLookup {
    pub fn value(&self) -> Option<f64> {
        match self {
            SpeciesLookup::Value(v) => Some(*v),
            SpeciesLookup::NoValue | SpeciesLookup::NotFound => None,
        }
    }
}

/// A lookup result together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    /// Species name as it should be displayed (database casing when found).
    pub species: String,
    pub outcome: SpeciesLookup,
    /// True when the answer came from the session cache.
    pub cached: bool,
}

impl fmt::Display for LookupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cached {
            return write!(f, "'{}' already searched.", self.species);
        }
        match self.outcome {
            SpeciesLookup::Value(v) => {
                write!(f, "'{}' leaf delta 13C value is: {v}", self.species)
            }
            SpeciesLookup::NoValue => {
                write!(f, "'{}' leaf delta 13C value was not found.", self.species)
            }
            SpeciesLookup::NotFound => {
                write!(f, "'{}' not found in the database.", self.species)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrected_sample_report_line() {
        let sample = CorrectedSample::new("4", -15.31573);
        assert_eq!(
            sample.to_string(),
            "Sample ID: 4, Adjusted Delta value = -15.316"
        );
    }

    #[test]
    fn lookup_messages() {
        let mut result = LookupResult {
            species: "Zea mays".to_string(),
            outcome: SpeciesLookup::Value(-12.5),
            cached: false,
        };
        assert_eq!(result.to_string(), "'Zea mays' leaf delta 13C value is: -12.5");

        result.outcome = SpeciesLookup::NoValue;
        assert_eq!(
            result.to_string(),
            "'Zea mays' leaf delta 13C value was not found."
        );

        result.cached = true;
        assert_eq!(result.to_string(), "'Zea mays' already searched.");
    }
}
