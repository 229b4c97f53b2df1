use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

use super::model::{LookupResult, SpeciesLookup, SpeciesRecord};

/// Column holding the species name.
pub const SPECIES_COLUMN: &str = "species";
/// Column holding the literature leaf delta 13C value.
pub const LITERATURE_COLUMN: &str = "little.d13.org";
/// Sentinel used by the reference table for a missing value.
pub const MISSING_SENTINEL: &str = "NA";

// ---------------------------------------------------------------------------
// Lookup source
// ---------------------------------------------------------------------------

/// Anything that can resolve a normalized (trimmed, lowercase) species name.
pub trait SpeciesSource {
    fn find(&self, normalized: &str) -> Option<&SpeciesRecord>;
}

// ---------------------------------------------------------------------------
// ReferenceTable – the leaf 13C database
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SpeciesRow {
    species: String,
    #[serde(rename = "little.d13.org")]
    literature_value: String,
}

/// The static species reference table, in file order.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    records: Vec<SpeciesRecord>,
}

impl ReferenceTable {
    /// Load the table from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        let table = Self::from_reader(file)?;
        log::info!(
            "Loaded {} reference species from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse the table from any reader. Literature values are parsed here, so
    /// a malformed number fails the whole load.
    pub fn from_reader<R: Read>(input: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        for column in [SPECIES_COLUMN, LITERATURE_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(Error::MissingColumn(column.to_string()));
            }
        }

        let mut records = Vec::new();
        for (row_no, result) in reader.deserialize::<SpeciesRow>().enumerate() {
            let row = result?;
            let raw = row.literature_value.trim();
            let literature_value = if raw == MISSING_SENTINEL {
                None
            } else {
                Some(raw.parse::<f64>().map_err(|_| Error::Parse {
                    row: row_no + 1,
                    column: LITERATURE_COLUMN.to_string(),
                    value: row.literature_value.clone(),
                })?)
            };
            records.push(SpeciesRecord {
                species: row.species,
                literature_value,
            });
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SpeciesSource for ReferenceTable {
    fn find(&self, normalized: &str) -> Option<&SpeciesRecord> {
        self.records
            .iter()
            .find(|r| r.species.trim().to_lowercase() == normalized)
    }
}

/// Stand-in for a reference table that failed to load: nothing is found.
impl SpeciesSource for Option<ReferenceTable> {
    fn find(&self, normalized: &str) -> Option<&SpeciesRecord> {
        self.as_ref().and_then(|table| table.find(normalized))
    }
}

// ---------------------------------------------------------------------------
// SpeciesCache – session memo of every species searched
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
struct CacheEntry {
    species: String,
    outcome: SpeciesLookup,
}

/// Every species searched this session, in search order, keyed
/// case-insensitively. Entries are only ever added.
#[derive(Debug, Clone, Default)]
pub struct SpeciesCache {
    entries: Vec<CacheEntry>,
    index: HashMap<String, usize>,
}

impl SpeciesCache {
    /// Resolve `name`, consulting `source` only the first time a given name
    /// (in any casing) is asked for.
    pub fn lookup<S: SpeciesSource + ?Sized>(&mut self, source: &S, name: &str) -> Result<LookupResult> {
        let key = normalize(name);
        if key.is_empty() {
            return Err(Error::EmptySpeciesName);
        }

        if let Some(entry) = self.index.get(&key).map(|&i| &self.entries[i]) {
            log::debug!("Species '{key}' served from cache");
            return Ok(LookupResult {
                species: entry.species.clone(),
                outcome: entry.outcome,
                cached: true,
            });
        }

        let entry = match source.find(&key) {
            Some(record) => CacheEntry {
                species: record.species.clone(),
                outcome: record
                    .literature_value
                    .map_or(SpeciesLookup::NoValue, SpeciesLookup::Value),
            },
            None => CacheEntry {
                species: name.trim().to_string(),
                outcome: SpeciesLookup::NotFound,
            },
        };
        log::debug!("Species '{key}' resolved to {:?}", entry.outcome);

        let result = LookupResult {
            species: entry.species.clone(),
            outcome: entry.outcome,
            cached: false,
        };
        self.index.insert(key, self.entries.len());
        self.entries.push(entry);
        Ok(result)
    }

    /// Species with a literature value, as `(display name, value)`, in the
    /// order they were first searched.
    pub fn resolved_values(&self) -> Vec<(String, f64)> {
        self.entries
            .iter()
            .filter_map(|e| e.outcome.value().map(|v| (e.species.clone(), v)))
            .collect()
    }

    pub fn has_resolved_values(&self) -> bool {
        self.entries.iter().any(|e| e.outcome.value().is_some())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    const TABLE: &str = "species,little.d13.org\n\
                         Zea mays,-12.5\n\
                         Quercus robur,NA\n\
                         Acer Saccharum,-28.1\n";

    /// Wraps a table and counts how often it is scanned.
    struct CountingSource {
        table: ReferenceTable,
        scans: Cell<usize>,
    }

    impl SpeciesSource for CountingSource {
        fn find(&self, normalized: &str) -> Option<&SpeciesRecord> {
            self.scans.set(self.scans.get() + 1);
            self.table.find(normalized)
        }
    }

    fn counting() -> CountingSource {
        CountingSource {
            table: ReferenceTable::from_reader(TABLE.as_bytes()).unwrap(),
            scans: Cell::new(0),
        }
    }

    #[test]
    fn parses_values_and_sentinel() {
        let table = ReferenceTable::from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.records[0].literature_value, Some(-12.5));
        assert_eq!(table.records[1].literature_value, None);
    }

    #[test]
    fn missing_species_column_is_rejected() {
        let err = ReferenceTable::from_reader("name,little.d13.org\nx,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "species"));
    }

    #[test]
    fn malformed_literature_value_is_a_parse_error() {
        let err = ReferenceTable::from_reader("species,little.d13.org\nx,abc\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { row: 1, .. }));
    }

    #[test]
    fn lookup_is_case_insensitive_and_keeps_database_casing() {
        let table = ReferenceTable::from_reader(TABLE.as_bytes()).unwrap();
        let mut cache = SpeciesCache::default();
        let result = cache.lookup(&table, "  acer saccharum ").unwrap();
        assert_eq!(result.species, "Acer Saccharum");
        assert_eq!(result.outcome, SpeciesLookup::Value(-28.1));
        assert!(!result.cached);
    }

    #[test]
    fn all_three_outcomes() {
        let table = ReferenceTable::from_reader(TABLE.as_bytes()).unwrap();
        let mut cache = SpeciesCache::default();
        assert_eq!(cache.lookup(&table, "Zea mays").unwrap().outcome, SpeciesLookup::Value(-12.5));
        assert_eq!(cache.lookup(&table, "Quercus robur").unwrap().outcome, SpeciesLookup::NoValue);
        assert_eq!(cache.lookup(&table, "Pinus nigra").unwrap().outcome, SpeciesLookup::NotFound);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn repeated_lookup_is_served_from_cache() {
        let source = counting();
        let mut cache = SpeciesCache::default();

        let first = cache.lookup(&source, "Zea mays").unwrap();
        let second = cache.lookup(&source, "ZEA MAYS").unwrap();
        let third = cache.lookup(&source, "zea mays ").unwrap();

        assert_eq!(source.scans.get(), 1);
        assert!(!first.cached);
        assert!(second.cached && third.cached);
        assert_eq!(first.outcome, second.outcome);
        assert_eq!(second, third);
    }

    #[test]
    fn not_found_is_memoized_too() {
        let source = counting();
        let mut cache = SpeciesCache::default();
        cache.lookup(&source, "Pinus nigra").unwrap();
        let again = cache.lookup(&source, "pinus NIGRA").unwrap();
        assert_eq!(source.scans.get(), 1);
        assert_eq!(again.outcome, SpeciesLookup::NotFound);
        assert!(again.cached);
    }

    #[test]
    fn empty_name_is_rejected_and_not_cached() {
        let source = counting();
        let mut cache = SpeciesCache::default();
        assert!(matches!(cache.lookup(&source, "   "), Err(Error::EmptySpeciesName)));
        assert!(cache.is_empty());
        assert_eq!(source.scans.get(), 0);
    }

    #[test]
    fn unavailable_table_finds_nothing() {
        let missing: Option<ReferenceTable> = None;
        let mut cache = SpeciesCache::default();
        let result = cache.lookup(&missing, "Zea mays").unwrap();
        assert_eq!(result.outcome, SpeciesLookup::NotFound);
    }

    #[test]
    fn resolved_values_skip_missing_entries() {
        let table = ReferenceTable::from_reader(TABLE.as_bytes()).unwrap();
        let mut cache = SpeciesCache::default();
        cache.lookup(&table, "Quercus robur").unwrap();
        assert!(!cache.has_resolved_values());
        cache.lookup(&table, "Zea mays").unwrap();
        assert!(cache.has_resolved_values());
        assert_eq!(cache.resolved_values(), vec![("Zea mays".to_string(), -12.5)]);
    }

    #[test]
    fn resolved_values_follow_search_order() {
        let table = ReferenceTable::from_reader(TABLE.as_bytes()).unwrap();
        let mut cache = SpeciesCache::default();
        cache.lookup(&table, "Zea mays").unwrap();
        cache.lookup(&table, "acer saccharum").unwrap();
        cache.lookup(&table, "ZEA MAYS").unwrap();
        assert_eq!(
            cache.resolved_values(),
            vec![
                ("Zea mays".to_string(), -12.5),
                ("Acer Saccharum".to_string(), -28.1),
            ]
        );
    }
}
