/// Data layer: core types, loading, calibration, reference lookup, grouping.
///
/// Architecture:
/// ```text
///  analyzer export (.csv)           leaf13C_database.csv
///        │                                  │
///        ▼                                  ▼
///   ┌──────────┐                     ┌────────────┐
///   │  reader   │  → Vec<Record>     │ reference  │  species → value / NA
///   └──────────┘                     └────────────┘
///        │                                  │
///        ▼                                  ▼
///   ┌─────────────┐                  ┌──────────────┐
///   │ calibration │ → CorrectedSample │ SpeciesCache │  memo per session
///   └─────────────┘                  └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ grouping  │  group number → sample indices
///   └──────────┘
/// ```

pub mod calibration;
pub mod grouping;
pub mod model;
pub mod reader;
pub mod reference;
