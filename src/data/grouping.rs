use std::collections::BTreeMap;

use crate::error::{Error, Result};

use super::model::CorrectedSample;

// ---------------------------------------------------------------------------
// Group assignment: which samples belong to which operator-declared group
// ---------------------------------------------------------------------------

/// Maps group number → indices into the corrected-sample sequence, in the
/// order the samples were assigned.
///
/// Groups are numbered from 1. A count of 0 or 1 means "ungrouped", which is
/// represented as the single implicit group 1 holding every sample.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupAssignment {
    groups: BTreeMap<u32, Vec<usize>>,
}

/// Interpret an operator-supplied group count. Negative counts are rejected;
/// 0 and 1 both mean a single group.
pub fn normalize_group_count(count: i64) -> Result<u32> {
    match count {
        c if c < 0 => Err(Error::InvalidGroupCount(c)),
        0 | 1 => Ok(1),
        c => u32::try_from(c).map_err(|_| Error::InvalidGroupCount(c)),
    }
}

impl GroupAssignment {
    /// One implicit group containing samples `0..n_samples`.
    pub fn single(n_samples: usize) -> Self {
        Self {
            groups: BTreeMap::from([(1, (0..n_samples).collect())]),
        }
    }

    /// `count` declared groups, all still empty.
    pub fn with_groups(count: u32) -> Self {
        Self {
            groups: (1..=count).map(|g| (g, Vec::new())).collect(),
        }
    }

    /// Append `sample_index` to `group`. Numbers outside the declared range
    /// are rejected and leave the assignment unchanged.
    pub fn assign(&mut self, group: i64, sample_index: usize) -> Result<()> {
        let declared = self.group_count();
        let members = u32::try_from(group)
            .ok()
            .and_then(|g| self.groups.get_mut(&g))
            .ok_or(Error::GroupOutOfRange {
                group,
                groups: declared,
            })?;
        members.push(sample_index);
        Ok(())
    }

    /// Every declared group must hold at least one sample.
    pub fn validate(&self) -> Result<()> {
        if self.groups.is_empty() || self.groups.values().any(Vec::is_empty) {
            return Err(Error::InsufficientGroupData);
        }
        Ok(())
    }

    pub fn group_count(&self) -> u32 {
        self.groups.len() as u32
    }

    pub fn groups(&self) -> impl Iterator<Item = (u32, &[usize])> {
        self.groups.iter().map(|(g, members)| (*g, members.as_slice()))
    }

    /// Group containing the sample at `index`, if any.
    pub fn group_of(&self, index: usize) -> Option<u32> {
        self.groups
            .iter()
            .find(|(_, members)| members.contains(&index))
            .map(|(g, _)| *g)
    }

    /// Corrected values per group, for the statistics engine.
    pub fn values(&self, samples: &[CorrectedSample]) -> BTreeMap<u32, Vec<f64>> {
        self.groups
            .iter()
            .map(|(g, members)| {
                let values = members
                    .iter()
                    .filter_map(|&i| samples.get(i).map(|s| s.value))
                    .collect();
                (*g, values)
            })
            .collect()
    }
}
