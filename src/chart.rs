//! Bar chart model of corrected values, independent of how it is displayed.

use eframe::egui::Color32;

use crate::color::{GroupPalette, DEFAULT_BAR_COLOR};
use crate::data::grouping::GroupAssignment;
use crate::data::model::CorrectedSample;
use crate::error::Result;

pub const CHART_TITLE: &str = "Leaf Delta 13C";
pub const X_AXIS_LABEL: &str = "Sample";
pub const Y_AXIS_LABEL: &str = "Delta 13C";

/// One bar: a sample's corrected value.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    pub color: Color32,
    pub group: Option<u32>,
}

/// A dashed horizontal line at a species' literature value.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub species: String,
    pub value: f64,
}

impl ReferenceLine {
    pub fn label(&self) -> String {
        format!(
            "{} ({} leaf delta 13C literature value)",
            self.value, self.species
        )
    }
}

/// Everything needed to draw the corrected-value chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// In corrected-sample order.
    pub bars: Vec<ChartBar>,
    pub reference_lines: Vec<ReferenceLine>,
}

impl Chart {
    /// Build the chart.
    ///
    /// * `names` – optional display names, paired with samples by position;
    ///   missing or empty names fall back to the sample identifier.
    /// * `references` – `(species, literature value)` pairs; one line each.
    /// * `groups` – bars of grouped samples take their group's palette colour.
    pub fn build(
        samples: &[CorrectedSample],
        names: Option<&[Option<String>]>,
        references: &[(String, f64)],
        groups: Option<&GroupAssignment>,
    ) -> Self {
        let palette = GroupPalette::default();

        let bars = samples
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                let label = names
                    .and_then(|n| n.get(i))
                    .and_then(|n| n.as_deref())
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or(sample.sample_id.as_str())
                    .to_string();
                let group = groups.and_then(|g| g.group_of(i));
                let color = group.map_or(DEFAULT_BAR_COLOR, |g| palette.color_for(g));
                ChartBar {
                    label,
                    value: sample.value,
                    color,
                    group,
                }
            })
            .collect();

        let reference_lines = references
            .iter()
            .map(|(species, value)| ReferenceLine {
                species: species.clone(),
                value: *value,
            })
            .collect();

        Self {
            title: CHART_TITLE.to_string(),
            x_label: X_AXIS_LABEL.to_string(),
            y_label: Y_AXIS_LABEL.to_string(),
            bars,
            reference_lines,
        }
    }
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// Displays a finished chart. Rendering may block until the viewer is closed.
pub trait ChartRenderer {
    fn render(&mut self, chart: &Chart) -> Result<()>;
}

/// Keeps every chart it is asked to render.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub charts: Vec<Chart>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        self.charts.push(chart.clone());
        Ok(())
    }
}
