use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, HLine, Legend, LineStyle, Plot};

use crate::chart::Chart;

// ---------------------------------------------------------------------------
// Corrected-value bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render the chart: one bar per sample at x = 0, 1, 2, … in sample order,
/// plus a dashed line for each reference value.
pub fn corrected_value_plot(ui: &mut Ui, chart: &Chart) {
    ui.heading(&chart.title);

    if chart.bars.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No samples to plot.");
        });
        return;
    }

    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            Bar::new(i as f64, bar.value)
                .name(&bar.label)
                .fill(bar.color)
                .width(0.8)
        })
        .collect();

    // Tick labels only on integer positions, which is where the bars are.
    let labels: Vec<String> = chart.bars.iter().map(|b| b.label.clone()).collect();
    let x_formatter = move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    };

    Plot::new("corrected_value_plot")
        .legend(Legend::default())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .x_axis_formatter(x_formatter)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Adjusted delta 13C"));

            for line in &chart.reference_lines {
                plot_ui.hline(
                    HLine::new(line.value)
                        .name(line.label())
                        .color(Color32::BLACK)
                        .style(LineStyle::dashed_loose()),
                );
            }
        });
}
