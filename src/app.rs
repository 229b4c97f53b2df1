use eframe::egui;

use crate::chart::{Chart, ChartRenderer};
use crate::error::{Error, Result};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Window showing one finished chart.
pub struct ChartViewerApp {
    pub chart: Chart,
}

impl ChartViewerApp {
    pub fn new(chart: Chart) -> Self {
        Self { chart }
    }
}

impl eframe::App for ChartViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Bottom panel: summary ----
        egui::TopBottomPanel::bottom("summary_bar").show(ctx, |ui| {
            ui.label(format!(
                "{} samples, {} reference lines. Close the window to continue.",
                self.chart.bars.len(),
                self.chart.reference_lines.len()
            ));
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::corrected_value_plot(ui, &self.chart);
        });
    }
}

// ---------------------------------------------------------------------------
// Native window renderer
// ---------------------------------------------------------------------------

/// Opens each chart in a native window and blocks until it is closed.
#[derive(Debug, Default)]
pub struct WindowRenderer;

impl ChartRenderer for WindowRenderer {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1000.0, 600.0])
                .with_min_inner_size([600.0, 400.0]),
            ..Default::default()
        };

        let app = ChartViewerApp::new(chart.clone());
        eframe::run_native(
            &chart.title,
            options,
            Box::new(|_cc| Ok(Box::new(app))),
        )
        .map_err(|e| Error::Render(e.to_string()))
    }
}
