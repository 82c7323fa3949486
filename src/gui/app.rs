//! Report Viewer Application
//! Single window showing the benchmark chart until the user closes it.

use crate::charts::{ChartPlotter, ChartStyle};
use crate::data::BenchmarkSeries;
use egui::RichText;

const WINDOW_TITLE: &str = "Enclave Init Benchmark";

/// Viewer window for one rendered report.
pub struct ReportViewerApp {
    series: BenchmarkSeries,
    style: ChartStyle,
}

impl ReportViewerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, series: BenchmarkSeries, style: ChartStyle) -> Self {
        Self { series, style }
    }
}

impl eframe::App for ReportViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(self.style.title).size(16.0).strong());
            });
            ui.add_space(6.0);

            if self.series.is_empty() {
                ui.label(RichText::new("No data rows").italics());
            }

            ChartPlotter::draw_log_line_chart(ui, &self.series, &self.style);
        });
    }
}

/// Open the viewer and block until the window is closed.
pub fn show(series: BenchmarkSeries, style: ChartStyle) -> eframe::Result<()> {
    let (width, height) = style.size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32 + 160.0, height as f32 + 120.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    tracing::info!(rows = series.len(), "opening chart viewer");
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(ReportViewerApp::new(cc, series, style)))),
    )
}
