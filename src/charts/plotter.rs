//! Chart Plotter Module
//! Draws the interactive log-scale chart using egui_plot.
//!
//! egui_plot has no log axis, so points are plotted as `log10(value)` and the
//! y-axis marks are formatted back into the measured values.

use crate::charts::axis::{format_tick, plottable_points, plottable_runs, LogAxis};
use crate::charts::ChartStyle;
use crate::data::BenchmarkSeries;
use egui::Color32;
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints, Points};

/// Creates the benchmark chart using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Convert the style colour for egui.
    pub fn series_color(style: &ChartStyle) -> Color32 {
        Color32::from_rgb(style.color.0, style.color.1, style.color.2)
    }

    /// Points as `[category index, log10(value)]`, skipping values a log axis can't show.
    pub fn log_points(series: &BenchmarkSeries) -> Vec<[f64; 2]> {
        plottable_points(series.values())
            .into_iter()
            .map(|(idx, value)| [idx as f64, value.log10()])
            .collect()
    }

    /// Line segments in log space. A value the log axis can't show breaks the line.
    pub fn log_runs(series: &BenchmarkSeries) -> Vec<Vec<[f64; 2]>> {
        plottable_runs(series.values())
            .into_iter()
            .map(|run| {
                run.into_iter()
                    .map(|(idx, value)| [idx as f64, value.log10()])
                    .collect()
            })
            .collect()
    }

    /// One y mark per observed value, in log space.
    pub fn y_grid_marks(axis: &LogAxis) -> Vec<GridMark> {
        axis.ticks
            .iter()
            .map(|&value| GridMark {
                value: value.log10(),
                step_size: 1.0,
            })
            .collect()
    }

    /// One x mark per category.
    pub fn x_grid_marks(count: usize) -> Vec<GridMark> {
        (0..count)
            .map(|i| GridMark {
                value: i as f64,
                step_size: 1.0,
            })
            .collect()
    }

    /// Label shown under an x mark.
    fn category_label(labels: &[String], position: f64) -> String {
        let idx = position.round();
        if idx < 0.0 || (position - idx).abs() > 1e-6 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }

    /// Draw the log-scale line chart.
    /// X-axis: labels in file order, Y-axis: values (log10)
    pub fn draw_log_line_chart(ui: &mut egui::Ui, series: &BenchmarkSeries, style: &ChartStyle) {
        let axis = LogAxis::from_values(series.values());
        let color = Self::series_color(style);
        let points = Self::log_points(series);
        let runs = Self::log_runs(series);

        let x_marks = Self::x_grid_marks(series.len());
        let y_marks = Self::y_grid_marks(&axis);
        let axis_labels = series.labels().to_vec();
        let hover_labels = axis_labels.clone();
        let x_end = series.len().max(1) as f64 - 0.5;

        Plot::new("enclave_init_log_chart")
            .legend(Legend::default())
            .x_axis_label(style.x_label)
            .y_axis_label(style.y_label)
            .allow_scroll(false)
            .include_x(-0.5)
            .include_x(x_end)
            .include_y(axis.min_exp)
            .include_y(axis.max_exp)
            .x_grid_spacer(move |_input| x_marks.clone())
            .y_grid_spacer(move |_input| y_marks.clone())
            .x_axis_formatter(move |mark, _range| Self::category_label(&axis_labels, mark.value))
            .y_axis_formatter(|mark, _range| format_tick(10f64.powf(mark.value)))
            .label_formatter(move |_name, point| {
                let label = Self::category_label(&hover_labels, point.x.round());
                format!("{}\n{}", label, format_tick(10f64.powf(point.y)))
            })
            .show(ui, |plot_ui| {
                // Same name on every run keeps a single legend entry
                for run in runs {
                    plot_ui.line(
                        Line::new(PlotPoints::from(run))
                            .color(color)
                            .width(1.5)
                            .name(style.series_label),
                    );
                }

                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .radius(3.0)
                        .color(color),
                );
            });
    }
}
