//! Charts module - static and interactive rendering

pub mod axis;
mod coord;
mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};

use plotters::prelude::{RGBColor, RED};

/// Fixed texts, colour and figure size shared by both renderers.
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series_label: &'static str,
    pub color: RGBColor,
    /// Figure size in pixels (6.4 x 4.8 in at 100 dpi)
    pub size: (u32, u32),
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "Plot of the benchmark enclave initialisation time consumption",
            x_label: "Enclave sizes",
            y_label: "#average enclave initialization time",
            series_label: "enclave init time curve",
            color: RED,
            size: (640, 480),
        }
    }
}
