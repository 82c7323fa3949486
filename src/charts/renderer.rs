//! Static Chart Renderer
//! Draws the log-scale line chart with plotters (SVG backend) and converts it to a vector PDF.
//!
//! Layout:
//! 1. Title centered on top
//! 2. Categorical x-axis, one tick per label, labels rotated vertically
//! 3. Log10 y-axis with ticks at exactly the observed values
//! 4. Single line series with markers and a legend box

use crate::charts::axis::{format_tick, plottable_runs, LogAxis};
use crate::charts::coord::{CategoryCoord, ObservedLogCoord};
use crate::charts::ChartStyle;
use crate::data::BenchmarkSeries;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use svg2pdf::usvg;
use svg2pdf::usvg::fontdb::{Family, Query};
use thiserror::Error;

const LABEL_FONT_SIZE: u32 = 11;
const CAPTION_FONT_SIZE: u32 = 15;
const Y_LABEL_AREA: u32 = 70;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Failed to parse chart SVG: {0}")]
    Svg(#[from] usvg::Error),
    #[error("Failed to convert chart to PDF: {0}")]
    Pdf(String),
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(err.to_string())
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart as an SVG document.
    pub fn render_svg(series: &BenchmarkSeries, style: &ChartStyle) -> Result<String, RenderError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, style.size).into_drawing_area();
            Self::draw_chart(&root, series, style)?;
            root.present()?;
        }
        Ok(svg)
    }

    /// Render the chart as PDF bytes.
    pub fn render_pdf(series: &BenchmarkSeries, style: &ChartStyle) -> Result<Vec<u8>, RenderError> {
        let svg = Self::render_svg(series, style)?;

        let mut options = usvg::Options::default();
        Self::load_fonts(options.fontdb_mut());

        let tree = usvg::Tree::from_str(&svg, &options)?;
        svg2pdf::to_pdf(
            &tree,
            svg2pdf::ConversionOptions::default(),
            svg2pdf::PageOptions::default(),
        )
        .map_err(|e| RenderError::Pdf(format!("{e:?}")))
    }

    /// Render to memory first, then write the file in one go.
    /// Nothing is written when rendering fails.
    pub fn save_pdf(
        series: &BenchmarkSeries,
        style: &ChartStyle,
        path: &Path,
    ) -> Result<usize, RenderError> {
        let pdf = Self::render_pdf(series, style)?;
        std::fs::write(path, &pdf).map_err(|source| RenderError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(pdf.len())
    }

    fn draw_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        series: &BenchmarkSeries,
        style: &ChartStyle,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE)?;

        let labels = series.labels();
        let axis = LogAxis::from_values(series.values());
        tracing::debug!(
            min = axis.min_value(),
            max = axis.max_value(),
            ticks = axis.ticks.len(),
            "log axis range"
        );

        let mut chart = ChartBuilder::on(root)
            .caption(style.title, ("sans-serif", CAPTION_FONT_SIZE))
            .margin(15)
            .x_label_area_size(Self::x_label_area(labels))
            .y_label_area_size(Y_LABEL_AREA)
            .build_cartesian_2d(
                CategoryCoord::new(labels.len()),
                ObservedLogCoord::new(axis.min_value()..axis.max_value(), axis.ticks.clone()),
            )?;

        let label_at = |x: &f64| {
            let idx = x.round();
            if idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        };
        let tick_text = |y: &f64| format_tick(*y);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(style.x_label)
            .y_desc(style.y_label)
            .x_label_formatter(&label_at)
            .y_label_formatter(&tick_text)
            .x_label_style(
                ("sans-serif", LABEL_FONT_SIZE)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_label_style(("sans-serif", LABEL_FONT_SIZE))
            .draw()?;

        // A non-positive value breaks the line, like a masked point
        let mut runs: Vec<Vec<(f64, f64)>> = plottable_runs(series.values())
            .into_iter()
            .map(|run| run.into_iter().map(|(idx, value)| (idx as f64, value)).collect())
            .collect();
        if runs.is_empty() {
            runs.push(Vec::new());
        }

        let color = style.color;
        for (i, run) in runs.iter().enumerate() {
            let anno = chart.draw_series(LineSeries::new(run.clone(), color.stroke_width(2)))?;
            if i == 0 {
                anno.label(style.series_label).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
            chart.draw_series(run.iter().map(|&point| Circle::new(point, 3, color.filled())))?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", LABEL_FONT_SIZE))
            .draw()?;

        Ok(())
    }

    /// Room below the plot for vertical category labels.
    fn x_label_area(labels: &[String]) -> u32 {
        let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;
        (longest * 7 + 40).clamp(50, 160)
    }

    /// Load system fonts; fall back to any installed face when no sans-serif family resolves.
    fn load_fonts(fontdb: &mut usvg::fontdb::Database) {
        fontdb.load_system_fonts();

        let query = Query {
            families: &[Family::SansSerif],
            ..Query::default()
        };
        if fontdb.query(&query).is_some() {
            return;
        }

        let fallback = fontdb
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()));
        match fallback {
            Some(family) => {
                tracing::debug!(%family, "using fallback font family");
                fontdb.set_sans_serif_family(family);
            }
            None => tracing::warn!("no system fonts found; chart text will be missing from the PDF"),
        }
    }
}
