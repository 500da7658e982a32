use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use serde::Deserialize;
use thiserror::Error;

const CHART_SIZE: (u32, u32) = (800, 600);

/// A 2-D line chart request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("x and y must have the same length (x: {x}, y: {y})")]
    LengthMismatch { x: usize, y: usize },

    #[error("Chart data contains non-finite values")]
    NonFinite,

    #[error("Failed to create chart directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render chart: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;

pub trait ChartRenderer: Send + Sync {
    /// Draw the chart and return where it was written.
    fn render(&self, spec: &ChartSpec) -> Result<PathBuf>;
}

/// Writes SVG files into a directory and optionally opens them in the
/// platform viewer.
pub struct SvgChartRenderer {
    dir: PathBuf,
    open_viewer: bool,
}

impl SvgChartRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            open_viewer: true,
        }
    }

    pub fn with_viewer(mut self, open_viewer: bool) -> Self {
        self.open_viewer = open_viewer;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<PathBuf> {
        if spec.x.len() != spec.y.len() {
            return Err(ChartError::LengthMismatch {
                x: spec.x.len(),
                y: spec.y.len(),
            });
        }
        if spec.x.iter().chain(&spec.y).any(|v| !v.is_finite()) {
            return Err(ChartError::NonFinite);
        }

        std::fs::create_dir_all(&self.dir).map_err(|source| ChartError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self
            .dir
            .join(format!("chart-{}.svg", uuid::Uuid::new_v4().simple()));
        draw_line_chart(&path, spec)?;
        log::info!("Chart written to {}", path.display());

        if self.open_viewer {
            if let Err(e) = webbrowser::open(&path.to_string_lossy()) {
                log::warn!("Could not open chart viewer for {}: {}", path.display(), e);
            }
        }

        Ok(path)
    }
}

fn draw_line_chart(path: &Path, spec: &ChartSpec) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(axis_range(&spec.x), axis_range(&spec.y))
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(spec.xlabel.as_str())
        .y_desc(spec.ylabel.as_str())
        .draw()
        .map_err(render_err)?;

    let points = spec.x.iter().copied().zip(spec.y.iter().copied());
    chart
        .draw_series(LineSeries::new(points, &BLUE))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// Data bounds, widened when the data is empty or constant.
fn axis_range(values: &[f64]) -> Range<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if min == max {
        return (min - 1.0)..(max + 1.0);
    }
    min..max
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(x: Vec<f64>, y: Vec<f64>) -> ChartSpec {
        ChartSpec {
            title: "Monthly signups".to_string(),
            xlabel: "month".to_string(),
            ylabel: "users".to_string(),
            x,
            y,
        }
    }

    #[test]
    fn renders_svg_into_chart_dir() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SvgChartRenderer::new(dir.path().join("charts")).with_viewer(false);

        let path = renderer
            .render(&spec(vec![1.0, 2.0, 3.0], vec![10.0, 4.0, 12.5]))
            .unwrap();

        assert!(path.starts_with(renderer.dir()));
        assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("svg"));
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Monthly signups"));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SvgChartRenderer::new(dir.path()).with_viewer(false);

        let error = renderer
            .render(&spec(vec![1.0, 2.0], vec![1.0]))
            .unwrap_err();

        assert!(matches!(error, ChartError::LengthMismatch { x: 2, y: 1 }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn axis_range_pads_degenerate_data() {
        assert_eq!(axis_range(&[]), 0.0..1.0);
        assert_eq!(axis_range(&[5.0, 5.0]), 4.0..6.0);
        assert_eq!(axis_range(&[3.0, -1.0, 2.0]), -1.0..3.0);
    }
}
