//! Collaborators of the draw pipeline: the render surface and the error sink.
//!
//! Concrete surfaces live in `Utils::plots`; this module has the traits, the
//! state every surface keeps to be able to zoom, and the geometry of the
//! styles that are not plain polylines.
use crate::plotter::errors::PlotError;
use crate::plotter::plot_option::{BAR_WIDTH, PlotOption};
use crate::plotter::sampler::SampleSet;
use crate::plotter::view::ViewBounds;
use itertools::Itertools;
use log::warn;

/// A surface that can draw a sample set in a given style and zoom its own view.
pub trait Renderer {
    /// Replaces whatever was drawn before; returns the limits the surface chose.
    fn draw(&mut self, samples: &SampleSet, style: PlotOption) -> Result<ViewBounds, PlotError>;

    /// Multiplies the current limits by `factor` and redraws.
    fn zoom(&mut self, factor: f64) -> Result<ViewBounds, PlotError>;

    /// Get renderer name for debugging/logging
    fn name(&self) -> &str {
        "unnamed_renderer"
    }
}

/// Receives the user-facing message of a failed draw.
pub trait ErrorSink {
    fn report(&mut self, title: &str, message: &str);
}

/// What a surface has on screen: needed to redraw after a zoom.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceState {
    pub current: Option<(SampleSet, PlotOption, ViewBounds)>,
}

impl SurfaceState {
    /// Remembers a new plot and fits the view to it.
    pub fn show(&mut self, samples: &SampleSet, style: PlotOption) -> ViewBounds {
        let bounds = ViewBounds::fit(samples, style);
        self.current = Some((samples.clone(), style, bounds));
        bounds
    }

    /// Scales the current view; fails if nothing has been drawn yet.
    pub fn zoom(&mut self, factor: f64) -> Result<(&SampleSet, PlotOption, ViewBounds), PlotError> {
        match self.current.as_mut() {
            Some((samples, style, bounds)) => {
                *bounds = bounds.scaled(factor);
                Ok((samples, *style, *bounds))
            }
            None => Err(PlotError::Render("nothing to zoom, draw a plot first".to_string())),
        }
    }

    pub fn bounds(&self) -> Option<ViewBounds> {
        self.current.as_ref().map(|(_, _, bounds)| *bounds)
    }
}

/// Vertices of a staircase where y_i holds on (x_{i-1}, x_i].
pub fn step_path(samples: &SampleSet) -> Vec<(f64, f64)> {
    let mut path = Vec::with_capacity(2 * samples.len());
    if let Some(first) = samples.points().next() {
        path.push(first);
    }
    for ((x0, _), (x1, y1)) in samples.points().tuple_windows() {
        path.push((x0, y1));
        path.push((x1, y1));
    }
    path
}

/// One segment (x, 0) -> (x, y) per point.
pub fn stem_segments(samples: &SampleSet) -> Vec<[(f64, f64); 2]> {
    samples.points().map(|(x, y)| [(x, 0.0), (x, y)]).collect()
}

/// Opposite corners of one bar per point, from the baseline to y.
pub fn bar_rects(samples: &SampleSet) -> Vec<[(f64, f64); 2]> {
    let half = BAR_WIDTH / 2.0;
    samples
        .points()
        .map(|(x, y)| [(x - half, 0.0), (x + half, y)])
        .collect()
}

/// Sends reports to the log. Keeps the last message so a CLI can pick its exit status.
#[derive(Debug, Default)]
pub struct LogErrorSink {
    pub last_message: Option<String>,
}

impl ErrorSink for LogErrorSink {
    fn report(&mut self, title: &str, message: &str) {
        warn!("{}: {}", title, message);
        self.last_message = Some(message.to_string());
    }
}

/// Keeps every report, in order.
#[derive(Debug, Default)]
pub struct CollectingErrorSink {
    pub reports: Vec<(String, String)>,
}

impl ErrorSink for CollectingErrorSink {
    fn report(&mut self, title: &str, message: &str) {
        self.reports.push((title.to_string(), message.to_string()));
    }
}

/// In-memory surface: records the calls it received and draws nothing.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub state: SurfaceState,
    pub draws: Vec<(SampleSet, PlotOption)>,
    pub zooms: Vec<f64>,
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, samples: &SampleSet, style: PlotOption) -> Result<ViewBounds, PlotError> {
        self.draws.push((samples.clone(), style));
        Ok(self.state.show(samples, style))
    }

    fn zoom(&mut self, factor: f64) -> Result<ViewBounds, PlotError> {
        let (_, _, bounds) = self.state.zoom(factor)?;
        self.zooms.push(factor);
        Ok(bounds)
    }

    fn name(&self) -> &str {
        "recording"
    }
}
