use crate::plotter::plot_option::{BAR_WIDTH, PlotOption};
use crate::plotter::sampler::SampleSet;
use strum_macros::{Display, EnumString};

/// zoom factor applied to the view limits by "zoom in"
pub const ZOOM_IN: f64 = 0.8;
/// zoom factor applied to the view limits by "zoom out"
pub const ZOOM_OUT: f64 = 1.25;

/// A press of one of the zoom buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ZoomStep {
    In,
    Out,
}

impl ZoomStep {
    pub fn factor(&self) -> f64 {
        match self {
            ZoomStep::In => ZOOM_IN,
            ZoomStep::Out => ZOOM_OUT,
        }
    }
}

/// The current view, passed into a draw and handed back updated.
///
/// Holds what the host has to remember between draws: the last plot style,
/// reused when only the number of samples changes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewState {
    pub style: PlotOption,
    /// sample count of the last successful draw, None before the first one
    pub sample_count: Option<usize>,
}

impl ViewState {
    pub fn new(style: PlotOption) -> Self {
        ViewState {
            style,
            sample_count: None,
        }
    }

    pub fn after_draw(self, style: PlotOption, sample_count: usize) -> Self {
        ViewState {
            style,
            sample_count: Some(sample_count),
        }
    }

    pub fn has_drawn(&self) -> bool {
        self.sample_count.is_some()
    }
}

/// Axis limits of a render surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

fn widen(extent: Option<(f64, f64)>) -> (f64, f64) {
    match extent {
        Some((lo, hi)) if lo == hi => (lo - 1.0, hi + 1.0),
        Some((lo, hi)) => (lo, hi),
        None => (-1.0, 1.0),
    }
}

impl ViewBounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        ViewBounds {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Limits that fit every finite point of `samples` drawn with `style`.
    ///
    /// Bars and stems start at y = 0, so 0 is always inside the y limits for them;
    /// bars also stick out half a bar width on both sides.
    pub fn fit(samples: &SampleSet, style: PlotOption) -> Self {
        let (mut x_min, mut x_max) = widen(samples.x_extent());
        let mut y_extent = samples.y_extent();
        match style {
            PlotOption::Bar => {
                x_min -= BAR_WIDTH / 2.0;
                x_max += BAR_WIDTH / 2.0;
                y_extent = y_extent.map(|(lo, hi)| (lo.min(0.0), hi.max(0.0)));
            }
            PlotOption::Stem => {
                y_extent = y_extent.map(|(lo, hi)| (lo.min(0.0), hi.max(0.0)));
            }
            PlotOption::Line | PlotOption::Scatter | PlotOption::Step => {}
        }
        let (y_min, y_max) = widen(y_extent);
        ViewBounds::new(x_min, x_max, y_min, y_max)
    }

    /// Multiplies every limit by `factor`, so (0, 10) zoomed by 0.8 becomes (0, 8).
    pub fn scaled(&self, factor: f64) -> Self {
        ViewBounds::new(
            self.x_min * factor,
            self.x_max * factor,
            self.y_min * factor,
            self.y_max * factor,
        )
    }

    pub fn x_range(&self) -> std::ops::Range<f64> {
        self.x_min..self.x_max
    }

    pub fn y_range(&self) -> std::ops::Range<f64> {
        self.y_min..self.y_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zoom_in_and_out() {
        let bounds = ViewBounds::new(0.0, 10.0, 0.0, 10.0);
        assert_eq!(bounds.scaled(ZOOM_IN), ViewBounds::new(0.0, 8.0, 0.0, 8.0));
        assert_eq!(bounds.scaled(ZOOM_OUT), ViewBounds::new(0.0, 12.5, 0.0, 12.5));
    }

    #[test]
    fn test_fit_line() {
        let samples = SampleSet {
            x: vec![1.0, 2.0, 3.0],
            y: vec![4.0, 6.0, 5.0],
        };
        assert_eq!(
            ViewBounds::fit(&samples, PlotOption::Line),
            ViewBounds::new(1.0, 3.0, 4.0, 6.0)
        );
    }

    #[test]
    fn test_fit_bar_includes_baseline() {
        let samples = SampleSet {
            x: vec![1.0, 2.0],
            y: vec![4.0, 6.0],
        };
        let bar = ViewBounds::fit(&samples, PlotOption::Bar);
        assert_relative_eq!(bar.x_min, 0.6, epsilon = 1e-12);
        assert_relative_eq!(bar.x_max, 2.4, epsilon = 1e-12);
        assert_eq!((bar.y_min, bar.y_max), (0.0, 6.0));
        assert_eq!(
            ViewBounds::fit(&samples, PlotOption::Stem),
            ViewBounds::new(1.0, 2.0, 0.0, 6.0)
        );
    }

    #[test]
    fn test_fit_degenerate() {
        let samples = SampleSet {
            x: vec![2.0, 2.0],
            y: vec![3.0, 3.0],
        };
        assert_eq!(
            ViewBounds::fit(&samples, PlotOption::Scatter),
            ViewBounds::new(1.0, 3.0, 2.0, 4.0)
        );
    }

    #[test]
    fn test_zoom_step() {
        use std::str::FromStr;
        assert_eq!(ZoomStep::from_str("in").unwrap().factor(), ZOOM_IN);
        assert_eq!(ZoomStep::from_str("OUT").unwrap().factor(), ZOOM_OUT);
        assert!(ZoomStep::from_str("sideways").is_err());
    }

    #[test]
    fn test_view_state_after_draw() {
        let view = ViewState::default();
        assert!(!view.has_drawn());
        let view = view.after_draw(PlotOption::Stem, 50);
        assert_eq!(view.style, PlotOption::Stem);
        assert_eq!(view.sample_count, Some(50));
    }
}
