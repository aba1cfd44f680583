//! The draw controller: the piece the host calls on "Plot", on a style button,
//! when the number of samples changes and on the zoom buttons.
use crate::plotter::errors::{INVALID_INPUT_TITLE, PlotError};
use crate::plotter::plot_option::PlotOption;
use crate::plotter::render::{ErrorSink, Renderer};
use crate::plotter::sampler::{SampleSet, sample_validated};
use crate::plotter::validation::{validate_function, validate_range, validate_sample_count};
use crate::plotter::view::{ViewBounds, ViewState, ZOOM_IN, ZOOM_OUT};
use log::info;

/// title of the report for parse, evaluation and render failures
pub const PLOT_ERROR_TITLE: &str = "Cannot plot";
/// largest number of samples accepted unless configured otherwise
pub const DEFAULT_MAX_SAMPLES: usize = 500;
/// number of samples used when the host does not pick one
pub const DEFAULT_SAMPLES: i64 = 100;

/// Raw values read from the input collaborator for one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRequest {
    pub min_text: String,
    pub max_text: String,
    pub function_text: String,
    pub sample_count: i64,
}

impl DrawRequest {
    pub fn new(function_text: &str, min_text: &str, max_text: &str, sample_count: i64) -> Self {
        DrawRequest {
            min_text: min_text.to_string(),
            max_text: max_text.to_string(),
            function_text: function_text.to_string(),
            sample_count,
        }
    }
}

pub struct Plotter<R: Renderer, S: ErrorSink> {
    renderer: R,
    sink: S,
    max_samples: usize,
    last_samples: Option<SampleSet>,
}

impl<R: Renderer, S: ErrorSink> Plotter<R, S> {
    pub fn new(renderer: R, sink: S) -> Self {
        Plotter {
            renderer,
            sink,
            max_samples: DEFAULT_MAX_SAMPLES,
            last_samples: None,
        }
    }

    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    /// validate -> parse -> sample. Validation failures stop here, before the parser runs.
    pub fn prepare_to_draw(&self, request: &DrawRequest) -> Result<(SampleSet, usize), PlotError> {
        let range = validate_range(&request.min_text, &request.max_text)?;
        let function = validate_function(&request.function_text)?;
        let sample_count = validate_sample_count(request.sample_count, self.max_samples)?;
        let samples = sample_validated(&function, range, sample_count)?;
        Ok((samples, sample_count))
    }

    /// Like [`Plotter::draw`], but also hands the error back after reporting it.
    pub fn try_draw(
        &mut self,
        request: &DrawRequest,
        view: ViewState,
        style: PlotOption,
    ) -> Result<ViewState, PlotError> {
        let result = self.prepare_to_draw(request).and_then(|(samples, sample_count)| {
            let bounds = self.renderer.draw(&samples, style)?;
            info!(
                "{} drew '{}' as {} plot, view {:?}",
                self.renderer.name(),
                request.function_text,
                style,
                bounds
            );
            Ok((samples, sample_count))
        });
        match result {
            Ok((samples, sample_count)) => {
                self.last_samples = Some(samples);
                Ok(view.after_draw(style, sample_count))
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Draws `request` in `style`. On failure the error is reported and `view` comes back unchanged.
    pub fn draw(&mut self, request: &DrawRequest, view: ViewState, style: PlotOption) -> ViewState {
        self.try_draw(request, view, style).unwrap_or(view)
    }

    /// Draws again in the style of the last draw, e.g. after the number of samples changed.
    pub fn redraw(&mut self, request: &DrawRequest, view: ViewState) -> ViewState {
        self.draw(request, view, view.style)
    }

    pub fn zoom(&mut self, factor: f64) -> Result<ViewBounds, PlotError> {
        let result = self.renderer.zoom(factor);
        match &result {
            Ok(bounds) => info!("zoom by {}, view {:?}", factor, bounds),
            Err(err) => self.report(err),
        }
        result
    }

    pub fn zoom_in(&mut self) -> Result<ViewBounds, PlotError> {
        self.zoom(ZOOM_IN)
    }

    pub fn zoom_out(&mut self) -> Result<ViewBounds, PlotError> {
        self.zoom(ZOOM_OUT)
    }

    fn report(&mut self, err: &PlotError) {
        let title = if err.is_validation() {
            INVALID_INPUT_TITLE
        } else {
            PLOT_ERROR_TITLE
        };
        self.sink.report(title, &err.user_message());
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// samples of the last successful draw; a failed draw leaves them as they were
    pub fn last_samples(&self) -> Option<&SampleSet> {
        self.last_samples.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotter::render::{CollectingErrorSink, RecordingRenderer};
    use strum::IntoEnumIterator;

    fn plotter() -> Plotter<RecordingRenderer, CollectingErrorSink> {
        Plotter::new(RecordingRenderer::default(), CollectingErrorSink::default())
    }

    #[test]
    fn test_prepare_to_draw() {
        let plotter = plotter();
        let request = DrawRequest::new("x**2", "0", "10", 100);
        let (samples, n) = plotter.prepare_to_draw(&request).unwrap();
        assert_eq!(n, 100);
        assert_eq!(samples.len(), 101);
        assert_eq!(samples.x[0], 0.0);
        assert_eq!(samples.x[100], 10.0);
        assert_eq!(samples.y[0], 0.0);
        assert_eq!(samples.y[100], 100.0);
    }

    #[test]
    fn test_draw_every_option_updates_view() {
        let mut plotter = plotter();
        let request = DrawRequest::new("2*x + 3", "0", "10", 5);
        let mut view = ViewState::default();
        for option in PlotOption::iter() {
            view = plotter.draw(&request, view, option);
            assert_eq!(view.style, option);
            assert_eq!(view.sample_count, Some(5));
        }
        assert_eq!(plotter.renderer().draws.len(), 5);
        assert!(plotter.sink().reports.is_empty());
    }

    #[test]
    fn test_invalid_range_is_reported_and_view_kept() {
        let mut plotter = plotter();
        let view = ViewState::new(PlotOption::Bar);
        let request = DrawRequest::new("x", "a", "10", 10);
        let after = plotter.draw(&request, view, PlotOption::Scatter);
        assert_eq!(after, view);
        assert!(plotter.renderer().draws.is_empty());
        assert_eq!(
            plotter.sink().reports,
            vec![("Invalid input".to_string(), "Enter a valid range of x.".to_string())]
        );
    }

    #[test]
    fn test_invalid_function_short_circuits() {
        let mut plotter = plotter();
        let request = DrawRequest::new("2*x + @", "0", "10", 10);
        let result = plotter.try_draw(&request, ViewState::default(), PlotOption::Line);
        assert_eq!(result, Err(PlotError::InvalidFunction));
        // one report: the parser never ran
        assert_eq!(
            plotter.sink().reports,
            vec![("Invalid input".to_string(), "Enter a valid function of x.".to_string())]
        );
    }

    #[test]
    fn test_parse_and_domain_errors_are_reported() {
        let mut plotter = plotter();
        let view = ViewState::default();
        plotter.draw(&DrawRequest::new("(x", "0", "1", 10), view, PlotOption::Line);
        plotter.draw(&DrawRequest::new("1/x", "-1", "1", 2), view, PlotOption::Line);
        let reports = &plotter.sink().reports;
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|(title, _)| title == PLOT_ERROR_TITLE));
        assert!(reports[0].1.starts_with("cannot parse the function"));
        assert!(reports[1].1.contains("x = 0"));
        assert!(plotter.renderer().draws.is_empty());
    }

    #[test]
    fn test_sample_count_out_of_range() {
        let mut plotter = plotter().with_max_samples(100);
        let view = ViewState::default();
        for count in [0, -1, 101] {
            let request = DrawRequest::new("x", "0", "1", count);
            assert_eq!(
                plotter.try_draw(&request, view, PlotOption::Line),
                Err(PlotError::SampleCount(count))
            );
        }
        assert_eq!(plotter.sink().reports.len(), 3);
    }

    #[test]
    fn test_redraw_keeps_last_style() {
        let mut plotter = plotter();
        let view = plotter.draw(
            &DrawRequest::new("x", "0", "1", 10),
            ViewState::default(),
            PlotOption::Step,
        );
        let view = plotter.redraw(&DrawRequest::new("x", "0", "1", 20), view);
        assert_eq!(view.style, PlotOption::Step);
        assert_eq!(view.sample_count, Some(20));
        let (samples, style) = plotter.renderer().draws.last().unwrap();
        assert_eq!(*style, PlotOption::Step);
        assert_eq!(samples.len(), 21);
    }

    #[test]
    fn test_zoom_in_and_out() {
        let mut plotter = plotter();
        plotter.draw(
            &DrawRequest::new("x", "0", "10", 10),
            ViewState::default(),
            PlotOption::Line,
        );
        assert_eq!(
            plotter.zoom_in().unwrap(),
            ViewBounds::new(0.0, 8.0, 0.0, 8.0)
        );
        assert_eq!(
            plotter.zoom_out().unwrap(),
            ViewBounds::new(0.0, 10.0, 0.0, 10.0)
        );
        assert_eq!(plotter.renderer().zooms, vec![ZOOM_IN, ZOOM_OUT]);
    }

    #[test]
    fn test_last_samples_survive_a_failed_draw() {
        let mut plotter = plotter();
        assert!(plotter.last_samples().is_none());
        let view = plotter.draw(
            &DrawRequest::new("x + 0.5", "0", "1", 2),
            ViewState::default(),
            PlotOption::Line,
        );
        plotter.draw(&DrawRequest::new("1/x", "-1", "1", 2), view, PlotOption::Line);
        let samples = plotter.last_samples().unwrap();
        assert_eq!(samples.y, vec![0.5, 1.0, 1.5]);
        assert_eq!(Some(samples), plotter.renderer().draws.last().map(|(s, _)| s));
    }

    #[test]
    fn test_zoom_before_draw_is_reported() {
        let mut plotter = plotter();
        assert!(plotter.zoom_in().is_err());
        assert_eq!(plotter.sink().reports.len(), 1);
        assert_eq!(plotter.sink().reports[0].0, PLOT_ERROR_TITLE);
    }
}
