//! function plotter core: from the three strings a user types to the arrays a render surface draws
///
/// checks on the raw range, function and sample count
///# Example
/// ```
/// use RustedPlotter::plotter::validation::{validate_function, validate_range};
/// assert!(validate_range("0", "10").is_ok());
/// assert!(validate_function("2*x + @").is_err());
/// ```
pub mod validation;
/// parse once, substitute at every grid point
pub mod sampler;
/// error kinds of a draw and their user-facing messages
pub mod errors;
/// line, scatter, bar, stem, step
pub mod plot_option;
/// current view value object, view limits and zoom factors
pub mod view;
/// render surface and error sink traits
pub mod render;
/// draw controller
///# Example
/// ```
/// use RustedPlotter::plotter::app::{DrawRequest, Plotter};
/// use RustedPlotter::plotter::plot_option::PlotOption;
/// use RustedPlotter::plotter::render::{CollectingErrorSink, RecordingRenderer};
/// use RustedPlotter::plotter::view::ViewState;
/// let mut plotter = Plotter::new(RecordingRenderer::default(), CollectingErrorSink::default());
/// let request = DrawRequest::new("x^2", "0", "10", 100);
/// let view = plotter.draw(&request, ViewState::default(), PlotOption::Scatter);
/// assert_eq!(view.style, PlotOption::Scatter);
/// plotter.zoom_in().unwrap();
/// ```
pub mod app;
