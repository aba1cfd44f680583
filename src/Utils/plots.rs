//! PNG render surfaces: one on top of plotters, one on top of gnuplot.
//! Both keep the last plot in a [`SurfaceState`] so a zoom can redraw it.
use crate::plotter::errors::PlotError;
use crate::plotter::plot_option::{BAR_WIDTH, PlotOption};
use crate::plotter::render::{Renderer, SurfaceState, bar_rects, step_path, stem_segments};
use crate::plotter::sampler::SampleSet;
use crate::plotter::view::ViewBounds;
use gnuplot::Figure;
use log::info;
use std::fmt::Display;
use std::path::PathBuf;
use strum_macros::{Display as StrumDisplay, EnumString};

pub const DEFAULT_SIZE: (u32, u32) = (800, 700);

/// which library draws the PNG
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Backend {
    #[default]
    Plotters,
    Gnuplot,
}

fn render_err<E: Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}

fn finite_points(samples: &SampleSet) -> Vec<(f64, f64)> {
    samples
        .points()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect()
}

/////////////////////////////////////PLOTTERS////////////////////////////////////////////
pub struct PlottersRenderer {
    output: PathBuf,
    size: (u32, u32),
    caption: String,
    /// caption and axis labels need a system font, shapes do not
    show_text: bool,
    state: SurfaceState,
}

impl PlottersRenderer {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        PlottersRenderer {
            output: output.into(),
            size: DEFAULT_SIZE,
            caption: String::new(),
            show_text: true,
            state: SurfaceState::default(),
        }
    }

    pub fn with_size(mut self, size: (u32, u32)) -> Self {
        self.size = size;
        self
    }

    pub fn with_caption(mut self, caption: &str) -> Self {
        self.caption = caption.to_string();
        self
    }

    pub fn without_text(mut self) -> Self {
        self.show_text = false;
        self
    }

    pub fn bounds(&self) -> Option<ViewBounds> {
        self.state.bounds()
    }

    fn render(
        &self,
        samples: &SampleSet,
        style: PlotOption,
        bounds: ViewBounds,
    ) -> Result<(), PlotError> {
        use plotters::prelude::*;

        let root_area = BitMapBackend::new(&self.output, self.size).into_drawing_area();
        root_area.fill(&WHITE).map_err(render_err)?;

        let mut builder = ChartBuilder::on(&root_area);
        builder.margin(10);
        if self.show_text {
            builder
                .caption(&self.caption, ("sans-serif", 30))
                .x_label_area_size(30)
                .y_label_area_size(40);
        }
        let mut chart = builder
            .build_cartesian_2d(bounds.x_range(), bounds.y_range())
            .map_err(render_err)?;

        if self.show_text {
            chart
                .configure_mesh()
                .x_desc("x")
                .y_desc("f(x)")
                .draw()
                .map_err(render_err)?;
        }

        let color = Palette99::pick(0);
        let points = finite_points(samples);
        match style {
            PlotOption::Line => {
                chart
                    .draw_series(LineSeries::new(points, &color))
                    .map_err(render_err)?;
            }
            PlotOption::Scatter => {
                chart
                    .draw_series(points.into_iter().map(|p| Circle::new(p, 3, color.filled())))
                    .map_err(render_err)?;
            }
            PlotOption::Bar => {
                chart
                    .draw_series(
                        bar_rects(samples)
                            .into_iter()
                            .filter(|[a, b]| a.0.is_finite() && b.1.is_finite())
                            .map(|corners| Rectangle::new(corners, color.mix(0.7).filled())),
                    )
                    .map_err(render_err)?;
            }
            PlotOption::Stem => {
                chart
                    .draw_series(
                        stem_segments(samples)
                            .into_iter()
                            .filter(|[a, b]| a.0.is_finite() && b.1.is_finite())
                            .map(|segment| PathElement::new(segment.to_vec(), &color)),
                    )
                    .map_err(render_err)?;
                chart
                    .draw_series(points.into_iter().map(|p| Circle::new(p, 3, color.filled())))
                    .map_err(render_err)?;
            }
            PlotOption::Step => {
                let path: Vec<(f64, f64)> = step_path(samples)
                    .into_iter()
                    .filter(|(x, y)| x.is_finite() && y.is_finite())
                    .collect();
                chart
                    .draw_series(LineSeries::new(path, &color))
                    .map_err(render_err)?;
            }
        }
        root_area.present().map_err(render_err)?;
        info!("plot saved to {}", self.output.display());
        Ok(())
    }
}

impl Renderer for PlottersRenderer {
    fn draw(&mut self, samples: &SampleSet, style: PlotOption) -> Result<ViewBounds, PlotError> {
        let bounds = self.state.show(samples, style);
        self.render(samples, style, bounds)?;
        Ok(bounds)
    }

    fn zoom(&mut self, factor: f64) -> Result<ViewBounds, PlotError> {
        let mut state = std::mem::take(&mut self.state);
        let result = match state.zoom(factor) {
            Ok((samples, style, bounds)) => self.render(samples, style, bounds).map(|_| bounds),
            Err(err) => Err(err),
        };
        self.state = state;
        result
    }

    fn name(&self) -> &str {
        "plotters"
    }
}

/////////////////////////////////////GNUPLOT////////////////////////////////////////////
pub struct GnuplotRenderer {
    output: PathBuf,
    size: (u32, u32),
    caption: String,
    state: SurfaceState,
}

impl GnuplotRenderer {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        GnuplotRenderer {
            output: output.into(),
            size: DEFAULT_SIZE,
            caption: String::new(),
            state: SurfaceState::default(),
        }
    }

    pub fn with_size(mut self, size: (u32, u32)) -> Self {
        self.size = size;
        self
    }

    pub fn with_caption(mut self, caption: &str) -> Self {
        self.caption = caption.to_string();
        self
    }

    /// the gnuplot figure for one plot, not yet handed to gnuplot
    fn figure(&self, samples: &SampleSet, style: PlotOption, bounds: ViewBounds) -> Figure {
        use gnuplot::{AutoOption, AxesCommon, BoxWidth, Caption, Color, PointSize, PointSymbol};

        let mut fg = Figure::new();
        let axes = fg
            .axes2d()
            .set_title(&self.caption, &[])
            .set_x_label("x", &[])
            .set_y_label("f(x)", &[])
            .set_x_range(AutoOption::Fix(bounds.x_min), AutoOption::Fix(bounds.x_max))
            .set_y_range(AutoOption::Fix(bounds.y_min), AutoOption::Fix(bounds.y_max));
        let (xs, ys): (Vec<f64>, Vec<f64>) = finite_points(samples).into_iter().unzip();
        match style {
            PlotOption::Line => {
                axes.lines(&xs, &ys, &[Caption(self.caption.as_str()), Color("blue".into())]);
            }
            PlotOption::Scatter => {
                axes.points(
                    &xs,
                    &ys,
                    &[Caption(self.caption.as_str()), Color("blue".into()), PointSymbol('O')],
                );
            }
            PlotOption::Bar => {
                let widths = vec![BAR_WIDTH; xs.len()];
                axes.boxes(
                    &xs,
                    &ys,
                    &[Caption(self.caption.as_str()), Color("blue".into()), BoxWidth(widths)],
                );
            }
            PlotOption::Stem => {
                for [(x, y0), (_, y1)] in stem_segments(samples) {
                    if x.is_finite() && y1.is_finite() {
                        axes.lines(&[x, x], &[y0, y1], &[Color("blue".into())]);
                    }
                }
                axes.points(
                    &xs,
                    &ys,
                    &[Caption(self.caption.as_str()), Color("blue".into()), PointSymbol('O'), PointSize(0.8)],
                );
            }
            PlotOption::Step => {
                let (px, py): (Vec<f64>, Vec<f64>) = step_path(samples)
                    .into_iter()
                    .filter(|(x, y)| x.is_finite() && y.is_finite())
                    .unzip();
                axes.lines(&px, &py, &[Caption(self.caption.as_str()), Color("blue".into())]);
            }
        }
        fg
    }

    fn render(
        &self,
        samples: &SampleSet,
        style: PlotOption,
        bounds: ViewBounds,
    ) -> Result<(), PlotError> {
        let mut fg = self.figure(samples, style, bounds);
        fg.save_to_png(&self.output, self.size.0, self.size.1)
            .map_err(|e| PlotError::Render(format!("gnuplot: {}", e)))?;
        info!("plot saved to {}", self.output.display());
        Ok(())
    }
}

impl Renderer for GnuplotRenderer {
    fn draw(&mut self, samples: &SampleSet, style: PlotOption) -> Result<ViewBounds, PlotError> {
        let bounds = self.state.show(samples, style);
        self.render(samples, style, bounds)?;
        Ok(bounds)
    }

    fn zoom(&mut self, factor: f64) -> Result<ViewBounds, PlotError> {
        let mut state = std::mem::take(&mut self.state);
        let result = match state.zoom(factor) {
            Ok((samples, style, bounds)) => self.render(samples, style, bounds).map(|_| bounds),
            Err(err) => Err(err),
        };
        self.state = state;
        result
    }

    fn name(&self) -> &str {
        "gnuplot"
    }
}

/// Picks the surface named by `backend`, writing to `output`.
pub fn make_renderer(backend: Backend, output: PathBuf, caption: &str) -> Box<dyn Renderer> {
    match backend {
        Backend::Plotters => Box::new(PlottersRenderer::new(output).with_caption(caption)),
        Backend::Gnuplot => Box::new(GnuplotRenderer::new(output).with_caption(caption)),
    }
}

impl Renderer for Box<dyn Renderer> {
    fn draw(&mut self, samples: &SampleSet, style: PlotOption) -> Result<ViewBounds, PlotError> {
        (**self).draw(samples, style)
    }

    fn zoom(&mut self, factor: f64) -> Result<ViewBounds, PlotError> {
        (**self).zoom(factor)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotter::view::{ZOOM_IN, ZOOM_OUT};
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn samples() -> SampleSet {
        SampleSet {
            x: vec![-2.0, -1.0, 0.0, 1.0, 2.0],
            y: vec![4.0, 1.0, 0.0, 1.0, 4.0],
        }
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!(Backend::from_str("plotters"), Ok(Backend::Plotters));
        assert_eq!(Backend::from_str("GnuPlot"), Ok(Backend::Gnuplot));
        assert_eq!(Backend::Gnuplot.to_string(), "gnuplot");
        assert!(Backend::from_str("matplotlib").is_err());
    }

    #[test]
    fn test_plotters_draws_every_style() {
        let dir = tempfile::tempdir().unwrap();
        for style in PlotOption::iter() {
            let path = dir.path().join(format!("{}.png", style));
            let mut renderer = PlottersRenderer::new(&path).with_size((200, 150)).without_text();
            let bounds = renderer.draw(&samples(), style).unwrap();
            assert_eq!(bounds, ViewBounds::fit(&samples(), style));
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_plotters_zoom_redraws() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zoom.png");
        let mut renderer = PlottersRenderer::new(&path).with_size((200, 150)).without_text();
        renderer.draw(&samples(), PlotOption::Line).unwrap();
        let zoomed = renderer.zoom(ZOOM_IN).unwrap();
        assert_eq!(zoomed, ViewBounds::new(-1.6, 1.6, 0.0, 3.2));
        let back = renderer.zoom(ZOOM_OUT).unwrap();
        assert_eq!(renderer.bounds(), Some(back));
    }

    #[test]
    fn test_zoom_before_draw_fails_for_both_backends() {
        let dir = tempfile::tempdir().unwrap();
        let mut plotters = PlottersRenderer::new(dir.path().join("a.png"));
        assert!(matches!(plotters.zoom(ZOOM_IN), Err(PlotError::Render(_))));
        let mut gnuplot = GnuplotRenderer::new(dir.path().join("b.png"));
        assert!(matches!(gnuplot.zoom(ZOOM_OUT), Err(PlotError::Render(_))));
    }

    #[test]
    fn test_gnuplot_script_for_every_style() {
        let renderer = GnuplotRenderer::new("unused.png").with_caption("x^2");
        let bounds = ViewBounds::fit(&samples(), PlotOption::Bar);
        for style in PlotOption::iter() {
            let mut script = Vec::new();
            renderer.figure(&samples(), style, bounds).echo(&mut script);
            let script = String::from_utf8_lossy(&script);
            assert!(script.contains("plot"), "{}", style);
            assert_eq!(script.contains("boxes"), style == PlotOption::Bar, "{}", style);
        }
    }

    #[test]
    fn test_make_renderer_names() {
        let dir = tempfile::tempdir().unwrap();
        let r = make_renderer(Backend::Plotters, dir.path().join("p.png"), "x");
        assert_eq!(r.name(), "plotters");
        let r = make_renderer(Backend::Gnuplot, dir.path().join("g.png"), "x");
        assert_eq!(r.name(), "gnuplot");
    }
}
