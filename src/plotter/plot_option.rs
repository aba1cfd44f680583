use strum_macros::{Display, EnumIter, EnumString};

/// Drawing style of a sampled curve.
///
/// Parses case-insensitively from `line`, `scatter`, `bar`, `stem`, `step`;
/// `plot` is accepted for `Line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum PlotOption {
    /// polyline through the points
    #[default]
    #[strum(to_string = "line", serialize = "plot")]
    Line,
    /// one marker per point
    #[strum(to_string = "scatter")]
    Scatter,
    /// bar from 0 to y centred on x
    #[strum(to_string = "bar")]
    Bar,
    /// vertical line from 0 to y ending in a marker
    #[strum(to_string = "stem")]
    Stem,
    /// staircase, y_i is held on (x_{i-1}, x_i]
    #[strum(to_string = "step")]
    Step,
}

/// width of a bar in x units
pub const BAR_WIDTH: f64 = 0.8;
