#![allow(non_snake_case)]
use RustedPlotter::Utils::logger::{init_logger, save_samples_to_csv, save_samples_to_file};
use RustedPlotter::Utils::plots::{Backend, make_renderer};
use RustedPlotter::Utils::task_parser::{PlotTask, load_task};
use RustedPlotter::plotter::app::{DEFAULT_MAX_SAMPLES, DEFAULT_SAMPLES, DrawRequest, Plotter};
use RustedPlotter::plotter::plot_option::PlotOption;
use RustedPlotter::plotter::render::LogErrorSink;
use RustedPlotter::plotter::view::{ViewState, ZoomStep};
use clap::Parser;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Plot a function of x: `RustedPlotter --function "x^2 - 1" --min -2 --max 2 --style scatter`
#[derive(Parser, Debug, Default)]
#[command(name = "RustedPlotter", version, about)]
struct Args {
    /// function of x, e.g. "2*x^3 + 1"
    #[arg(short, long)]
    function: Option<String>,
    /// lower end of the x range
    #[arg(long, allow_hyphen_values = true)]
    min: Option<String>,
    /// upper end of the x range
    #[arg(long, allow_hyphen_values = true)]
    max: Option<String>,
    /// number of samples over the range
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    samples: Option<i64>,
    #[arg(long)]
    max_samples: Option<usize>,
    /// line, scatter, bar, stem or step; one image per style
    #[arg(short, long)]
    style: Vec<PlotOption>,
    #[arg(short, long)]
    backend: Option<Backend>,
    /// image file
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// in or out, applied in order after the last draw
    #[arg(short, long)]
    zoom: Vec<ZoomStep>,
    /// also write the samples to this csv file
    #[arg(long)]
    csv: Option<PathBuf>,
    /// also write the samples to this tab separated file
    #[arg(long)]
    tsv: Option<PathBuf>,
    /// off, none, debug, info, warn or error
    #[arg(long)]
    loglevel: Option<String>,
    /// log file, or a directory for a timestamped one
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// task file; command line flags win over its values
    #[arg(short, long)]
    task: Option<PathBuf>,
}

/// Everything one run needs, after task file and flags are merged.
#[derive(Debug, Clone, PartialEq)]
struct RunConfig {
    request: DrawRequest,
    max_samples: usize,
    styles: Vec<PlotOption>,
    backend: Backend,
    output: PathBuf,
    zoom: Vec<ZoomStep>,
    csv: Option<PathBuf>,
    tsv: Option<PathBuf>,
    loglevel: Option<String>,
    log_file: Option<PathBuf>,
}

fn merge(args: Args, task: PlotTask) -> RunConfig {
    let function = args.function.or(task.function).unwrap_or_default();
    let min = args.min.or(task.min).unwrap_or_default();
    let max = args.max.or(task.max).unwrap_or_default();
    let samples = args.samples.or(task.samples).unwrap_or(DEFAULT_SAMPLES);
    let styles = match (args.style.is_empty(), task.styles.is_empty()) {
        (false, _) => args.style,
        (true, false) => task.styles,
        (true, true) => vec![PlotOption::default()],
    };
    RunConfig {
        request: DrawRequest::new(&function, &min, &max, samples),
        max_samples: args
            .max_samples
            .or(task.max_samples)
            .unwrap_or(DEFAULT_MAX_SAMPLES),
        styles,
        backend: args.backend.or(task.backend).unwrap_or_default(),
        output: args
            .output
            .or(task.output)
            .unwrap_or_else(|| PathBuf::from("plot.png")),
        zoom: if args.zoom.is_empty() { task.zoom } else { args.zoom },
        csv: args.csv.or(task.csv),
        tsv: args.tsv.or(task.tsv),
        loglevel: args.loglevel.or(task.loglevel),
        log_file: args.log_file.or(task.log_file),
    }
}

/// plot.png drawn as scatter -> plot_scatter.png, when more than one style is drawn
fn output_for_style(output: &Path, style: PlotOption, several: bool) -> PathBuf {
    if !several {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "plot".to_string());
    let extension = output
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    output.with_file_name(format!("{}_{}.{}", stem, style, extension))
}

/// Draws every style, applies the zoom steps to the last surface and exports the samples.
/// Returns false when anything was reported.
fn run(config: &RunConfig) -> bool {
    let several = config.styles.len() > 1;
    let mut view = ViewState::default();
    let mut ok = true;
    let mut last_plotter = None;
    for style in &config.styles {
        let output = output_for_style(&config.output, *style, several);
        let renderer = make_renderer(config.backend, output, &config.request.function_text);
        let mut plotter =
            Plotter::new(renderer, LogErrorSink::default()).with_max_samples(config.max_samples);
        match plotter.try_draw(&config.request, view, *style) {
            Ok(next) => view = next,
            Err(_) => ok = false,
        }
        last_plotter = Some(plotter);
    }
    if let Some(plotter) = last_plotter.as_mut() {
        if view.has_drawn() {
            for step in &config.zoom {
                if plotter.zoom(step.factor()).is_err() {
                    ok = false;
                }
            }
        }
    }
    // a failed draw has been reported already and leaves nothing to export
    let samples = last_plotter.as_ref().and_then(|plotter| plotter.last_samples());
    if let Some(samples) = samples {
        if let Some(path) = &config.csv {
            if let Err(err) = save_samples_to_csv(samples, ("x", "y"), path) {
                error!("cannot write {}: {}", path.display(), err);
                ok = false;
            }
        }
        if let Some(path) = &config.tsv {
            if let Err(err) = save_samples_to_file(samples, ("x", "y"), path) {
                error!("cannot write {}: {}", path.display(), err);
                ok = false;
            }
        }
    }
    ok
}

fn main() -> ExitCode {
    let mut args = Args::parse();
    let task = match args.task.take() {
        Some(path) => match load_task(&path) {
            Ok(task) => task,
            Err(err) => {
                eprintln!("{}: {}", path.display(), err);
                return ExitCode::FAILURE;
            }
        },
        None => PlotTask::default(),
    };
    let config = merge(args, task);
    if let Err(err) = init_logger(config.loglevel.as_deref(), config.log_file.as_deref()) {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }
    info!("plotting with {:?}", config);
    if run(&config) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
