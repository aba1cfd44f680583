/// parse a plot task document: section titles on their own line, each followed by
/// "key: value" lines. The value is the rest of the line, so a function may contain spaces.
///
/// ```text
/// # comment lines start with #, // or %
/// function
///     expr: 2*x + 3
/// range
///     min: 0
///     max: 10
/// sampling
///     samples: 100
/// view
///     style: scatter, bar
///     backend: plotters
///     output: plot.png
///     zoom: in, in
/// log
///     level: info
/// ```
use crate::Utils::plots::Backend;
use crate::plotter::plot_option::PlotOption;
use crate::plotter::view::ZoomStep;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, line_ending, not_line_ending, space0},
    combinator::{eof, map, recognize},
    multi::{many0, many1},
    sequence::{delimited, pair, preceded, separated_pair, terminated},
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub type SectionMap = HashMap<String, String>;
pub type DocumentMap = HashMap<String, SectionMap>;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("task syntax error: {0}")]
    Syntax(String),
    #[error("unknown section '{0}'")]
    UnknownSection(String),
    #[error("unknown key '{key}' in section '{section}'")]
    UnknownKey { section: String, key: String },
    #[error("invalid value '{value}' for '{key}'")]
    InvalidValue { key: String, value: String },
    #[error("cannot read task file: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses a name (word characters without spaces)
fn parse_name(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    map(parser, String::from).parse(input)
}

fn end_of_line(input: &str) -> IResult<&str, &str> {
    alt((line_ending, eof)).parse(input)
}

/// a title is a name alone on its line
fn parse_title(input: &str) -> IResult<&str, String> {
    terminated(delimited(space0, parse_name, space0), end_of_line).parse(input)
}

/// "key: rest of the line"
fn parse_key_value_pair(input: &str) -> IResult<&str, (String, String)> {
    let colon_separator = delimited(space0, char(':'), space0);
    let value = map(not_line_ending, |v: &str| v.trim().to_string());
    terminated(
        separated_pair(preceded(space0, parse_name), colon_separator, value),
        end_of_line,
    )
    .parse(input)
}

fn parse_section(input: &str) -> IResult<&str, (String, Vec<(String, String)>)> {
    pair(parse_title, many0(parse_key_value_pair)).parse(input)
}

/// Filters out comment lines (starting with //, #, or %) and blank lines
fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the entire document into a HashMap; sections with the same title are merged
pub fn parse_document(input: &str) -> Result<DocumentMap, TaskError> {
    let filtered = filter_comments(input);
    let mut parser = many1(parse_section);
    let (remaining, sections) = parser
        .parse(filtered.as_str())
        .map_err(|e| TaskError::Syntax(format!("{:?}", e)))?;
    if !remaining.trim().is_empty() {
        return Err(TaskError::Syntax(format!(
            "Failed to parse entire document. Remaining: '{}'",
            remaining
        )));
    }
    let mut result: DocumentMap = HashMap::new();
    for (title, pairs) in sections {
        result.entry(title).or_default().extend(pairs);
    }
    Ok(result)
}

/// Everything a task file can set. Unset fields are left to the command line defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotTask {
    pub function: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub samples: Option<i64>,
    pub max_samples: Option<usize>,
    pub styles: Vec<PlotOption>,
    pub backend: Option<Backend>,
    pub output: Option<PathBuf>,
    pub zoom: Vec<ZoomStep>,
    pub csv: Option<PathBuf>,
    pub tsv: Option<PathBuf>,
    pub loglevel: Option<String>,
    pub log_file: Option<PathBuf>,
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, TaskError> {
    value.parse::<T>().map_err(|_| TaskError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_list<T: FromStr>(key: &str, value: &str) -> Result<Vec<T>, TaskError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| parse_value(key, v))
        .collect()
}

impl PlotTask {
    pub fn from_document(document: &DocumentMap) -> Result<PlotTask, TaskError> {
        let mut task = PlotTask::default();
        for (section, pairs) in document {
            for (key, value) in pairs {
                match (section.as_str(), key.as_str()) {
                    ("function", "expr") => task.function = Some(value.clone()),
                    ("range", "min") => task.min = Some(value.clone()),
                    ("range", "max") => task.max = Some(value.clone()),
                    ("sampling", "samples") => task.samples = Some(parse_value(key, value)?),
                    ("sampling", "max_samples") => {
                        task.max_samples = Some(parse_value(key, value)?)
                    }
                    ("view", "style") => task.styles = parse_list(key, value)?,
                    ("view", "backend") => task.backend = Some(parse_value(key, value)?),
                    ("view", "output") => task.output = Some(PathBuf::from(value)),
                    ("view", "zoom") => task.zoom = parse_list(key, value)?,
                    ("view", "csv") => task.csv = Some(PathBuf::from(value)),
                    ("view", "tsv") => task.tsv = Some(PathBuf::from(value)),
                    ("log", "level") => task.loglevel = Some(value.clone()),
                    ("log", "file") => task.log_file = Some(PathBuf::from(value)),
                    ("function" | "range" | "sampling" | "view" | "log", _) => {
                        return Err(TaskError::UnknownKey {
                            section: section.clone(),
                            key: key.clone(),
                        });
                    }
                    _ => return Err(TaskError::UnknownSection(section.clone())),
                }
            }
        }
        Ok(task)
    }
}

pub fn parse_task(input: &str) -> Result<PlotTask, TaskError> {
    let document = parse_document(input)?;
    PlotTask::from_document(&document)
}

pub fn load_task(path: &Path) -> Result<PlotTask, TaskError> {
    let text = std::fs::read_to_string(path)?;
    parse_task(&text)
}
