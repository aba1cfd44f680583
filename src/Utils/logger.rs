use crate::plotter::sampler::SampleSet;
use chrono::Local;
use csv::Writer;
use log::info;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("loglevel must be off, none, debug, info, warn or error, got '{0}'")]
    UnknownLevel(String),
    #[error("cannot open log file: {0}")]
    Io(#[from] io::Error),
}

/// None means logging is switched off
pub fn parse_loglevel(level: &str) -> Result<Option<LevelFilter>, LoggerError> {
    match level.trim().to_lowercase().as_str() {
        "off" | "none" => Ok(None),
        "debug" => Ok(Some(LevelFilter::Debug)),
        "info" => Ok(Some(LevelFilter::Info)),
        "warn" => Ok(Some(LevelFilter::Warn)),
        "error" => Ok(Some(LevelFilter::Error)),
        other => Err(LoggerError::UnknownLevel(other.to_string())),
    }
}

/// a directory gets a timestamped file name inside it, anything else is used as is
pub fn log_file_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        path.join(format!("log_{}.txt", date_and_time))
    } else {
        path.to_path_buf()
    }
}

/// Terminal logger, plus a file logger when `log_file` is given.
///
/// Returns whether a logger was installed: false for "off"/"none" and when
/// another logger is already set (second call in the same process).
pub fn init_logger(loglevel: Option<&str>, log_file: Option<&Path>) -> Result<bool, LoggerError> {
    let log_option = match loglevel {
        Some(level) => match parse_loglevel(level)? {
            Some(filter) => filter,
            None => return Ok(false),
        },
        None => LevelFilter::Info,
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        let file = File::create(log_file_path(path))?;
        loggers.push(WriteLogger::new(log_option, Config::default(), file));
    }
    match CombinedLogger::init(loggers) {
        Ok(()) => {
            info!("Program started with loglevel: {}", log_option);
            Ok(true)
        }
        Err(_) => Ok(false),
    }
}

/// tab separated, header line first
pub fn save_samples_to_file(
    samples: &SampleSet,
    headers: (&str, &str),
    filename: &Path,
) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "{}\t{}", headers.0, headers.1)?;
    for (x, y) in samples.points() {
        writeln!(file, "{}\t{}", x, y)?;
    }
    info!("samples saved to {}", filename.display());
    Ok(())
}

pub fn save_samples_to_csv(
    samples: &SampleSet,
    headers: (&str, &str),
    filename: &Path,
) -> Result<(), csv::Error> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record([headers.0, headers.1])?;
    for (x, y) in samples.points() {
        writer.write_record([x.to_string(), y.to_string()])?;
    }
    writer.flush()?;
    info!("samples saved to {}", filename.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn samples() -> SampleSet {
        SampleSet {
            x: vec![0.0, 0.5, 1.0],
            y: vec![1.0, 1.25, 2.0],
        }
    }

    #[test]
    fn test_parse_loglevel() {
        assert_eq!(parse_loglevel("off").unwrap(), None);
        assert_eq!(parse_loglevel("NONE").unwrap(), None);
        assert_eq!(parse_loglevel("debug").unwrap(), Some(LevelFilter::Debug));
        assert_eq!(parse_loglevel(" warn ").unwrap(), Some(LevelFilter::Warn));
        assert!(matches!(
            parse_loglevel("loud"),
            Err(LoggerError::UnknownLevel(level)) if level == "loud"
        ));
    }

    #[test]
    fn test_init_logger_off_installs_nothing() {
        assert!(!init_logger(Some("off"), None).unwrap());
        assert!(init_logger(Some("verbose"), None).is_err());
    }

    #[test]
    fn test_log_file_path_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_file_path(dir.path());
        assert_eq!(path.parent(), Some(dir.path()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("log_") && name.ends_with(".txt"));
        let file = dir.path().join("run.log");
        assert_eq!(log_file_path(&file), file);
    }

    #[test]
    fn test_save_samples_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        save_samples_to_csv(&samples(), ("x", "f(x)"), &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "x,f(x)\n0,1\n0.5,1.25\n1,2\n");
    }

    #[test]
    fn test_save_samples_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.txt");
        save_samples_to_file(&samples(), ("x", "y"), &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "x\ty\n0\t1\n0.5\t1.25\n1\t2\n");
    }
}
