use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::logging::{LogFormat, LogLevel};
use crate::search::Algorithm;

#[derive(Parser, Debug)]
#[command(about = "Plan delivery routes and record how each solver finds them")]
pub struct Args {
    /// Path to a directory containing location files, or a base path for location files
    #[arg(short, long)]
    prefix: Option<String>,

    /// Path to one or more JSON location files
    #[arg(short, long)]
    file: Option<Vec<String>>,

    /// Solve a generated instance with this many locations instead of reading files
    #[arg(long)]
    pub random: Option<usize>,

    /// Seed for generated instances
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Algorithms to run; all of them when omitted
    #[arg(short, long, value_enum)]
    pub algorithm: Vec<Algorithm>,

    /// Number of runs to perform with equal parameters
    #[arg(short, long, default_value_t = 1)]
    pub runs: u32,

    /// Maximum running time per solve in seconds
    #[arg(short, long)]
    pub time_limit: Option<u32>,

    /// Directory to write one parquet step trace per instance and algorithm
    #[arg(long)]
    pub trace_dir: Option<PathBuf>,

    /// Keep at most this many steps per trace
    #[arg(long)]
    pub trace_limit: Option<usize>,

    /// Write all route results as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Prefix log lines with a millisecond timestamp
    #[arg(long)]
    pub log_timestamp: bool,
}

impl Args {
    pub fn algorithms(&self) -> Vec<Algorithm> {
        if self.algorithm.is_empty() {
            Algorithm::ALL.to_vec()
        } else {
            self.algorithm.clone()
        }
    }
}

pub fn enumerate_input_files(args: &Args) -> io::Result<Vec<PathBuf>> {
    if let Some(files) = &args.file {
        if let Some(prefix) = &args.prefix {
            Ok(files.iter()
                .map(|f| Path::new(prefix).join(f))
                .collect())
        } else {
            Ok(files.iter()
                .map(|f| Path::new(f).to_path_buf())
                .collect())
        }
    } else if let Some(prefix) = &args.prefix {
        let dir_entries = std::fs::read_dir(prefix)?;
        let mut files = Vec::new();
        for entry in dir_entries {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }

        files.sort_by(|a, b| {
            let a_key = a.file_name().and_then(|n| n.to_str()).map(natural_key).unwrap_or_default();
            let b_key = b.file_name().and_then(|n| n.to_str()).map(natural_key).unwrap_or_default();

            a_key.cmp(&b_key)
        });

        Ok(files)
    } else if args.random.is_some() {
        Ok(Vec::new())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Either --file, --prefix or --random must be provided",
        ))
    }
}

/// Splits a file name into digit and non-digit runs so that `stops_10`
/// sorts after `stops_9`.
fn natural_key(s: &str) -> Vec<Result<u64, String>> {
    let mut parts = Vec::new();
    let mut buf = String::new();
    let mut is_digit = None;

    let mut flush = |buf: &mut String, digits: bool| {
        let part = if digits {
            buf.parse::<u64>().map_err(|_| buf.clone())
        } else {
            Err(buf.clone())
        };
        parts.push(part);
        buf.clear();
    };

    for c in s.chars() {
        let c = if c == '_' { ' ' } else { c.to_ascii_lowercase() };
        let current_is_digit = c.is_ascii_digit();

        if is_digit.is_some_and(|prev| prev != current_is_digit) {
            flush(&mut buf, !current_is_digit);
        }
        buf.push(c);
        is_digit = Some(current_is_digit);
    }

    if !buf.is_empty() {
        flush(&mut buf, is_digit == Some(true));
    }

    parts
}
