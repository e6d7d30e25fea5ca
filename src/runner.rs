//! The thin harness around the scanner: run a file, or a line-at-a-time prompt.

use std::fmt;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{EX_DATAERR, EX_IOERR, PROMPT};
use crate::reporter::{ErrorSink, Reporter};
use crate::scanner::scan;

#[derive(Debug)]
pub enum RunError {
    ReadFile {
        path: PathBuf,
        source: io::Error,
    },
    Io(io::Error),
    /// The source had lexical errors; they were already reported.
    Data { count: usize },
}

impl RunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::ReadFile { .. } | RunError::Io(_) => EX_IOERR,
            RunError::Data { .. } => EX_DATAERR,
        }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::ReadFile { path, source } => {
                write!(f, "Failed to read file {}: {}", path.display(), source)
            }
            RunError::Io(err) => write!(f, "I/O error: {}", err),
            RunError::Data { count } => write!(f, "{} lexical error(s)", count),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::ReadFile { source, .. } => Some(source),
            RunError::Io(err) => Some(err),
            RunError::Data { .. } => None,
        }
    }
}

impl From<io::Error> for RunError {
    fn from(err: io::Error) -> Self {
        RunError::Io(err)
    }
}

/// Scans `source` and prints one token per line.
pub fn run(source: &str, out: &mut impl Write, reporter: &mut Reporter) -> io::Result<()> {
    for token in scan(source, reporter) {
        writeln!(out, "{}", token)?;
    }
    Ok(())
}

pub fn run_file(
    path: impl AsRef<Path>,
    out: &mut impl Write,
    reporter: &mut Reporter,
) -> Result<(), RunError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| RunError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    run(&source, out, reporter)?;

    if reporter.had_error() {
        return Err(RunError::Data {
            count: reporter.errors().len(),
        });
    }
    Ok(())
}

/// Reads lines until end of input or an empty line. Errors on one line never
/// carry over to the next.
pub fn run_prompt(
    mut input: impl BufRead,
    out: &mut impl Write,
    reporter: &mut Reporter,
) -> io::Result<()> {
    let mut line = String::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim_end_matches(['\n', '\r']);
        if text.is_empty() {
            break;
        }

        run(text, out, reporter)?;
        reporter.reset();
    }
    Ok(())
}
