//! Error sinks the scanner reports into.
//!
//! The scanner never owns error state. Whoever calls it supplies a sink and
//! reads `had_error` afterwards, so repeated or concurrent scans don't
//! interfere with each other.

use std::io::Write;

use parking_lot::Mutex;

use crate::error::ScanError;

pub trait ErrorSink {
    fn report(&mut self, error: ScanError);
    fn had_error(&self) -> bool;
}

/// Collects errors in report order, optionally echoing each one as it arrives.
#[derive(Default)]
pub struct Reporter {
    errors: Vec<ScanError>,
    echo: Option<Box<dyn Write>>,
}

impl Reporter {
    pub fn new() -> Self {
        Reporter::default()
    }

    /// Also writes every reported error, one per line, to `out`.
    pub fn echoing(out: impl Write + 'static) -> Self {
        Reporter {
            errors: Vec::new(),
            echo: Some(Box::new(out)),
        }
    }

    pub fn errors(&self) -> &[ScanError] {
        &self.errors
    }

    /// Clears the error flag. The REPL does this between lines.
    pub fn reset(&mut self) {
        self.errors.clear();
    }

    pub fn take(&mut self) -> Vec<ScanError> {
        std::mem::take(&mut self.errors)
    }
}

impl ErrorSink for Reporter {
    fn report(&mut self, error: ScanError) {
        if let Some(out) = self.echo.as_mut() {
            // Losing a diagnostic line must not abort the scan.
            let _ = writeln!(out, "{}", error);
        }
        self.errors.push(error);
    }

    fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A sink several threads can report into at once.
#[derive(Default)]
pub struct SharedReporter {
    errors: Mutex<Vec<ScanError>>,
}

impl SharedReporter {
    pub fn new() -> Self {
        SharedReporter::default()
    }

    pub fn errors(&self) -> Vec<ScanError> {
        self.errors.lock().clone()
    }

    pub fn had_error(&self) -> bool {
        !self.errors.lock().is_empty()
    }

    pub fn reset(&self) {
        self.errors.lock().clear();
    }
}

impl ErrorSink for &SharedReporter {
    fn report(&mut self, error: ScanError) {
        self.errors.lock().push(error);
    }

    fn had_error(&self) -> bool {
        SharedReporter::had_error(self)
    }
}
