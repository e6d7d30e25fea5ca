use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// End of input reached before the closing `"`.
    UnterminatedString,
    UnexpectedCharacter(char),
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanErrorKind::UnterminatedString => f.write_str("Unterminated string."),
            ScanErrorKind::UnexpectedCharacter(c) => write!(f, "Unexpected character: {}", c),
        }
    }
}

/// A recoverable lexical error. The scanner reports these and keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub line: usize,
    pub kind: ScanErrorKind,
}

impl ScanError {
    pub fn new(line: usize, kind: ScanErrorKind) -> Self {
        ScanError { line, kind }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error: {}", self.line, self.kind)
    }
}

impl std::error::Error for ScanError {}
