//! Lexical front end for the Lox scripting language.
//!
//! [`scan`] turns source text into tokens ending with an `Eof` token. Lexical
//! errors never stop the scan; they are handed to an [`ErrorSink`] owned by the
//! caller.

pub mod config;
pub mod error;
pub mod reporter;
pub mod runner;
pub mod scanner;
pub mod token;

pub use error::{ScanError, ScanErrorKind};
pub use reporter::{ErrorSink, Reporter, SharedReporter};
pub use scanner::{scan, Scanner};
pub use token::{Literal, Token, TokenType};
