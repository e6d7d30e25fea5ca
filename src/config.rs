//! Compile-time settings for the interpreter front end.

/// Language name used in usage and banner text.
pub const LANG_NAME: &str = "lox";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Printed before every REPL line.
pub const PROMPT: &str = "> ";

// sysexits.h
pub const EX_USAGE: i32 = 64;
pub const EX_DATAERR: i32 = 65;
pub const EX_IOERR: i32 = 74;
