use std::env;
use std::io;
use std::process;

use lox::config::{EX_USAGE, LANG_NAME, VERSION};
use lox::runner::{run_file, run_prompt, RunError};
use lox::Reporter;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut reporter = Reporter::echoing(io::stderr());

    let result = match args.as_slice() {
        [] => {
            let stdin = io::stdin();
            run_prompt(stdin.lock(), &mut io::stdout(), &mut reporter).map_err(RunError::from)
        }
        [flag] if flag == "--version" => {
            println!("{} {}", LANG_NAME, VERSION);
            return;
        }
        [path] => run_file(path, &mut io::stdout(), &mut reporter),
        _ => {
            eprintln!("Usage: {} [script]", LANG_NAME);
            process::exit(EX_USAGE);
        }
    };

    if let Err(err) = result {
        // Lexical errors were already echoed as they were reported.
        if !matches!(err, RunError::Data { .. }) {
            eprintln!("{}", err);
        }
        process::exit(err.exit_code());
    }
}
