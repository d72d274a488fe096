//! `array-writer` - apply one path-addressed edit to a JSON document.
//!
//! Usage:
//!   array-writer <command> <args...>
//!
//! The document is read from stdin, the result is written to stdout. Set
//! `ARRAY_WRITER_LOG` (`error`, `warn`, `info`, `debug`, `trace`) to choose how
//! much is logged to stderr.

use std::io::{self, Read, Write};

use array_writer::cli::run;
use tracing::Level;

fn init_logging() {
    let level = std::env::var("ARRAY_WRITER_LOG")
        .ok()
        .and_then(|v| v.parse::<Level>().ok())
        .unwrap_or(Level::WARN);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(buf.trim(), &args) {
        Ok(result) => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{result}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
