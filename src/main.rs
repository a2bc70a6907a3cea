//! evcatalog CLI entry point
//!
//! Parses arguments, dispatches to the CLI module, prints any error to
//! stderr and exits non-zero on failure. Configuration, the store and the
//! server are all set up inside the selected command.

use evcatalog::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
