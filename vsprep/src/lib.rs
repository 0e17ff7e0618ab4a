#![warn(unused_extern_crates)]
#![allow(clippy::missing_errors_doc)]
pub mod archive;
pub mod cli;
pub mod fetch;
pub mod manifest;
pub mod mix;
pub mod ux;

use crossterm::style::Stylize;
use env_logger::Env;

/// Initializes logger. Only warnings and errors are shown unless `RUST_LOG` says otherwise
pub fn init_logging() {
    // Fails only if a logger was already set which is fine
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
}

fn err(path: &str) {
    eprintln!("Error processing {} solution", path.red());
}
