//! Command-line interface: argument types, output helpers and commands.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

/// Report a failed command and exit with status 1
///
/// In JSON mode the error is printed to stdout as `{"error": "..."}` so
/// callers parsing stdout always receive a JSON document.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        println!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1)
}
