// CLI module
// Command-line arguments and menu text for the interactive session

mod args;
pub mod menu;

pub use args::CliArgs;
pub use menu::MenuChoice;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (e.g., unknown flags or the --help flag), clap displays
/// an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
