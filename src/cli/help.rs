//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name string for log spans (e.g. "generate", "status").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Generate { .. } => "generate",
        Commands::Validate { .. } => "validate",
        Commands::Template { .. } => "template",
        Commands::Status { .. } => "status",
        Commands::Init { .. } => "init",
    }
}

/// Whether the command talks to the backend.
pub fn uses_backend(command: &Commands) -> bool {
    matches!(command, Commands::Generate { .. } | Commands::Status { .. })
}
