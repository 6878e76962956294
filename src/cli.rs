//! CLI domain: parse, route, help, output, and presentation only.
//! No generation logic; a single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, uses_backend};
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_generate_result_json, format_generate_result_text, format_init_preview,
    format_init_summary, format_section_heading, format_similar_skipped, format_status_json,
    format_status_text, format_validation_json, format_validation_text, to_pretty_json,
};
pub use route::RunContext;
