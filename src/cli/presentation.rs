//! CLI presentation: text and json formatters per command family.

mod generate;
mod init;
mod quality;
mod shared;
mod status;

pub use generate::{
    format_generate_result_json, format_generate_result_text, format_similar_skipped,
};
pub use init::{format_init_preview, format_init_summary};
pub use quality::{format_validation_json, format_validation_text};
pub use shared::{format_section_heading, to_pretty_json};
pub use status::{format_status_json, format_status_text};
