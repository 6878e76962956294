//! Status command presentation: backend reachability and model table.

use super::shared::{format_section_heading, to_pretty_json};
use crate::error::ApiError;
use crate::provider::{model_is_available, BackendStatus};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_status_text(status: &BackendStatus) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Backend Status"));
    out.push_str(&format!("  Backend: {}\n", status.backend));
    out.push_str(&format!("  URL: {}\n", status.base_url));
    let reachable = if status.reachable {
        format!("{}", "yes".green())
    } else {
        format!("{}", "no".red())
    };
    out.push_str(&format!("  Reachable: {}\n", reachable));
    let model_state = if status.model_available {
        "available".to_string()
    } else {
        format!("{}", "not pulled".yellow())
    };
    out.push_str(&format!("  Model: {} ({})\n", status.model, model_state));
    if let Some(error) = &status.error {
        out.push_str(&format!("  Error: {}\n", error));
    }

    if status.models.is_empty() {
        out.push_str("\nNo models registered.\n");
        if status.reachable || status.error.is_none() {
            out.push_str(&format!("Run 'ollama pull {}' to add one.\n", status.model));
        } else {
            out.push_str("Templates will be used until the backend is reachable.\n");
        }
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Model", "Configured"]);
    for name in &status.models {
        let configured = if model_is_available(std::slice::from_ref(name), &status.model) {
            "*"
        } else {
            ""
        };
        table.add_row(vec![name.as_str(), configured]);
    }
    out.push_str(&format!("\n{}\n", table));
    out.push_str(&format!("\nTotal: {} model(s)\n", status.models.len()));
    out
}

pub fn format_status_json(status: &BackendStatus) -> Result<String, ApiError> {
    to_pretty_json(status)
}
