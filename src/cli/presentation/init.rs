//! Init command presentation: preview and summary formatters.

use crate::init::InitSummary;

pub fn format_init_preview(config_toml: &str) -> String {
    let mut output = String::from("Default configuration (not written):\n\n");
    output.push_str(config_toml);
    output
}

pub fn format_init_summary(summary: &InitSummary) -> String {
    let mut output = String::from("Initializing autoblog workspace...\n\n");
    if summary.overwritten {
        output.push_str(&format!(
            "  ✓ {} (overwritten)\n",
            summary.config_path.display()
        ));
    } else {
        output.push_str(&format!("  ✓ {}\n", summary.config_path.display()));
    }
    output.push_str(&format!("  ✓ {}/\n", summary.articles_dir.display()));
    output.push_str("\nPlace a topic request in selected-topic.json and run 'autoblog generate'.\n");
    output
}
