//! CLI output formatting.
//!
//! Each display has a `format_*` function (returns lines) for testability and
//! a `print_*` wrapper that writes to stdout. Format functions are pure — no
//! I/O, no side effects. The `--quiet` flag is handled by the caller simply
//! not invoking the print wrappers.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! Generating sitemaps...
//! Generating sitemap for site access eng
//! Sitemap for site access eng (locale eng-GB) written to var/sitemaps/sitemap_eng.xml (12 URLs)
//! Generated 2 sitemaps
//! ```
//!
//! ## Check
//!
//! ```text
//! Site accesses
//! 001 eng (eng-GB) → var/sitemaps/sitemap_eng.xml (12 URLs)
//! 002 ger (ger-DE) → var/sitemaps/sitemap_ger.xml (9 URLs)
//! ```

use crate::generate::{GenerateEvent, VariantReport};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format one generate progress event as display lines.
pub fn format_generate_event(event: &GenerateEvent) -> Vec<String> {
    match event {
        GenerateEvent::Started => vec!["Generating sitemaps...".to_string()],
        GenerateEvent::VariantStarted { access } => {
            vec![format!("Generating sitemap for site access {access}")]
        }
        GenerateEvent::VariantWritten {
            access,
            locale,
            path,
            url_count,
        } => vec![format!(
            "Sitemap for site access {access} (locale {locale}) written to {} ({url_count} URLs)",
            path.display()
        )],
    }
}

/// Print a generate progress event to stdout.
pub fn print_generate_event(event: &GenerateEvent) {
    for line in format_generate_event(event) {
        println!("{}", line);
    }
}

/// Format the end-of-run summary line.
pub fn format_generate_summary(reports: &[VariantReport]) -> String {
    format!("Generated {} sitemaps", reports.len())
}

/// Format check output: one line per resolved site access with its target
/// file and URL count.
pub fn format_check_output(reports: &[VariantReport]) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Site accesses".to_string());

    if reports.is_empty() {
        lines.push("    (none with a configured locale)".to_string());
        return lines;
    }

    for (i, report) in reports.iter().enumerate() {
        lines.push(format!(
            "{} {} ({}) \u{2192} {} ({} URLs)",
            format_index(i + 1),
            report.access,
            report.locale,
            report.output_path.display(),
            report.url_count
        ));
    }
    lines
}

/// Print check output to stdout.
pub fn print_check_output(reports: &[VariantReport]) {
    for line in format_check_output(reports) {
        println!("{}", line);
    }
}
