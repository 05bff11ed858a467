//! Output rendering for check, convention and license commands.
//!
//! Supports `human` (default) and `json` outputs. The human check report is
//! the plain text of [`CheckResult::render`]; it is never colorized because
//! scripts scrape it.

use crate::models::{CheckResult, Convention, License};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

const SEPARATOR_WIDTH: usize = 60;

pub fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if use_colors("human") {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if use_colors("human") {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

/// Print check reports in the requested format, in the given order.
pub fn print_checks(results: &[CheckResult], output: &str) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_check_json(results)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", error_prefix(), e),
        },
        _ => {
            for (i, res) in results.iter().enumerate() {
                if i > 0 {
                    println!("\n{}\n", "-".repeat(SEPARATOR_WIDTH));
                }
                res.print();
            }
        }
    }
}

/// Compose check JSON (pure) for testing purposes.
pub fn compose_check_json(results: &[CheckResult]) -> JsonVal {
    let summary = json!({
        "conventions": results.len(),
        "failed": results.iter().filter(|r| r.has_failures()).count(),
        "passed": results.iter().map(|r| r.pass_count()).sum::<usize>(),
        "failures": results.iter().map(|r| r.fail_count()).sum::<usize>(),
        "warnings": results.iter().map(|r| r.warn_count()).sum::<usize>(),
        "skipped": results.iter().map(|r| r.skip_count()).sum::<usize>(),
    });
    json!({"results": results, "summary": summary})
}

pub fn print_conventions(conventions: &[Convention]) {
    for c in conventions {
        c.print();
    }
}

/// Unknown convention name, followed by the names `check` accepts.
pub fn render_not_found(name: &str, conventions: &[Convention]) -> String {
    let mut out = format!("convention '{}' not found\n\nAvailable conventions:\n", name);
    for c in conventions {
        out.push_str(&format!("  - {}\n", c.name));
    }
    out
}

pub fn print_not_found(name: &str, conventions: &[Convention]) {
    print!("{}", render_not_found(name, conventions));
}

pub fn print_license_summaries<'a>(licenses: impl IntoIterator<Item = &'a License>) {
    let color = use_colors("human");
    for l in licenses {
        if color {
            println!("{}", l.render().white().bold());
        } else {
            println!("{}", l.render());
        }
    }
}

pub fn print_license_details(license: &License) {
    print!("{}", license.render_details(use_colors("human")));
}
